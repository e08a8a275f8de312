//! Cart store error types.

use rocket_cache::CacheError;
use rocket_commerce::{CommerceError, ProductId};
use rocket_data::FetchError;
use thiserror::Error;

/// Why a cart operation was rejected.
///
/// Every rejection leaves the cart exactly as it was.
#[derive(Error, Debug)]
pub enum CartError {
    /// The catalog has no such product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// The stock service reports fewer units than requested.
    #[error("Out of stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Amounts below 1 are not accepted.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// The product was added by another operation in the meantime.
    #[error("Product already in cart: {0}")]
    AlreadyInCart(ProductId),

    /// Arithmetic overflow while pricing the cart.
    #[error("Arithmetic overflow in cart totals")]
    Overflow,

    /// A catalog or stock fetch failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The durable slot could not be written.
    #[error("Storage failed: {0}")]
    Storage(#[from] CacheError),
}

impl CartError {
    /// True for rejections caused by insufficient stock.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }
}

impl From<CommerceError> for CartError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::AlreadyInCart(id) => CartError::AlreadyInCart(id),
            CommerceError::ItemNotInCart(id) => CartError::NotInCart(id),
            CommerceError::InvalidQuantity(amount) => CartError::InvalidAmount(amount),
            CommerceError::Overflow => CartError::Overflow,
        }
    }
}

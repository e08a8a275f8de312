//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by pure cart manipulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product is already in the cart.
    #[error("Product already in cart: {0}")]
    AlreadyInCart(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

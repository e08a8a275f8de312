//! CLI commands.

pub mod cart;
pub mod products;

/// How a command finished when it did not error outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Done,
    /// The cart refused the operation. The shopper has already been told why.
    Rejected,
}

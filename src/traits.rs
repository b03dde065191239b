use crate::error::DiffError;

/// Polled from the search loops so a long scan can be stopped from outside.
pub trait Interrupt {
    fn check(&self) -> Result<(), DiffError>;
}

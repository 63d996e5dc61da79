mod atoms;
mod cents;

pub mod op;

pub use atoms::{Atoms, ATOMS_PER_COIN, SETTLEMENT_CURRENCY_CODE};
pub use cents::{cents_as_dollars, Cents, CentsConversionError, BASE_CURRENCY_CODE};

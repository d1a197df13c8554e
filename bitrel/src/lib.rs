pub mod bits;
pub use bits::{BitString, MAX_SITES};

pub mod error;
pub use error::{Error, Result};

pub mod matrix;
pub use matrix::{BoolMatrix, boolean_multiply, booleanize};

#[cfg(feature = "serde")]
mod serde;

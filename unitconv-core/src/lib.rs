//! unitconv Core - Fundamental types
//!
//! This crate provides the core types used throughout unitconv:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `UnitError`: Structured errors for tool consumers
//! - `parse_number`: Numeric input parsing shared by every entry point

mod number;
mod value;
mod error;

pub use number::{parse_number, ensure_finite, NumberError};
pub use value::Value;
pub use error::{UnitError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, UnitError};
    pub use crate::error::codes;
}

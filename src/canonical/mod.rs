//! Canonical Module
//!
//! Order-insensitive byte encoding of structured tool input.

mod encoder;
mod value;

#[cfg(test)]
mod property_tests;

pub use encoder::encode;
pub use value::CanonicalValue;

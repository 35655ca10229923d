//! Shared value types.

mod colour;

pub use colour::Colour;

//! Core types for Cuppa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod seats;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CoffeePrice, PriceError};
pub use seats::{SeatsBucket, SeatsBucketError};

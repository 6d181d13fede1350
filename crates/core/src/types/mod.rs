//! Core types for Sable Atelier.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{LineKey, VariantId};
pub use price::{Currency, CurrencyError, Price};

//! Sable Core - Shared types library.
//!
//! This crate provides the domain types shared by the Sable Atelier
//! storefront components:
//! - `storefront` - Public-facing e-commerce site
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The cart
//! aggregate here is the single source of truth for cart arithmetic: item
//! counts and totals are always derived from the line list, never stored,
//! so every view renderer projects the same state.
//!
//! # Modules
//!
//! - [`cart`] - The cart aggregate and its line items
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartItem};
pub use types::*;

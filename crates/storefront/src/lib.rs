//! Sable Atelier storefront library.
//!
//! Exposes the storefront as a library so the router can be exercised from
//! integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod shop;
pub mod state;
pub mod ui;

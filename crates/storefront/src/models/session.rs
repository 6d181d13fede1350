//! Session-stored values.
//!
//! The session carries only two things: the platform cart cookie token that
//! identifies this browser's cart, and the access-gate flag.

/// Session keys.
pub mod keys {
    /// Key for the platform `cart` cookie token.
    pub const CART_TOKEN: &str = "cart_token";

    /// Key for the access-gate flag, set after a correct code entry.
    pub const GATE_PASSED: &str = "gate_passed";
}

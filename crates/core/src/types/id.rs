//! Newtype identifiers for cart and catalog entities.
//!
//! The platform addresses a purchasable configuration by a numeric variant
//! ID and a cart line by an opaque composite key (variant plus line-level
//! attributes). Keeping them as distinct types prevents mixing the two.

use serde::{Deserialize, Serialize};

/// Numeric ID of a purchasable product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(u64);

impl VariantId {
    /// Create a new variant ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<VariantId> for u64 {
    fn from(id: VariantId) -> Self {
        id.0
    }
}

/// Opaque key of a single cart line.
///
/// Assigned by the platform; treated as an opaque string on our side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineKey(String);

impl LineKey {
    /// Create a line key from its string form.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LineKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for LineKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

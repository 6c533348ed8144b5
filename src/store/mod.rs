pub mod disk;
pub mod memory;

use crate::core::error::Result;
use std::fmt;

pub use disk::DiskTokenStore;
pub use memory::MemoryTokenStore;

/// An opaque bearer token proving an authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Holder of the single active credential for this process.
///
/// Every outgoing request reads it; writes are rare (login, logout, 401) and
/// last-write-wins.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<Credential>;
    fn set(&self, credential: Credential) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

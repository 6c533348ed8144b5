use super::{Credential, TokenStore};
use crate::core::error::{ApiError, Result};
use std::sync::RwLock;
use tracing::debug;

/// In-process token slot, lost when the process exits.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Credential> {
        match self.slot.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, credential: Credential) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| ApiError::Store(e.to_string()))?;
        debug!("Token SET");
        *slot = Some(credential);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| ApiError::Store(e.to_string()))?;
        debug!("Token CLEAR");
        *slot = None;
        Ok(())
    }
}

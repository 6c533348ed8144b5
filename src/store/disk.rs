use super::{Credential, TokenStore};
use crate::core::error::{ApiError, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::{debug, warn};

const PARTITION: &str = "session";
const TOKEN_KEY: &str = "token";

/// Token slot persisted in a fjall keyspace so a login survives restarts.
pub struct DiskTokenStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskTokenStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path).map_err(|e| ApiError::Store(e.to_string()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .map_err(|e| ApiError::Store(e.to_string()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .map_err(|e| ApiError::Store(e.to_string()))?;
        debug!("Opened token store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|e| ApiError::Store(e.to_string()))
    }
}

impl TokenStore for DiskTokenStore {
    fn get(&self) -> Option<Credential> {
        match self.partition.get(TOKEN_KEY) {
            Ok(Some(value)) => match String::from_utf8(value.to_vec()) {
                Ok(token) => Some(Credential::new(token)),
                Err(e) => {
                    warn!("Stored token is not valid UTF-8, ignoring it: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Token store read error, sending request without credential: {}", e);
                None
            }
        }
    }

    fn set(&self, credential: Credential) -> Result<()> {
        self.partition
            .insert(TOKEN_KEY, credential.as_str().as_bytes())
            .map_err(|e| ApiError::Store(e.to_string()))?;
        debug!("Token SET");
        self.persist()
    }

    fn clear(&self) -> Result<()> {
        self.partition
            .remove(TOKEN_KEY)
            .map_err(|e| ApiError::Store(e.to_string()))?;
        debug!("Token CLEAR");
        self.persist()
    }
}

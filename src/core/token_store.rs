// src/core/token_store.rs
//! Persisted admin credential, the CLI's counterpart of browser local storage

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::api::CapabilityToken;
use crate::error::{ClientError, Result};

/// Fixed key the credential is stored under.
pub const TOKEN_KEY: &str = "njp_admin_key";

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. A missing file means no token.
    pub fn load(&self) -> Result<Option<CapabilityToken>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let entries = self.read_entries()?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(|value| CapabilityToken::new(value.clone())))
    }

    pub fn save(&self, token: &CapabilityToken) -> Result<()> {
        let mut entries = if self.path.exists() {
            self.read_entries()?
        } else {
            BTreeMap::new()
        };
        entries.insert(TOKEN_KEY.to_string(), token.expose().to_string());
        self.write_entries(&entries)?;

        app_log!(info, "Stored admin credential in {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
            app_log!(info, "Removed admin credential from {}", self.path.display());
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ClientError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClientError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = toml::to_string(entries)
            .map_err(|e| ClientError::Storage(format!("Failed to encode state: {}", e)))?;
        std::fs::write(&self.path, content).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

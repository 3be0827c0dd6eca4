//! API keys: generated secrets scoped to a permission set

use chrono::{Duration, Utc};

use crate::console::{matches_term, new_id, Console};
use crate::constants::{API_KEY_BYTES, API_KEY_PREFIX, MAX_RATE_LIMIT, MIN_RATE_LIMIT};
use crate::error::{Error, Result};
use crate::models::{ApiKey, KeyExpiry, NewApiKey};
use crate::selection::PermissionSet;
use crate::template::RoleTemplate;

/// Generate a key secret: prefix plus 16 random bytes, hex encoded
pub fn generate_key() -> Result<String> {
    let mut bytes = [0u8; API_KEY_BYTES];
    getrandom::getrandom(&mut bytes).map_err(|e| Error::Random(e.to_string()))?;
    Ok(format!("{API_KEY_PREFIX}{}", hex::encode(bytes)))
}

mod hex {
    pub fn encode(data: impl AsRef<[u8]>) -> String {
        data.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Console<'_> {
    pub fn api_keys(&self) -> &[ApiKey] {
        &self.api_keys
    }

    pub fn api_key(&self, id: &str) -> Result<&ApiKey> {
        self.api_keys
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| Error::not_found("api key", id))
    }

    /// Every scope a key can be granted ("select all")
    pub fn all_scopes(&self) -> PermissionSet {
        RoleTemplate::Admin.resolve(self.catalog)
    }

    pub fn create_api_key(&mut self, new: NewApiKey) -> Result<&ApiKey> {
        if new.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        if !(MIN_RATE_LIMIT..=MAX_RATE_LIMIT).contains(&new.rate_limit) {
            return Err(Error::InvalidRateLimit(new.rate_limit));
        }
        let unknown = self.catalog.unknown_ids(&new.scopes);
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "api key scopes outside the catalog");
        }
        let now = Utc::now();
        let expires_at = match new.expires_in {
            KeyExpiry::Never => None,
            KeyExpiry::Days(d) => Some(
                Duration::try_days(i64::from(d))
                    .and_then(|span| now.checked_add_signed(span))
                    .ok_or(Error::InvalidExpiry(d))?,
            ),
        };
        let key = ApiKey {
            id: new_id(),
            name: new.name,
            key: generate_key()?,
            user_id: new.user_id,
            scopes: new.scopes,
            expires_at,
            last_used: None,
            is_active: true,
            rate_limit: Some(new.rate_limit),
            created_at: now,
        };
        tracing::info!(id = %key.id, scopes = key.scopes.len(), "api key created");
        self.api_keys.push(key);
        Ok(&self.api_keys[self.api_keys.len() - 1])
    }

    /// Flip the active flag; returns the new value
    pub fn toggle_api_key(&mut self, id: &str) -> Result<bool> {
        let key = self
            .api_keys
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| Error::not_found("api key", id))?;
        key.is_active = !key.is_active;
        tracing::info!(id, active = key.is_active, "api key toggled");
        Ok(key.is_active)
    }

    pub fn delete_api_key(&mut self, id: &str) -> Result<ApiKey> {
        let idx = self
            .api_keys
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| Error::not_found("api key", id))?;
        tracing::info!(id, "api key deleted");
        Ok(self.api_keys.remove(idx))
    }

    pub fn search_api_keys(&self, term: &str) -> Vec<&ApiKey> {
        self.api_keys.iter().filter(|k| matches_term(&k.name, term)).collect()
    }
}

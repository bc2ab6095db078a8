//! Token cookie storage.
//!
//! The access token is the only piece of client state that survives a
//! restart. It is kept as a single cookie-style record: path `/`,
//! `SameSite=Strict`, `Secure`, expiry equal to the token's own decoded
//! expiry. Storing a new token overwrites the record; logout, expiry,
//! or a failed decode all end with the record removed.
//!
//! Views never touch the filesystem directly - they go through the
//! [`TokenStore`] trait, which also lets tests substitute an in-memory
//! store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::token;

/// Cookie file name in the application data directory
const COOKIE_FILE: &str = "cookies.json";

/// Name of the token cookie
const TOKEN_COOKIE_NAME: &str = "token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: DateTime<Utc>,
    pub same_site: String,
    pub secure: bool,
}

impl TokenCookie {
    fn new(value: String, expires: DateTime<Utc>) -> Self {
        Self {
            name: TOKEN_COOKIE_NAME.to_string(),
            value,
            path: "/".to_string(),
            expires,
            same_site: "Strict".to_string(),
            secure: true,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires
    }
}

/// Abstraction over wherever the token cookie lives.
///
/// `read` never fails: I/O or parse trouble degrades to "no token",
/// which every caller already handles as "must log in again".
pub trait TokenStore: Send + Sync {
    /// Persist the token, overwriting any previous one. The record's
    /// expiry is the token's own decoded expiry, so an undecodable
    /// token cannot be stored.
    fn store(&self, token: &str) -> Result<()>;

    /// Current token value, or `None` if absent or past its expiry.
    fn read(&self) -> Option<String>;

    /// Remove the token record immediately.
    fn clear(&self) -> Result<()>;
}

/// Disk-backed store keeping the cookie record as a JSON file.
pub struct CookieFile {
    dir: PathBuf,
}

impl CookieFile {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn cookie_path(&self) -> PathBuf {
        self.dir.join(COOKIE_FILE)
    }
}

impl TokenStore for CookieFile {
    fn store(&self, token: &str) -> Result<()> {
        let expires = token::decode_expiry(token)
            .context("Refusing to store a token without a decodable expiry")?;
        let cookie = TokenCookie::new(token.to_string(), expires);

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let contents = serde_json::to_string_pretty(&cookie)?;
        std::fs::write(self.cookie_path(), contents).context("Failed to write cookie file")?;
        debug!(expires = %expires, "Token cookie stored");
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let path = self.cookie_path();
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to read cookie file");
                return None;
            }
        };

        let cookie: TokenCookie = match serde_json::from_str(&contents) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Cookie file is malformed, ignoring it");
                return None;
            }
        };

        if cookie.is_expired() {
            // The record outlived its own expiry; drop it like a
            // browser would
            debug!("Token cookie has expired");
            let _ = std::fs::remove_file(&path);
            return None;
        }

        Some(cookie.value)
    }

    fn clear(&self) -> Result<()> {
        let path = self.cookie_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove cookie file")?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[cfg(test)]
pub struct MemoryTokenStore {
    cookie: std::sync::Mutex<Option<TokenCookie>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            cookie: std::sync::Mutex::new(None),
        }
    }

    /// Insert a record directly, bypassing the decode-on-store rule.
    /// Lets tests stage malformed or already-expired cookies.
    pub fn set_raw(&self, value: &str, expires: DateTime<Utc>) {
        *self.cookie.lock().unwrap() = Some(TokenCookie::new(value.to_string(), expires));
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn store(&self, token: &str) -> Result<()> {
        let expires = token::decode_expiry(token)
            .context("Refusing to store a token without a decodable expiry")?;
        *self.cookie.lock().unwrap() = Some(TokenCookie::new(token.to_string(), expires));
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let mut guard = self.cookie.lock().unwrap();
        match guard.as_ref() {
            Some(cookie) if cookie.is_expired() => {
                *guard = None;
                None
            }
            Some(cookie) => Some(cookie.value.clone()),
            None => None,
        }
    }

    fn clear(&self) -> Result<()> {
        *self.cookie.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::tests::make_token;
    use chrono::Duration;

    #[test]
    fn test_cookie_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieFile::new(dir.path().to_path_buf());

        let token = make_token(Duration::minutes(30));
        store.store(&token).unwrap();
        assert_eq!(store.read(), Some(token));
    }

    #[test]
    fn test_cookie_file_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieFile::new(dir.path().to_path_buf());

        store.store(&make_token(Duration::minutes(30))).unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_cookie_file_read_never_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieFile::new(dir.path().to_path_buf());

        // Nothing stored yet
        assert_eq!(store.read(), None);

        // Malformed file on disk
        std::fs::write(dir.path().join(COOKIE_FILE), "not json").unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_store_overwrites_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieFile::new(dir.path().to_path_buf());

        let first = make_token(Duration::minutes(5));
        let second = make_token(Duration::minutes(60));
        store.store(&first).unwrap();
        store.store(&second).unwrap();
        assert_eq!(store.read(), Some(second));
    }

    #[test]
    fn test_store_rejects_undecodable_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieFile::new(dir.path().to_path_buf());

        assert!(store.store("garbage").is_err());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_expired_record_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieFile::new(dir.path().to_path_buf());

        let cookie = TokenCookie::new("stale".to_string(), Utc::now() - Duration::minutes(1));
        std::fs::write(
            dir.path().join(COOKIE_FILE),
            serde_json::to_string(&cookie).unwrap(),
        )
        .unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = TokenCookie::new("value".to_string(), Utc::now() + Duration::minutes(30));
        assert_eq!(cookie.name, "token");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.same_site, "Strict");
        assert!(cookie.secure);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        let token = make_token(Duration::minutes(30));
        store.store(&token).unwrap();
        assert_eq!(store.read(), Some(token));
        store.clear().unwrap();
        assert_eq!(store.read(), None);
    }
}

//! Session Store
//!
//! Holds the signed-in identity and mirrors it into local key-value storage
//! so it survives restarts. Credentials are mocked: one demo account signs
//! in, and sign-up fabricates a fresh identity for any well-formed form.
//!
//! Shared between views by `Arc` handle; state guarded by Tokio's async
//! RwLock.

use crate::session::error::{AuthError, AuthResult};
use crate::session::types::Session;
use crate::session::validation::{SignUpForm, SignUpValidator};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;

/// Storage key the serialized session is kept under
pub const SESSION_KEY: &str = "mock_user";

/// Identifiers accepted for the demo account
pub const DEMO_IDENTIFIERS: [&str; 2] = ["ankit", "ankit@example.com"];

/// Secret of the demo account
pub const DEMO_SECRET: &str = "12345678";

/// Runtime settings for the session store
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Storage key for the serialized session
    pub storage_key: String,
    /// Simulated delay before sign-in resolves
    pub sign_in_latency: Duration,
    /// Simulated delay before sign-up resolves
    pub sign_up_latency: Duration,
    /// Simulated delay before sign-out resolves
    pub sign_out_latency: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: SESSION_KEY.to_string(),
            sign_in_latency: Duration::from_millis(500),
            sign_up_latency: Duration::from_millis(500),
            sign_out_latency: Duration::from_millis(200),
        }
    }
}

impl SessionConfig {
    /// Same key, no simulated latency
    pub fn instant() -> Self {
        Self {
            sign_in_latency: Duration::ZERO,
            sign_up_latency: Duration::ZERO,
            sign_out_latency: Duration::ZERO,
            ..Default::default()
        }
    }
}

/// The current-identity store
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
    validator: SignUpValidator,
    config: SessionConfig,
}

impl SessionStore {
    /// Create the store and restore any session persisted by a previous run
    pub fn open(storage: Arc<dyn KeyValueStore>, config: SessionConfig) -> AuthResult<Self> {
        let restored = Self::restore(storage.as_ref(), &config.storage_key);

        match &restored {
            Some(session) => tracing::info!(user_id = %session.user_id, "Restored session"),
            None => tracing::debug!("No persisted session"),
        }

        Ok(Self {
            storage,
            current: RwLock::new(restored),
            validator: SignUpValidator::new()?,
            config,
        })
    }

    /// Read the persisted session once. Unreadable blobs are dropped.
    fn restore(storage: &dyn KeyValueStore, key: &str) -> Option<Session> {
        let blob = match storage.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&blob) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Discarding corrupt persisted session: {}", e);
                if let Err(e) = storage.delete(key) {
                    tracing::warn!("Failed to remove corrupt session: {}", e);
                }
                None
            }
        }
    }

    /// Currently signed-in identity, if any
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Sign in with the demo credentials
    pub async fn sign_in(&self, identifier: &str, secret: &str) -> AuthResult<Session> {
        tokio::time::sleep(self.config.sign_in_latency).await;

        // Compared as typed, no trimming
        if !DEMO_IDENTIFIERS.contains(&identifier) || secret != DEMO_SECRET {
            tracing::info!(identifier, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::demo().email(identifier);
        self.establish(session.clone()).await?;

        tracing::info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    /// Validate the form and fabricate a new identity for it
    pub async fn sign_up(&self, form: &SignUpForm) -> AuthResult<Session> {
        self.validator.validate(form)?;

        tokio::time::sleep(self.config.sign_up_latency).await;

        let session = Session::new(uuid::Uuid::new_v4().to_string())
            .email(form.email.trim())
            .full_name(form.full_name.trim())
            .mobile_number(form.mobile_number.trim());
        self.establish(session.clone()).await?;

        tracing::info!(user_id = %session.user_id, email = %form.email.trim(), "Signed up");
        Ok(session)
    }

    /// Clear the persisted and in-memory session. The in-memory session is
    /// kept if the persisted one cannot be deleted.
    pub async fn sign_out(&self) -> AuthResult<()> {
        tokio::time::sleep(self.config.sign_out_latency).await;

        let mut current = self.current.write().await;
        self.storage.delete(&self.config.storage_key)?;
        let previous = current.take();

        if let Some(session) = previous {
            tracing::info!(user_id = %session.user_id, "Signed out");
        }
        Ok(())
    }

    async fn establish(&self, session: Session) -> AuthResult<()> {
        let blob = serde_json::to_string(&session)?;
        self.storage.set(&self.config.storage_key, &blob)?;
        *self.current.write().await = Some(session);
        Ok(())
    }
}

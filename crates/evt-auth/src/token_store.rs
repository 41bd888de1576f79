use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use evt_config::SessionConfig;

use crate::error::AuthError;

/// Persistence for the raw token string of one tab.
///
/// Implementations treat empty or whitespace-only content as no token.
pub trait TokenStorage: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the backing store exists but
    /// cannot be read.
    fn load(&self) -> Result<Option<String>, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the token cannot be written.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if an existing token cannot be removed.
    fn clear(&self) -> Result<(), AuthError>;
}

/// One token file per tab, `<state_dir>/sessions/<tab>.token`.
///
/// The parent directory is created `0700` and the file `0600` on unix.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no state directory can be resolved.
    pub fn from_config(config: &SessionConfig) -> Result<Self, AuthError> {
        config.token_file().map(Self::new).ok_or_else(|| {
            AuthError::TokenStoreError(
                "state directory not found; set EVT_SESSION__STATE_DIR".into(),
            )
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string()).filter(|s| !s.is_empty())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&self.path, token).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        tracing::debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "failed to delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Process-local storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, AuthError> {
        self.token
            .lock()
            .map_err(|_| AuthError::TokenStoreError("memory token store poisoned".into()))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, AuthError> {
        Ok(self.lock()?.clone().filter(|s| !s.trim().is_empty()))
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.lock()? = None;
        Ok(())
    }
}

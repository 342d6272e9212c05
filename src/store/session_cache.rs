//! On-disk session token.
//!
//! A browser keeps the token for the life of a tab; the CLI keeps it in a
//! small file so consecutive invocations count as one session.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::predboard_home;
use crate::error::AppError;
use crate::utils::{SessionScheme, debug_log};

pub(crate) struct SessionCache {
    path: Option<PathBuf>,
}

impl SessionCache {
    /// `$PREDBOARD_HOME/session`, else `~/.cache/predboard/session`
    pub(crate) fn default_location() -> Self {
        let path = match predboard_home() {
            Some(home) => Some(home.join("session")),
            None => dirs::home_dir().map(|home| home.join(".cache").join("predboard").join("session")),
        };
        Self { path }
    }

    #[cfg(test)]
    pub(crate) fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let raw = fs::read_to_string(path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        debug_log!("session token loaded from {}", path.display());
        Some(token.to_string())
    }

    pub(crate) fn save(&self, token: &str) -> Result<(), AppError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let cache_err = |source| AppError::SessionCache {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(cache_err)?;
        }
        fs::write(path, format!("{token}\n")).map_err(cache_err)
    }

    /// Cached token, or a freshly generated one. The flag is `true` when the
    /// token is new and has not been written yet.
    pub(crate) fn load_or_generate(&self, scheme: SessionScheme) -> (String, bool) {
        match self.load() {
            Some(token) => (token, false),
            None => (scheme.generate(), true),
        }
    }
}

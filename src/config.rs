use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{ENV_HOME, ENV_KEY, ENV_URL};
use crate::utils::SessionScheme;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Base URL of the hosted database, e.g. https://xyz.supabase.co
    #[serde(default)]
    pub(crate) url: Option<String>,
    /// Anonymous access key
    #[serde(default)]
    pub(crate) key: Option<String>,
    /// Timeline start (YYYY-MM-DD)
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Timeline end (YYYY-MM-DD)
    #[serde(default)]
    pub(crate) end: Option<String>,
    #[serde(default)]
    pub(crate) width: Option<f64>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) session_scheme: Option<SessionScheme>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

/// `PREDBOARD_HOME`, when set and non-empty
pub(crate) fn predboard_home() -> Option<PathBuf> {
    std::env::var_os(ENV_HOME)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl Config {
    pub(crate) fn load() -> Self {
        Self::load_internal(false)
    }

    pub(crate) fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        let mut config = Self::from_first_readable(&Self::get_config_paths(), quiet);
        config.apply_env(
            std::env::var(ENV_URL).ok().as_deref(),
            std::env::var(ENV_KEY).ok().as_deref(),
        );
        config
    }

    fn from_first_readable(paths: &[PathBuf], quiet: bool) -> Self {
        for path in paths {
            if let Some(config) = Self::read(path, quiet) {
                return config;
            }
        }
        Self::default()
    }

    fn read(path: &Path, quiet: bool) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                if !quiet {
                    eprintln!("Loaded config from {}", path.display());
                }
                Some(config)
            }
            Err(e) => {
                if !quiet {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                }
                None
            }
        }
    }

    /// Environment wins over the file
    fn apply_env(&mut self, url: Option<&str>, key: Option<&str>) {
        if let Some(url) = url.filter(|v| !v.trim().is_empty()) {
            self.url = Some(url.trim().to_string());
        }
        if let Some(key) = key.filter(|v| !v.trim().is_empty()) {
            self.key = Some(key.trim().to_string());
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        // An explicit home replaces the user-level search entirely
        if let Some(home) = predboard_home() {
            return vec![home.join("config.toml")];
        }

        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/predboard/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("predboard").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support/predboard/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("predboard").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.predboard.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".predboard.toml"));
        }

        paths
    }
}

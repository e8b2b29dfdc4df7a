use crate::config::types::{
    ConfigFile, ConfigOverrides, DEFAULT_DEPTH, LoggingConfig, Profile, ResolvedConfig,
    SearchConfig,
};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("vault root does not exist or is not a directory: {0}")]
    MissingVaultRoot(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration and merge command-line overrides on top of it.
    ///
    /// An explicit `config_path` must exist. Without one, the default location
    /// is read when present and built-in defaults are used otherwise.
    pub fn load(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<ResolvedConfig, ConfigError> {
        let file = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                Some(read_config_file(p)?)
            }
            None => {
                let p = default_config_path();
                if p.exists() {
                    Some(read_config_file(&p)?)
                } else {
                    debug!(path = %p.display(), "no config file, using defaults");
                    None
                }
            }
        };

        let (active, profile) = match &file {
            Some(cf) => {
                let active = overrides
                    .profile
                    .clone()
                    .or(cf.profile.clone())
                    .unwrap_or_else(|| "default".to_string());
                let prof = cf
                    .profiles
                    .get(&active)
                    .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;
                (Some(active), Some(prof))
            }
            None => {
                if let Some(name) = &overrides.profile {
                    return Err(ConfigError::ProfileNotFound(name.clone()));
                }
                (None, None)
            }
        };

        let search = file.as_ref().map(|cf| cf.search).unwrap_or_default();
        let logging = file.as_ref().map(|cf| cf.logging.clone()).unwrap_or_default();

        Self::resolve(active, profile, overrides, search, &logging)
    }

    fn resolve(
        active: Option<String>,
        prof: Option<&Profile>,
        overrides: &ConfigOverrides,
        search: SearchConfig,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let raw_root = match (&overrides.vault_path, prof) {
            (Some(p), _) => expand_path(&p.to_string_lossy())?,
            (None, Some(prof)) => expand_path(&prof.vault_root)?,
            (None, None) => home_dir().ok_or(ConfigError::NoHome)?,
        };

        let vault_root = raw_root
            .canonicalize()
            .ok()
            .filter(|p| p.is_dir())
            .ok_or_else(|| ConfigError::MissingVaultRoot(raw_root.display().to_string()))?;

        let sub = |s: &str| s.replace("{{vault_root}}", &vault_root.to_string_lossy());

        let output_dir = match prof.and_then(|p| p.output_dir.as_deref()) {
            Some(dir) => expand_path(&sub(dir))?,
            None => vault_root.join("temp"),
        };

        let excluded_folders = prof
            .map(|p| {
                p.excluded_folders
                    .iter()
                    .map(|f| {
                        let path = PathBuf::from(sub(f));
                        match path.strip_prefix(&vault_root) {
                            Ok(rel) => rel.to_path_buf(),
                            Err(_) => path,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let depth = overrides
            .depth
            .or(prof.and_then(|p| p.depth))
            .unwrap_or(DEFAULT_DEPTH);

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            let expanded_file = expand_path(&sub(&file.to_string_lossy()))?;
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expanded_file),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig {
            active_profile: active,
            vault_root,
            output_dir,
            depth,
            excluded_folders,
            search,
            logging,
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let s = fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

    let cf: ConfigFile = toml::from_str(&s)
        .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

    if cf.version != 1 {
        return Err(ConfigError::BadVersion(cf.version));
    }
    if cf.profiles.is_empty() {
        return Err(ConfigError::NoProfiles);
    }
    Ok(cf)
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("obs2prompt").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("obs2prompt").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}

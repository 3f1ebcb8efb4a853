use crate::core::classifier::Classifier;
use crate::errors::{AppError, AppResult};
use crate::models::{CapabilitySet, Role};
use crate::utils::date::WeekStart;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_role_order")]
    pub role_order: Vec<Role>,
    #[serde(default = "default_covering_role")]
    pub covering_role: Role,
    #[serde(default = "default_override_tokens")]
    pub override_tokens: Vec<String>,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default = "default_fallback_width")]
    pub fallback_width: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_role_order() -> Vec<Role> {
    vec![Role::Supervisor, Role::Police, Role::Security]
}
fn default_covering_role() -> Role {
    Role::Police
}
pub fn default_override_tokens() -> Vec<String> {
    ["7A7P", "7P7A", "11A7P", "11P7A", "7A3P", "3P11P"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}
fn default_fallback_width() -> usize {
    4
}
fn default_placeholder() -> String {
    "*".to_string()
}
fn default_capabilities() -> Vec<String> {
    vec!["scheduling-edit".to_string(), "employee-admin".to_string()]
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            role_order: default_role_order(),
            covering_role: default_covering_role(),
            override_tokens: default_override_tokens(),
            week_start: WeekStart::default(),
            fallback_width: default_fallback_width(),
            placeholder: default_placeholder(),
            capabilities: default_capabilities(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rshiftboard")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rshiftboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rshiftboard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rshiftboard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if self.fallback_width == 0 {
            return Err(AppError::Config(
                "fallback_width must be at least 1".to_string(),
            ));
        }
        if self.placeholder.chars().count() != 1 {
            return Err(AppError::Config(format!(
                "placeholder must be a single character, got '{}'",
                self.placeholder
            )));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Classifier configured with this file's override tokens and fallback.
    pub fn classifier(&self) -> Classifier {
        let placeholder = self.placeholder.chars().next().unwrap_or('*');
        Classifier::new(&self.override_tokens, self.fallback_width, placeholder)
    }

    pub fn capability_set(&self) -> CapabilitySet {
        CapabilitySet::from_names(&self.capabilities)
    }

    /// Initialize configuration and database paths. Returns the database path.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rshiftboard.sqlite")
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Self::with_database(db_path.clone());
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

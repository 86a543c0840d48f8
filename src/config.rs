use crate::gateway::{AcquireOptions, FailurePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub query_timeout_secs: Option<u64>,
    #[serde(default)]
    pub on_query_error: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            query_timeout_secs: None,
            on_query_error: FailurePolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать файл конфигурации {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("не удалось разобрать YAML в {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("ошибка валидации конфигурации: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        Self::parse(&text, path_display)
    }

    /// Like [`Config::load_from_file`], but a file that does not exist means
    /// "use the defaults".
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        match fs::read_to_string(path_ref) {
            Ok(text) => Self::parse(&text, path_ref.display().to_string()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path_ref.display().to_string(),
                source,
            }),
        }
    }

    fn parse(text: &str, path: String) -> Result<Self, ConfigError> {
        // An empty file is valid YAML for "nothing set".
        let cfg: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Parse { path, source })?
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation(
                "поле output не должно быть пустым".to_string(),
            ));
        }
        if self.query_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "query_timeout_secs должно быть >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn acquire_options(&self) -> AcquireOptions {
        AcquireOptions {
            policy: self.on_query_error,
            query_timeout: self.query_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn default_output() -> String {
    "full_pc_report.txt".to_string()
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};
use crate::view::Policy;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    #[serde(default)]
    pub hide_unused_tags: bool,
    #[serde(default)]
    pub reset_detail_on_search: bool,
    #[serde(default = "default_tag_panel_width")]
    pub tag_panel_width_percent: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hide_unused_tags: false,
            reset_detail_on_search: false,
            tag_panel_width_percent: default_tag_panel_width(),
        }
    }
}

impl UiConfig {
    pub fn policy(&self) -> Policy {
        Policy {
            hide_unused_tags: self.hide_unused_tags,
            reset_detail_on_search: self.reset_detail_on_search,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Relative paths resolve against the config directory.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KeybindingsConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            bindings: HashMap::new(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api/v1".into()
}

fn default_tag_panel_width() -> u8 {
    25
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tagdo.log")
}

fn default_preset() -> String {
    "vim".into()
}

const HEADER: &str = "# tagdo configuration\n\
# Every key can also be set through the environment, e.g. TAGDO_SERVER_BASE_URL.\n\
# keybindings.preset is one of: vim, emacs\n\
# Override single actions under [keybindings.bindings], e.g. quit = \"Ctrl+q\"\n\n";

impl AppConfig {
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("TAGDO_").split("__"))
            .extract()
            .map_err(|e| TodoError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.server.base_url).map_err(|e| {
            TodoError::Config(format!(
                "server.base_url \"{}\" is not a URL: {}",
                self.server.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TodoError::Config(format!(
                "server.base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if !(10..=60).contains(&self.ui.tag_panel_width_percent) {
            return Err(TodoError::Config(format!(
                "ui.tag_panel_width_percent must be between 10 and 60, got {}",
                self.ui.tag_panel_width_percent
            )));
        }
        Ok(())
    }

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(|xdg| PathBuf::from(xdg).join("tagdo"))
            .or_else(|| {
                directories::BaseDirs::new()
                    .map(|dirs| dirs.home_dir().join(".config").join("tagdo"))
            })
    }

    /// Log file location, anchored at `base` when configured as a relative path.
    pub fn log_path(&self, base: &Path) -> PathBuf {
        if self.log.file.is_absolute() {
            self.log.file.clone()
        } else {
            base.join(&self.log.file)
        }
    }

    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(&AppConfig::default())?;
        std::fs::write(path, format!("{}{}", HEADER, body))?;
        Ok(())
    }
}

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::locale::Locale;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost";
pub const DEFAULT_NOTES_PATH: &str = "/service/notes.php";
pub const DEFAULT_PROFILE_PATH: &str = "/service/profile.php";
pub const API_URL_ENV: &str = "STICKYWALL_API_URL";
pub const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct GeneralConfig {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_notes_path")]
    pub notes_path: String,
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    /// Unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_notes_path() -> String {
    DEFAULT_NOTES_PATH.to_string()
}

fn default_profile_path() -> String {
    DEFAULT_PROFILE_PATH.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            notes_path: default_notes_path(),
            profile_path: default_profile_path(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn notes_url(&self) -> String {
        join_url(&self.base_url, &self.notes_path)
    }

    pub fn profile_url(&self) -> String {
        join_url(&self.base_url, &self.profile_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: Color,
    pub foreground: Color,
    pub border_active: Color,
    pub border_inactive: Color,
    pub header: Color,
    pub link_active: Color,
    pub link_inactive: Color,
    pub note_yellow: Color,
    pub note_pink: Color,
    pub note_orange: Color,
    pub note_blue: Color,
    pub note_text: Color,
    pub add_card: Color,
    pub today_bg: Color,
    pub today_fg: Color,
    pub color_ring: Color,
    pub notice_success: Color,
    pub notice_failure: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Rgb(248, 248, 242),
            border_active: Color::Rgb(37, 99, 235),
            border_inactive: Color::Rgb(98, 114, 164),
            header: Color::Rgb(189, 147, 249),
            link_active: Color::Rgb(37, 99, 235),
            link_inactive: Color::Rgb(156, 163, 175),
            note_yellow: Color::Rgb(254, 240, 138),
            note_pink: Color::Rgb(251, 207, 232),
            note_orange: Color::Rgb(254, 215, 170),
            note_blue: Color::Rgb(191, 219, 254),
            note_text: Color::Rgb(17, 24, 39),
            add_card: Color::Rgb(156, 163, 175),
            today_bg: Color::Rgb(37, 99, 235),
            today_fg: Color::White,
            color_ring: Color::Rgb(59, 130, 246),
            notice_success: Color::Rgb(80, 250, 123),
            notice_failure: Color::Rgb(255, 85, 85),
        }
    }
}

pub fn get_config_dir() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".stickywall");
    path
}

pub fn config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Loads `~/.stickywall/config.toml` and applies the env override.
pub fn load_config() -> AppConfig {
    let mut config = load_config_from(&config_path());
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.service.base_url = url;
        }
    }
    config
}

/// Missing files are created with defaults; corrupt ones are moved aside.
pub fn load_config_from(path: &Path) -> AppConfig {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }

    if !path.exists() {
        let default_config = AppConfig::default();
        if let Err(e) = write_config(path, &default_config) {
            crate::logger::log(&format!("Failed to write default config: {}", e));
        }
        return default_config;
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to parse config.toml: {}.", e);
                let backup_path = path.with_extension("toml.bak");
                if let Err(backup_err) = fs::rename(path, &backup_path) {
                    eprintln!("Failed to backup corrupted config: {}", backup_err);
                } else {
                    eprintln!("Corrupted config backed up to {:?}", backup_path);
                }
                eprintln!("Using default configuration.");
                AppConfig::default()
            }
        },
        Err(e) => {
            eprintln!("Failed to read config file: {}. Using default.", e);
            AppConfig::default()
        }
    }
}

pub fn write_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let toml_str = toml::to_string_pretty(config)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(toml_str.as_bytes())?;
    Ok(())
}

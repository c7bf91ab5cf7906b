//! Client configuration at ~/.config/mrbs/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{MrbsError, MrbsResult};
use crate::room::{Room, default_rooms};

static DEFAULT_API_URL: &str = "http://localhost:8080/api";
static DEFAULT_TIMEZONE: &str = "Asia/Singapore";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// session.json next to config.toml.
fn default_session_file() -> PathBuf {
    MrbsConfig::config_dir()
        .map(|dir| dir.join("session.json"))
        .unwrap_or_else(|_| PathBuf::from("session.json"))
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrbsConfig {
    /// Base URL of the booking API, without trailing slash
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// IANA timezone the grid is drawn in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Overrides the built-in room table when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<Room>>,
}

impl Default for MrbsConfig {
    fn default() -> Self {
        MrbsConfig {
            api_url: default_api_url(),
            timezone: default_timezone(),
            request_timeout_secs: default_timeout(),
            session_file: default_session_file(),
            rooms: None,
        }
    }
}

impl MrbsConfig {
    pub fn config_dir() -> MrbsResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| MrbsError::Config("Could not determine config directory".into()))?
            .join("mrbs"))
    }

    pub fn config_path() -> MrbsResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the user's config, writing a commented default on first run.
    pub fn load() -> MrbsResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`, with `MRBS_*` environment variables taking precedence.
    pub fn load_from(path: &Path) -> MrbsResult<Self> {
        let config: MrbsConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("MRBS"))
            .build()
            .map_err(|e| MrbsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MrbsError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> MrbsResult<()> {
        self.tz()?;
        if let Some(rooms) = &self.rooms {
            if rooms.is_empty() {
                return Err(MrbsError::Config("rooms must not be empty when set".into()));
            }
            let mut ids: Vec<u32> = rooms.iter().map(|r| r.room_id).collect();
            ids.sort_unstable();
            ids.dedup();
            if ids.len() != rooms.len() {
                return Err(MrbsError::Config("room_id values must be unique".into()));
            }
        }
        Ok(())
    }

    pub fn tz(&self) -> MrbsResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| MrbsError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Rooms in column order.
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.clone().unwrap_or_else(default_rooms)
    }

    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.session_file.to_string_lossy()).into_owned())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MrbsResult<()> {
        let session_file = default_session_file();
        let session_file = session_file.display();
        let contents = format!(
            "\
# mrbs configuration

# Booking API base URL:
# api_url = \"{DEFAULT_API_URL}\"

# Timezone the daily grid is drawn in:
# timezone = \"{DEFAULT_TIMEZONE}\"

# Seconds to wait for the API before giving up:
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Where the login session is stored:
# session_file = \"{session_file}\"

# Replace the built-in room list (columns appear in this order):
# [[rooms]]
# room_id = 1
# display_name = \"Seminar Room 1\"
# capacity = 50
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
            .map_err(|e| MrbsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Effective settings rendered as TOML.
    pub fn to_toml(&self) -> MrbsResult<String> {
        toml::to_string_pretty(self).map_err(|e| MrbsError::Config(e.to_string()))
    }
}

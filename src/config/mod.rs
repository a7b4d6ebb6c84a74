use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Application configuration.
///
/// Besides the database path this carries the store time settings that the
/// core reads: the daily rollover time, the rounding policy for the
/// scheduled start/end display fields, and the store UTC offset. Missing
/// fields fall back to their defaults so an older or hand-edited config
/// file keeps working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_store")]
    pub default_store: String,
    #[serde(default)]
    pub default_owner: String,
    #[serde(default = "default_rollover")]
    pub day_rollover_time: String,
    #[serde(default)]
    pub rounding_enabled: bool,
    #[serde(default = "default_rounding_method")]
    pub rounding_method: String,
    #[serde(default = "default_granularity")]
    pub rounding_granularity_minutes: i64,
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

fn default_store() -> String {
    "main".to_string()
}
fn default_rollover() -> String {
    "05:00".to_string()
}
fn default_rounding_method() -> String {
    "nearest".to_string()
}
fn default_granularity() -> i64 {
    15
}
fn default_utc_offset() -> i32 {
    9 * 60
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_store: default_store(),
            default_owner: String::new(),
            day_rollover_time: default_rollover(),
            rounding_enabled: false,
            rounding_method: default_rounding_method(),
            rounding_granularity_minutes: default_granularity(),
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".shiftlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A file that fails to read or parse also yields the defaults: store
    /// settings are trusted but may be incomplete, never a hard failure.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            fs::read_to_string(&path)
                .ok()
                .and_then(|content| serde_yaml::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Config::default()
        }
    }

    /// Persist the configuration back to the config file.
    pub fn save(&self) -> io::Result<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            config.save()?;
            println!("Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("Database:    {:?}", db_path);

        Ok(())
    }
}

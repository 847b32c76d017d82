//! Configuration for the analytics stores
//!
//! Paths and retention limits live here so that tests and the report
//! binary can point the stores at any directory.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ANALYTICS_DIR";

/// Configuration shared by the tracker and the feedback collector
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Directory holding all JSON files
    pub data_dir: PathBuf,
    /// File name of the usage (event store) document
    pub usage_file: String,
    /// File name of the feedback document
    pub feedback_file: String,
    /// File name of the contacts document
    pub contacts_file: String,
    /// Session count above which the history is trimmed
    pub max_sessions: usize,
    /// Number of newest sessions kept after a trim
    pub retained_sessions: usize,
    /// Number of newest notifications kept
    pub max_notifications: usize,
    /// Window used for `recent_sessions` in summaries
    pub summary_window_days: i64,
    /// Whether loads are served from the single-slot document cache
    pub cache_enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("analytics"),
            usage_file: "usage_data.json".to_string(),
            feedback_file: "feedback.json".to_string(),
            contacts_file: "user_contacts.json".to_string(),
            max_sessions: 1000,
            retained_sessions: 500,
            max_notifications: 100,
            summary_window_days: 30,
            cache_enabled: true,
        }
    }
}

impl AnalyticsConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Build config from `ANALYTICS_DIR`, falling back to `./analytics`.
    ///
    /// Relative paths are resolved against the current directory.
    pub fn from_env() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let data_dir = match env::var(DATA_DIR_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let path = PathBuf::from(path);
                if path.is_absolute() {
                    path
                } else {
                    current_dir.join(path)
                }
            }
            _ => current_dir.join("analytics"),
        };

        Self::new(data_dir)
    }

    pub fn with_retention(mut self, max_sessions: usize, retained_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self.retained_sessions = retained_sessions.min(max_sessions);
        self
    }

    pub fn with_max_notifications(mut self, max_notifications: usize) -> Self {
        self.max_notifications = max_notifications;
        self
    }

    pub fn with_summary_window(mut self, days: i64) -> Self {
        self.summary_window_days = days;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to the usage document
    pub fn usage_path(&self) -> PathBuf {
        self.data_dir.join(&self.usage_file)
    }

    /// Get path to the feedback document
    pub fn feedback_path(&self) -> PathBuf {
        self.data_dir.join(&self.feedback_file)
    }

    /// Get path to the contacts document
    pub fn contacts_path(&self) -> PathBuf {
        self.data_dir.join(&self.contacts_file)
    }
}

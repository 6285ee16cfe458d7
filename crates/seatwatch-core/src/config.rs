//! Configuration management for Seatwatch.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::ZoneCode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/seatwatch/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Target page and report wording
    pub target: TargetConfig,
    /// Zone ranking and report limits
    pub scanning: ScanningConfig,
    /// Named waits and timeouts
    pub timings: TimingsConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Notification settings
    pub notifications: NotificationConfig,
    /// Diagnostic artifact settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to
    /// defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides, then validate.
    ///
    /// When `path` is `None` the default config location is used.
    ///
    /// Supports the following environment variables:
    /// - `SLACK_WEBHOOK`: Notification webhook endpoint
    /// - `SEATWATCH_URL`: Override the target page URL
    /// - `SEATWATCH_HEADLESS`: Override browser headless mode (true/false)
    /// - `SEATWATCH_SCREENSHOT_DIR`: Override the screenshot directory
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(webhook) = lookup("SLACK_WEBHOOK").filter(|v| !v.trim().is_empty()) {
            self.notifications.webhook_url = Some(webhook);
            tracing::debug!("Override notifications.webhook_url from env");
        }

        if let Some(url) = lookup("SEATWATCH_URL").filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Override target.url from env: {}", url);
            self.target.url = url;
        }

        if let Some(val) = lookup("SEATWATCH_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(dir) = lookup("SEATWATCH_SCREENSHOT_DIR").filter(|v| !v.trim().is_empty()) {
            self.output.screenshot_dir = PathBuf::from(dir);
            tracing::debug!(
                "Override output.screenshot_dir from env: {}",
                self.output.screenshot_dir.display()
            );
        }
    }

    /// Check values that would otherwise fail deep inside a scan.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.target.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "target.url".to_string(),
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }

        if self.target.action_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "target.action_selector".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        self.scanning.priority_codes()?;

        if self.scanning.throttle_every == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.throttle_every".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/seatwatch/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "seatwatch", "seatwatch").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Target page and report wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Performance page that hosts the primary action control
    pub url: String,
    /// CSS selector of the control that opens the seat selector
    pub action_selector: String,
    /// First line of the notification report
    pub headline: String,
    /// Optional event name line
    pub event_name: Option<String>,
    /// Optional event date/time line
    pub event_schedule: Option<String>,
    /// Optional closing line
    pub sign_off: Option<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: "https://tkglobal.melon.com/performance/index.htm?langCd=EN&prodId=211992"
                .to_string(),
            action_selector: r#".reservationBtn[data-prodid="211992"]"#.to_string(),
            headline: "TICKETS AVAILABLE!".to_string(),
            event_name: None,
            event_schedule: None,
            sign_off: None,
        }
    }
}

/// Zone ranking and report limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Zone codes in order of preference
    pub priority_zones: Vec<String>,
    /// Maximum non-priority zones listed in a report
    pub other_zones_limit: usize,
    /// Pause after every N classified zones
    pub throttle_every: usize,
}

impl ScanningConfig {
    /// Parse the configured priority list into validated zone codes.
    pub fn priority_codes(&self) -> ConfigResult<Vec<ZoneCode>> {
        self.priority_zones
            .iter()
            .map(|code| {
                ZoneCode::new(code).map_err(|e| ConfigError::InvalidValue {
                    field: "scanning.priority_zones".to_string(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            priority_zones: ["F1", "F2", "E", "D", "C", "A", "B"]
                .into_iter()
                .map(String::from)
                .collect(),
            other_zones_limit: 10,
            throttle_every: 3,
        }
    }
}

/// Named waits and timeouts, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    /// Page navigation plus initial network idle
    pub navigation_timeout_ms: u64,
    /// Network idle after the seat selector opens
    pub popup_idle_timeout_ms: u64,
    /// Settle delay after the page loads
    pub initial_settle_ms: u64,
    /// Wait after clicking the primary action control
    pub popup_wait_ms: u64,
    /// Delay before zone discovery
    pub pre_discovery_ms: u64,
    /// Settle interval after clicking a zone entry
    pub zone_settle_ms: u64,
    /// Settle interval after clicking back/close
    pub back_settle_ms: u64,
    /// Throttle pause taken every `scanning.throttle_every` zones
    pub throttle_pause_ms: u64,
    /// Upper bound for classifying one zone
    pub zone_timeout_ms: u64,
    /// Upper bound for a single browser action
    pub action_timeout_ms: u64,
}

impl TimingsConfig {
    /// Zero waits with short bounds, for tests and dry runs.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            navigation_timeout_ms: 1_000,
            popup_idle_timeout_ms: 1_000,
            initial_settle_ms: 0,
            popup_wait_ms: 0,
            pre_discovery_ms: 0,
            zone_settle_ms: 0,
            back_settle_ms: 0,
            throttle_pause_ms: 0,
            zone_timeout_ms: 1_000,
            action_timeout_ms: 1_000,
        }
    }

    /// Navigation timeout.
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Popup network-idle timeout.
    #[must_use]
    pub fn popup_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.popup_idle_timeout_ms)
    }

    /// Initial settle delay.
    #[must_use]
    pub fn initial_settle(&self) -> Duration {
        Duration::from_millis(self.initial_settle_ms)
    }

    /// Popup wait.
    #[must_use]
    pub fn popup_wait(&self) -> Duration {
        Duration::from_millis(self.popup_wait_ms)
    }

    /// Pre-discovery delay.
    #[must_use]
    pub fn pre_discovery(&self) -> Duration {
        Duration::from_millis(self.pre_discovery_ms)
    }

    /// Post-click settle interval.
    #[must_use]
    pub fn zone_settle(&self) -> Duration {
        Duration::from_millis(self.zone_settle_ms)
    }

    /// Back/close settle interval.
    #[must_use]
    pub fn back_settle(&self) -> Duration {
        Duration::from_millis(self.back_settle_ms)
    }

    /// Every-N-zones throttle pause.
    #[must_use]
    pub fn throttle_pause(&self) -> Duration {
        Duration::from_millis(self.throttle_pause_ms)
    }

    /// Per-zone timeout.
    #[must_use]
    pub fn zone_timeout(&self) -> Duration {
        Duration::from_millis(self.zone_timeout_ms)
    }

    /// Per-action timeout.
    #[must_use]
    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: 30_000,
            popup_idle_timeout_ms: 15_000,
            initial_settle_ms: 2_000,
            popup_wait_ms: 4_000,
            pre_discovery_ms: 2_000,
            zone_settle_ms: 1_500,
            back_settle_ms: 500,
            throttle_pause_ms: 1_000,
            zone_timeout_ms: 30_000,
            action_timeout_ms: 10_000,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Fixed user agent; `None` uses the built-in desktop profile
    pub user_agent: Option<String>,
    /// Pick a random desktop user agent and viewport per run
    pub randomize_fingerprint: bool,
    /// Explicit Chrome/Chromium executable
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: None,
            randomize_fingerprint: false,
            chrome_executable: None,
        }
    }
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Incoming-webhook endpoint; `None` disables notifications
    pub webhook_url: Option<String>,
    /// Sender name shown by the chat service
    pub sender_label: String,
    /// Sender icon shortcode
    pub icon: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            sender_label: "Seatwatch Ticket Bot".to_string(),
            icon: ":ticket:".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Diagnostic artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the per-outcome screenshots
    pub screenshot_dir: PathBuf,
    /// Capture the whole scrollable page rather than the viewport
    pub full_page: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: PathBuf::from("."),
            full_page: true,
        }
    }
}

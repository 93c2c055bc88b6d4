use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub observer: ObserverConfig,
    #[serde(default)]
    pub form: FormConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scroll: ScrollConfig::default(),
            nav: NavConfig::default(),
            counter: CounterConfig::default(),
            observer: ObserverConfig::default(),
            form: FormConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Simulated frame rate for animations
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            frame_rate: default_frame_rate(),
        }
    }
}

/// Easing curve selection for animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    CubicOut,
    QuartOut,
    QuintOut,
    ExpoOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Minimum interval between scroll-derived state updates in milliseconds
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// Scroll offset past which the header gets its "scrolled" treatment
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold: f64,
    /// Scroll offset past which downward scrolling hides the header
    #[serde(default = "default_hide_threshold")]
    pub hide_threshold: f64,
    /// Scroll offset past which the back-to-top control is shown
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: f64,
    /// Fixed header height compensated when scrolling to an anchor
    #[serde(default = "default_header_offset")]
    pub header_offset: f64,
    /// Smooth scroll animation duration in milliseconds
    #[serde(default = "default_smooth_duration")]
    pub smooth_duration_ms: u64,
    /// Easing curve for smooth scrolling
    #[serde(default = "default_smooth_easing")]
    pub easing: EasingType,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            scrolled_threshold: default_scrolled_threshold(),
            hide_threshold: default_hide_threshold(),
            back_to_top_threshold: default_back_to_top_threshold(),
            header_offset: default_header_offset(),
            smooth_duration_ms: default_smooth_duration(),
            easing: default_smooth_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Offset added to the scroll position when probing for the current section
    #[serde(default = "default_probe_offset")]
    pub probe_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            probe_offset: default_probe_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Counter animation duration in milliseconds
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Visible ratio required before a counter element counts as intersecting
    #[serde(default = "default_counter_threshold")]
    pub counter_threshold: f64,
    /// Bottom viewport deflation in pixels applied to counter observation
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: f64,
    /// Visible ratio required for the marquee section (0 = any visible pixel)
    #[serde(default)]
    pub marquee_threshold: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            counter_threshold: default_counter_threshold(),
            bottom_margin: default_bottom_margin(),
            marquee_threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Quiet period before a field is revalidated while typing, in milliseconds
    #[serde(default = "default_form_debounce")]
    pub debounce_ms: u64,
    /// Simulated submission round-trip delay in milliseconds
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,
    /// How long the submission feedback stays visible, in milliseconds
    #[serde(default = "default_feedback_timeout")]
    pub feedback_timeout_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_form_debounce(),
            submit_delay_ms: default_submit_delay(),
            feedback_timeout_ms: default_feedback_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_frame_rate() -> u16 {
    60
}

fn default_throttle_ms() -> u64 {
    100
}

fn default_scrolled_threshold() -> f64 {
    50.0
}

fn default_hide_threshold() -> f64 {
    200.0
}

fn default_back_to_top_threshold() -> f64 {
    300.0
}

fn default_header_offset() -> f64 {
    80.0
}

fn default_smooth_duration() -> u64 {
    400
}

fn default_smooth_easing() -> EasingType {
    EasingType::QuartOut
}

fn default_probe_offset() -> f64 {
    100.0
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_counter_threshold() -> f64 {
    0.1
}

fn default_bottom_margin() -> f64 {
    50.0
}

fn default_form_debounce() -> u64 {
    500
}

fn default_submit_delay() -> u64 {
    1500
}

fn default_feedback_timeout() -> u64 {
    5000
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// when the file does not exist.
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pagewire/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pagewire")
            .join("config.toml")
    }
}

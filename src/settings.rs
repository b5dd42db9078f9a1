//! Presentation preferences
//!
//! Read from the page query string on the web and from command-line flags
//! natively. Nothing here affects gameplay and nothing is persisted.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Triangle fan segments per cloud puff
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }

    /// How many of the simulated clouds get drawn
    pub fn max_clouds(&self) -> usize {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => 5,
            QualityPreset::High => usize::MAX,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Draw background clouds
    pub clouds: bool,
    /// Let the game play itself
    pub autopilot: bool,
    /// Fixed run seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            clouds: true,
            autopilot: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Number of clouds to draw this frame
    pub fn visible_clouds(&self, simulated: usize) -> usize {
        if !self.clouds {
            0
        } else {
            simulated.min(self.quality.max_clouds())
        }
    }

    /// Parse `?quality=low&clouds=off&autopilot=on&seed=42`.
    /// Unknown keys and malformed values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            settings.apply(key, value);
        }
        settings
    }

    /// Parse `--quality low --no-clouds --autopilot --seed 42` (first entry is the program name)
    pub fn from_args(args: &[String]) -> Self {
        let mut settings = Self::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-q" | "--quality" | "-s" | "--seed" => {
                    if let Some(value) = args.get(i + 1) {
                        settings.apply(args[i].trim_start_matches('-'), value);
                        i += 1;
                    }
                }
                "--no-clouds" => settings.clouds = false,
                "-a" | "--autopilot" => settings.autopilot = true,
                _ => {}
            }
            i += 1;
        }
        settings
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "quality" | "q" => {
                if let Some(preset) = QualityPreset::parse(value) {
                    self.quality = preset;
                } else {
                    log::warn!("Unknown quality preset: {value}");
                }
            }
            "clouds" => self.clouds = !matches!(value, "off" | "false" | "0"),
            "autopilot" | "demo" => self.autopilot = matches!(value, "on" | "true" | "1"),
            "seed" | "s" => self.seed = value.parse().ok(),
            _ => {}
        }
    }

    /// Read settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!(
            "Settings: quality {}, clouds {}, autopilot {}",
            settings.quality.as_str(),
            settings.clouds,
            settings.autopilot
        );
        settings
    }

    /// Read settings from the command line
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }
}

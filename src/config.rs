//! Page-level configuration.
//!
//! `index.html` may embed a JSON object in
//! `<script id="pillverse-config" type="application/json">`. Every field is
//! optional; missing fields fall back to [`CollectorConfig::default`].

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

/// DOM id of the inline config element.
pub const CONFIG_ELEMENT_ID: &str = "pillverse-config";

/// Glyph set used by the navigation bar and panels.
///
/// The two variants only differ in the icons drawn next to external links
/// and section headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSet {
    #[default]
    Classic,
    Alternate,
}

impl IconSet {
    pub fn brand(&self) -> &'static str {
        match self {
            IconSet::Classic => "◖◗",
            IconSet::Alternate => "⬮",
        }
    }

    pub fn coffee(&self) -> &'static str {
        match self {
            IconSet::Classic => "☕",
            IconSet::Alternate => "♨",
        }
    }

    pub fn trophy(&self) -> &'static str {
        match self {
            IconSet::Classic => "🏆",
            IconSet::Alternate => "★",
        }
    }

    pub fn sparkle(&self) -> &'static str {
        match self {
            IconSet::Classic => "✨",
            IconSet::Alternate => "✦",
        }
    }

    pub fn lock(&self) -> &'static str {
        match self {
            IconSet::Classic => "🔒",
            IconSet::Alternate => "▣",
        }
    }

    /// Icon for the external link at `index` in the nav bar.
    pub fn link(&self, index: usize) -> &'static str {
        let icons: &[&'static str] = match self {
            IconSet::Classic => &["⛁", "𝕏", "⌘"],
            IconSet::Alternate => &["◎", "✕", "◇"],
        };
        icons[index % icons.len()]
    }
}

/// An external link shown in the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("threshold_min must be at least 1")]
    ZeroThreshold,
    #[error("threshold range invalid (min {min} > max {max})")]
    ThresholdRange { min: u32, max: u32 },
    #[error("rare_chance must be between 0 and 1 (got {0})")]
    RareChance(f64),
    #[error("secondary_target must be at least 1")]
    ZeroSecondaryTarget,
    #[error("status_duration_ms must be at least 1")]
    ZeroStatusDuration,
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub variant: IconSet,
    /// Inclusive lower bound of the rolled click threshold.
    pub threshold_min: u32,
    /// Inclusive upper bound of the rolled click threshold.
    pub threshold_max: u32,
    /// Probability that a new pill is one of the elemental kinds.
    pub rare_chance: f64,
    pub status_duration_ms: u32,
    /// Secondary presses needed to unlock the coffee secret.
    pub secondary_target: u32,
    /// Progress granted once when the coffee secret unlocks.
    pub secondary_bonus: u32,
    pub downloads_enabled: bool,
    pub log_level: String,
    /// Fixed RNG seed. `None` seeds from the browser.
    pub seed: Option<u64>,
    pub links: Vec<ExternalLink>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            variant: IconSet::Classic,
            threshold_min: 35,
            threshold_max: 200,
            rare_chance: 0.05,
            status_duration_ms: 2000,
            secondary_target: 5,
            secondary_bonus: 50,
            downloads_enabled: false,
            log_level: "info".into(),
            seed: None,
            links: vec![
                ExternalLink {
                    label: "Pump".into(),
                    url: "https://pump.fun/coin/FLsVQQ1PGwVyFZfXR3qaqTuJGRdHHUTkKzJ7b4jUpump"
                        .into(),
                },
                ExternalLink {
                    label: "X".into(),
                    url: "https://twitter.com".into(),
                },
            ],
        }
    }
}

impl CollectorConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: CollectorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_min == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.threshold_min > self.threshold_max {
            return Err(ConfigError::ThresholdRange {
                min: self.threshold_min,
                max: self.threshold_max,
            });
        }
        if !(0.0..=1.0).contains(&self.rare_chance) {
            return Err(ConfigError::RareChance(self.rare_chance));
        }
        if self.secondary_target == 0 {
            return Err(ConfigError::ZeroSecondaryTarget);
        }
        if self.status_duration_ms == 0 {
            return Err(ConfigError::ZeroStatusDuration);
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

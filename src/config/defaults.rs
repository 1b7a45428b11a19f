//! Named configuration presets.

use super::types::{AppConfig, BlockingConfig, ConfigurationSelection};
use crate::blocking::BlockingMethodKind;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Extended q-grams with their default parameters
    Default,
    /// Long q-grams, only the full combination: few, small blocks
    Strict,
    /// Short q-grams, low threshold: many candidate pairs, high recall
    Permissive,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "precise" => Some(Self::Strict),
            "permissive" | "loose" | "recall" => Some(Self::Permissive),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Extended q-grams blocking with 6-grams and threshold 0.95",
            Self::Strict => "Only whole-token q-gram concatenations; fewest comparisons",
            Self::Permissive => "Trigrams combined down to 80% of their count; highest recall",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Permissive]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::with_blocking(Some(6), Some(1.0)),
            ConfigPreset::Permissive => Self::with_blocking(Some(3), Some(0.8)),
        }
    }

    fn with_blocking(q_gram_size: Option<usize>, threshold: Option<f64>) -> Self {
        Self {
            blocking: BlockingConfig {
                method: BlockingMethodKind::ExtendedQGrams,
                q_gram_size,
                threshold,
                selection: ConfigurationSelection::Default,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("LOOSE"), Some(ConfigPreset::Permissive));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in ConfigPreset::all() {
            let config = AppConfig::from_preset(*preset);
            assert!(config.is_valid(), "{preset} preset is invalid");
            assert!(config.blocking.resolve().is_ok());
        }
    }
}

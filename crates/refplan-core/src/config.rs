//! Analysis configuration.
//!
//! Defaults reproduce the scoring blend (`0.4·spectral + 0.3·degree +
//! 0.3·centrality`), the power-iteration parameters (damping 0.85, 20
//! iterations), and the effort model (20 minutes per module, multiplier
//! clamped to `[0.5, 2.0]`). A config value is always passed explicitly to
//! whichever component needs it; nothing reads it from global state.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub centrality: CentralityConfig,
    #[serde(default)]
    pub effort: EffortConfig,
}

/// Blend weights for the three structural sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_spectral_weight")]
    pub spectral: f64,
    #[serde(default = "default_degree_weight")]
    pub degree: f64,
    #[serde(default = "default_centrality_weight")]
    pub centrality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            spectral: default_spectral_weight(),
            degree: default_degree_weight(),
            centrality: default_centrality_weight(),
        }
    }
}

/// Power-iteration centrality parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    /// Probability of following an edge rather than teleporting.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Fixed iteration count; there is no convergence check.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            iterations: default_iterations(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortConfig {
    #[serde(default = "default_minutes_per_module")]
    pub minutes_per_module: u32,
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: f64,
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,
}

impl Default for EffortConfig {
    fn default() -> Self {
        Self {
            minutes_per_module: default_minutes_per_module(),
            min_multiplier: default_min_multiplier(),
            max_multiplier: default_max_multiplier(),
        }
    }
}

const fn default_spectral_weight() -> f64 {
    0.4
}

const fn default_degree_weight() -> f64 {
    0.3
}

const fn default_centrality_weight() -> f64 {
    0.3
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_iterations() -> usize {
    20
}

const fn default_minutes_per_module() -> u32 {
    20
}

const fn default_min_multiplier() -> f64 {
    0.5
}

const fn default_max_multiplier() -> f64 {
    2.0
}

impl AnalysisConfig {
    /// Check every value is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("spectral", w.spectral),
            ("degree", w.degree),
            ("centrality", w.centrality),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeWeight { name, value });
            }
        }
        if w.spectral + w.degree + w.centrality <= 0.0 {
            return Err(ConfigError::ZeroWeights);
        }

        let c = &self.centrality;
        if !(0.0..1.0).contains(&c.damping) {
            return Err(ConfigError::Damping(c.damping));
        }
        if c.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        let e = &self.effort;
        if e.minutes_per_module == 0 {
            return Err(ConfigError::ZeroMinutes);
        }
        let bounds_ok = e.min_multiplier.is_finite()
            && e.max_multiplier.is_finite()
            && e.min_multiplier > 0.0
            && e.min_multiplier <= e.max_multiplier;
        if !bounds_ok {
            return Err(ConfigError::MultiplierBounds {
                min: e.min_multiplier,
                max: e.max_multiplier,
            });
        }

        Ok(())
    }
}

/// Load an [`AnalysisConfig`] from a TOML file.
///
/// A missing file yields the defaults. The parsed config is validated.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// out-of-range values.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no analysis config, using defaults");
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| {
            format!(
                "{}: Failed to parse {}",
                ErrorCode::ConfigParseError,
                path.display()
            )
        })?;

    config
        .validate()
        .with_context(|| {
            format!(
                "{}: Invalid analysis config in {}",
                ErrorCode::ConfigInvalid,
                path.display()
            )
        })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_documented_constants() {
        let config = AnalysisConfig::default();
        assert!((config.weights.spectral - 0.4).abs() < f64::EPSILON);
        assert!((config.weights.degree - 0.3).abs() < f64::EPSILON);
        assert!((config.weights.centrality - 0.3).abs() < f64::EPSILON);
        assert!((config.centrality.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.centrality.iterations, 20);
        assert_eq!(config.effort.minutes_per_module, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("refplan.toml")).expect("load");
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
[centrality]
iterations = 50

[effort]
minutes_per_module = 30
"#
        )
        .expect("write config");

        let config = load_config(file.path()).expect("load");
        assert_eq!(config.centrality.iterations, 50);
        assert!((config.centrality.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.effort.minutes_per_module, 30);
        assert_eq!(config.weights, ScoreWeights::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[weights\nspectral = ").expect("write config");
        let err = load_config(file.path()).expect_err("should fail");
        assert!(err.to_string().starts_with("E1001: Failed to parse"));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[centrality]\ndamping = 1.5").expect("write config");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn validate_catches_each_field() {
        let mut c = AnalysisConfig::default();
        c.weights.degree = -0.1;
        assert!(matches!(c.validate(), Err(ConfigError::NegativeWeight { name: "degree", .. })));

        let mut c = AnalysisConfig::default();
        c.weights = ScoreWeights {
            spectral: 0.0,
            degree: 0.0,
            centrality: 0.0,
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroWeights));

        let mut c = AnalysisConfig::default();
        c.centrality.iterations = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroIterations));

        let mut c = AnalysisConfig::default();
        c.effort.minutes_per_module = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroMinutes));

        let mut c = AnalysisConfig::default();
        c.effort.min_multiplier = 3.0;
        assert!(matches!(c.validate(), Err(ConfigError::MultiplierBounds { .. })));
    }
}

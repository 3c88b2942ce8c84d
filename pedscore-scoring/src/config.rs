use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pedscore_core::StatusSymbol;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing or invalid file extension in scoring config file. It must be `toml`")]
    InvalidFileType,
    #[error("Invalid scoring policy: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

///
/// How differences in the male, female and miscarriage counts are penalized.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenderPenaltyMode {
    /// penalty × |difference|
    #[default]
    Magnitude,
    /// penalty once for every category whose counts differ at all
    PerCategory,
}

/// Weights applied to each tier's raw deduction.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TierWeights {
    pub foundation: f64,
    pub relationship: f64,
    pub attribute: f64,
}

impl Default for TierWeights {
    fn default() -> Self {
        TierWeights {
            foundation: 0.50,
            relationship: 0.40,
            attribute: 0.10,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FoundationPenalties {
    pub generation_off_by_one: f64,
    pub generation_off_by_many: f64,
    /// Base of the per-level weight `1 / decay^level`.
    pub level_decay: f64,
    pub level_scale: f64,
    pub core_people: f64,
    pub miscarriage: f64,
    pub gender_mode: GenderPenaltyMode,
}

impl Default for FoundationPenalties {
    fn default() -> Self {
        FoundationPenalties {
            generation_off_by_one: 5.0,
            generation_off_by_many: 15.0,
            level_decay: 1.2,
            level_scale: 2.0,
            core_people: 5.0,
            miscarriage: 2.0,
            gender_mode: GenderPenaltyMode::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RelationshipPenalties {
    pub no_parents: f64,
    pub partner_bucket: f64,
    pub partnership: f64,
    pub divorce: f64,
    pub sibling_total: f64,
    pub sibling_bucket: f64,
}

impl Default for RelationshipPenalties {
    fn default() -> Self {
        RelationshipPenalties {
            no_parents: 4.0,
            partner_bucket: 2.0,
            partnership: 2.0,
            divorce: 1.0,
            sibling_total: 1.0,
            sibling_bucket: 1.0,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AttributePenalties {
    pub disease: f64,
    pub symbol: f64,
    pub twin: f64,
    /// Symbols that take part in the symbol deduction.
    pub scored_symbols: Vec<StatusSymbol>,
}

impl Default for AttributePenalties {
    fn default() -> Self {
        AttributePenalties {
            disease: 1.0,
            symbol: 2.0,
            twin: 1.0,
            scored_symbols: StatusSymbol::ALL.to_vec(),
        }
    }
}

///
/// Every constant the scorers use. Build one per process (default or from a
/// TOML file) and share it by reference; scoring never mutates it.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ScoringPolicy {
    pub weights: TierWeights,
    pub foundation: FoundationPenalties,
    pub relationship: RelationshipPenalties,
    pub attribute: AttributePenalties,
}

impl ScoringPolicy {
    ///
    /// Reject policies that could push a score outside `[0, 100]` or break
    /// the level weighting.
    ///
    pub fn validate(&self) -> ConfigResult<()> {
        let named = [
            ("weights.foundation", self.weights.foundation),
            ("weights.relationship", self.weights.relationship),
            ("weights.attribute", self.weights.attribute),
            ("foundation.generation_off_by_one", self.foundation.generation_off_by_one),
            ("foundation.generation_off_by_many", self.foundation.generation_off_by_many),
            ("foundation.level_scale", self.foundation.level_scale),
            ("foundation.core_people", self.foundation.core_people),
            ("foundation.miscarriage", self.foundation.miscarriage),
            ("relationship.no_parents", self.relationship.no_parents),
            ("relationship.partner_bucket", self.relationship.partner_bucket),
            ("relationship.partnership", self.relationship.partnership),
            ("relationship.divorce", self.relationship.divorce),
            ("relationship.sibling_total", self.relationship.sibling_total),
            ("relationship.sibling_bucket", self.relationship.sibling_bucket),
            ("attribute.disease", self.attribute.disease),
            ("attribute.symbol", self.attribute.symbol),
            ("attribute.twin", self.attribute.twin),
        ];

        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "`{}` must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let decay = self.foundation.level_decay;
        if !decay.is_finite() || decay <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "`foundation.level_decay` must be positive, got {}",
                decay
            )));
        }

        Ok(())
    }
}

impl FromStr for ScoringPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let policy: ScoringPolicy = toml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }
}

impl TryFrom<&Path> for ScoringPolicy {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        match path.extension().and_then(OsStr::to_str) {
            Some("toml") => {}
            _ => return Err(ConfigError::InvalidFileType),
        }
        let toml_str = read_to_string(path)?;
        ScoringPolicy::from_str(&toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::path::PathBuf;

    #[rstest]
    fn test_defaults() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.weights.foundation, 0.5);
        assert_eq!(policy.weights.relationship, 0.4);
        assert_eq!(policy.weights.attribute, 0.1);
        assert_eq!(policy.foundation.gender_mode, GenderPenaltyMode::Magnitude);
        assert_eq!(policy.attribute.scored_symbols.len(), StatusSymbol::ALL.len());
        assert!(policy.validate().is_ok());
    }

    #[rstest]
    fn test_empty_toml_is_the_default_policy() {
        let policy = ScoringPolicy::from_str("").unwrap();
        assert_eq!(policy, ScoringPolicy::default());
    }

    #[rstest]
    fn test_partial_toml_keeps_other_defaults() {
        let policy = ScoringPolicy::from_str(
            r#"
            [foundation]
            miscarriage = 1.0
            gender_mode = "per_category"
            "#,
        )
        .unwrap();
        assert_eq!(policy.foundation.miscarriage, 1.0);
        assert_eq!(policy.foundation.gender_mode, GenderPenaltyMode::PerCategory);
        assert_eq!(policy.foundation.core_people, 5.0);
        assert_eq!(policy.relationship, RelationshipPenalties::default());
    }

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/config/legacy.toml");
        let policy = ScoringPolicy::try_from(path.as_path()).unwrap();
        assert_eq!(policy.relationship.partner_bucket, 4.0);
        assert_eq!(
            policy.attribute.scored_symbols,
            vec![
                StatusSymbol::Deceased,
                StatusSymbol::AdoptedIn,
                StatusSymbol::AdoptedOut
            ]
        );
    }

    #[rstest]
    fn test_invalid_extension() {
        let path = PathBuf::from("policy.yaml");
        let result = ScoringPolicy::try_from(path.as_path());
        assert!(matches!(result, Err(ConfigError::InvalidFileType)));
    }

    #[rstest]
    #[case("[weights]\nfoundation = -0.5")]
    #[case("[foundation]\nlevel_decay = 0.0")]
    #[case("[attribute]\nscored_symbols = [\"haunted\"]")]
    fn test_invalid_policies_are_rejected(#[case] toml_str: &str) {
        assert!(ScoringPolicy::from_str(toml_str).is_err());
    }
}

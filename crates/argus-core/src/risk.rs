use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordinal severity assigned to a finding by the service.
///
/// Filtering is inclusive: a finding passes when its computed risk is
/// greater than or equal to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RiskLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Wire codes are 1..=4; zero and anything out of range fold into `None`,
    /// matching the service's default branch.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => RiskLevel::Low,
            2 => RiskLevel::Medium,
            3 => RiskLevel::High,
            4 => RiskLevel::Critical,
            _ => RiskLevel::None,
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RiskLevel::from_code(i64::deserialize(deserializer)?))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::None => "None",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
#[error("valid risk threshold is required (low, medium, high or critical)")]
pub struct ParseRiskError;

impl FromStr for RiskLevel {
    type Err = ParseRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(ParseRiskError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_ordinal() {
        assert!(RiskLevel::None < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn parses_cli_labels_case_insensitively() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("Critical".parse::<RiskLevel>().unwrap(), RiskLevel::Critical);
        assert!("banana".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn out_of_range_codes_fold_to_none() {
        assert_eq!(RiskLevel::from_code(0), RiskLevel::None);
        assert_eq!(RiskLevel::from_code(9), RiskLevel::None);
        assert_eq!(RiskLevel::from_code(3), RiskLevel::High);
    }
}

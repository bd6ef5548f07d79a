use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default condition applied when none is configured.
pub const DEFAULT_CONDITION: &str = "all of them";

/// Match condition over a rule's string identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    All,
    Any,
    /// At least `n` of the identifiers must match.
    AtLeast(u32),
}

impl Condition {
    /// Parse a condition, falling back to `Any` with a warning when the input
    /// is not recognized.
    pub fn parse_lenient(spec: &str) -> Condition {
        spec.parse().unwrap_or_else(|err: ConditionParseError| {
            warn!(condition = spec, reason = %err, "invalid condition; defaulting to 'any of them'");
            Condition::Any
        })
    }

    /// Quantifier keyword used in the rendered `<q> of (...)` expression.
    pub fn quantifier(&self) -> String {
        match self {
            Condition::All => "all".to_string(),
            Condition::Any => "any".to_string(),
            Condition::AtLeast(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of them", self.quantifier())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConditionParseError(String);

impl FromStr for Condition {
    type Err = ConditionParseError;

    /// Accepts `all of them`, `any of them`, and `<N> of them`,
    /// case-insensitively and with arbitrary inner whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let quantifier = match tokens.as_slice() {
            [q, "of", "them"] => *q,
            _ => return Err(ConditionParseError(format!("expected '<all|any|N> of them', got '{s}'"))),
        };
        match quantifier {
            "all" => Ok(Condition::All),
            "any" => Ok(Condition::Any),
            n => match n.parse::<u32>() {
                Ok(n) => Ok(Condition::AtLeast(n)),
                Err(_) => Err(ConditionParseError(format!("'{n}' is not a valid threshold"))),
            },
        }
    }
}

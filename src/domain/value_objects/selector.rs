//! Label selector value object
//!
//! Validated at plan-load time so a malformed selector is a
//! `ConfigurationError` before any apply, never a runtime surprise
//! inside the poll loop. Matching itself happens server-side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CaravelError, CaravelResult};

/// Equality-based label selector, e.g. `app=postgres,tier=db`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelSelector(String);

impl LabelSelector {
    pub fn parse(raw: &str) -> CaravelResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid(raw, "selector is empty"));
        }
        for term in trimmed.split(',') {
            let term = term.trim();
            if term.is_empty() {
                return Err(invalid(raw, "empty term between commas"));
            }
            let (key, value) = match term.split_once("!=") {
                Some((k, v)) => (k, Some(v)),
                None => match term.split_once('=') {
                    Some((k, v)) => (k, Some(v.trim_start_matches('='))),
                    None => (term, None),
                },
            };
            if !is_valid_key(key) {
                return Err(invalid(raw, &format!("bad label key '{key}'")));
            }
            if let Some(value) = value {
                if !value.chars().all(is_value_char) {
                    return Err(invalid(raw, &format!("bad label value '{value}'")));
                }
            }
        }
        Ok(LabelSelector(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(selector: &str, reason: &str) -> CaravelError {
    CaravelError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

fn is_valid_key(key: &str) -> bool {
    // Optional prefix: `example.com/app`. The key part must start and
    // end alphanumeric, as the API server enforces.
    let name = key.rsplit('/').next().unwrap_or(key);
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric())
        && key.matches('/').count() <= 1
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LabelSelector {
    type Error = CaravelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LabelSelector::parse(&value)
    }
}

impl From<LabelSelector> for String {
    fn from(selector: LabelSelector) -> Self {
        selector.0
    }
}

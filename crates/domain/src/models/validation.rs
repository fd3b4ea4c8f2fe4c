use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

use super::market::Market;

/// Outcome of checking markup against a market's mandatory sections.
///
/// `missing_sections` and `found_sections` partition the market's checklist and keep
/// its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ValidationResult {
    pub valid: bool,
    pub missing_sections: Vec<String>,
    pub found_sections: Vec<String>,
    pub suggestions: String,
}

impl ValidationResult {
    /// Classify every mandatory section of `market` with `is_present`.
    ///
    /// `valid` is true exactly when nothing is missing.
    pub fn classify<F>(market: Market, mut is_present: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let (found, missing): (Vec<&str>, Vec<&str>) = market
            .mandatory_sections()
            .iter()
            .copied()
            .partition(|section| is_present(section));

        let suggestions = if missing.is_empty() {
            "All sections present".to_string()
        } else {
            format!("Missing: {}", missing.join(", "))
        };

        Self {
            valid: missing.is_empty(),
            missing_sections: missing.into_iter().map(str::to_string).collect(),
            found_sections: found.into_iter().map(str::to_string).collect(),
            suggestions,
        }
    }

    /// True when the checklist is complete per the partition, regardless of `valid`.
    pub fn nothing_missing(&self) -> bool {
        self.missing_sections.is_empty()
    }
}

/// Which validation strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValidationSource {
    Judge,
    Keyword,
}

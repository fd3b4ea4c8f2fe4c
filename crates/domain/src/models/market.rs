use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

const DOMESTIC_SECTIONS: &[&str] = &[
    "sticky navbar",
    "hero section",
    "services section",
    "about/trust section",
    "social proof/testimonials",
    "location/contact section",
    "business hours",
    "sticky mobile footer",
    "footer",
];

const GLOBAL_SECTIONS: &[&str] = &[
    "sticky navbar",
    "authority hero section",
    "offer/services section",
    "about/credibility section",
    "social proof/testimonials",
    "booking/cta section",
    "footer",
];

/// Target business geography for a generated site.
///
/// `Domestic` is the local-business variant (messaging-app CTAs, user photos, map embed),
/// `Global` the solopreneur/authority variant (booking CTAs, brand voice). The wire names
/// are `IN` and `GLOBAL`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum Market {
    #[serde(rename = "IN", alias = "DOMESTIC")]
    #[strum(to_string = "IN", serialize = "DOMESTIC")]
    Domestic,
    #[default]
    #[serde(rename = "GLOBAL")]
    #[strum(to_string = "GLOBAL")]
    Global,
}

impl Market {
    /// Resolve a header or payload selector. Unknown or missing values fall back to `Global`.
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Ordered mandatory-section checklist for this market. `footer` is always last.
    pub fn mandatory_sections(self) -> &'static [&'static str] {
        match self {
            Market::Domestic => DOMESTIC_SECTIONS,
            Market::Global => GLOBAL_SECTIONS,
        }
    }

    /// Map a loosely written section name onto this market's canonical entry.
    pub fn canonical_section(self, name: &str) -> Option<&'static str> {
        let wanted = name.trim();
        self.mandatory_sections()
            .iter()
            .copied()
            .find(|section| section.eq_ignore_ascii_case(wanted))
    }
}

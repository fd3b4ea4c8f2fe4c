//! Light business metadata derived from the prompt and the generated page.

use once_cell::sync::Lazy;
use regex::Regex;
use utils::text::capitalize;

pub const DEFAULT_BUSINESS_NAME: &str = "Business Name";

/// Checked in order against the lowercased prompt.
const BUSINESS_TYPE_KEYWORDS: &[&str] = &[
    "dental",
    "clinic",
    "restaurant",
    "bakery",
    "salon",
    "spa",
    "gym",
    "tuition",
    "coaching",
    "shop",
    "store",
    "agency",
    "consultant",
];

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));

/// Guess the business type from the user's prompt, e.g. "Dental".
pub fn detect_business_type(prompt: &str) -> Option<String> {
    let lower = prompt.to_lowercase();
    BUSINESS_TYPE_KEYWORDS
        .iter()
        .find(|keyword| lower.contains(*keyword))
        .map(|keyword| capitalize(keyword))
}

/// Business name from the page `<title>`, dropping any " | tagline" suffix.
pub fn extract_business_name(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .map(|title| title.split(" | ").next().unwrap_or(title).trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_BUSINESS_NAME.to_string())
}

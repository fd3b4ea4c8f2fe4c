use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_PRIMARY_COLOR: &str = "#0d9488";
pub const DEFAULT_ACCENT_COLOR: &str = "#f97316";

/// Primary/accent theme colors as CSS color values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ThemeColors {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_primary() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_accent() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            accent: default_accent(),
        }
    }
}

/// Context only meaningful for the domestic market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct DomesticDetails {
    /// Image URLs; only the first three are used.
    #[serde(default)]
    pub user_images: Vec<String>,
    pub whatsapp_number: Option<String>,
    pub whatsapp_message: Option<String>,
    pub google_map_link: Option<String>,
}

/// Context only meaningful for the global market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct GlobalDetails {
    pub brand_voice: Option<String>,
    pub booking_link: Option<String>,
    pub email: Option<String>,
}

/// Everything the prompt composer needs for one generation run.
///
/// Both detail blocks may be populated; the composer reads only the one matching the
/// market it is asked to compose for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct GenerationRequest {
    pub user_prompt: String,
    #[serde(default)]
    pub theme_colors: ThemeColors,
    #[serde(default)]
    pub domestic: DomesticDetails,
    #[serde(default)]
    pub global: GlobalDetails,
}

impl GenerationRequest {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_theme_colors(mut self, theme_colors: ThemeColors) -> Self {
        self.theme_colors = theme_colors;
        self
    }

    pub fn with_domestic(mut self, domestic: DomesticDetails) -> Self {
        self.domestic = domestic;
        self
    }

    pub fn with_global(mut self, global: GlobalDetails) -> Self {
        self.global = global;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_colors_default_when_fields_missing() {
        let colors: ThemeColors = serde_json::from_str(r##"{"primary": "#111111"}"##).unwrap();
        assert_eq!(colors.primary, "#111111");
        assert_eq!(colors.accent, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_builder_keeps_both_detail_blocks() {
        let request = GenerationRequest::new("A bakery in Pune")
            .with_domestic(DomesticDetails {
                whatsapp_number: Some("+911234567890".to_string()),
                ..Default::default()
            })
            .with_global(GlobalDetails {
                email: Some("hi@example.com".to_string()),
                ..Default::default()
            });
        assert_eq!(request.theme_colors, ThemeColors::default());
        assert!(request.domestic.whatsapp_number.is_some());
        assert!(request.global.email.is_some());
    }
}

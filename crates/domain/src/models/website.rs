use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use super::{
    generation_request::{DomesticDetails, GenerationRequest, GlobalDetails, ThemeColors},
    market::Market,
    validation::ValidationResult,
};

pub const MIN_PROMPT_CHARS: usize = 10;
pub const MAX_PROMPT_CHARS: usize = 2000;
pub const DEFAULT_BRAND_VOICE: &str = "Corporate & Clean";
pub const DEFAULT_BUSINESS_TYPE: &str = "General Business";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    #[error("user_prompt must be between 10 and 2000 characters (got {0})")]
    PromptLength(usize),
}

/// Request body for direct website code generation
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GenerateCodeRequest {
    pub user_prompt: String,
    #[serde(default)]
    pub theme_colors: ThemeColors,
    /// Used when no `x-market` header is sent.
    pub market: Option<String>,
    // Domestic market fields
    pub user_images: Option<Vec<String>>,
    pub whatsapp_number: Option<String>,
    pub whatsapp_message: Option<String>,
    pub google_map_link: Option<String>,
    // Global market fields
    #[serde(default = "default_brand_voice")]
    pub brand_voice: Option<String>,
    pub booking_link: Option<String>,
    pub email: Option<String>,
}

fn default_brand_voice() -> Option<String> {
    Some(DEFAULT_BRAND_VOICE.to_string())
}

impl GenerateCodeRequest {
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        let len = self.user_prompt.chars().count();
        if !(MIN_PROMPT_CHARS..=MAX_PROMPT_CHARS).contains(&len) {
            return Err(RequestValidationError::PromptLength(len));
        }
        Ok(())
    }

    /// A non-blank header selector wins over the body field.
    pub fn resolve_market(&self, header: Option<&str>) -> Market {
        let header = header.filter(|h| !h.trim().is_empty());
        Market::from_selector(header.or(self.market.as_deref()))
    }

    pub fn into_generation_request(self) -> GenerationRequest {
        GenerationRequest::new(self.user_prompt)
            .with_theme_colors(self.theme_colors)
            .with_domestic(DomesticDetails {
                user_images: self.user_images.unwrap_or_default(),
                whatsapp_number: self.whatsapp_number,
                whatsapp_message: self.whatsapp_message,
                google_map_link: self.google_map_link,
            })
            .with_global(GlobalDetails {
                brand_voice: self.brand_voice,
                booking_link: self.booking_link,
                email: self.email,
            })
    }
}

/// Response with generated HTML code
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GenerateCodeResponse {
    pub html_code: String,
    pub business_name: String,
    pub business_type: String,
    pub validation_result: ValidationResult,
}

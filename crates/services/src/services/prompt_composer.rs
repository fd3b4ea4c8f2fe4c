//! Builds the system prompt and user message for a generation run.

use domain::models::{
    generation_request::{DomesticDetails, GenerationRequest, GlobalDetails},
    market::Market,
};

use super::{branding, prompt_library};

const DEFAULT_WHATSAPP_MESSAGE: &str = "Hi, I would like to inquire about your services";
const IMAGE_LABELS: [&str; 3] = ["Hero/Shop Front", "Owner/Team", "Product/Service"];
const MAX_USER_IMAGES: usize = 3;

/// System prompt and user message ready to send to the generation model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system_prompt: String,
    pub user_message: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(
        &self,
        request: &GenerationRequest,
        market: Market,
        industry_hint: Option<&str>,
    ) -> ComposedPrompt {
        let mut system_prompt = prompt_library::system_prompt_for(market);

        if let Some(hint) = present(industry_hint) {
            system_prompt.push_str(&format!(
                "\n\n=== INDUSTRY-SPECIFIC BRANDING ===\n{}",
                branding::branding_for_business_type(hint)
            ));
        }

        let mut user_message = format!("USER REQUEST:\n{}\n\n", request.user_prompt.trim());
        user_message.push_str("DESIGN SETTINGS:\n");
        user_message.push_str(&format!(
            "- Primary Color: {}\n",
            request.theme_colors.primary
        ));
        user_message.push_str(&format!("- Accent Color: {}\n", request.theme_colors.accent));

        match market {
            Market::Domestic => push_domestic_context(&mut user_message, &request.domestic),
            Market::Global => push_global_context(&mut user_message, &request.global),
        }

        user_message
            .push_str("\n\nGenerate the complete HTML website now. Include ALL mandatory sections.");

        ComposedPrompt {
            system_prompt,
            user_message,
        }
    }
}

/// Treats blank strings the same as missing ones.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn push_domestic_context(message: &mut String, details: &DomesticDetails) {
    if let Some(number) = present(details.whatsapp_number.as_deref()) {
        message.push_str(&format!("- WhatsApp Number: {number}\n"));
        let text = present(details.whatsapp_message.as_deref()).unwrap_or(DEFAULT_WHATSAPP_MESSAGE);
        message.push_str(&format!(
            "- WhatsApp Message (URL encoded): {}\n",
            urlencoding::encode(text)
        ));
    }

    let images: Vec<&str> = details
        .user_images
        .iter()
        .filter_map(|img| present(Some(img.as_str())))
        .take(MAX_USER_IMAGES)
        .collect();
    if !images.is_empty() {
        message.push_str("\nUSER IMAGES PROVIDED:\n");
        for (i, (img, label)) in images.iter().zip(IMAGE_LABELS).enumerate() {
            message.push_str(&format!("- Image {} ({label}): {img}\n", i + 1));
        }
    }

    if let Some(link) = present(details.google_map_link.as_deref()) {
        message.push_str(&format!("- Google Maps Link: {link}\n"));
    }
}

fn push_global_context(message: &mut String, details: &GlobalDetails) {
    if let Some(voice) = present(details.brand_voice.as_deref()) {
        message.push_str(&format!("- Brand Voice: {voice}\n"));
    }
    if let Some(link) = present(details.booking_link.as_deref()) {
        message.push_str(&format!("- Booking Link: {link}\n"));
    }
    if let Some(email) = present(details.email.as_deref()) {
        message.push_str(&format!("- Contact Email: {email}\n"));
    }
}

pub mod asset_guarantor;
pub mod branding;
pub mod business_profile;
pub mod config;
pub mod generation;
pub mod llm_api;
pub mod prompt_composer;
pub mod prompt_library;
pub mod repair_prompt;
pub mod section_validator;
pub mod website_generator;

#[cfg(test)]
pub mod test_support;

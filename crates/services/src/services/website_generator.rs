//! Generate → validate → (repair once) pipeline producing deployable HTML.

use std::sync::Arc;

use domain::models::{
    generation_request::GenerationRequest,
    market::Market,
    validation::{ValidationResult, ValidationSource},
};
use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    asset_guarantor::ensure_baseline_assets,
    config::{GeneratorConfig, ValidatorMode},
    generation::{GenerationError, GenerationInvoker},
    llm_api::ModelEndpoint,
    prompt_composer::PromptComposer,
    repair_prompt::build_repair_instruction,
    section_validator::{SectionValidator, ValidationOutcome},
};

#[derive(Debug, Error)]
pub enum WebsiteGeneratorError {
    #[error("generation failed on attempt {attempt}: {source}")]
    Generation {
        attempt: u8,
        #[source]
        source: GenerationError,
    },
}

/// Pipeline stages, in the order they can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationStage {
    Composed,
    Generated,
    Validated,
    Repairing,
    Regenerated,
    Revalidated,
    Done,
}

/// Final markup plus the last validation, valid or not
#[derive(Debug, Clone)]
pub struct GeneratedWebsite {
    pub html_code: String,
    pub validation_result: ValidationResult,
    pub validation_source: ValidationSource,
    pub repair_attempted: bool,
    pub stages: Vec<GenerationStage>,
}

impl GeneratedWebsite {
    pub fn is_complete(&self) -> bool {
        self.validation_result.valid
    }
}

#[derive(Clone)]
pub struct WebsiteGenerator {
    composer: PromptComposer,
    invoker: GenerationInvoker,
    validator: SectionValidator,
}

/// Records stage transitions and logs them.
struct StageLog {
    market: Market,
    stages: Vec<GenerationStage>,
}

impl StageLog {
    fn new(market: Market) -> Self {
        Self {
            market,
            stages: Vec::with_capacity(7),
        }
    }

    fn enter(&mut self, stage: GenerationStage) {
        debug!(market = %self.market, stage = %stage, "Website generation stage");
        self.stages.push(stage);
    }
}

impl WebsiteGenerator {
    pub fn new(
        composer: PromptComposer,
        invoker: GenerationInvoker,
        validator: SectionValidator,
    ) -> Self {
        Self {
            composer,
            invoker,
            validator,
        }
    }

    /// Wire the pipeline from configuration, sharing `endpoint` between generation and judging.
    pub fn from_config(config: &GeneratorConfig, endpoint: Arc<dyn ModelEndpoint>) -> Self {
        let invoker = GenerationInvoker::new(endpoint.clone(), config.generation.clone());
        let validator = match config.validator_mode {
            ValidatorMode::Judge => SectionValidator::with_judge(endpoint, config.judge.clone()),
            ValidatorMode::Keyword => SectionValidator::keyword_only(),
        };
        Self::new(PromptComposer::new(), invoker, validator)
    }

    /// Run the bounded pipeline: at most two generation and two validation calls.
    ///
    /// Only generation failures are errors. An incomplete page after the repair attempt
    /// is returned with its (invalid) validation result.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        market: Market,
        industry_hint: Option<&str>,
    ) -> Result<GeneratedWebsite, WebsiteGeneratorError> {
        let mut stages = StageLog::new(market);

        let prompt = self.composer.compose(request, market, industry_hint);
        stages.enter(GenerationStage::Composed);

        let html_code = self.generate_once(&prompt.system_prompt, &prompt.user_message, 1).await?;
        stages.enter(GenerationStage::Generated);

        let outcome = self.validator.validate(&html_code, market).await;
        stages.enter(GenerationStage::Validated);

        let first = outcome.result();
        if first.valid || first.nothing_missing() {
            info!(
                market = %market,
                source = %outcome.source(),
                valid = first.valid,
                "Website generated without repair"
            );
            stages.enter(GenerationStage::Done);
            return Ok(finish(html_code, outcome, false, stages));
        }

        info!(
            market = %market,
            missing = ?first.missing_sections,
            "Validation failed, attempting repair"
        );
        stages.enter(GenerationStage::Repairing);
        let repair_message = format!(
            "{}\n\n{}",
            prompt.user_message,
            build_repair_instruction(&first.missing_sections, market)
        );

        let html_code = self.generate_once(&prompt.system_prompt, &repair_message, 2).await?;
        stages.enter(GenerationStage::Regenerated);

        let outcome = self.validator.validate(&html_code, market).await;
        stages.enter(GenerationStage::Revalidated);

        if !outcome.result().valid {
            warn!(
                market = %market,
                missing = ?outcome.result().missing_sections,
                "Repair attempt still missing sections"
            );
        }

        stages.enter(GenerationStage::Done);
        Ok(finish(html_code, outcome, true, stages))
    }

    /// One generation call followed by the asset guarantee.
    async fn generate_once(
        &self,
        system_prompt: &str,
        user_message: &str,
        attempt: u8,
    ) -> Result<String, WebsiteGeneratorError> {
        let markup = self
            .invoker
            .invoke(system_prompt, user_message)
            .await
            .map_err(|source| WebsiteGeneratorError::Generation { attempt, source })?;
        Ok(ensure_baseline_assets(&markup))
    }
}

fn finish(
    html_code: String,
    outcome: ValidationOutcome,
    repair_attempted: bool,
    stages: StageLog,
) -> GeneratedWebsite {
    GeneratedWebsite {
        html_code,
        validation_source: outcome.source(),
        validation_result: outcome.into_result(),
        repair_attempted,
        stages: stages.stages,
    }
}

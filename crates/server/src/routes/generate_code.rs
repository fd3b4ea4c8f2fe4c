use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Json as ResponseJson,
    routing::post,
};
use domain::models::website::{DEFAULT_BUSINESS_TYPE, GenerateCodeRequest, GenerateCodeResponse};
use services::services::business_profile::{detect_business_type, extract_business_name};
use tracing::info;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// Overrides the `market` body field when present.
pub const MARKET_HEADER: &str = "x-market";

/// POST /api/generate-code
/// Generate a complete single-page website for the selected market
pub async fn generate_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<GenerateCodeRequest>,
) -> Result<ResponseJson<ApiResponse<GenerateCodeResponse>>, ApiError> {
    payload.validate()?;

    let market = payload.resolve_market(
        headers
            .get(MARKET_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    let business_type = detect_business_type(&payload.user_prompt);

    info!(
        market = %market,
        business_type = business_type.as_deref().unwrap_or(DEFAULT_BUSINESS_TYPE),
        "Generating website code"
    );

    let request = payload.into_generation_request();
    let site = state
        .generator
        .generate(&request, market, business_type.as_deref())
        .await?;

    let business_name = extract_business_name(&site.html_code);
    info!(
        market = %market,
        business_name = %business_name,
        valid = site.validation_result.valid,
        repair_attempted = site.repair_attempted,
        source = %site.validation_source,
        "Website code generated"
    );

    Ok(ResponseJson(ApiResponse::success(GenerateCodeResponse {
        html_code: site.html_code,
        business_name,
        business_type: business_type.unwrap_or_else(|| DEFAULT_BUSINESS_TYPE.to_string()),
        validation_result: site.validation_result,
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-code", post(generate_code))
}

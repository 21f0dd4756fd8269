// src/api/http/handlers.rs
// Liveness and practice feedback handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::feedback;
use crate::prompt::build_practice_prompts;
use crate::state::AppState;
use crate::types::{PracticeRequest, PracticeResponse};

pub const LIVENESS_MESSAGE: &str = "LearnWithNisal practice server alive";

/// `GET /`
pub async fn root_handler() -> &'static str {
    LIVENESS_MESSAGE
}

/// Any other path under `/api`
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound
}

/// `POST /api/practice`
pub async fn practice_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<PracticeRequest>, JsonRejection>,
) -> ApiResult<Json<PracticeResponse>> {
    // Without a JSON content type the body is ignored, as if it were `{}`
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => PracticeRequest::default(),
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };
    let input = request
        .normalized()
        .ok_or(ApiError::MissingField("targetText"))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("practice", %request_id, mode = input.mode.as_str(), level = %input.level);

    async move {
        let (system_prompt, user_message) = build_practice_prompts(&input);
        let result = app_state.gemini.generate(&system_prompt, &user_message).await?;
        let feedback = feedback::decode(&result.content);

        info!(
            parsed = feedback.is_parsed(),
            parse_error = feedback.parse_error().unwrap_or("none"),
            "practice feedback decoded"
        );

        Ok::<_, ApiError>(Json(PracticeResponse {
            feedback,
            raw: result.raw,
        }))
    }
    .instrument(span)
    .await
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AnswerSet, DerivedConfig, ScoreTable, TemplateId};
use super::selection::{self, RankedScore};
use super::service::{AdvisorError, AdvisorService, ConfigStore};

/// Router builder exposing HTTP endpoints for scoring and catalog browsing.
pub fn advisor_router<S>(service: Arc<AdvisorService<S>>) -> Router
where
    S: ConfigStore + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<S>))
        .route("/api/v1/templates", get(templates_handler::<S>))
        .route("/api/v1/questions", get(questions_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) answers: AnswerSet,
    #[serde(default)]
    pub(crate) save: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) template_id: TemplateId,
    pub(crate) scores: ScoreTable,
    pub(crate) ranked: Vec<RankedScore>,
    pub(crate) config: DerivedConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) saved_at: Option<DateTime<Utc>>,
}

pub(crate) async fn recommend_handler<S>(
    State(service): State<Arc<AdvisorService<S>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    S: ConfigStore + 'static,
{
    let recommendation = match service.recommend(&request.answers) {
        Ok(recommendation) => recommendation,
        Err(AdvisorError::Answer(error)) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    let config = super::profile::derive(&request.answers, &recommendation.template_id);

    let saved_at = if request.save {
        match service.save(&config) {
            Ok(record) => Some(record.saved_at),
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
            }
        }
    } else {
        None
    };

    let ranked = selection::rank(service.rubric().registry(), &recommendation.scores);
    let response = RecommendationResponse {
        template_id: recommendation.template_id,
        scores: recommendation.scores,
        ranked,
        config,
        saved_at,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn templates_handler<S>(
    State(service): State<Arc<AdvisorService<S>>>,
) -> Response
where
    S: ConfigStore + 'static,
{
    let templates = service.rubric().registry().templates().to_vec();
    (StatusCode::OK, axum::Json(templates)).into_response()
}

/// Question shape exposed to form collaborators: prompts and labels only,
/// keyed choices in display order.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionView {
    pub(crate) key: String,
    pub(crate) prompt: String,
    pub(crate) options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionView {
    pub(crate) code: String,
    pub(crate) label: String,
}

pub(crate) async fn questions_handler<S>(
    State(service): State<Arc<AdvisorService<S>>>,
) -> Response
where
    S: ConfigStore + 'static,
{
    let questions: Vec<QuestionView> = service
        .rubric()
        .catalog()
        .questions()
        .iter()
        .map(|question| QuestionView {
            key: question.key.clone(),
            prompt: question.prompt.clone(),
            options: question
                .options
                .iter()
                .map(|(code, option)| OptionView {
                    code: code.clone(),
                    label: option.label.clone(),
                })
                .collect(),
        })
        .collect();
    (StatusCode::OK, axum::Json(questions)).into_response()
}

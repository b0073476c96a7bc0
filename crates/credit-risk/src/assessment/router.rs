use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicantProfile, LoanStatus};
use super::report::{report_filename, PredictionReport};
use super::service::{Assessment, AssessmentError, CreditRiskService};

/// Inbound prediction payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub applicant_name: Option<String>,
    pub profile: ApplicantProfile,
}

/// Public view of an assessment.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub predicted_status: &'static str,
    pub predicted_class: LoanStatus,
    pub fully_paid_probability: f64,
    pub charged_off_probability: f64,
    pub risk_score_pct: f64,
    pub message: String,
    pub features: BTreeMap<&'static str, f64>,
}

impl PredictionView {
    pub fn from_assessment(assessment: &Assessment, applicant_name: Option<&str>) -> Self {
        let result = &assessment.result;
        Self {
            predicted_status: result.predicted_class.label(),
            predicted_class: result.predicted_class,
            fully_paid_probability: result.fully_paid_probability,
            charged_off_probability: result.charged_off_probability,
            risk_score_pct: result.risk_score_pct(),
            message: result.eligibility_message(applicant_name),
            features: assessment.features.named().collect(),
        }
    }
}

/// Router builder exposing the prediction and report endpoints.
pub fn assessment_router(service: Arc<CreditRiskService>) -> Router {
    Router::new()
        .route("/api/v1/credit-risk/predictions", post(predict_handler))
        .route(
            "/api/v1/credit-risk/predictions/report",
            post(report_handler),
        )
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<CreditRiskService>>,
    payload: Result<axum::Json<PredictionRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let PredictionRequest {
        applicant_name,
        profile,
    } = request;

    match service.assess(profile) {
        Ok(assessment) => {
            let view = PredictionView::from_assessment(&assessment, applicant_name.as_deref());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn report_handler(
    State(service): State<Arc<CreditRiskService>>,
    payload: Result<axum::Json<PredictionRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let assessment = match service.assess(request.profile) {
        Ok(assessment) => assessment,
        Err(error) => return assessment_error_response(error),
    };

    match PredictionReport::from_assessment(&assessment).to_csv() {
        Ok(body) => {
            let filename = report_filename(Local::now().naive_local());
            let disposition = format!("attachment; filename=\"{filename}\"");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn assessment_error_response(error: AssessmentError) -> Response {
    let status = if error.is_rejected_input() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else if error.is_model_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::BAD_GATEWAY
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

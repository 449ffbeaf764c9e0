use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::AppState;
use crate::wizard::{WizardError, WizardView};

/// Current view of the shared session as a JSON response.
pub fn view_response(state: &AppState) -> Response {
    let view = WizardView::from_session(&state.session());
    Json(view).into_response()
}

pub fn status_for(err: &WizardError) -> StatusCode {
    match err {
        WizardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WizardError::Busy(_)
        | WizardError::Superseded(_)
        | WizardError::WrongStep { .. }
        | WizardError::AtFirstStep
        | WizardError::AtLastStep
        | WizardError::Terminal
        | WizardError::MissingCredentials => StatusCode::CONFLICT,
        WizardError::UnknownNetwork(_) | WizardError::UnknownSubnet(_) | WizardError::SubnetNotApplicable => {
            StatusCode::BAD_REQUEST
        }
        WizardError::Resolution(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Error body: message, any field errors, and the view after the failed action.
pub fn error_response(state: &AppState, err: WizardError) -> Response {
    let status = status_for(&err);
    let field_errors = match &err {
        WizardError::Validation(errors) => errors.clone(),
        _ => Vec::new(),
    };
    let message = match &err {
        WizardError::Resolution(e) => e.user_message(),
        other => other.to_string(),
    };
    if status.is_server_error() {
        tracing::warn!(%status, error = %err, "Wizard action failed");
    } else {
        tracing::debug!(%status, error = %err, "Wizard action rejected");
    }
    let view = WizardView::from_session(&state.session());
    (
        status,
        Json(json!({
            "error": message,
            "field_errors": field_errors,
            "view": view,
        })),
    )
        .into_response()
}

/// Render the outcome of an action: the fresh view on success, an error body otherwise.
pub fn respond<T>(state: &AppState, result: Result<T, WizardError>) -> Response {
    match result {
        Ok(_) => view_response(state),
        Err(err) => error_response(state, err),
    }
}

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::AppError;

pub type HtmlResult = Result<Response, AppError>;

#[derive(Template)]
#[template(path = "errors/404.html")]
struct NotFoundPage<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "errors/400.html")]
struct BadRequestPage<'a> {
    messages: &'a [String],
}

#[derive(Template)]
#[template(path = "errors/500.html")]
struct ServerErrorPage<'a> {
    message: &'a str,
}

pub fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|err| AppError::internal(format!("failed to render page: {err}")))
}

/// Renders `template` with a status other than 200, e.g. a form sent back
/// with its validation messages.
pub fn page(status: StatusCode, template: &impl Template) -> HtmlResult {
    Ok((status, render(template)?).into_response())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        log_app_error(&self, status);
        error_page(status, &client_messages(&self))
    }
}

pub(crate) fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Validation(_) | AppError::ReferentialIntegrity(_) => StatusCode::BAD_REQUEST,
        AppError::Persistence { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    match err {
        AppError::Persistence { message, source } => {
            tracing::error!(status = status.as_u16(), error = %source, "{message}");
        }
        AppError::Internal(message) => {
            tracing::error!(status = status.as_u16(), "{message}");
        }
        other => {
            tracing::debug!(status = status.as_u16(), error = %other, "request rejected");
        }
    }
}

fn client_messages(err: &AppError) -> Vec<String> {
    if matches!(err, AppError::Internal(_)) && !cfg!(debug_assertions) {
        return vec!["Something went wrong".to_string()];
    }
    err.messages()
}

/// Renders the error page matching `status`. Falls back to a bare body if
/// the page itself cannot be rendered.
pub(crate) fn error_page(status: StatusCode, messages: &[String]) -> Response {
    let first = messages.first().map(String::as_str).unwrap_or_default();
    let rendered = if status == StatusCode::NOT_FOUND {
        NotFoundPage { message: first }.render()
    } else if status.is_client_error() {
        BadRequestPage { messages }.render()
    } else {
        ServerErrorPage { message: first }.render()
    };

    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render error page");
            let reason = status.canonical_reason().unwrap_or("Request failed");
            (status, Html(reason.to_string())).into_response()
        }
    }
}

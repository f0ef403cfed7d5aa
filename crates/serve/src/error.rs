//! HTTP error responses
//!
//! Every failure a handler can produce maps onto one of four [`AppError`]
//! kinds. Page routes answer with the rendered `error` page, `/search`
//! answers with a JSON body through [`JsonError`].

use crate::pages::PageRenderer;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use groupie_core::GroupieError;
use serde::Serialize;
use tracing::{debug, error};

/// Error kinds surfaced to HTTP clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("bad request")]
    BadRequest,
    #[error("internal error")]
    InternalError,
}

impl AppError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::NotFound => "404 Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::BadRequest => "Bad Request Error",
            Self::InternalError => "Internal Server Error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NotFound => "The page you are looking for does not exist.",
            Self::MethodNotAllowed | Self::BadRequest => "Try the home page",
            Self::InternalError => "Completely our mistake.",
        }
    }
}

impl From<GroupieError> for AppError {
    fn from(err: GroupieError) -> Self {
        match err {
            GroupieError::InvalidArtistId { .. } | GroupieError::Validation { .. } => {
                debug!("Rejected request: {}", err);
                Self::BadRequest
            }
            GroupieError::NotFound { .. } => {
                debug!("Resource not found: {}", err);
                Self::NotFound
            }
            other => {
                error!(category = %other.category(), "Request failed: {}", other);
                Self::InternalError
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match PageRenderer::shared().error(self.title(), self.message()) {
            Ok(page) => (self.status(), Html(page)).into_response(),
            Err(e) => {
                error!("Failed to render error page: {}", e);
                (self.status(), self.title()).into_response()
            }
        }
    }
}

/// [`AppError`] rendered as a JSON body for the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonError(pub AppError);

impl From<AppError> for JsonError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<GroupieError> for JsonError {
    fn from(err: GroupieError) -> Self {
        Self(AppError::from(err))
    }
}

/// Body of a failed `/search` request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub title: &'static str,
    pub message: &'static str,
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            success: false,
            title: self.0.title(),
            message: self.0.message(),
        });

        (self.0.status(), body).into_response()
    }
}

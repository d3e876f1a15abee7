use crate::{models::ErrorResponse, repo::RepoError};
use actix_web::{
	error::BlockingError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};
use validator::ValidationErrors;

/// Errors returned to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	/// The row does not exist or belongs to another user. Both cases look the
	/// same to the caller.
	#[error("{0} not found")]
	NotFound(&'static str),

	#[error("{0}")]
	Validation(String),

	#[error("Email already registered")]
	EmailTaken,

	#[error("Incorrect email or password")]
	InvalidCredentials,

	#[error("Could not validate credentials")]
	Unauthorized,

	/// Store or runtime failure. Details are logged where the error is raised
	/// and never sent to the client.
	#[error("Internal server error")]
	Internal,
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::NotFound(_) => StatusCode::NOT_FOUND,
			ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::EmailTaken => StatusCode::BAD_REQUEST,
			ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
			ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		let status = self.status_code();
		HttpResponse::build(status)
			.json(ErrorResponse { status: status.as_u16(), error: self.to_string() })
	}
}

impl From<RepoError> for ApiError {
	fn from(err: RepoError) -> Self {
		match err {
			RepoError::NotFound(entity) => ApiError::NotFound(entity),
			RepoError::DuplicateEmail => ApiError::EmailTaken,
			other => {
				log::error!("Store error: {}", other);
				ApiError::Internal
			},
		}
	}
}

impl From<ValidationErrors> for ApiError {
	fn from(err: ValidationErrors) -> Self {
		log::warn!("Validation error: {}", err);
		ApiError::Validation(err.to_string())
	}
}

impl From<BlockingError> for ApiError {
	fn from(err: BlockingError) -> Self {
		log::error!("Blocking task failed: {}", err);
		ApiError::Internal
	}
}

fn extractor_error(err: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
	log::warn!("Rejected request to {}: {}", req.path(), err);
	ApiError::Validation(err.to_string()).into()
}

/// Body, path and query rejections all surface as 422 with the JSON error body.
pub fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, req| extractor_error(err, req))
}

pub fn path_config() -> web::PathConfig {
	web::PathConfig::default().error_handler(|err, req| extractor_error(err, req))
}

pub fn query_config() -> web::QueryConfig {
	web::QueryConfig::default().error_handler(|err, req| extractor_error(err, req))
}

use askama::Template;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::{Html, IntoResponse},
};
use tower_governor::GovernorError;

use crate::{store, view};

/// Error type for the application.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no route matches the request")]
	UnknownRoute,
	#[error("form error: {0}")]
	Form(#[from] rejection::FormRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
	#[error("template error: {0}")]
	Template(#[from] askama::Error),
	#[error("rate limit error: {0}")]
	RateLimit(#[from] GovernorError),
}

impl Error {
	/// The status code and the message shown to the client.
	fn status(&self) -> (StatusCode, &'static str) {
		match self {
			Self::UnknownRoute | Self::Store(store::Error::NotFound(..)) | Self::Path(..) => {
				(StatusCode::NOT_FOUND, "The page you are looking for does not exist.")
			}
			Self::Store(store::Error::Conflict(..)) => {
				(StatusCode::CONFLICT, "A post with that title already exists.")
			}
			Self::Store(store::Error::ReadOnly) => {
				(StatusCode::METHOD_NOT_ALLOWED, "Posts cannot be changed on this blog.")
			}
			Self::Form(..) | Self::Query(..) => {
				(StatusCode::BAD_REQUEST, "The submitted form could not be read.")
			}
			Self::RateLimit(GovernorError::TooManyRequests { .. }) => {
				(StatusCode::TOO_MANY_REQUESTS, "Slow down! Please try again in a moment.")
			}
			_ => (
				StatusCode::INTERNAL_SERVER_ERROR,
				"Something went wrong on our side.",
			),
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		let (status, message) = self.status();

		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, "request rejected");
		}

		let page = view::ErrorPage {
			status: status.as_u16(),
			message: message.into(),
		};

		match page.render() {
			Ok(html) => (status, Html(html)).into_response(),
			Err(error) => {
				tracing::error!(%error, "failed to render error page");

				(status, message).into_response()
			}
		}
	}
}

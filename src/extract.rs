use axum::{
	extract::{FromRequest, FromRequestParts, Request},
	http::request,
};
use serde::de;

use crate::{error::Error, view::FieldErrors};

/// The outcome of validating a submitted form.
#[derive(Debug)]
pub enum Submission<T> {
	Valid(T),
	/// The submitted values, kept so the form can be shown again,
	/// along with the reason each invalid field was rejected.
	Invalid(T, FieldErrors),
}

/// Extractor that deserializes a url-encoded form body and validates it.
///
/// Validation failures are not rejections: the handler receives the
/// submitted values together with the field errors, so it can redisplay
/// the form. A body that cannot be deserialized at all is rejected.
pub struct Form<T>(pub Submission<T>);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Form<T>
where
	T: de::DeserializeOwned + validator::Validate + Send,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let input = axum::Form::<T>::from_request(req, state).await?.0;

		Ok(Self(match input.validate() {
			Ok(()) => Submission::Valid(input),
			Err(errors) => Submission::Invalid(input, errors.into()),
		}))
	}
}

/// Extractor that deserializes a query string.
pub struct Query<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
	T: de::DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Query::<T>::from_request_parts(parts, state)
			.await?
			.0;

		Ok(Self(result))
	}
}

/// Extractor that deserializes a path parameter.
///
/// An unparsable parameter, such as a non-numeric post id, is reported as
/// a missing page.
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: de::DeserializeOwned + Send,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Path::<T>::from_request_parts(parts, state)
			.await?
			.0;

		Ok(Self(result))
	}
}

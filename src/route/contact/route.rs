use axum::{
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Response},
};

use crate::{
	extract::{Form, Submission},
	mail::{ContactMessage, Mail},
	view::{self, FieldErrors},
	Error,
};

/// Shows the empty contact form.
pub async fn get_contact() -> Result<Html<String>, Error> {
	view::render(&view::Contact::new(view::CONTACT_HEADER))
}

/// Forwards a contact message to the site owner by email.
///
/// A failed delivery is reported to the visitor and keeps the submitted
/// values in the form so it can be sent again.
pub async fn send_contact(
	State(mailer): State<Mail>,
	Form(submission): Form<ContactMessage>,
) -> Result<Response, Error> {
	let message = match submission {
		Submission::Valid(message) => message,
		Submission::Invalid(input, errors) => {
			let page = view::Contact {
				header: view::CONTACT_HEADER,
				input,
				errors,
			};

			return Ok((StatusCode::UNPROCESSABLE_ENTITY, view::render(&page)?).into_response());
		}
	};

	match mailer.send(&message).await {
		Ok(()) => Ok(view::render(&view::Contact::new(view::CONTACT_SENT))?.into_response()),
		Err(error) => {
			tracing::error!(%error, "failed to send contact message");

			let page = view::Contact {
				header: view::CONTACT_FAILED,
				input: message,
				errors: FieldErrors::default(),
			};

			Ok((StatusCode::BAD_GATEWAY, view::render(&page)?).into_response())
		}
	}
}

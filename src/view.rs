use std::collections::HashMap;

use askama::Template;
use axum::response::Html;

use crate::{mail::ContactMessage, model, Error};

pub const CONTACT_HEADER: &str = "Contact me";
pub const CONTACT_SENT: &str = "Successful sent message!";
pub const CONTACT_FAILED: &str = "Failed to send message, please try again later.";

/// Renders a template into an HTML response body.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, Error> {
	Ok(Html(template.render()?))
}

/// The first validation message for each invalid form field.
#[derive(Debug, Default)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
	/// Returns the message for `field`, or an empty string if it is valid.
	pub fn message(&self, field: &str) -> &str {
		self.0.get(field).map_or("", String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<validator::ValidationErrors> for FieldErrors {
	fn from(errors: validator::ValidationErrors) -> Self {
		Self(
			errors
				.field_errors()
				.into_iter()
				.filter_map(|(field, errors)| {
					let error = errors.first()?;
					let message = error
						.message
						.as_ref()
						.map_or_else(|| error.code.to_string(), ToString::to_string);

					Some((field.to_string(), message))
				})
				.collect(),
		)
	}
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct Index {
	pub posts: Vec<model::Post>,
	pub date: String,
	pub editable: bool,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct Post {
	pub post: model::Post,
	pub date: String,
	pub editable: bool,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct About;

#[derive(Template)]
#[template(path = "contact.html")]
pub struct Contact {
	pub header: &'static str,
	pub input: ContactMessage,
	pub errors: FieldErrors,
}

impl Contact {
	pub fn new(header: &'static str) -> Self {
		Self {
			header,
			input: ContactMessage::default(),
			errors: FieldErrors::default(),
		}
	}
}

/// The form used to create and edit posts.
#[derive(Template)]
#[template(path = "make-post.html")]
pub struct PostForm {
	pub heading: &'static str,
	/// Where the form is submitted to.
	pub action: String,
	pub input: model::PostContent,
	pub errors: FieldErrors,
	/// Whether the last submission was rejected because the title is taken.
	pub exists: bool,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
	pub status: u16,
	pub message: String,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::*;

	#[test]
	fn test_field_errors() {
		let input = model::PostContent {
			title: "The Life of Cactus".into(),
			img_url: "not a url".into(),
			..Default::default()
		};

		let errors = FieldErrors::from(input.validate().unwrap_err());

		assert_eq!(errors.message("title"), "");
		assert_eq!(errors.message("img_url"), "Please enter a valid image URL.");
		assert_eq!(errors.message("author"), "Please enter the author's name.");
	}

	#[test]
	fn test_contact_escapes_input() {
		let page = Contact {
			header: CONTACT_HEADER,
			input: ContactMessage {
				name: "<script>alert(1)</script>".into(),
				..Default::default()
			},
			errors: FieldErrors::default(),
		};

		let html = render(&page).unwrap().0;

		assert!(html.contains("Contact me"));
		assert!(!html.contains("<script>alert(1)</script>"));
	}

	#[test]
	fn test_image_url_stays_in_attribute() {
		let page = Post {
			post: model::Post {
				id: 1,
				title: "The Life of Cactus".into(),
				subtitle: String::new(),
				date: "March 07, 2024".into(),
				body: "<p>Nori grape.</p>".into(),
				author: "Angela Yu".into(),
				img_url: r#"https://example.com/a.jpg');color:red;x:url('"><script>alert(1)</script>"#
					.into(),
			},
			date: String::new(),
			editable: false,
		};

		let html = render(&page).unwrap().0;

		assert!(html.contains(r#"<img class="post-image" src="https:"#));
		assert!(!html.contains("background-image"));
		assert!(!html.contains("style="));
		assert!(!html.contains(r#""><script>"#));
		assert!(!html.contains("<script>alert(1)</script>"));
	}
}

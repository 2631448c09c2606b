use serde::Deserialize;
use validator::{Validate, ValidationError};

/// The format used for publication dates, e.g. `October 16, 2026`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Rejects values that are empty or only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::new("blank"));
	}

	Ok(())
}

/// A single blog post.
///
/// The `title` is unique across all posts.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
	pub id: i64,
	pub title: String,
	pub subtitle: String,
	/// The publication date, already formatted for display.
	pub date: String,
	/// The post content as trusted HTML.
	pub body: String,
	pub author: String,
	pub img_url: String,
}

/// The fields of a post that are written through the post form.
///
/// Missing fields deserialize to empty strings so that they are reported
/// as validation errors next to the field instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct PostContent {
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please enter a title."))]
	pub title: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please enter a subtitle."))]
	pub subtitle: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please enter the author's name."))]
	pub author: String,
	#[serde(default)]
	#[validate(url(message = "Please enter a valid image URL."))]
	pub img_url: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please write some content."))]
	pub body: String,
}

impl From<Post> for PostContent {
	fn from(post: Post) -> Self {
		Self {
			title: post.title,
			subtitle: post.subtitle,
			author: post.author,
			img_url: post.img_url,
			body: post.body,
		}
	}
}

/// Formats a date the way posts display it.
pub fn display_date(date: chrono::NaiveDate) -> String {
	date.format(DATE_FORMAT).to_string()
}

/// Returns today's date in the local timezone, formatted for display.
pub fn today() -> String {
	display_date(chrono::Local::now().date_naive())
}

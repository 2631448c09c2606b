use axum::{
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
	extract::{Form, Path, Query, Submission},
	model::today,
	store::{self, Posts},
	view::{self, FieldErrors},
	Error,
};

use super::model;

const NEW_POST: &str = "New Post";
const EDIT_POST: &str = "Edit Post";

/// Renders the post form, either empty or pre-populated with `input`.
fn form(
	heading: &'static str,
	action: String,
	input: model::PostContent,
	errors: FieldErrors,
	exists: bool,
) -> Result<Html<String>, Error> {
	view::render(&view::PostForm {
		heading,
		action,
		input,
		errors,
		exists,
	})
}

/// Redisplays a rejected submission with its field errors.
fn invalid(
	heading: &'static str,
	action: String,
	input: model::PostContent,
	errors: FieldErrors,
) -> Result<Response, Error> {
	tracing::debug!(%action, "post form failed validation");

	Ok((
		StatusCode::UNPROCESSABLE_ENTITY,
		form(heading, action, input, errors, false)?,
	)
		.into_response())
}

/// Shows an empty form for a new post.
pub async fn new_post(Query(query): Query<model::FormQuery>) -> Result<Html<String>, Error> {
	form(
		NEW_POST,
		"/new-post".into(),
		model::PostContent::default(),
		FieldErrors::default(),
		query.exists,
	)
}

/// Creates a post dated today, then returns to the list of posts.
pub async fn create_post(
	State(posts): State<Posts>,
	Form(submission): Form<model::PostContent>,
) -> Result<Response, Error> {
	let content = match submission {
		Submission::Valid(content) => content,
		Submission::Invalid(input, errors) => {
			return invalid(NEW_POST, "/new-post".into(), input, errors)
		}
	};

	match posts.create(&content, &today()).await {
		Ok(post) => {
			tracing::info!(id = post.id, title = %post.title, "created post");

			Ok(Redirect::to("/").into_response())
		}
		Err(store::Error::Conflict(title)) => {
			tracing::info!(%title, "rejected post with a duplicate title");

			Ok(Redirect::to("/new-post?exists=true").into_response())
		}
		Err(error) => Err(error.into()),
	}
}

/// Shows the form pre-populated with an existing post.
pub async fn edit_post(
	State(posts): State<Posts>,
	Path(id): Path<i64>,
	Query(query): Query<model::FormQuery>,
) -> Result<Html<String>, Error> {
	let post = posts.get(id).await?;

	form(
		EDIT_POST,
		format!("/edit/{id}"),
		post.into(),
		FieldErrors::default(),
		query.exists,
	)
}

/// Overwrites an existing post, then shows it.
pub async fn update_post(
	State(posts): State<Posts>,
	Path(id): Path<i64>,
	Form(submission): Form<model::PostContent>,
) -> Result<Response, Error> {
	let content = match submission {
		Submission::Valid(content) => content,
		Submission::Invalid(input, errors) => {
			// unknown posts are reported as such, not as an invalid form
			posts.get(id).await?;

			return invalid(EDIT_POST, format!("/edit/{id}"), input, errors);
		}
	};

	match posts.update(id, &content).await {
		Ok(post) => {
			tracing::info!(id, title = %post.title, "updated post");

			Ok(Redirect::to(&format!("/post/{id}")).into_response())
		}
		Err(store::Error::Conflict(title)) => {
			tracing::info!(id, %title, "rejected post with a duplicate title");

			Ok(Redirect::to(&format!("/edit/{id}?exists=true")).into_response())
		}
		Err(error) => Err(error.into()),
	}
}

/// Deletes a post, then returns to the list of posts.
pub async fn remove_post(
	State(posts): State<Posts>,
	Path(id): Path<i64>,
) -> Result<Redirect, Error> {
	posts.delete(id).await?;

	tracing::info!(id, "deleted post");

	Ok(Redirect::to("/"))
}

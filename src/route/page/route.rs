use axum::{extract::State, response::Html};

use crate::{extract::Path, model, store::Posts, view, Error};

/// Lists every post.
pub async fn get_posts(State(posts): State<Posts>) -> Result<Html<String>, Error> {
	let editable = !posts.is_read_only();
	let posts = posts.list().await?;

	view::render(&view::Index {
		posts,
		date: model::today(),
		editable,
	})
}

/// Shows a single post by its id.
pub async fn get_post(
	State(posts): State<Posts>,
	Path(id): Path<i64>,
) -> Result<Html<String>, Error> {
	let post = posts.get(id).await?;

	view::render(&view::Post {
		post,
		date: model::today(),
		editable: !posts.is_read_only(),
	})
}

pub async fn get_about() -> Result<Html<String>, Error> {
	view::render(&view::About)
}

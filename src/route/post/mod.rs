use axum::routing::get;

use crate::AppState;

pub mod model;
pub mod route;

pub fn routes() -> axum::Router<AppState> {
	use route::*;

	axum::Router::new()
		.route("/new-post", get(new_post).post(create_post))
		.route("/edit/:id", get(edit_post).post(update_post))
		.route("/remove-post/:id", get(remove_post))
}

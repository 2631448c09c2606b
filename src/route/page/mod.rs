use axum::routing::get;

use crate::AppState;

pub mod route;

pub fn routes() -> axum::Router<AppState> {
	use route::*;

	axum::Router::new()
		.route("/", get(get_posts))
		.route("/post/:id", get(get_post))
		.route("/about", get(get_about))
}

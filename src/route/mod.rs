use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{error::Error, AppState};

pub mod contact;
pub mod page;
pub mod post;

/// Returns every route the blog serves.
///
/// The post editor is only mounted when the post store accepts writes.
pub fn routes(read_only: bool) -> Router<AppState> {
	let router = Router::new()
		.merge(page::routes())
		.merge(contact::routes());

	if read_only {
		router
	} else {
		router.merge(post::routes())
	}
}

/// Builds the application with its state, static files and request tracing.
pub fn app(state: AppState) -> Router {
	routes(state.posts.is_read_only())
		.nest_service("/static", ServeDir::new("static"))
		.fallback(not_found)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

async fn not_found() -> Error {
	Error::UnknownRoute
}

#![warn(clippy::pedantic)]

mod error;
mod extract;
mod mail;
mod model;
mod ratelimit;
mod route;
mod settings;
mod store;
mod trace;
mod view;


use std::{net::SocketAddr, sync::Arc};

use tower_governor::GovernorLayer;

pub use error::Error;

use crate::{
	mail::{Mail, SmtpMailer},
	settings::{PostSource, Settings},
	store::{Posts, RemotePosts, SqlitePosts},
};

pub type AppState = State;

/// The shared application state.
///
/// Both dependencies are trait objects, so handlers work the same whether
/// posts come from the remote endpoint or the database, and tests can
/// substitute the mailer.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub posts: Posts,
	pub mailer: Mail,
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let settings = Settings::from_env().expect("invalid configuration");

	trace::init_tracing_subscriber(settings.log_level);

	let posts: Posts = match &settings.source {
		PostSource::Remote(url) => Arc::new(
			RemotePosts::fetch(url.clone())
				.await
				.expect("failed to fetch posts"),
		),
		PostSource::Database(url) => Arc::new(
			SqlitePosts::connect(url)
				.await
				.expect("failed to connect to database"),
		),
	};

	let state = State {
		posts,
		mailer: Arc::new(SmtpMailer::new(&settings.smtp).expect("invalid smtp configuration")),
	};

	let governor = ratelimit::visitors();

	ratelimit::cleanup_old_limits(&[&governor]);

	let app = route::app(state).layer(GovernorLayer { config: governor });

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", settings.port))
		.await
		.expect("failed to bind to port");

	tracing::info!(
		port = settings.port,
		read_only = matches!(settings.source, PostSource::Remote(..)),
		"listening"
	);

	axum::serve(
		listener,
		app.into_make_service_with_connect_info::<SocketAddr>(),
	)
	.await
	.expect("server error");
}

use std::time::Duration;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_POSTS_URL: &str = "https://api.npoint.io/674f5423f73deab1e9a7";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// An error that can occur while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0}")]
	Config(#[from] config::ConfigError),
	#[error("{0} must be set")]
	Missing(&'static str),
	#[error("LOG_LEVEL is not a valid level: {0:?}")]
	LogLevel(String),
}

/// Where the posts come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSource {
	/// A read-only JSON endpoint, fetched once at startup.
	Remote(String),
	/// A SQLite database that supports creating, editing and removing posts.
	Database(String),
}

#[derive(Debug, Clone)]
pub struct Smtp {
	pub host: String,
	pub port: u16,
	/// The account used to authenticate, and both the sender and recipient
	/// of contact messages.
	pub email: String,
	pub password: String,
	pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Settings {
	pub port: u16,
	pub log_level: LevelFilter,
	pub source: PostSource,
	pub smtp: Smtp,
}

/// The environment variables as read, before defaults are resolved into
/// [`Settings`]. Keys are lowercased by [`config::Environment`].
#[derive(Debug, Deserialize)]
struct Vars {
	#[serde(default)]
	my_email: String,
	#[serde(default)]
	password: String,
	#[serde(default = "default_port")]
	port: u16,
	#[serde(default = "default_log_level")]
	log_level: String,
	database_url: Option<String>,
	#[serde(default = "default_posts_url")]
	posts_url: String,
	#[serde(default = "default_smtp_host")]
	smtp_host: String,
	#[serde(default = "default_smtp_port")]
	smtp_port: u16,
	#[serde(default = "default_smtp_timeout_secs")]
	smtp_timeout_secs: u64,
}

fn default_port() -> u16 {
	3000
}

fn default_log_level() -> String {
	"info".into()
}

fn default_posts_url() -> String {
	DEFAULT_POSTS_URL.into()
}

fn default_smtp_host() -> String {
	DEFAULT_SMTP_HOST.into()
}

fn default_smtp_port() -> u16 {
	DEFAULT_SMTP_PORT
}

fn default_smtp_timeout_secs() -> u64 {
	10
}

impl Settings {
	/// Reads the settings from the process environment.
	///
	/// Call [`dotenvy::dotenv`] first so a local `.env` file is taken into account.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_source(config::Environment::default())
	}

	pub fn from_source(environment: config::Environment) -> Result<Self, Error> {
		let vars = config::Config::builder()
			.add_source(environment)
			.build()?
			.try_deserialize::<Vars>()?;

		if vars.my_email.is_empty() {
			return Err(Error::Missing("MY_EMAIL"));
		}

		if vars.password.is_empty() {
			return Err(Error::Missing("PASSWORD"));
		}

		let log_level = vars
			.log_level
			.parse::<LevelFilter>()
			.map_err(|_| Error::LogLevel(vars.log_level))?;

		let source = match vars.database_url.filter(|url| !url.is_empty()) {
			Some(url) => PostSource::Database(url),
			None => PostSource::Remote(vars.posts_url),
		};

		Ok(Self {
			port: vars.port,
			log_level,
			source,
			smtp: Smtp {
				host: vars.smtp_host,
				port: vars.smtp_port,
				email: vars.my_email,
				password: vars.password,
				timeout: Duration::from_secs(vars.smtp_timeout_secs),
			},
		})
	}
}

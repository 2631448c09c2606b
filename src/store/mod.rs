mod database;
mod remote;

use std::sync::Arc;

pub use database::SqlitePosts;
pub use remote::RemotePosts;

use crate::model::{Post, PostContent};

/// The shared, type-erased post store handed to every handler.
pub type Posts = Arc<dyn PostStore>;

/// An error that can occur while reading or writing posts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	NotFound(i64),
	#[error("a post titled {0:?} already exists")]
	Conflict(String),
	#[error("posts are read-only")]
	ReadOnly,
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("failed to fetch posts: {0}")]
	Fetch(#[from] Box<ureq::Error>),
	#[error("failed to read posts: {0}")]
	Read(#[from] std::io::Error),
	#[error("failed to decode posts: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Storage for blog posts.
///
/// Posts are identified by a stable integer id and have unique titles.
/// Read-only stores reject every write with [`Error::ReadOnly`].
#[axum::async_trait]
pub trait PostStore: Send + Sync {
	/// Returns every post, ordered by id.
	async fn list(&self) -> Result<Vec<Post>, Error>;

	/// Returns a single post, or [`Error::NotFound`] if it does not exist.
	async fn get(&self, id: i64) -> Result<Post, Error>;

	/// Creates a new post published on `date`.
	///
	/// Returns [`Error::Conflict`] if another post already has the same title,
	/// in which case nothing is written.
	async fn create(&self, content: &PostContent, date: &str) -> Result<Post, Error>;

	/// Overwrites every editable field of an existing post.
	///
	/// The id and publication date are preserved.
	async fn update(&self, id: i64, content: &PostContent) -> Result<Post, Error>;

	async fn delete(&self, id: i64) -> Result<(), Error>;

	/// Whether [`PostStore::create`], [`PostStore::update`] and [`PostStore::delete`]
	/// are supported.
	fn is_read_only(&self) -> bool;
}

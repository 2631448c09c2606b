use serde::Deserialize;

use super::{Error, PostStore};
use crate::model::{Post, PostContent};

/// A post as served by the remote JSON endpoint.
///
/// Only `title` and `body` are required, everything else falls back to an
/// empty string when the endpoint leaves it out.
#[derive(Debug, Deserialize)]
pub struct RemotePost {
	pub title: String,
	#[serde(default)]
	pub subtitle: String,
	#[serde(default)]
	pub date: String,
	pub body: String,
	#[serde(default)]
	pub author: String,
	#[serde(default, alias = "image_url")]
	pub img_url: String,
}

/// A read-only set of posts, loaded once from a JSON endpoint.
///
/// Posts are identified by their position in the response, starting at 1.
#[derive(Debug, Default)]
pub struct RemotePosts {
	posts: Vec<Post>,
}

impl RemotePosts {
	pub fn new(posts: Vec<RemotePost>) -> Self {
		let posts = posts
			.into_iter()
			.zip(1..)
			.map(|(post, id)| Post {
				id,
				title: post.title,
				subtitle: post.subtitle,
				date: post.date,
				body: post.body,
				author: post.author,
				img_url: post.img_url,
			})
			.collect();

		Self { posts }
	}

	/// Decodes a JSON array of posts.
	pub fn from_json(json: &str) -> Result<Self, Error> {
		Ok(Self::new(serde_json::from_str(json)?))
	}

	/// Fetches the posts from `url`.
	///
	/// This blocks the calling thread, so it runs on the blocking pool.
	pub async fn fetch(url: String) -> Result<Self, Error> {
		tokio::task::spawn_blocking(move || {
			tracing::info!(%url, "fetching posts");

			let json = ureq::get(&url)
				.call()
				.map_err(Box::new)?
				.into_string()?;

			Self::from_json(&json)
		})
		.await
		.map_err(|error| Error::Read(std::io::Error::new(std::io::ErrorKind::Other, error)))?
	}
}

#[axum::async_trait]
impl PostStore for RemotePosts {
	async fn list(&self) -> Result<Vec<Post>, Error> {
		Ok(self.posts.clone())
	}

	async fn get(&self, id: i64) -> Result<Post, Error> {
		usize::try_from(id)
			.ok()
			.and_then(|id| id.checked_sub(1))
			.and_then(|index| self.posts.get(index))
			.cloned()
			.ok_or(Error::NotFound(id))
	}

	async fn create(&self, _content: &PostContent, _date: &str) -> Result<Post, Error> {
		Err(Error::ReadOnly)
	}

	async fn update(&self, _id: i64, _content: &PostContent) -> Result<Post, Error> {
		Err(Error::ReadOnly)
	}

	async fn delete(&self, _id: i64) -> Result<(), Error> {
		Err(Error::ReadOnly)
	}

	fn is_read_only(&self) -> bool {
		true
	}
}

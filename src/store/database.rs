use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{Error, PostStore};
use crate::model::{Post, PostContent};

const SCHEMA: &str = r#"
	CREATE TABLE IF NOT EXISTS blog_post (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		title TEXT NOT NULL UNIQUE,
		subtitle TEXT NOT NULL,
		date TEXT NOT NULL,
		body TEXT NOT NULL,
		author TEXT NOT NULL,
		img_url TEXT NOT NULL
	)
"#;

/// Posts stored in the `blog_post` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SqlitePosts {
	pool: SqlitePool,
}

impl SqlitePosts {
	/// Connects to the database at `url`, creating it and the `blog_post`
	/// table if they do not exist yet.
	pub async fn connect(url: &str) -> Result<Self, Error> {
		let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
		let pool = SqlitePoolOptions::new().connect_with(options).await?;

		Self::new(pool).await
	}

	/// Wraps an existing pool, creating the `blog_post` table if needed.
	pub async fn new(pool: SqlitePool) -> Result<Self, Error> {
		sqlx::query(SCHEMA).execute(&pool).await?;

		Ok(Self { pool })
	}
}

/// Maps a unique constraint violation on the title to [`Error::Conflict`].
fn conflict(error: sqlx::Error, title: &str) -> Error {
	match error {
		sqlx::Error::Database(ref database) if database.is_unique_violation() => {
			Error::Conflict(title.to_owned())
		}
		error => Error::Database(error),
	}
}

#[axum::async_trait]
impl PostStore for SqlitePosts {
	async fn list(&self) -> Result<Vec<Post>, Error> {
		let posts = sqlx::query_as::<_, Post>(
			r#"
				SELECT * FROM blog_post
				ORDER BY id
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(posts)
	}

	async fn get(&self, id: i64) -> Result<Post, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				SELECT * FROM blog_post
				WHERE id = ?
			"#,
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		post.ok_or(Error::NotFound(id))
	}

	async fn create(&self, content: &PostContent, date: &str) -> Result<Post, Error> {
		// Dropping the transaction on a conflict rolls the insert back.
		let mut tx = self.pool.begin().await?;

		let post = sqlx::query_as::<_, Post>(
			r#"
				INSERT INTO blog_post (title, subtitle, date, body, author, img_url)
				VALUES (?, ?, ?, ?, ?, ?)
				RETURNING *
			"#,
		)
		.bind(&content.title)
		.bind(&content.subtitle)
		.bind(date)
		.bind(&content.body)
		.bind(&content.author)
		.bind(&content.img_url)
		.fetch_one(&mut *tx)
		.await
		.map_err(|e| conflict(e, &content.title))?;

		tx.commit().await?;

		Ok(post)
	}

	async fn update(&self, id: i64, content: &PostContent) -> Result<Post, Error> {
		let mut tx = self.pool.begin().await?;

		let post = sqlx::query_as::<_, Post>(
			r#"
				UPDATE blog_post
				SET title = ?, subtitle = ?, body = ?, author = ?, img_url = ?
				WHERE id = ?
				RETURNING *
			"#,
		)
		.bind(&content.title)
		.bind(&content.subtitle)
		.bind(&content.body)
		.bind(&content.author)
		.bind(&content.img_url)
		.bind(id)
		.fetch_optional(&mut *tx)
		.await
		.map_err(|e| conflict(e, &content.title))?;

		let post = post.ok_or(Error::NotFound(id))?;

		tx.commit().await?;

		Ok(post)
	}

	async fn delete(&self, id: i64) -> Result<(), Error> {
		let status = sqlx::query(
			r#"
				DELETE FROM blog_post
				WHERE id = ?
			"#,
		)
		.bind(id)
		.execute(&self.pool)
		.await?;

		if status.rows_affected() == 0 {
			return Err(Error::NotFound(id));
		}

		Ok(())
	}

	fn is_read_only(&self) -> bool {
		false
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	fn content(title: &str) -> PostContent {
		PostContent {
			title: title.into(),
			subtitle: "Who knew that cacti lived such interesting lives.".into(),
			author: "Angela Yu".into(),
			img_url: "https://images.unsplash.com/photo-1530482054429-cc491f61333b".into(),
			body: "<p>Nori grape silver beet broccoli kombu beet greens fava bean.</p>".into(),
		}
	}

	#[tokio::test]
	async fn test_create_then_get() {
		let store = database().await;
		let input = content("The Life of Cactus");

		let created = store.create(&input, "May 01, 2024").await.unwrap();
		let post = store.get(created.id).await.unwrap();

		assert_eq!(post, created);
		assert_eq!(PostContent::from(post.clone()), input);
		assert_eq!(post.date, "May 01, 2024");
	}

	#[tokio::test]
	async fn test_duplicate_title() {
		let store = database().await;

		store
			.create(&content("The Life of Cactus"), "May 01, 2024")
			.await
			.unwrap();

		let result = store
			.create(&content("The Life of Cactus"), "May 02, 2024")
			.await;

		assert!(matches!(result, Err(store::Error::Conflict(title)) if title == "The Life of Cactus"));
		assert_eq!(store.list().await.unwrap().len(), 1);

		// the rolled back insert does not block later writes
		store
			.create(&content("Top 15 Things to Do When You Are Bored"), "May 02, 2024")
			.await
			.unwrap();
		assert_eq!(store.list().await.unwrap().len(), 2);
	}

	#[tokio::test]
	async fn test_update_overwrites_fields() {
		let store = database().await;
		let created = store
			.create(&content("The Life of Cactus"), "May 01, 2024")
			.await
			.unwrap();

		let changes = PostContent {
			title: "The Life of a Cactus".into(),
			subtitle: "Revised".into(),
			author: "Jack Bauer".into(),
			img_url: "https://example.com/cactus.png".into(),
			body: "<p>Updated.</p>".into(),
		};

		store.update(created.id, &changes).await.unwrap();

		let post = store.get(created.id).await.unwrap();

		assert_eq!(post.id, created.id);
		assert_eq!(post.date, "May 01, 2024");
		assert_eq!(PostContent::from(post), changes);
	}

	#[tokio::test]
	async fn test_update_to_taken_title() {
		let store = database().await;
		let first = store
			.create(&content("The Life of Cactus"), "May 01, 2024")
			.await
			.unwrap();
		let second = store
			.create(&content("Top 15 Things to Do When You Are Bored"), "May 02, 2024")
			.await
			.unwrap();

		let result = store.update(second.id, &content(&first.title)).await;

		assert!(matches!(result, Err(store::Error::Conflict(..))));
		assert_eq!(store.get(second.id).await.unwrap(), second);
	}

	#[tokio::test]
	async fn test_missing_post() {
		let store = database().await;

		assert!(matches!(store.get(9999).await, Err(store::Error::NotFound(9999))));
		assert!(matches!(
			store.update(9999, &content("Ghost")).await,
			Err(store::Error::NotFound(9999))
		));
		assert!(matches!(store.delete(9999).await, Err(store::Error::NotFound(9999))));
	}

	#[tokio::test]
	async fn test_delete_then_get() {
		let store = database().await;
		let created = store
			.create(&content("The Life of Cactus"), "May 01, 2024")
			.await
			.unwrap();

		store.delete(created.id).await.unwrap();

		assert!(matches!(
			store.get(created.id).await,
			Err(store::Error::NotFound(id)) if id == created.id
		));
		assert!(store.list().await.unwrap().is_empty());
	}
}

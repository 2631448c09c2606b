use axum::routing::post;
use tower_governor::GovernorLayer;

use crate::{ratelimit, AppState};

pub mod route;

/// Only sending is limited, so the form itself can always be viewed.
pub fn routes() -> axum::Router<AppState> {
	use route::*;

	axum::Router::new().route(
		"/contact",
		post(send_contact)
			.layer(GovernorLayer {
				config: ratelimit::outbound_mail(),
			})
			.get(get_contact),
	)
}

#[cfg(test)]
mod test {
	use crate::{ratelimit, test::*};

	fn ada() -> Vec<(&'static str, &'static str)> {
		vec![
			("name", "Ada"),
			("email", "ada@example.com"),
			("phone", "555-1212"),
			("message", "Hello"),
		]
	}

	fn blog(mailer: Arc<MockMailer>) -> TestServer {
		app(Arc::new(RemotePosts::default()), mailer)
	}

	#[tokio::test]
	async fn test_contact_form() {
		let mailer = Arc::new(MockMailer::default());
		let response = blog(mailer.clone()).get("/contact").await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert!(response.text().contains("Contact me"));
		assert!(mailer.sent().is_empty());
	}

	#[tokio::test]
	async fn test_send_message() {
		let mailer = Arc::new(MockMailer::default());
		let response = blog(mailer.clone()).post("/contact").form(&ada()).await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert!(response.text().contains("Successful sent message!"));

		let sent = mailer.sent();
		assert_eq!(sent.len(), 1);

		let body = sent[0].body();
		assert!(body.contains("User = Ada"));
		assert!(body.contains("Email = ada@example.com"));
		assert!(body.contains("Phone = 555-1212"));
		assert!(body.contains("Message = Hello"));
		assert_eq!(mail::SUBJECT, "Message from Blog -");
	}

	#[tokio::test]
	async fn test_failed_send_is_reported() {
		let mailer = Arc::new(MockMailer::failing());
		let response = blog(mailer.clone()).post("/contact").form(&ada()).await;

		assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

		let page = response.text();
		assert!(page.contains("Failed to send message"));
		assert!(!page.contains("Successful sent message!"));
		assert!(page.contains(r#"value="Ada""#));
		assert_eq!(mailer.sent().len(), 1);
	}

	#[tokio::test]
	async fn test_missing_fields() {
		let mailer = Arc::new(MockMailer::default());
		let response = blog(mailer.clone())
			.post("/contact")
			.form(&vec![("name", "Ada"), ("email", "ada@example.com")])
			.await;

		assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

		let page = response.text();
		assert!(page.contains("Please enter your phone number."));
		assert!(page.contains("Please enter a message."));
		assert!(page.contains(r#"value="Ada""#));
		assert!(mailer.sent().is_empty());
	}

	#[tokio::test]
	async fn test_whitespace_fields() {
		let mailer = Arc::new(MockMailer::default());
		let response = blog(mailer.clone())
			.post("/contact")
			.form(&vec![
				("name", "  "),
				("email", "ada@example.com"),
				("phone", "555-1212"),
				("message", "\n"),
			])
			.await;

		assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

		let page = response.text();
		assert!(page.contains("Please enter your name."));
		assert!(page.contains("Please enter a message."));
		assert!(mailer.sent().is_empty());
	}

	#[tokio::test]
	async fn test_sending_is_rate_limited() {
		let mailer = Arc::new(MockMailer::default());
		let app = blog(mailer.clone());

		for _ in 0..ratelimit::MAIL_BURST {
			let response = app.post("/contact").form(&ada()).await;
			assert_eq!(response.status_code(), StatusCode::OK);
		}

		let response = app.post("/contact").form(&ada()).await;

		assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
		assert!(response.text().contains("Slow down!"));
		assert_eq!(mailer.sent().len(), ratelimit::MAIL_BURST as usize);

		assert_eq!(app.get("/contact").await.status_code(), StatusCode::OK);
	}
}

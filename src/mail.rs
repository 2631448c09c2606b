use lettre::{
	message::{header::ContentType, Mailbox},
	transport::smtp::authentication::Credentials,
	AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::Deserialize;
use validator::Validate;

use crate::{model::not_blank, settings};

pub const SUBJECT: &str = "Message from Blog -";

/// The shared mailer handed to the contact handlers.
pub type Mail = std::sync::Arc<dyn Mailer>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid address: {0}")]
	Address(#[from] lettre::address::AddressError),
	#[error("failed to build message: {0}")]
	Message(#[from] lettre::error::Error),
	#[error("smtp error: {0}")]
	Smtp(#[from] lettre::transport::smtp::Error),
}

/// A message submitted through the contact form.
///
/// It is never stored, only forwarded to the site owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct ContactMessage {
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please enter your name."))]
	pub name: String,
	#[serde(default)]
	#[validate(email(message = "Please enter a valid email address."))]
	pub email: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please enter your phone number."))]
	pub phone: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank", message = "Please enter a message."))]
	pub message: String,
}

impl ContactMessage {
	/// The plain text body of the notification email.
	pub fn body(&self) -> String {
		format!(
			"User = {}\nPhone = {}\nEmail = {}\nMessage = {}",
			self.name, self.phone, self.email, self.message
		)
	}
}

/// Delivers contact messages to the site owner.
#[axum::async_trait]
pub trait Mailer: Send + Sync {
	async fn send(&self, message: &ContactMessage) -> Result<(), Error>;
}

/// Sends contact messages through an SMTP relay using STARTTLS.
///
/// The connection is not pooled: every message opens a new connection
/// and closes it once the message is delivered.
pub struct SmtpMailer {
	transport: AsyncSmtpTransport<Tokio1Executor>,
	account: Mailbox,
}

impl SmtpMailer {
	pub fn new(smtp: &settings::Smtp) -> Result<Self, Error> {
		let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
			.port(smtp.port)
			.credentials(Credentials::new(
				smtp.email.clone(),
				smtp.password.clone(),
			))
			.timeout(Some(smtp.timeout))
			.build();

		Ok(Self {
			transport,
			account: smtp.email.parse()?,
		})
	}
}

/// Builds the notification email, sent from and to `account`.
pub fn notification(account: &Mailbox, message: &ContactMessage) -> Result<Message, Error> {
	Ok(Message::builder()
		.from(account.clone())
		.to(account.clone())
		.subject(SUBJECT)
		.header(ContentType::TEXT_PLAIN)
		.body(message.body())?)
}

#[axum::async_trait]
impl Mailer for SmtpMailer {
	#[tracing::instrument(skip_all)]
	async fn send(&self, message: &ContactMessage) -> Result<(), Error> {
		let email = notification(&self.account, message)?;
		let response = self.transport.send(email).await?;

		tracing::info!(code = %response.code(), "contact message delivered");

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn message() -> ContactMessage {
		ContactMessage {
			name: "Ada".into(),
			email: "ada@example.com".into(),
			phone: "555-1212".into(),
			message: "Hello".into(),
		}
	}

	#[test]
	fn test_body() {
		assert_eq!(
			message().body(),
			"User = Ada\nPhone = 555-1212\nEmail = ada@example.com\nMessage = Hello"
		);
	}

	#[test]
	fn test_notification_headers() {
		let account: Mailbox = "owner@example.com".parse().unwrap();
		let email = notification(&account, &message()).unwrap();
		let formatted = String::from_utf8(email.formatted()).unwrap();

		assert!(formatted.contains("Subject: Message from Blog -"));
		assert!(formatted.contains("From: owner@example.com"));
		assert!(formatted.contains("To: owner@example.com"));
		assert!(formatted.contains("User = Ada"));
	}

	#[test]
	fn test_validation() {
		assert!(message().validate().is_ok());

		let errors = ContactMessage {
			email: "ada".into(),
			message: String::new(),
			..message()
		}
		.validate()
		.unwrap_err();

		let fields = errors.field_errors();

		assert!(fields.contains_key("email"));
		assert!(fields.contains_key("message"));
		assert_eq!(fields.len(), 2);
	}

	#[test]
	fn test_whitespace_is_blank() {
		let errors = ContactMessage {
			name: " ".into(),
			phone: "\t".into(),
			..message()
		}
		.validate()
		.unwrap_err();

		let fields = errors.field_errors();

		assert!(fields.contains_key("name"));
		assert!(fields.contains_key("phone"));
		assert_eq!(fields.len(), 2);
	}
}

use std::{sync::Arc, time::Duration};

use axum::{
	body::Body,
	response::{IntoResponse, Response},
};
use governor::{
	clock::QuantaInstant,
	middleware::{RateLimitingMiddleware, StateInformationMiddleware},
};
use tower_governor::{
	governor::{GovernorConfig, GovernorConfigBuilder},
	key_extractor::{GlobalKeyExtractor, KeyExtractor, PeerIpKeyExtractor},
	GovernorError,
};

/// How many contact messages can be sent back to back.
pub const MAIL_BURST: u32 = 5;
/// Seconds until another contact message is allowed once the burst is spent.
pub const MAIL_REPLENISH_SECS: u64 = 6;

/// Limits each visitor to bursts of 50 requests, replenished at ten per second.
///
/// Requires the peer address, so the app must be served with
/// `into_make_service_with_connect_info`.
pub fn visitors() -> Arc<GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>> {
	Arc::new(
		GovernorConfigBuilder::default()
			.per_millisecond(100)
			.burst_size(50)
			.use_headers()
			.error_handler(error_handler)
			.finish()
			.expect("period and burst size are non-zero"),
	)
}

/// Limits how fast contact messages are relayed, across all visitors.
///
/// Every message is sent through the owner's account, so the limit is
/// shared rather than per peer.
pub fn outbound_mail() -> Arc<GovernorConfig<GlobalKeyExtractor, StateInformationMiddleware>> {
	Arc::new(
		GovernorConfigBuilder::default()
			.key_extractor(GlobalKeyExtractor)
			.per_second(MAIL_REPLENISH_SECS)
			.burst_size(MAIL_BURST)
			.use_headers()
			.error_handler(error_handler)
			.finish()
			.expect("period and burst size are non-zero"),
	)
}

fn error_handler(error: GovernorError) -> Response<Body> {
	crate::Error::from(error).into_response()
}

/// Periodically drops limiter state for peers that have not been seen recently.
pub fn cleanup_old_limits<T, M>(configs: &[&Arc<GovernorConfig<T, M>>])
where
	T: KeyExtractor,
	<T as KeyExtractor>::Key: Send + Sync + 'static,
	M: RateLimitingMiddleware<QuantaInstant> + Send + Sync + 'static,
{
	let limiters = configs
		.iter()
		.map(|config| config.limiter().clone())
		.collect::<Vec<_>>();
	let interval = Duration::from_secs(60);

	std::thread::spawn(move || loop {
		std::thread::sleep(interval);

		for limiter in &limiters {
			tracing::debug!(peers = limiter.len(), "pruning rate limiter state");

			limiter.retain_recent();
		}
	});
}

//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket settings for a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePolicy {
    /// Listings and health: 2 requests per second, burst 100.
    Public,
    /// Profile writes: 1 request per second, burst 10.
    Secure,
}

impl RatePolicy {
    fn per_second(self) -> u64 {
        match self {
            RatePolicy::Public => 2,
            RatePolicy::Secure => 1,
        }
    }

    fn burst_size(self) -> u32 {
        match self {
            RatePolicy::Public => 100,
            RatePolicy::Secure => 10,
        }
    }
}

fn layer<K: KeyExtractor>(
    policy: RatePolicy,
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(policy.per_second())
            .burst_size(policy.burst_size())
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies a per-client-IP rate limit to `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy` the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`; otherwise from the socket peer address, which
/// requires serving with `into_make_service_with_connect_info`.
///
/// # Example
///
/// ```rust,ignore
/// let profile = rate_limit::apply(profile_routes(), RatePolicy::Secure, false);
/// ```
pub fn apply<S>(router: Router<S>, policy: RatePolicy, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(layer(policy, SmartIpKeyExtractor))
    } else {
        router.layer(layer(policy, PeerIpKeyExtractor))
    }
}

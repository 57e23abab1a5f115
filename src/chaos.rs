//! Chaos-mode decisions: whether a request is delayed, whether it fails,
//! and which canned error it fails with.
//!
//! All decisions are pure functions of the endpoint settings plus an
//! injectable random source, so tests can pin exact outcomes.

use std::time::Duration;

use axum::http::StatusCode;
use rand::Rng;

use crate::models::{EndpointSettings, ErrorType};

/// Source of randomness for per-request failure decisions.
pub trait RandomSource: Send + Sync {
    /// One uniform sample in `[0, 100)`.
    fn percent(&self) -> f64;
}

/// Process-wide thread-rng source used outside of tests.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn percent(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..100.0)
    }
}

/// Fixed source returning the same sample every time. Lets tests assert
/// exact error-rate thresholds without statistical flakiness.
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn percent(&self) -> f64 {
        self.0
    }
}

/// Artificial delay to apply before answering; zero means none.
pub fn delay_for(settings: &EndpointSettings) -> Duration {
    Duration::from_millis(settings.latency)
}

/// Decide whether this request is answered with a simulated failure.
/// Evaluated independently per request; at 0 never fails, at 100 always.
pub fn should_fail(settings: &EndpointSettings, random: &dyn RandomSource) -> bool {
    random.percent() < f64::from(settings.error_rate)
}

/// Canned status and message for the configured error type.
pub fn error_for(error_type: ErrorType) -> (StatusCode, &'static str) {
    match error_type {
        ErrorType::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error - The server encountered an unexpected condition.",
        ),
        ErrorType::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable - The server is temporarily unable to handle the request.",
        ),
        ErrorType::NotFound => (
            StatusCode::NOT_FOUND,
            "Not Found - The requested resource could not be found.",
        ),
        ErrorType::Timeout => (
            StatusCode::REQUEST_TIMEOUT,
            "Request Timeout - The server timed out waiting for the request.",
        ),
    }
}

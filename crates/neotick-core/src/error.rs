use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

/// Validation and parse errors exposed by `neotick-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid option symbol format: '{value}'")]
    InvalidOptionSymbol { value: String },
    #[error("invalid strike '{value}' in option symbol")]
    InvalidStrike { value: String },
    #[error("unknown month code '{value}' in option symbol")]
    InvalidMonth { value: String },
    #[error("option symbol '{value}' resolves to an impossible calendar date")]
    InvalidExpiryDate { value: String },

    #[error("invalid expiry_time '{value}', expected HH:MM (e.g. '15:30', '19:00')")]
    InvalidExpiryTimeFormat { value: String },
    #[error("expiry_time '{value}' out of range: hour must be 0-23, minute must be 0-59")]
    ExpiryTimeOutOfRange { value: String },

    #[error(
        "unknown exchange '{value}', expected one of NSE, BSE, NFO, BFO, CDS, MCX, NSE_INDEX, BSE_INDEX"
    )]
    UnknownExchange { value: String },
}

/// Failure classification for the explicitly surfaced error tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreeksErrorKind {
    /// Malformed symbol, invalid override, or non-positive numeric input.
    InvalidRequest,
    /// The option's expiry lies in the past.
    Expired,
    /// A quote leg came back without a live traded price.
    PriceUnavailable,
    /// The pricing backend or its solver failed.
    Pricing,
}

/// Structured calculator/orchestration error with an HTTP-style status code.
///
/// Quote and depth fetches never produce this type: their failures collapse
/// to the zero-valued default record by contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreeksError {
    kind: GreeksErrorKind,
    message: String,
}

impl GreeksError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: GreeksErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn expired(message: impl Into<String>) -> Self {
        Self {
            kind: GreeksErrorKind::Expired,
            message: message.into(),
        }
    }

    pub fn price_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: GreeksErrorKind::PriceUnavailable,
            message: message.into(),
        }
    }

    pub fn pricing(message: impl Into<String>) -> Self {
        Self {
            kind: GreeksErrorKind::Pricing,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> GreeksErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP-style status code: caller error vs server error.
    pub const fn status_code(&self) -> u16 {
        match self.kind {
            GreeksErrorKind::InvalidRequest | GreeksErrorKind::Expired => 400,
            GreeksErrorKind::PriceUnavailable => 404,
            GreeksErrorKind::Pricing => 500,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            GreeksErrorKind::InvalidRequest => "greeks.invalid_request",
            GreeksErrorKind::Expired => "greeks.expired",
            GreeksErrorKind::PriceUnavailable => "greeks.price_unavailable",
            GreeksErrorKind::Pricing => "greeks.pricing_failure",
        }
    }

    /// Serializable `{status: "error", message}` body for transport layers.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: "error",
            message: self.message.clone(),
        }
    }
}

impl Display for GreeksError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for GreeksError {}

impl From<ValidationError> for GreeksError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Caller-facing error payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

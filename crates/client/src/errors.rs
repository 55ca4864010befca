use std::error::Error as _;

use common::ProductFieldError;
use thiserror::Error;

/// Anything that went wrong between the client and the service.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("cannot connect to {url}: {message}")]
    Connect { url: String, message: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unreadable response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("service at {url} reports status {status:?}")]
    Unhealthy { url: String, status: String },
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl TransportError {
    pub fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        let url = url.to_string();
        if e.is_timeout() {
            TransportError::Timeout { url }
        } else if let Some(status) = e.status() {
            TransportError::Status { url, status: status.as_u16() }
        } else if e.is_connect() {
            TransportError::Connect { url, message: error_chain(&e) }
        } else if e.is_decode() {
            TransportError::Decode { url, message: error_chain(&e) }
        } else {
            TransportError::Request { url, message: error_chain(&e) }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Connect { .. } => "connect",
            TransportError::Timeout { .. } => "timeout",
            TransportError::Status { .. } => "status",
            TransportError::Decode { .. } => "decode",
            TransportError::Unhealthy { .. } => "unhealthy",
            TransportError::Request { .. } => "request",
        }
    }
}

/// `reqwest` puts the useful part (refused, reset, dns) in the source chain.
fn error_chain(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] ProductFieldError),
    #[error("Price must be a number, got '{0}'")]
    PriceNotNumeric(String),
    #[error("ID must be a number, got '{0}'")]
    IdNotNumeric(String),
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Field(_) => "field",
            ValidationError::PriceNotNumeric(_) => "price",
            ValidationError::IdNotNumeric(_) => "id",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "TransportFailure",
            ClientError::Validation(_) => "ValidationFailure",
        }
    }

    pub fn cause(&self) -> &'static str {
        match self {
            ClientError::Transport(e) => e.kind(),
            ClientError::Validation(e) => e.kind(),
        }
    }
}

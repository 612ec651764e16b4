//! HTTP-side adapter for the Sprig authorization core.
//!
//! # Purpose
//! Gives route handlers one call to make before touching domain data:
//! [`Guard::check`] (or [`Guard::run`] with a continuation). Denials come
//! back as uniform [`error::ApiError`] responses; allows carry the resolved
//! principal and resource tenant for the handler to use.
//!
//! # How it fits
//! The core crate (`sprig-authz`) stays transport-free; everything
//! HTTP-shaped — header parsing, status mapping, response bodies, tracing
//! and metrics bootstrap, deployment config — lives here.
pub mod config;
pub mod error;
pub mod guard;
pub mod observability;

pub use config::GuardConfig;
pub use error::{ApiError, ErrorResponse};
pub use guard::{extract_bearer, Guard};

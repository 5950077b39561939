//! # email-warden core
//!
//! Decides whether a supplied email address should be accepted before a
//! downstream action (such as sending a login link) occurs.
//!
//! The decision runs through a composable chain: a zero-I/O rule filter
//! rejects obviously bad addresses, a time-bounded cache short-circuits on
//! recently confirmed deliverable ones, and a remote verification client
//! handles the rest by submitting a job to an external service and polling
//! it to completion. Remote failures never block a caller: every error
//! resolves to an `unknown` verdict that the default policy allows.
//!
//! ```no_run
//! use email_warden_core::{build_validator, ConfigBuilder, EmailValidator};
//!
//! # async fn example() -> email_warden_core::Result<()> {
//! let config = ConfigBuilder::new().build()?;
//! let validator = build_validator(&config)?;
//!
//! let result = validator.validate("someone@example.com").await;
//! if validator.should_allow(&result) {
//!     // proceed with the signup / magic link / etc.
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod validation;

pub use crate::core::config::{Config, ConfigBuilder};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{ValidationResult, ValidationStatus};
pub use crate::validation::{
    build_validator, CachedValidator, EmailValidator, NullValidator, RemoteVerifier, RuleValidator,
};

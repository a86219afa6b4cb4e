//! Request authentication as an injected strategy.
//!
//! The HTTP layer extracts the raw token (bearer header or cookie) and hands it
//! to whichever [`AuthStrategy`] was chosen at startup.

pub mod domain;
pub mod errors;
pub mod strategy;

pub use domain::Caller;
pub use errors::AuthError;
pub use strategy::{from_config, AuthStrategy, BypassStrategy, JwtStrategy};

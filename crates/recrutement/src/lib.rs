//! Client library for the recruitment management platform.
//!
//! The crate is split in two layers: [`auth`] owns the session
//! lifecycle (role normalization, durable session storage, the auth
//! gateway, and the route guard that gates every view), while [`api`]
//! wraps the platform's REST resources behind typed clients that
//! attach the session's bearer token to every call.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

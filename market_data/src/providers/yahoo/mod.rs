//! Daily-bar provider backed by the Yahoo Finance chart API.
//!
//! The endpoint needs no credentials but throttles anonymous callers, so the
//! provider carries its own rate limiter, a bounded request timeout, and a
//! short transport-only retry schedule.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;

//! Reddit API access.
//!
//! This module provides the OAuth client and the serde models for
//! Reddit's JSON listing envelopes.

pub mod client;
pub mod things;

pub use client::{RedditClient, Sort};
pub use things::Comment;

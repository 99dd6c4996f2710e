//! HTTP client layer — `LemonHttp` request executor, pager, retry policies.

pub mod client;
pub mod pager;
pub mod retry;

pub use client::LemonHttp;
pub use pager::{Cursor, Page};
pub use retry::{RetryConfig, RetryPolicy};

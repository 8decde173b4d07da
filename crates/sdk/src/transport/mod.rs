//! Transport layer for the SendGrid SDK.

pub mod http;

pub use http::HttpTransport;

//! # Mailrelay SDK
//!
//! Async Rust client for the SendGrid v3 email API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mailrelay_sdk::{SendGridClient, SendGridResult};
//! use mailrelay_sdk::api::{Content, EmailAddress, Personalization, SendMailRequest};
//!
//! #[tokio::main]
//! async fn main() -> SendGridResult<()> {
//!     let client = SendGridClient::builder()
//!         .api_key("SG.your-api-key")
//!         .build()?;
//!
//!     client
//!         .mail()
//!         .send(&SendMailRequest {
//!             personalizations: vec![Personalization {
//!                 to: vec![EmailAddress::new("someone@example.com")],
//!                 ..Default::default()
//!             }],
//!             from: EmailAddress::new("me@example.com"),
//!             reply_to: None,
//!             subject: Some("Hello".to_string()),
//!             content: vec![Content::plain("Hi there")],
//!             template_id: None,
//!             attachments: vec![],
//!         })
//!         .await?;
//!
//!     let lists = client.lists().list().await?;
//!     println!("Found {} contact lists", lists.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{SendGridClient, SendGridClientBuilder};
pub use config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL};
pub use error::{ApiErrorItem, SendGridError, SendGridResult};

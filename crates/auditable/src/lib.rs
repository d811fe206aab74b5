//! Client library for the auditable.io audit-logging service.
//!
//! The whole crate is a thin HTTP binding over two REST calls: submit an
//! audit event, fetch a signed viewer link for an actor/team pair. There is
//! no local state and no retry logic. Every call is exactly one synchronous
//! request/response exchange, and every failure comes back to the caller as
//! a typed [`Error`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use auditable::{Client, Event};
//!
//! # fn main() -> auditable::Result<()> {
//! let client = Client::new("proj_1Kd93", "sk_live_Th3T0k3n");
//!
//! client.report_event(
//!     &Event::new("user.login")
//!         .with_actor("u-42")
//!         .with_team("t-7")
//!         .with_field("ip", "203.0.113.9"),
//! )?;
//!
//! let link = client.get_viewer_link("u-42", "t-7", Some("pdf"))?;
//! println!("audit viewer: {}", link.url);
//! # Ok(())
//! # }
//! ```
//!
//! Construct the [`Client`] once at startup and share it: it is `Clone` and
//! holds nothing but the configuration values and a pooled HTTP transport.
//! Applications with their own event schema can pass any `Serialize` type
//! to [`Client::report_event`] instead of [`Event`].

pub mod client;
pub mod error;
pub mod event;

// Re-export primary public types at the crate root for convenience.
pub use client::{Client, ClientBuilder, DEFAULT_ENDPOINT, ViewerLink};
pub use error::{Error, Result};
pub use event::Event;

//! Record model and I/O-free client for the to-do service.
//!
//! # Overview
//! `types` holds the record shape and the response envelopes the service
//! speaks. `TodoClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network, so the same client
//! drives the service from tests, tools, or any host with an HTTP stack.
//!
//! # Design
//! - Records are looked up by `title`; `id` is store-assigned and optional
//!   on the wire.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), keeping the I/O boundary explicit.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{ErrorBody, MessageResponse, Todo, TodoResponse};

//! Transport layer: HTTP exchange and per-origin client reuse.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`], [`ReqwestFactory`])
//! - Origin-bound handles and their cache ([`Transport`], [`TransportCache`])

mod cache;
mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;

pub use cache::{Transport, TransportCache, TransportFactory, normalize_origin};
pub use client::{ReqwestClient, ReqwestFactory};
pub use error::{HttpError, TransportError};
pub use self::http::{HttpClient, HttpRequest, HttpResponse, resolve_url};

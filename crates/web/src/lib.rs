//! `detailing-web` — the server half of the detailing web client.
//!
//! Browsers talk to this crate; this crate talks to the detailing backend
//! through `detailing-client`. It holds no data of its own: every page is
//! assembled from backend calls made with the visitor's session cookie.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod session;

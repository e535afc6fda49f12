//! Backchat is the headless core of a chat front-end: it posts conversations
//! to a backend chat endpoint and transparently substitutes a deterministic
//! local mock reply when the backend is disabled or unreachable.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns configuration resolution, the mock responder, the health
//!   prober, the request dispatcher, and the session history cache.
//! - [`api`] defines the chat wire payloads and the ordered reply-shape
//!   extraction used to interpret backend responses.
//! - [`utils`] provides URL construction shared by the dispatcher and the
//!   prober.
//!
//! There is no binary entrypoint; a hosting UI constructs a
//! [`core::config::Config`] snapshot once at startup, builds a
//! [`core::dispatch::Dispatcher`] from it, and calls `get`/`post`/`chat`.
//! Every call resolves to a structured [`core::dispatch::DispatchResult`];
//! no failure mode escapes the dispatch boundary as an error or a panic.

pub mod api;
pub mod core;
pub mod logging;
pub mod utils;

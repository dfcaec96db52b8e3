//! # lmi-bridge
//!
//! The LMI bridge: a newline-delimited JSON request/response protocol that
//! lets a host invoke model providers through a subprocess, without linking
//! any provider SDK into the host binary.
//!
//! Two halves:
//!
//! - [`server::serve`] runs the bridge side: a single-threaded loop that
//!   reads one JSON request per line, dispatches it to a
//!   [`ProviderInvoker`], and writes exactly one JSON response line back.
//!   Responses always come out in request order.
//! - [`BridgeClient`] runs the host side: spawns the server subprocess,
//!   writes requests to its stdin and pairs each with the next line read
//!   from its stdout.
//!
//! Malformed input and provider failures are reported as
//! `{"success":false,...}` responses and never terminate the server; only a
//! closed stream or a termination signal does.

pub mod client;
pub mod error;
pub mod invoker;
pub mod protocol;
pub mod server;

pub use client::BridgeClient;
pub use error::Error;
pub use invoker::{InvokeError, ProviderInvoker};
pub use protocol::{BridgeRequest, BridgeResponse, Message};
pub use server::serve;

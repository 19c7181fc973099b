//! Waflow Client - dispatch loop and Graph API transport
//!
//! Drives the sequential per-item dispatch loop over an authenticated HTTP
//! transport. Payload construction lives in `waflow-core`; this crate sends
//! what the builder produces and collects one output record per item.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod transport;

pub use dispatch::{Dispatcher, InputItem};
pub use transport::{GraphClient, Transport};

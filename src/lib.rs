//! Front-end for driving avrdude against 8051 family microcontrollers.
//!
//! The library turns an [`OperationRequest`] into avrdude arguments,
//! launches avrdude in the background and renders its output with
//! terminal carriage-return semantics.

pub use args::build_args;
pub use error::{ProgError, ProgResult};
pub use output::OutputBuffer;
pub use request::{Operation, OperationRequest};
pub use runner::{OutputEvent, RunHandle, spawn_tool};

pub mod args;
pub mod console;
pub mod constants;
pub mod error;
pub mod locate;
pub mod output;
pub mod ports;
pub mod request;
pub mod runner;

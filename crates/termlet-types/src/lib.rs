//! termlet-types: foundation types shared by every Termlet crate.
//!
//! Holds the output-line model, the executor event types, and the error
//! enum. Nothing here depends on the shell, scheduler, or parser crates.

pub mod error;
pub mod event;
pub mod output;

pub use error::{Result, TermletError};
pub use event::{EventSink, NullEventSink, TermEvent};
pub use output::{OutputKind, OutputLine};

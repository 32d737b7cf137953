//! termlet-core: the output scheduler and command executor of the
//! terminal widget.
//!
//! `Terminal` ties the pieces together: a command registry and history
//! buffer (termlet-shell), the logical output buffer with its typing
//! animation (`OutputScheduler`), and the external surfaces lent per
//! call via `TermIo` (a `RenderSink` for display, an `EventSink` for
//! notifications). Embeddings drive time by calling `tick` from their
//! frame loop; everything between ticks runs to completion, so there is
//! no locking anywhere.

mod executor;
mod scheduler;
mod sink;

pub use executor::{SequenceItem, TermIo, Terminal};
pub use scheduler::{JobId, OutputScheduler, SchedulerConfig};
pub use sink::{BufferSink, RenderSink, escape_html};

pub use termlet_shell::{
    CommandHandler, CommandRegistry, HistoryBuffer, HistoryDirection, KvStore, tokenize,
};
pub use termlet_types::{
    EventSink, NullEventSink, OutputKind, OutputLine, Result, TermEvent, TermletError,
};

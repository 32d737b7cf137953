//! termlet-shell: the command layer of the terminal widget.
//!
//! Commands implement the `CommandHandler` trait (closures qualify through
//! a blanket impl) and are registered by name in a `CommandRegistry`; the
//! registry also owns alias expansion, tokenization, and name listing.
//! `HistoryBuffer` keeps past inputs with a recall cursor and an optional
//! key-value persistence hook.

mod history;
mod registry;

pub use history::{HistoryBuffer, HistoryDirection, KvStore};
pub use registry::{CommandHandler, CommandRegistry, tokenize};

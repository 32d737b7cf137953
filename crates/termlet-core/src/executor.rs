//! Command executor: one full input-to-output cycle, plus the `Terminal`
//! root object tying registry, history, and scheduler together.

use std::collections::VecDeque;

use termlet_shell::{CommandRegistry, HistoryBuffer, tokenize};
use termlet_types::{EventSink, OutputKind, TermEvent, TermletError};

use crate::scheduler::{OutputScheduler, SchedulerConfig};
use crate::sink::RenderSink;

/// The external surfaces a command cycle writes to: the render sink and
/// the notification stream. Owned by the embedding, lent per call.
pub struct TermIo<'a> {
    pub sink: &'a mut dyn RenderSink,
    pub events: &'a mut dyn EventSink,
}

/// One step of a scripted command sequence.
#[derive(Debug, Clone)]
pub struct SequenceItem {
    pub command: String,
    /// Delay after this command, before the next one. Falls back to the
    /// sequence-wide default when `None`.
    pub delay_ms: Option<u32>,
}

impl SequenceItem {
    pub fn new(command: impl Into<String>, delay_ms: Option<u32>) -> Self {
        Self {
            command: command.into(),
            delay_ms,
        }
    }
}

impl From<&str> for SequenceItem {
    fn from(command: &str) -> Self {
        Self::new(command, None)
    }
}

/// A sequence item with its delay already resolved.
struct QueuedCommand {
    command: String,
    delay_ms: u32,
}

/// Where the in-flight sequence currently stands.
enum SeqPhase {
    /// Waiting for the previous command's output to fully settle.
    Settling { delay_ms: u32 },
    /// Counting down the inter-command delay.
    Waiting { remaining_ms: u32 },
}

struct SequenceRunner {
    queue: VecDeque<QueuedCommand>,
    phase: SeqPhase,
}

/// The terminal core: command registry, history, output scheduler, and
/// the prompt. One instance per widget embedding; no globals.
pub struct Terminal {
    registry: CommandRegistry,
    history: HistoryBuffer,
    scheduler: OutputScheduler,
    prompt: String,
    sequence: Option<SequenceRunner>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    /// Terminal with default scheduler configuration and a `"$ "` prompt.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            history: HistoryBuffer::new(),
            scheduler: OutputScheduler::with_config(config),
            prompt: "$ ".to_string(),
            sequence: None,
        }
    }

    // -- Component access --

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.history
    }

    pub fn scheduler(&self) -> &OutputScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut OutputScheduler {
        &mut self.scheduler
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    // -- Execution --

    /// Run one command line: echo, resolve, dispatch, report.
    ///
    /// Blank input is a complete no-op (no echo, no history, no events).
    /// Handler failures and unknown commands become a single `Error` line
    /// plus a `CommandError` event; nothing escapes this method. A
    /// `CommandExecuted` event always fires last, carrying the resolved
    /// (post-alias) command name.
    pub fn run(&mut self, input: &str, record_history: bool, io: &mut TermIo<'_>) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        if record_history {
            self.history.append(input);
        }
        self.scheduler.echo(input, &self.prompt, io.sink);

        let resolved = self.registry.resolve_alias(input);
        let tokens = tokenize(&resolved);
        let Some(first) = tokens.first() else {
            // An alias expanded to nothing; the echo stands alone.
            return;
        };
        let command = first.to_lowercase();
        let args: Vec<String> = tokens[1..].to_vec();
        log::debug!("dispatching '{command}' with {} arg(s)", args.len());

        match self.registry.lookup(&command) {
            Some(handler) => match handler.execute(&args) {
                Ok(result) => {
                    if let Some(text) = &result {
                        self.scheduler.print(text, OutputKind::Output, io.sink);
                    }
                    io.events.emit(TermEvent::CommandSuccess {
                        command: command.clone(),
                        args: args.clone(),
                        input: input.to_string(),
                        result,
                    });
                },
                Err(err) => {
                    let message = err.to_string();
                    log::warn!("command '{command}' failed: {message}");
                    self.scheduler
                        .print(&format!("Error: {message}"), OutputKind::Error, io.sink);
                    io.events.emit(TermEvent::CommandError {
                        command: command.clone(),
                        args: args.clone(),
                        input: input.to_string(),
                        message,
                    });
                },
            },
            None => {
                let message = TermletError::UnknownCommand(command.clone()).to_string();
                log::warn!("{message}");
                self.scheduler.print(&message, OutputKind::Error, io.sink);
                io.events.emit(TermEvent::CommandError {
                    command: command.clone(),
                    args: args.clone(),
                    input: input.to_string(),
                    message,
                });
            },
        }

        io.events.emit(TermEvent::CommandExecuted {
            command,
            args,
            input: input.to_string(),
        });
    }

    /// Queue a strictly ordered command sequence.
    ///
    /// Items never record to history. Each item runs only once the
    /// previous item's output has fully settled and its delay has
    /// elapsed; `tick` drives the whole thing. Queuing onto a running
    /// sequence appends to it.
    pub fn run_sequence<I>(&mut self, items: I, default_delay_ms: u32)
    where
        I: IntoIterator<Item = SequenceItem>,
    {
        let queued = items.into_iter().map(|item| QueuedCommand {
            delay_ms: item.delay_ms.unwrap_or(default_delay_ms),
            command: item.command,
        });
        match self.sequence.as_mut() {
            Some(runner) => runner.queue.extend(queued),
            None => {
                self.sequence = Some(SequenceRunner {
                    queue: queued.collect(),
                    phase: SeqPhase::Waiting { remaining_ms: 0 },
                });
            },
        }
    }

    /// True while a queued sequence still has work to do.
    pub fn is_sequence_active(&self) -> bool {
        self.sequence.is_some()
    }

    /// Advance time: the typing animation first, then any pending
    /// sequence step.
    pub fn tick(&mut self, dt_ms: u32, io: &mut TermIo<'_>) {
        self.scheduler.tick(dt_ms, io.sink);
        self.advance_sequence(dt_ms, io);
    }

    fn advance_sequence(&mut self, dt_ms: u32, io: &mut TermIo<'_>) {
        let idle = self.scheduler.is_idle();
        let mut to_run: Option<String> = None;
        let mut finished = false;

        if let Some(runner) = self.sequence.as_mut() {
            match runner.phase {
                SeqPhase::Settling { delay_ms } => {
                    if idle {
                        runner.phase = SeqPhase::Waiting {
                            remaining_ms: delay_ms,
                        };
                    }
                },
                SeqPhase::Waiting { remaining_ms } => {
                    let remaining = remaining_ms.saturating_sub(dt_ms);
                    if remaining > 0 {
                        runner.phase = SeqPhase::Waiting {
                            remaining_ms: remaining,
                        };
                    } else {
                        match runner.queue.pop_front() {
                            Some(item) => {
                                runner.phase = SeqPhase::Settling {
                                    delay_ms: item.delay_ms,
                                };
                                to_run = Some(item.command);
                            },
                            None => finished = true,
                        }
                    }
                },
            }
        }

        if finished {
            self.sequence = None;
        }
        if let Some(command) = to_run {
            self.run(&command, false, io);
        }
    }

    // -- Pass-through conveniences --

    /// Print text as `Output`.
    pub fn print(&mut self, text: &str, io: &mut TermIo<'_>) {
        self.scheduler.print(text, OutputKind::Output, io.sink);
    }

    /// Print text with an explicit kind.
    pub fn print_kind(&mut self, text: &str, kind: OutputKind, io: &mut TermIo<'_>) {
        self.scheduler.print(text, kind, io.sink);
    }

    /// Cancel the in-flight typing animation.
    pub fn skip_typing_effect(&mut self) {
        self.scheduler.skip_typing_effect();
    }

    /// Wipe the output buffer and display.
    pub fn clear(&mut self, io: &mut TermIo<'_>) {
        self.scheduler.clear(io.sink);
    }

    /// Full output buffer as text.
    pub fn content(&self) -> String {
        self.scheduler.content()
    }
}

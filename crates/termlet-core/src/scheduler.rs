//! Output scheduler: the logical line buffer plus the typing-effect engine.
//!
//! Printing always lands in the logical buffer immediately; animation only
//! delays the visual reveal through the sink. The animation subsystem is a
//! tick-driven state machine (Idle -> Animating -> Idle | next queued job)
//! with a FIFO job queue, a one-shot skip flag, and per-character timing
//! carried across ticks.

use std::collections::VecDeque;

use termlet_types::{OutputKind, OutputLine};

use crate::sink::RenderSink;

/// Identifier of one `print` call. Ids are allocated monotonically and a
/// job *settles* once all of its lines have reached the sink; settlement
/// order among animated jobs is exactly FIFO issue order.
pub type JobId = u64;

/// Marker shown after the partially revealed line on every typing frame.
const CARET: &str = "▌";

/// Scheduler tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Master switch for the typing animation.
    pub typing_enabled: bool,
    /// Delay between revealed characters, in milliseconds. Zero flushes
    /// an animated job on its first tick.
    pub char_delay_ms: u32,
    /// Retention bound for the output buffer (oldest lines evicted).
    pub max_lines: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            typing_enabled: false,
            char_delay_ms: 24,
            max_lines: 500,
        }
    }
}

/// The lines of one `print` call awaiting their turn at the sink.
struct TypingJob {
    id: JobId,
    /// Whether the lines reveal character by character. Non-animated jobs
    /// sit in the queue only to keep sink order equal to buffer order;
    /// they flush in full when promoted.
    animate: bool,
    lines: Vec<OutputLine>,
}

/// The job currently being revealed.
struct ActiveJob {
    job: TypingJob,
    /// Index of the line being typed.
    line_idx: usize,
    /// Characters of that line already revealed.
    chars_shown: usize,
    /// Sub-delay milliseconds carried over from the previous tick.
    carry_ms: u32,
}

impl ActiveJob {
    fn start(job: TypingJob) -> Self {
        Self {
            job,
            line_idx: 0,
            chars_shown: 0,
            carry_ms: 0,
        }
    }
}

/// Owns the ordered output buffer and decides how each print reaches the
/// sink: instantly, or through the FIFO-queued typing animation.
pub struct OutputScheduler {
    lines: Vec<OutputLine>,
    config: SchedulerConfig,
    /// Reduced-motion policy, consulted once per print; `true` suppresses
    /// animation for that call.
    reduced_motion: Box<dyn Fn() -> bool>,
    queue: VecDeque<TypingJob>,
    active: Option<ActiveJob>,
    skip_requested: bool,
    next_id: JobId,
}

impl Default for OutputScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputScheduler {
    /// Scheduler with default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            lines: Vec::new(),
            config,
            reduced_motion: Box::new(|| false),
            queue: VecDeque::new(),
            active: None,
            skip_requested: false,
            next_id: 1,
        }
    }

    // -- Configuration --

    pub fn set_typing_enabled(&mut self, enabled: bool) {
        self.config.typing_enabled = enabled;
    }

    pub fn typing_enabled(&self) -> bool {
        self.config.typing_enabled
    }

    pub fn set_char_delay_ms(&mut self, delay_ms: u32) {
        self.config.char_delay_ms = delay_ms;
    }

    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.config.max_lines = max_lines;
    }

    /// Install the reduced-motion policy predicate.
    pub fn set_reduced_motion(&mut self, policy: Box<dyn Fn() -> bool>) {
        self.reduced_motion = policy;
    }

    // -- Printing --

    /// Append `text` (split on newlines) to the output buffer and route
    /// it to the sink.
    ///
    /// The logical buffer holds every line before this method returns;
    /// animation, when it applies, only defers the sink-side reveal.
    /// Animation applies when typing is enabled, `kind` is not `Command`,
    /// and the reduced-motion policy does not object. Prints issued while
    /// an animation is in flight queue behind it either way, so the sink
    /// shows lines in buffer order.
    pub fn print(&mut self, text: &str, kind: OutputKind, sink: &mut dyn RenderSink) -> JobId {
        let lines: Vec<OutputLine> = text
            .split('\n')
            .map(|l| OutputLine::new(kind, l))
            .collect();
        let animate =
            self.config.typing_enabled && kind != OutputKind::Command && !(self.reduced_motion)();
        self.dispatch(lines, animate, sink)
    }

    /// Echo an input line as a `Command` line, capturing the prompt shown
    /// at this instant. Never animated.
    pub fn echo(&mut self, input: &str, prompt: &str, sink: &mut dyn RenderSink) -> JobId {
        self.dispatch(vec![OutputLine::command(input, prompt)], false, sink)
    }

    fn dispatch(
        &mut self,
        lines: Vec<OutputLine>,
        animate: bool,
        sink: &mut dyn RenderSink,
    ) -> JobId {
        let id = self.next_id;
        self.next_id += 1;
        self.lines.extend(lines.iter().cloned());

        if self.active.is_some() {
            // Anything issued while an animation is in flight waits its
            // turn, so the sink receives lines in buffer order.
            log::debug!("job {id} queued behind active animation");
            self.queue.push_back(TypingJob { id, animate, lines });
        } else if animate {
            self.active = Some(ActiveJob::start(TypingJob { id, animate, lines }));
        } else {
            self.flush_now(&lines, sink);
        }
        id
    }

    /// Append `lines` to the sink immediately, with retention and scroll.
    fn flush_now(&mut self, lines: &[OutputLine], sink: &mut dyn RenderSink) {
        for line in lines {
            sink.append_line(line);
        }
        self.trim(sink);
        sink.scroll_to_bottom();
    }

    // -- Animation --

    /// Advance the typing animation by `dt_ms` milliseconds.
    ///
    /// Reveals characters of the active job, emits caret frames through
    /// `set_partial`, promotes completed lines to full appended lines,
    /// and drains the FIFO queue one job at a time.
    pub fn tick(&mut self, dt_ms: u32, sink: &mut dyn RenderSink) {
        if self.skip_requested {
            self.skip_requested = false;
            let Some(mut active) = self.active.take() else {
                return;
            };
            sink.set_partial(None);
            while active.line_idx < active.job.lines.len() {
                sink.append_line(&active.job.lines[active.line_idx]);
                active.line_idx += 1;
            }
            log::debug!("typing job {} skipped to end", active.job.id);
            self.finish_job(sink);
            return;
        }

        let delay = self.config.char_delay_ms;
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let mut steps = if delay == 0 {
            u32::MAX
        } else {
            let budget = dt_ms.saturating_add(active.carry_ms);
            active.carry_ms = budget % delay;
            budget / delay
        };

        while steps > 0 {
            let Some(line) = active.job.lines.get(active.line_idx) else {
                break;
            };
            let total = line.content.chars().count();
            let remaining = total.saturating_sub(active.chars_shown);
            if remaining as u32 <= steps {
                steps -= remaining as u32;
                sink.set_partial(None);
                sink.append_line(line);
                active.line_idx += 1;
                active.chars_shown = 0;
                if delay == 0 {
                    steps = u32::MAX;
                }
            } else {
                active.chars_shown += steps as usize;
                let shown: String = line.content.chars().take(active.chars_shown).collect();
                sink.set_partial(Some((&format!("{shown}{CARET}"), line.kind)));
                steps = 0;
            }
        }

        let done = active.line_idx >= active.job.lines.len();
        if done
            && let Some(finished) = self.active.take()
        {
            log::debug!("typing job {} complete", finished.job.id);
            self.finish_job(sink);
        }
    }

    /// Post-job bookkeeping: retention, scroll, promote the next queued
    /// job. Non-animated jobs released here flush in full; promotion stops
    /// at the first animated one. The skip flag never carries over.
    fn finish_job(&mut self, sink: &mut dyn RenderSink) {
        self.trim(sink);
        sink.scroll_to_bottom();
        while let Some(job) = self.queue.pop_front() {
            if job.animate {
                self.active = Some(ActiveJob::start(job));
                return;
            }
            self.flush_now(&job.lines, sink);
        }
    }

    /// Request cancellation of the in-flight animation. The current job
    /// completes in full on the next tick; queued jobs are unaffected and
    /// animate normally when their turn comes.
    pub fn skip_typing_effect(&mut self) {
        if self.active.is_some() {
            self.skip_requested = true;
        }
    }

    // -- Buffer maintenance --

    /// Evict oldest lines while the buffer exceeds the retention bound.
    ///
    /// A line still waiting in the animation pipeline is dropped from its
    /// job rather than from the sink, which never received it.
    pub fn trim(&mut self, sink: &mut dyn RenderSink) {
        while self.lines.len() > self.config.max_lines {
            let sunk = self.lines.len().saturating_sub(self.pending_line_count());
            self.lines.remove(0);
            if sunk > 0 {
                sink.remove_oldest();
            } else {
                self.drop_oldest_pending(sink);
            }
        }
    }

    /// Lines held by the active job or the queue that have not reached
    /// the sink yet. These are always the newest lines of the buffer.
    fn pending_line_count(&self) -> usize {
        let active = self
            .active
            .as_ref()
            .map_or(0, |a| a.job.lines.len() - a.line_idx);
        active + self.queue.iter().map(|job| job.lines.len()).sum::<usize>()
    }

    /// Remove the oldest not-yet-sunk line from its job.
    fn drop_oldest_pending(&mut self, sink: &mut dyn RenderSink) {
        if let Some(active) = self.active.as_mut()
            && active.line_idx < active.job.lines.len()
        {
            active.job.lines.remove(active.line_idx);
            if active.chars_shown > 0 {
                active.chars_shown = 0;
                sink.set_partial(None);
            }
            return;
        }
        if let Some(job) = self.queue.front_mut() {
            job.lines.remove(0);
            if job.lines.is_empty() {
                self.queue.pop_front();
            }
        }
    }

    /// Drop the entire buffer, any active animation, and the queue.
    pub fn clear(&mut self, sink: &mut dyn RenderSink) {
        self.lines.clear();
        self.queue.clear();
        self.active = None;
        self.skip_requested = false;
        sink.set_partial(None);
        sink.clear();
    }

    // -- Inspection --

    /// The logical buffer, oldest first.
    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    /// Full buffer as newline-joined text (prompt + content for command
    /// lines, bare content otherwise).
    pub fn content(&self) -> String {
        self.lines
            .iter()
            .map(OutputLine::display)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when no animation is running or queued.
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }

    /// True once the job has left the pipeline: its lines all reached the
    /// sink, or were evicted by retention first. Settlement follows FIFO
    /// issue order; prints made while the pipeline is empty settle
    /// immediately.
    pub fn is_settled(&self, id: JobId) -> bool {
        if id >= self.next_id {
            return false;
        }
        if let Some(active) = &self.active
            && active.job.id == id
        {
            return false;
        }
        !self.queue.iter().any(|job| job.id == id)
    }
}

use std::sync::mpsc::Receiver;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::SPINNER_TICK_MS;
use crate::output::OutputBuffer;
use crate::runner::OutputEvent;

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));

    pb
}

/// What the console saw of one avrdude run
#[derive(Debug)]
pub struct ConsoleOutcome {
    /// `None` when the process never started
    pub success: Option<bool>,
    pub output: OutputBuffer,
}

/// Single consumer for [`OutputEvent`]s that renders them on the terminal.
///
/// Finished lines are printed above a spinner, the line avrdude is still
/// rewriting with carriage returns is shown as the spinner message.
pub struct ConsoleView {
    buffer: OutputBuffer,
    spinner: ProgressBar,
    printed_lines: u64,
    success: Option<bool>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::with_spinner(create_spinner("starting avrdude"))
    }

    /// No spinner; lines still go to stdout
    pub fn hidden() -> Self {
        Self::with_spinner(ProgressBar::hidden())
    }

    fn with_spinner(spinner: ProgressBar) -> Self {
        ConsoleView {
            buffer: OutputBuffer::new(),
            spinner,
            printed_lines: 0,
            success: None,
        }
    }

    /// Drain `events` until every sender is gone
    pub fn consume(mut self, events: Receiver<OutputEvent>) -> ConsoleOutcome {
        for event in events {
            self.handle(event);
        }
        self.finish()
    }

    pub fn handle(&mut self, event: OutputEvent) {
        match event {
            OutputEvent::Text(text) => self.append(&text),
            OutputEvent::Exited { success } => self.success = Some(success),
        }
    }

    fn append(&mut self, text: &str) {
        self.buffer.append(text);

        let fresh = self.buffer.completed_lines() - self.printed_lines;
        let lines: Vec<String> = self
            .buffer
            .last_completed_lines(fresh as usize)
            .into_iter()
            .map(str::to_owned)
            .collect();
        for line in lines {
            self.print_line(&line);
        }
        self.printed_lines = self.buffer.completed_lines();

        self.spinner.set_message(self.buffer.pending_line().to_owned());
    }

    fn print_line(&self, line: &str) {
        if self.spinner.is_hidden() {
            println!("{line}");
        } else {
            self.spinner.println(line);
        }
    }

    pub fn finish(self) -> ConsoleOutcome {
        let pending = self.buffer.pending_line();
        if !pending.is_empty() {
            self.print_line(pending);
        }
        self.spinner.finish_and_clear();

        ConsoleOutcome {
            success: self.success,
            output: self.buffer,
        }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::constants::PIPE_READ_CHUNK;
use crate::error::ProgError;
use crate::locate::locate_tool;

/// Messages pushed from the avrdude threads to whoever owns the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// A chunk of text, may contain partial lines and carriage returns
    Text(String),

    /// avrdude exited; sent right after the final status text
    Exited { success: bool },
}

pub type OutputSender = mpsc::Sender<OutputEvent>;

/// Background run of avrdude. Dropping it detaches the run, there is no
/// way to cancel the process once started.
pub struct RunHandle {
    executable: PathBuf,
    waiter: JoinHandle<()>,
}

impl RunHandle {
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Block until the process exited and all its output was forwarded
    pub fn join(self) {
        if self.waiter.join().is_err() {
            debug!("avrdude waiter thread panicked");
        }
    }
}

fn emit(sink: &OutputSender, text: impl Into<String>) {
    if sink.send(OutputEvent::Text(text.into())).is_err() {
        debug!("Output consumer gone, dropping text");
    }
}

/// Locate avrdude under `tool_root` and launch it with `args`.
///
/// Discovery and spawn failures are written to `sink` before returning
/// `None`. On success stdout and stderr are forwarded live from background
/// threads and the final status is reported once both streams closed.
pub fn spawn_tool(tool_root: &Path, args: &[String], sink: OutputSender) -> Option<RunHandle> {
    let executable = match locate_tool(tool_root) {
        Ok(path) => path,
        Err(e) => {
            emit(&sink, format!("ERROR: {e}\n"));
            return None;
        }
    };

    spawn_executable(&executable, args, sink)
}

/// Launch a known executable, skipping discovery
pub fn spawn_executable(
    executable: &Path,
    args: &[String],
    sink: OutputSender,
) -> Option<RunHandle> {
    emit(
        &sink,
        format!("Running: {} {}\n", executable.display(), args.join(" ")),
    );
    info!("Launching {}", executable.display());

    let spawned = Command::new(executable)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            emit(&sink, format!("{}\n", ProgError::Launch(e.to_string())));
            return None;
        }
    };

    let mut pumps = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        let tx = sink.clone();
        pumps.push(thread::spawn(move || pump(stdout, tx)));
    }
    if let Some(stderr) = child.stderr.take() {
        let tx = sink.clone();
        pumps.push(thread::spawn(move || pump(stderr, tx)));
    }

    let waiter = thread::spawn(move || {
        for handle in pumps {
            if handle.join().is_err() {
                debug!("Output pump thread panicked");
            }
        }

        let success = match child.wait() {
            Ok(status) if status.success() => {
                emit(&sink, "avrdude finished successfully\n");
                true
            }
            Ok(status) => {
                emit(&sink, format!("{}\n", ProgError::ProcessExit(status.to_string())));
                false
            }
            Err(e) => {
                emit(&sink, format!("{}\n", ProgError::ProcessExit(e.to_string())));
                false
            }
        };

        info!("avrdude exited, success: {}", success);
        if sink.send(OutputEvent::Exited { success }).is_err() {
            debug!("Output consumer gone, dropping exit status");
        }
    });

    Some(RunHandle {
        executable: executable.to_path_buf(),
        waiter,
    })
}

/// Forward raw chunks so carriage-return progress bars show up immediately
fn pump<R: Read>(mut reader: R, sink: OutputSender) {
    let mut buffer = [0u8; PIPE_READ_CHUNK];
    let mut decoder = Utf8Carry::default();

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                let text = decoder.feed(&buffer[..n]);
                if !text.is_empty() {
                    emit(&sink, text);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Stopped reading avrdude output: {}", e);
                break;
            }
        }
    }

    let rest = decoder.finish();
    if !rest.is_empty() {
        emit(&sink, rest);
    }
}

/// Decodes UTF-8 across read boundaries, holding back split code points
#[derive(Default)]
struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    fn feed(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(s) => {
                    out.push_str(s);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        // Incomplete sequence at the end, wait for more bytes
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                    }
                }
            }
        }

        out
    }

    fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}

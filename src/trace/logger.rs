use std::{
    fs::OpenOptions,
    io::Write,
    path::Path,
    sync::Mutex,
};

use crate::trace::trace::TraceEvent;

struct Sink {
    out: Box<dyn Write + Send>,
    written: u64,
}

/// Writes form transitions as JSON lines.
///
/// A logger that could not open its file, or was built with `disabled()`,
/// drops every event. Write failures go to stderr and never reach the form.
pub struct TraceLogger {
    sink: Option<Mutex<Sink>>,
}

impl TraceLogger {
    /// Append to `path`, creating it if needed.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self::to_writer(file),
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path.display(), e);
                Self::disabled()
            }
        }
    }

    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            sink: Some(Mutex::new(Sink {
                out: Box::new(out),
                written: 0,
            })),
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of events written so far.
    pub fn events_written(&self) -> u64 {
        self.sink
            .as_ref()
            .and_then(|s| s.lock().ok().map(|s| s.written))
            .unwrap_or(0)
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event '{}': {}", event.event, e);
                return;
            }
        };

        let mut sink = match sink.lock() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Warning: trace logger lock poisoned: {}", e);
                return;
            }
        };

        match writeln!(sink.out, "{}", line).and_then(|_| sink.out.flush()) {
            Ok(()) => sink.written += 1,
            Err(e) => eprintln!("Warning: failed to write trace event '{}': {}", event.event, e),
        }
    }
}

impl Default for TraceLogger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLogger")
            .field("enabled", &self.is_enabled())
            .field("events_written", &self.events_written())
            .finish()
    }
}

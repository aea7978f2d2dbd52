use std::io::Write;
use std::sync::{Arc, Mutex};

use schema_form::{
    form::machine::FormPhase,
    trace::{logger::TraceLogger, trace::TraceEvent},
    validate::validator::ValidationError,
};
use tempfile::TempDir;

/// In-memory writer whose buffer outlives the logger.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn events_are_written_one_per_line() {
    let buf = SharedBuf::default();
    let logger = TraceLogger::to_writer(buf.clone());

    let errors = vec![ValidationError {
        group: "A".into(),
        field: "email".into(),
        message: "Email is required.".into(),
    }];
    logger.log(&TraceEvent::now(0, FormPhase::Editing, "A", "next").with_outcome("blocked").with_errors(&errors));
    logger.log(&TraceEvent::now(1, FormPhase::Submitted, "B", "next").with_schema("abc"));

    assert_eq!(logger.events_written(), 2);
    let lines = buf.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["phase"], "Editing");
    assert_eq!(lines[0]["errors"][0], "A/email: Email is required.");
    assert_eq!(lines[1]["phase"], "Submitted");
    assert_eq!(lines[1]["schema"], "abc");
    assert!(lines[1]["outcome"].is_null());
}

#[test]
fn disabled_logger_drops_events() {
    let logger = TraceLogger::default();
    assert!(!logger.is_enabled());
    logger.log(&TraceEvent::now(0, FormPhase::Editing, "A", "blur"));
    assert_eq!(logger.events_written(), 0);
}

#[test]
fn unopenable_path_disables_tracing() {
    let dir = TempDir::new().unwrap();
    let logger = TraceLogger::new(dir.path().join("missing").join("trace.jsonl"));
    assert!(!logger.is_enabled());
}

#[test]
fn file_logger_appends_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trace.jsonl");

    TraceLogger::new(&path).log(&TraceEvent::now(0, FormPhase::Editing, "A", "blur"));
    TraceLogger::new(&path).log(&TraceEvent::now(1, FormPhase::Editing, "A", "next"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn error_detail_is_recorded() {
    let buf = SharedBuf::default();
    let logger = TraceLogger::to_writer(buf.clone());
    let err = std::io::Error::other("disk full");
    logger.log(&TraceEvent::now(3, FormPhase::Editing, "A", "next").with_error(&err));
    assert_eq!(buf.lines()[0]["errors"][0], "disk full");
}

//! Tests for logger functionality.

use linelog::{
    ClearMode, ConsoleWriter, Level, LineSyncWriter, LogRecord, Logger, Output, TerminalOutput,
};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn json_lines(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An output whose sink is permanently broken.
struct Broken;

impl Output for Broken {
    fn write(&self, _record: &LogRecord) -> Result<(), linelog::Error> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed").into())
    }

    fn flush(&self) -> Result<(), linelog::Error> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed").into())
    }
}

#[derive(Debug)]
struct Outer(io::Error);

impl fmt::Display for Outer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot fetch index")
    }
}

impl StdError for Outer {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn builder_default() {
    let logger = Logger::builder().build();
    assert_eq!(logger.min_level(), Level::Info);
    assert_eq!(logger.output_count(), 0);
}

#[test]
fn builder_with_level() {
    let logger = Logger::builder().level(Level::Debug).build();
    assert_eq!(logger.min_level(), Level::Debug);
}

#[test]
fn builder_with_terminal() {
    let logger = Logger::builder().terminal().colors(false).done().build();
    assert_eq!(logger.output_count(), 1);
}

#[test]
fn builder_with_file() {
    let tmp_dir = TempDir::new().unwrap();
    let logger = Logger::builder()
        .file(tmp_dir.path().join("app.log"))
        .done()
        .build();
    assert_eq!(logger.output_count(), 1);
}

#[test]
fn builder_multiple_outputs() {
    let tmp_dir = TempDir::new().unwrap();
    let logger = Logger::builder()
        .level(Level::Trace)
        .terminal()
        .sink(io::sink())
        .done()
        .file(tmp_dir.path().join("logs").join("app.log"))
        .max_backups(1)
        .done()
        .json(io::sink())
        .build();
    assert_eq!(logger.output_count(), 3);
    assert!(tmp_dir.path().join("logs").is_dir());
}

#[test]
fn file_output_skipped_when_directory_cannot_be_created() {
    let tmp_dir = TempDir::new().unwrap();
    let blocker = tmp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let logger = Logger::builder()
        .file(blocker.join("app.log"))
        .done()
        .build();
    assert_eq!(logger.output_count(), 0);
}

#[test]
fn log_without_outputs_is_harmless() {
    let logger = Logger::builder().level(Level::Warn).build();
    logger.info("TEST", "should be filtered");
    logger.warn("TEST", "should pass");
    logger.flush().unwrap();
}

#[test]
fn log_respects_level() {
    let buf = SharedBuf::default();
    let logger = Logger::builder().level(Level::Warn).json(buf.clone()).build();

    logger.trace("T", "no");
    logger.debug("T", "no");
    logger.info("T", "no");
    logger.warn("T", "w");
    logger.error("T", "e");

    let levels: Vec<String> = buf
        .json_lines()
        .iter()
        .map(|v| v["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, ["warn", "error"]);
}

#[test]
fn fatal_and_panic_only_log() {
    let buf = SharedBuf::default();
    let logger = Logger::test_logger(buf.clone());

    logger.fatal("CORE", "out of memory");
    logger.panic("CORE", "invariant broken");

    // still running, both records written
    let lines = buf.json_lines();
    assert_eq!(lines[0]["level"], "fatal");
    assert_eq!(lines[1]["level"], "panic");
}

#[test]
fn test_logger_captures_every_level() {
    let buf = SharedBuf::default();
    let logger = Logger::test_logger(buf.clone());
    assert_eq!(logger.min_level(), Level::Trace);

    for level in Level::all() {
        logger.log(level, "ALL", level.as_str());
    }
    let lines = buf.json_lines();
    assert_eq!(lines.len(), Level::all().len());
    for (line, level) in lines.iter().zip(Level::all()) {
        assert_eq!(line["level"], level.as_str());
        assert_eq!(line["message"], level.as_str());
        assert_eq!(line["scope"], "ALL");
    }
}

#[test]
fn json_entry_shape() {
    let buf = SharedBuf::default();
    let logger = Logger::test_logger(buf.clone());

    logger.info("", "no scope");
    logger
        .event(Level::Info, "PKG")
        .field("name", "firefox")
        .field("bytes", 1024)
        .field("ok", true)
        .field("message", "overridden?")
        .send("download finished");

    let lines = buf.json_lines();
    assert!(lines[0].get("scope").is_none());
    assert!(
        chrono::DateTime::parse_from_rfc3339(lines[0]["time"].as_str().unwrap()).is_ok()
    );

    let entry = &lines[1];
    assert_eq!(entry["scope"], "PKG");
    assert_eq!(entry["name"], "firefox");
    assert_eq!(entry["bytes"], 1024);
    assert_eq!(entry["ok"], true);
    assert_eq!(entry["message"], "download finished");
}

#[test]
fn event_err_records_source_chain() {
    let buf = SharedBuf::default();
    let logger = Logger::test_logger(buf.clone());

    let err = Outer(io::Error::new(io::ErrorKind::TimedOut, "connection timed out"));
    logger.event(Level::Error, "NET").err(&err).send("sync failed");

    let plain = io::Error::other("no source");
    logger.event(Level::Warn, "NET").err(&plain).send("retrying");

    let lines = buf.json_lines();
    assert_eq!(lines[0]["error"], "cannot fetch index");
    assert_eq!(
        lines[0]["error_chain"],
        serde_json::json!(["connection timed out"])
    );
    assert_eq!(lines[1]["error"], "no source");
    assert!(lines[1].get("error_chain").is_none());
}

#[test]
fn filtered_event_is_not_enabled() {
    let buf = SharedBuf::default();
    let logger = Logger::builder().level(Level::Error).json(buf.clone()).build();

    let event = logger.event(Level::Debug, "X");
    assert!(!event.enabled());
    event.field("expensive", 1).send("dropped");

    assert!(logger.event(Level::Error, "X").enabled());
    assert!(buf.contents().is_empty());
}

#[test]
fn failing_output_does_not_silence_others() {
    let buf = SharedBuf::default();
    let logger = Logger::builder()
        .output(Broken)
        .json(buf.clone())
        .output(Broken)
        .build();

    logger.info("FAN", "still delivered");
    assert_eq!(buf.json_lines()[0]["message"], "still delivered");
    assert!(logger.flush().is_err());
}

#[test]
fn terminal_sink_with_auto_clear_writes_plain_lines() {
    let buf = SharedBuf::default();
    let logger = Logger::builder()
        .terminal()
        .colors(false)
        .time_format("T")
        .sink(buf.clone())
        .done()
        .build();

    logger.info("MAIN", "hello");
    logger.event(Level::Warn, "").field("attempt", 2).send("retry");

    assert_eq!(buf.contents(), "T INF MAIN hello\nT WRN retry attempt=2\n");
}

#[test]
fn terminal_sink_with_forced_clear() {
    let buf = SharedBuf::default();
    let logger = Logger::builder()
        .terminal()
        .colors(false)
        .time_format("T")
        .clear_mode(ClearMode::Always)
        .sink(buf.clone())
        .done()
        .build();

    logger.info("", "one");
    logger.info("", "two");
    assert_eq!(buf.contents(), "\r\x1b[2KT INF one\n\r\x1b[2KT INF two\n");
}

#[test]
fn partial_line_through_the_writer_is_continued_not_cleared() {
    let buf = SharedBuf::default();
    let writer: Arc<ConsoleWriter> = Arc::new(LineSyncWriter::new(
        Box::new(buf.clone()) as Box<dyn Write + Send>,
    ));
    let logger = Logger::builder()
        .terminal()
        .colors(false)
        .time_format("T")
        .writer(Arc::clone(&writer))
        .done()
        .build();

    writer.write_all(b"[=====>    ] 50%").unwrap();
    assert!(!writer.is_at_line_start());
    logger.info("DL", "chunk verified");
    assert!(writer.is_at_line_start());

    // the record lands on the writer's own unfinished line
    assert_eq!(
        buf.contents(),
        "\r\x1b[2K[=====>    ] 50%T INF DL chunk verified\n"
    );
}

#[test]
fn raw_progress_line_is_cleared_before_each_record() {
    let buf = SharedBuf::default();
    let mut raw = buf.clone();
    let logger = Logger::builder()
        .terminal()
        .colors(false)
        .time_format("T")
        .clear_mode(ClearMode::Always)
        .sink(buf.clone())
        .done()
        .build();

    raw.write_all(b"\r[==>       ] 20%").unwrap();
    logger.info("DL", "first chunk");
    raw.write_all(b"\r[=====>    ] 50%").unwrap();
    logger.info("DL", "second chunk");

    assert_eq!(
        buf.contents(),
        "\r[==>       ] 20%\r\x1b[2KT INF DL first chunk\n\
         \r[=====>    ] 50%\r\x1b[2KT INF DL second chunk\n"
    );
}

#[test]
fn two_terminal_outputs_can_share_a_writer() {
    let buf = SharedBuf::default();
    let first = TerminalOutput::with_writer(Arc::new(LineSyncWriter::with_clear(
        Box::new(buf.clone()) as Box<dyn Write + Send>,
        false,
    )))
    .colors(false)
    .time_format("T");
    let second = TerminalOutput::with_writer(first.shared_writer())
        .colors(false)
        .time_format("U");

    let logger = Logger::builder().output(first).output(second).build();
    logger.info("", "x");

    assert_eq!(buf.contents(), "T INF x\nU INF x\n");
}

#[test]
fn concurrent_loggers_keep_lines_whole() {
    let buf = SharedBuf::default();
    let logger = Arc::new(
        Logger::builder()
            .level(Level::Trace)
            .terminal()
            .colors(false)
            .clear_mode(ClearMode::Always)
            .sink(buf.clone())
            .done()
            .build(),
    );

    thread::scope(|s| {
        for t in 0..8 {
            let logger = Arc::clone(&logger);
            s.spawn(move || {
                for i in 0..25 {
                    logger.event(Level::Debug, "W").field("t", t).send(&format!("step {i}"));
                }
            });
        }
    });

    let out = buf.contents();
    let blocks: Vec<&str> = out.split("\r\x1b[2K").skip(1).collect();
    assert_eq!(blocks.len(), 200);
    for block in blocks {
        assert!(block.ends_with('\n'));
        assert_eq!(block.matches('\n').count(), 1);
        assert!(block.contains(" DBG W step "));
    }
}

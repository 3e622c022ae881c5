//! Event Logger
//!
//! Append-only JSONL log of every event drained from the game.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use kingdom_events::Event;

pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
}

impl EventLogger {
    /// Open (or create) a log file and append to it
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
        })
    }

    /// A logger that counts events but writes nothing
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
        }
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn log(&mut self, event: &Event) -> std::io::Result<()> {
        self.event_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = event.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush event log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingdom_events::EventType;
    use std::fs;

    #[test]
    fn test_event_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut logger = EventLogger::new(&path).unwrap();
        logger
            .log(&Event::new("tick", "Game ticked to 1", EventType::Tick, 1))
            .unwrap();
        logger
            .log(&Event::new("house", "Construction complete for house!", EventType::Creation, 3))
            .unwrap();
        logger.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed = Event::from_jsonl(lines[1]).unwrap();
        assert_eq!(parsed.subject, "house");
        assert_eq!(parsed.event_type, EventType::Creation);
        assert_eq!(parsed.tick, 3);
    }

    #[test]
    fn test_logger_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        for tick in 1..=2 {
            let mut logger = EventLogger::new(&path).unwrap();
            logger
                .log(&Event::new("tick", format!("Game ticked to {}", tick), EventType::Tick, tick))
                .unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_null_logger() {
        let mut logger = EventLogger::null();
        logger
            .log(&Event::new("tick", "Game ticked to 1", EventType::Tick, 1))
            .unwrap();
        assert_eq!(logger.event_count(), 1);
    }
}

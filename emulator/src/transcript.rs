use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use simon_core::telemetry::{GameEvent, TelemetrySink};

/// Timestamped record of game events, optionally appended to a file.
pub struct Transcript {
    writer: Option<BufWriter<fs::File>>,
    started_at: Instant,
    pending: Vec<String>,
    fault: Option<io::Error>,
}

impl Transcript {
    /// Opens `path` for appending, or keeps events in memory only.
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        let writer = match path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty())
                {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let mut writer = BufWriter::new(file);
                writeln!(writer, "# Simon emulator transcript")?;
                writeln!(writer, "# Timestamps are milliseconds since session start")?;
                writer.flush()?;
                Some(writer)
            }
            None => None,
        };

        Ok(Self {
            writer,
            started_at: Instant::now(),
            pending: Vec::new(),
            fault: None,
        })
    }

    /// Lines recorded since the last drain, for echoing to the console.
    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.pending.drain(..)
    }

    /// Returns the first write error hit since the last call.
    pub fn take_fault(&mut self) -> io::Result<()> {
        self.fault.take().map_or(Ok(()), Err)
    }

    fn append_line(&mut self, line: &str) -> io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{line}")?;
            writer.flush()?;
        }
        Ok(())
    }
}

impl TelemetrySink for Transcript {
    fn record(&mut self, event: GameEvent) {
        let line = format_line(self.started_at.elapsed(), &event);
        if let Err(err) = self.append_line(&line) {
            self.fault.get_or_insert(err);
        }
        self.pending.push(line);
    }
}

fn format_line(elapsed: Duration, event: &GameEvent) -> String {
    format!("[+{:>6} ms] {event}", elapsed.as_millis())
}

#[cfg(test)]
mod tests {
    use simon_core::game::Phase;

    use super::*;

    #[test]
    fn lines_carry_padded_millisecond_offsets() {
        let line = format_line(Duration::from_millis(1_234), &GameEvent::Lost { score: 7 });
        assert_eq!(line, "[+  1234 ms] lost score=7");

        let line = format_line(
            Duration::from_micros(999),
            &GameEvent::IdleTimeout {
                phase: Phase::Listening,
            },
        );
        assert_eq!(line, "[+     0 ms] idle-timeout phase=listening");
    }

    #[test]
    fn memory_only_transcript_queues_lines_for_the_console() {
        let mut transcript = Transcript::open(None).unwrap();
        transcript.record(GameEvent::Won);
        transcript.record(GameEvent::PoweredDown);

        let lines: Vec<String> = transcript.drain().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] won"));
        assert!(lines[1].ends_with("] powered-down"));
        assert_eq!(transcript.drain().count(), 0);
        assert!(transcript.take_fault().is_ok());
    }
}

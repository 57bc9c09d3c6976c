use std::io::{self, Write};

use crate::generation::GenerationRecord;

/// Column header written once when a CSV stream is opened.
pub const CSV_HEADER: &str = "generation,best_fitness,mean_fitness,best_completion,\
mean_completion,remaining_ticks,kills,mushrooms,coins,status";

/// The stats sink consumed by the search loop.
///
/// Implementations append one record per generation to durable storage.
/// Failures are storage-layer errors only; the caller decides whether to
/// abort or to log and keep searching (the evolution loop does the latter —
/// a broken stats file must not kill a long run).
pub trait RecordGenerationStats {
    /// Appends one generation record.
    fn append(&mut self, record: &GenerationRecord) -> io::Result<()>;
}

/// CSV stats sink over any writer.
///
/// The header row is written when the recorder is constructed, so an output
/// file is truncated-and-headed exactly once per run; every `append` adds one
/// row and flushes, keeping the file useful while a long search is still in
/// progress.
#[derive(Debug)]
pub struct CsvRecorder<W> {
    writer: W,
}

impl<W> CsvRecorder<W>
where
    W: Write,
{
    /// Opens a CSV stream: writes the header row and flushes.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Consumes the recorder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> RecordGenerationStats for CsvRecorder<W>
where
    W: Write,
{
    fn append(&mut self, record: &GenerationRecord) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{},{},{}",
            record.generation,
            record.best_fitness,
            record.mean_fitness,
            record.best_completion,
            record.mean_completion,
            record.remaining_ticks,
            record.kills,
            record.mushrooms,
            record.coins,
            record.status,
        )?;
        self.writer.flush()
    }
}

/// In-memory stats sink for tests.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    records: Vec<GenerationRecord>,
}

impl MemoryRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// All records appended so far, in order.
    #[must_use]
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }
}

impl RecordGenerationStats for MemoryRecorder {
    fn append(&mut self, record: &GenerationRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize) -> GenerationRecord {
        GenerationRecord {
            generation,
            best_fitness: 1200.5,
            mean_fitness: 310.25,
            best_completion: 0.8,
            mean_completion: 0.35,
            remaining_ticks: 42,
            kills: 3,
            mushrooms: 1,
            coins: 7,
            status: "TIME_OUT".to_owned(),
        }
    }

    #[test]
    fn test_header_is_written_at_open() {
        let recorder = CsvRecorder::new(Vec::new()).unwrap();
        let output = String::from_utf8(recorder.into_inner()).unwrap();
        assert_eq!(output, format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_append_writes_one_row_per_record() {
        let mut recorder = CsvRecorder::new(Vec::new()).unwrap();
        recorder.append(&record(0)).unwrap();
        recorder.append(&record(1)).unwrap();

        let output = String::from_utf8(recorder.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "0,1200.5,310.25,0.8,0.35,42,3,1,7,TIME_OUT"
        );
        assert!(lines[2].starts_with("1,"));
    }

    #[test]
    fn test_memory_recorder_keeps_insertion_order() {
        let mut recorder = MemoryRecorder::new();
        recorder.append(&record(0)).unwrap();
        recorder.append(&record(1)).unwrap();
        assert_eq!(recorder.records().len(), 2);
        assert_eq!(recorder.records()[0].generation, 0);
        assert_eq!(recorder.records()[1].generation, 1);
    }
}

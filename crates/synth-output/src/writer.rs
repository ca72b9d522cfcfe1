//! Writers for the entity dump, the event dump and the audit log.
//!
//! Every writer streams into a `<file>.tmp` sibling through a `BufWriter`.
//! `stage` stops there and hands back a [`StagedFile`]; `write` stages and
//! commits in one step. A run that produces several files stages all of
//! them first and commits only once every one was written, so a failure
//! leaves none of the target files behind.

use crate::error::OutputError;
use crate::render::{render_inline_record, render_record_lines};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use synth_core::{Record, RecordPool};
use synth_events::EventRecord;
use synth_generator::AuditLog;
use tracing::{debug, info, warn};

/// Default buffer size for output files.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Records or events written.
    pub items_written: u64,
    /// Output file size in bytes.
    pub bytes_written: u64,
    /// Total time taken.
    pub duration: Duration,
}

impl WriteMetrics {
    /// Calculate items per second.
    pub fn items_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.items_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Path of the temporary sibling used while writing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// A fully written temp file waiting to be renamed over its target.
///
/// Dropping it without calling [`StagedFile::commit`] deletes the temp file.
#[derive(Debug)]
pub struct StagedFile {
    tmp: PathBuf,
    target: PathBuf,
    metrics: WriteMetrics,
    committed: bool,
}

impl StagedFile {
    pub fn tmp_path(&self) -> &Path {
        &self.tmp
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Metrics of the staged content; `bytes_written` is the temp file size.
    pub fn metrics(&self) -> &WriteMetrics {
        &self.metrics
    }

    /// Move the temp file over the target.
    pub fn commit(mut self) -> Result<WriteMetrics, OutputError> {
        std::fs::rename(&self.tmp, &self.target).map_err(|source| OutputError::Rename {
            from: self.tmp.clone(),
            to: self.target.clone(),
            source,
        })?;
        self.committed = true;
        debug!("Committed {}", self.target.display());
        Ok(self.metrics.clone())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.tmp) {
                warn!("Failed to remove {}: {}", self.tmp.display(), e);
            }
        }
    }
}

/// Run `body` against a buffered temp file next to `path`.
fn stage_file<F>(path: &Path, buffer_size: usize, body: F) -> Result<StagedFile, OutputError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<u64>,
{
    let start_time = Instant::now();
    let tmp = tmp_path(path);

    let file = File::create(&tmp)?;
    let mut writer = BufWriter::with_capacity(buffer_size, file);

    let written = body(&mut writer).and_then(|items| writer.flush().map(|_| items));
    drop(writer);

    let items_written = match written {
        Ok(items) => items,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
    };

    let mut staged = StagedFile {
        tmp,
        target: path.to_path_buf(),
        metrics: WriteMetrics {
            items_written,
            bytes_written: 0,
            duration: Duration::ZERO,
        },
        committed: false,
    };
    staged.metrics.bytes_written = std::fs::metadata(&staged.tmp)?.len();
    staged.metrics.duration = start_time.elapsed();
    Ok(staged)
}

/// Writes every generated record, shuffled, as `--- name ---` blocks.
#[derive(Debug, Clone)]
pub struct EntityDumpWriter {
    buffer_size: usize,
}

impl Default for EntityDumpWriter {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl EntityDumpWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Shuffle all records of all pools with `rng` and write them to `path`.
    pub fn write<P: AsRef<Path>, R: Rng>(
        &self,
        path: P,
        pools: &[RecordPool],
        rng: &mut R,
    ) -> Result<WriteMetrics, OutputError> {
        self.stage(path, pools, rng)?.commit()
    }

    /// Like [`EntityDumpWriter::write`], but leave the result in the temp file.
    pub fn stage<P: AsRef<Path>, R: Rng>(
        &self,
        path: P,
        pools: &[RecordPool],
        rng: &mut R,
    ) -> Result<StagedFile, OutputError> {
        let path = path.as_ref();

        let mut entries: Vec<(&str, &Record)> = pools
            .iter()
            .flat_map(|pool| pool.records.iter().map(move |r| (pool.name.as_str(), r)))
            .collect();
        entries.shuffle(rng);

        info!(
            "Writing {} records from {} pools to '{}'",
            entries.len(),
            pools.len(),
            path.display()
        );

        let staged = stage_file(path, self.buffer_size, |writer| {
            let mut count = 0u64;
            for (name, record) in &entries {
                writeln!(writer, "--- {name} ---")?;
                for line in render_record_lines(record) {
                    writeln!(writer, "{line}")?;
                }
                writeln!(writer)?;

                count += 1;
                if count % 10000 == 0 {
                    debug!("Written {} records", count);
                }
            }
            Ok(count)
        })?;

        let metrics = staged.metrics();
        info!(
            "Entity dump complete: {} records, {} bytes in {:?}",
            metrics.items_written, metrics.bytes_written, metrics.duration
        );
        Ok(staged)
    }
}

/// Writes sampled events as labelled blocks terminated by `=====`.
#[derive(Debug, Clone)]
pub struct EventDumpWriter {
    buffer_size: usize,
}

impl Default for EventDumpWriter {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl EventDumpWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        events: &[EventRecord],
    ) -> Result<WriteMetrics, OutputError> {
        self.stage(path, events)?.commit()
    }

    /// Like [`EventDumpWriter::write`], but leave the result in the temp file.
    pub fn stage<P: AsRef<Path>>(
        &self,
        path: P,
        events: &[EventRecord],
    ) -> Result<StagedFile, OutputError> {
        let path = path.as_ref();
        info!("Writing {} events to '{}'", events.len(), path.display());

        let staged = stage_file(path, self.buffer_size, |writer| {
            let mut count = 0u64;
            for event in events {
                write_event(writer, event)?;
                count += 1;
                if count % 10000 == 0 {
                    debug!("Written {} events", count);
                }
            }
            Ok(count)
        })?;

        let metrics = staged.metrics();
        info!(
            "Event dump complete: {} events, {} bytes in {:?} ({:.2} events/sec)",
            metrics.items_written,
            metrics.bytes_written,
            metrics.duration,
            metrics.items_per_second()
        );
        Ok(staged)
    }
}

/// Writes an [`AuditLog`] as one pretty-printed JSON object.
#[derive(Debug, Clone)]
pub struct AuditLogWriter {
    buffer_size: usize,
}

impl Default for AuditLogWriter {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl AuditLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        log: &AuditLog,
    ) -> Result<WriteMetrics, OutputError> {
        self.stage(path, log)?.commit()
    }

    pub fn stage<P: AsRef<Path>>(
        &self,
        path: P,
        log: &AuditLog,
    ) -> Result<StagedFile, OutputError> {
        let path = path.as_ref();
        info!(
            "Writing {} audit entries to '{}'",
            log.total_entries(),
            path.display()
        );

        let staged = stage_file(path, self.buffer_size, |writer| {
            serde_json::to_writer_pretty(&mut *writer, log)?;
            writeln!(writer)?;
            Ok(log.total_entries() as u64)
        })?;

        info!(
            "Audit log complete: {} entries, {} bytes",
            staged.metrics().items_written,
            staged.metrics().bytes_written
        );
        Ok(staged)
    }
}

fn write_event<W: Write>(writer: &mut W, event: &EventRecord) -> std::io::Result<()> {
    writeln!(writer, "[Event Type]: {}", event.label)?;
    writeln!(writer, "[Timestamp]: {}", event.timestamp)?;
    writeln!(writer, "[Entity1]: {}", render_inline_record(&event.entity1))?;
    writeln!(writer, "[Entity2]: {}", render_inline_record(&event.entity2))?;
    writeln!(writer, "[Value]: {}", event.verb)?;
    if let Some((additional_type, record)) = event.additional() {
        writeln!(writer, "[Additional Entity Type]: {additional_type}")?;
        writeln!(writer, "[Additional Entity]: {}", render_inline_record(record))?;
    }
    writeln!(writer, "=====")
}

//! Replay feed for decoded event records
//!
//! Stands in for the chain subscription layer: reads one JSON
//! `EventRecord` per line and hands them to the registry in file order,
//! which is on-chain order for any correctly exported feed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::{error, info};

use crate::events::EventRecord;
use crate::processors::ProcessorRegistry;

/// Source of ordered, decoded event records
#[async_trait]
pub trait EventSource: Send {
    /// Next record in on-chain order, or `None` when the source is drained
    async fn next_event(&mut self) -> Result<Option<EventRecord>>;
}

/// NDJSON-file event source, one record per line
pub struct JsonlFeed {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl JsonlFeed {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening event feed {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

#[async_trait]
impl EventSource for JsonlFeed {
    async fn next_event(&mut self) -> Result<Option<EventRecord>> {
        while let Some(line) = self.lines.next() {
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .with_context(|| format!("malformed event record on line {}", self.line_no))?;
            return Ok(Some(record));
        }
        Ok(None)
    }
}

/// Outcome counters for one replay
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsumeStats {
    pub processed: u64,
    pub failed: u64,
}

/// Drain a source into the registry, one event at a time.
///
/// Events are fully applied in order; a failed handler fails only its own
/// event, and the feed moves on. Source-level errors (unreadable or
/// malformed lines) abort the replay.
pub async fn consume(
    mut source: impl EventSource,
    registry: &ProcessorRegistry,
) -> Result<ConsumeStats> {
    let mut stats = ConsumeStats::default();

    while let Some(record) = source.next_event().await? {
        match registry.process_event(&record).await {
            Ok(()) => stats.processed += 1,
            Err(e) => {
                error!("failed to process {} event: {e:#}", record.event.kind());
                stats.failed += 1;
            }
        }
        if (stats.processed + stats.failed) % 100 == 0 {
            info!("processed {} events ({} failed)", stats.processed, stats.failed);
        }
    }

    info!(
        "feed drained: {} events processed, {} failed",
        stats.processed, stats.failed
    );
    Ok(stats)
}

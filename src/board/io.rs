//! Board file loading and saving

use anyhow::{bail, Context};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::types::{Board, TrackEntry};

/// Kinds the track list models; an unknown entry using one of these names is a
/// malformed item rather than a foreign kind
const MODELED_KINDS: &[&str] = &["segment", "arc", "via"];

impl Board {
    /// Parse a board from JSON text and build its caches
    pub fn from_json(text: &str) -> anyhow::Result<Board> {
        let mut board: Board = serde_json::from_str(text).context("Failed to parse board JSON")?;
        board.check_entries()?;
        board.rebuild_caches();
        Ok(board)
    }

    /// Load a board file and build its caches
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Board> {
        let path = path.as_ref();
        let start = Instant::now();

        let file = File::open(path)
            .with_context(|| format!("Failed to open board file {}", path.display()))?;
        let mut board: Board = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse board file {}", path.display()))?;
        board.check_entries()?;
        board.rebuild_caches();

        info!(
            "Loaded {}: {} zones, {} track items, {} footprints in {:?}",
            path.display(),
            board.zones.len(),
            board.tracks.len(),
            board.footprints.len(),
            start.elapsed()
        );
        Ok(board)
    }

    /// Write the board back as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create board file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("Failed to serialize board")?;
        writer.flush()?;
        info!("Saved board to {}", path.display());
        Ok(())
    }

    /// Triangulate zone fills and rebuild the spatial index
    pub fn rebuild_caches(&mut self) {
        for zone in &mut self.zones {
            zone.rebuild_fill_cache();
            debug!("Zone {}: {} fill triangles", zone.id, zone.fill_triangle_count());
        }
        self.rebuild_index();
    }

    fn check_entries(&self) -> anyhow::Result<()> {
        for (i, entry) in self.tracks.iter().enumerate() {
            if let TrackEntry::Unknown(item) = entry {
                if MODELED_KINDS.contains(&item.kind.as_str()) {
                    bail!("Malformed {} entry at track index {}", item.kind, i);
                }
            }
        }
        Ok(())
    }
}

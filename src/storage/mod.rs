use crate::catalog::Criterion;
use crate::scoring::RatingSet;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// On-disk form of the slider state, written between sessions so the TUI
/// reopens where the user left off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRatings {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub ratings: RatingSet,
}

impl SavedRatings {
    pub fn new(ratings: RatingSet) -> Self {
        Self {
            version: 1,
            saved_at: Utc::now(),
            ratings,
        }
    }
}

/// Get the default ratings file path (~/.config/quote-builder/ratings.json)
pub fn get_ratings_path() -> PathBuf {
    crate::config::get_config_dir().join("ratings.json")
}

/// Load saved ratings from a JSON file.
///
/// If the file doesn't exist, returns the default rating set. Saved entries
/// are sanitized against the catalog: unknown keys are dropped, out-of-range
/// values clamped, missing criteria filled with the default rating.
pub fn load_ratings(path: &Path, catalog: &[Criterion]) -> Result<RatingSet> {
    if !path.exists() {
        return Ok(RatingSet::default_for(catalog));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open ratings file at {}", path.display()))?;

    let saved: SavedRatings = serde_json::from_reader(file).context("Failed to load ratings")?;

    // Version check
    if saved.version != 1 {
        anyhow::bail!("Unsupported ratings file version: {}", saved.version);
    }

    Ok(saved.ratings.sanitized_for(catalog))
}

/// Save ratings to a JSON file atomically.
///
/// Uses atomic-write-file so the file is never left in a corrupted state.
/// Creates the config directory if it doesn't exist.
pub fn save_ratings(path: &Path, ratings: &RatingSet) -> Result<()> {
    crate::config::ensure_config_dir()?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    let saved = SavedRatings::new(ratings.clone());
    serde_json::to_writer_pretty(&mut file, &saved).context("Failed to serialize ratings")?;

    file.commit().context("Failed to save ratings")?;

    Ok(())
}

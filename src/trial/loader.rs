//! Trial discovery and loading from a participant directory
//!
//! Layout: `<base>/<participant_id>/BB_FT_*.json`, one document per trial.
//! Trials are returned in lexicographic order of their file names so that
//! `trial_number` assignments are reproducible across runs.

use super::Trial;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-name prefix of trial documents
pub const TRIAL_FILE_PREFIX: &str = "BB_FT_";

/// File-name extension of trial documents
pub const TRIAL_FILE_EXTENSION: &str = "json";

/// Loads trial documents from a base storage directory.
#[derive(Debug, Clone)]
pub struct TrialLoader {
    base_path: PathBuf,
}

impl TrialLoader {
    /// Create a loader rooted at `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Root directory holding one sub-directory per participant.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load every trial recorded for `participant_id`, sorted by file name.
    ///
    /// # Errors
    ///
    /// - [`Error::DataNotFound`] if the participant directory is missing or
    ///   holds no `BB_FT_*.json` files
    /// - [`Error::Schema`] / [`Error::UnknownJoint`] if any document is malformed
    /// - [`Error::TrialRead`] if a trial file cannot be read
    /// - [`Error::Io`] if the directory cannot be listed
    pub fn load_participant(&self, participant_id: &str) -> Result<Vec<Trial>> {
        let participant_path = self.base_path.join(participant_id);
        let not_found = || Error::DataNotFound {
            participant_id: participant_id.to_string(),
            path: participant_path.display().to_string(),
        };

        if !participant_path.is_dir() {
            return Err(not_found());
        }

        let mut trial_files = Vec::new();
        for entry in fs::read_dir(&participant_path)? {
            let path = entry?.path();
            if path.is_file() && is_trial_file(&path) {
                trial_files.push(path);
            }
        }

        if trial_files.is_empty() {
            return Err(not_found());
        }

        // Sort by file name for deterministic trial ordering
        trial_files.sort();

        let trials = trial_files
            .iter()
            .map(|path| Self::load_trial(path))
            .collect::<Result<Vec<_>>>()?;

        info!(
            participant_id,
            trials = trials.len(),
            "loaded participant trials"
        );
        Ok(trials)
    }

    /// Load a single trial document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrialRead`] if the file cannot be read, or
    /// [`Error::Schema`] if it is not UTF-8 JSON of the trial shape.
    pub fn load_trial<P: AsRef<Path>>(path: P) -> Result<Trial> {
        let path = path.as_ref();
        let source_id = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| Error::TrialRead {
            path: source_id.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Schema {
            source_id: source_id.clone(),
            message: format!("not valid UTF-8: {e}"),
        })?;
        let trial = Trial::from_json_str(&source_id, &text)?;
        debug!(
            path = %path.display(),
            trial_id = trial.trial_id(),
            frames = trial.frame_count(),
            "loaded trial"
        );
        Ok(trial)
    }
}

fn is_trial_file(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(TRIAL_FILE_PREFIX));
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == TRIAL_FILE_EXTENSION);
    has_prefix && has_extension
}

//! State store bound to the widget's state file

use super::io::{load, merge_defaults, save};
use crate::config;
use crate::error::StoreResult;
use crate::state::WidgetState;
use std::path::{Path, PathBuf};

/// Loads and saves the widget state at a fixed path
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(config::state_path())
    }
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, merge defaults under it and build the typed state
    pub fn load_state(&self) -> WidgetState {
        let doc = merge_defaults(load(&self.path), &config::default_document());
        let state = WidgetState::from_document(&doc);
        log::info!(
            "Loaded widget state from {} ({} chars, {} tags)",
            self.path.display(),
            state.content.text.chars().count(),
            state.content.tags.len()
        );
        state
    }

    /// Write the full state document
    pub fn save_state(&self, state: &WidgetState) -> StoreResult<()> {
        save(&self.path, &state.to_document())?;
        log::debug!("Saved widget state to {}", self.path.display());
        Ok(())
    }
}

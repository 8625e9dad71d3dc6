use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

/// Shared handle the loader, resolver, and presentation layer all hold.
pub type SharedGalleryState = Arc<Mutex<GalleryState>>;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates the catalog request phases. Exactly one is authoritative at a
/// time; a failed load returns to `Idle` with the error message set.
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Flattened record describing one catalog item for display. Immutable after
/// creation; owned by the catalog.
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    pub description: String,
}

#[derive(Debug, Serialize)]
/// Application state container. Both published collections (catalog, artwork
/// mapping) are replaced as whole values, never merged field-by-field.
pub struct GalleryState {
    catalog: Vec<PokemonSummary>,
    artwork: HashMap<String, String>,
    artwork_errors: HashMap<String, String>,
    phase: LoadPhase,
    error: Option<String>,
    revealing: bool,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            artwork: HashMap::new(),
            artwork_errors: HashMap::new(),
            phase: LoadPhase::Idle,
            error: None,
            revealing: true,
        }
    }

    pub fn catalog(&self) -> &[PokemonSummary] {
        &self.catalog
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Missing key means "not yet resolved", never an error.
    pub fn artwork_url(&self, name: &str) -> Option<&str> {
        self.artwork.get(name).map(String::as_str)
    }

    pub fn artwork_error(&self, name: &str) -> Option<&str> {
        self.artwork_errors.get(name).map(String::as_str)
    }

    pub fn artwork_len(&self) -> usize {
        self.artwork.len()
    }

    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    /// First loader transition: clear the error, mark loading.
    pub fn begin_load(&mut self) {
        self.error = None;
        self.phase = LoadPhase::Loading;
    }

    /// Terminal success: replace the catalog wholesale, mark loaded.
    pub fn complete_load(&mut self, catalog: Vec<PokemonSummary>) {
        self.catalog = catalog;
        self.error = None;
        self.phase = LoadPhase::Loaded;
    }

    /// Terminal failure: store the message, leave the previous catalog as it
    /// was, return to idle.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.phase = LoadPhase::Idle;
    }

    /// Replace the artwork mapping wholesale.
    pub fn publish_artwork(&mut self, mapping: HashMap<String, String>) {
        self.artwork = mapping;
    }

    /// Replace the per-entity artwork error map wholesale.
    pub fn record_artwork_errors(&mut self, errors: HashMap<String, String>) {
        self.artwork_errors = errors;
    }

    pub fn set_revealing(&mut self, revealing: bool) {
        self.revealing = revealing;
    }
}

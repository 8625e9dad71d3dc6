use kanto_api::{KantoApiError, PokeApiClient, PokemonListingEntry};
use thiserror::Error;
use tracing::{info, warn};

use crate::state::{PokemonSummary, SharedGalleryState};

/// First-generation Kanto listing size.
pub const KANTO_DEX_SIZE: usize = 151;
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Error)]
/// Enumerates catalog load failures surfaced to the caller.
pub enum GalleryError {
    #[error(transparent)]
    Api(#[from] KantoApiError),
    #[error("all {total} catalog items failed to load; first failure: {first_error}")]
    AllItemsFailed { total: usize, first_error: String },
    #[error("catalog task failed: {0}")]
    TaskJoin(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Batch failure policy. `FailFast` aborts the whole load on the first item
/// failure; `KeepPartial` keeps the items that succeeded.
pub enum LoadFailurePolicy {
    FailFast,
    KeepPartial,
}

#[derive(Debug, Clone)]
pub struct CatalogLoaderConfig {
    pub limit: usize,
    pub language: String,
    pub failure_policy: LoadFailurePolicy,
}

impl Default for CatalogLoaderConfig {
    fn default() -> Self {
        Self {
            limit: KANTO_DEX_SIZE,
            language: DEFAULT_LANGUAGE.to_string(),
            failure_policy: LoadFailurePolicy::FailFast,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub failed: usize,
}

/// Loads the catalog: one listing request, then detail and species per item.
/// Items run concurrently with each other; detail and species are causally
/// ordered within an item. Output order equals listing order.
pub struct CatalogLoader {
    client: PokeApiClient,
    config: CatalogLoaderConfig,
}

impl CatalogLoader {
    pub fn new(client: PokeApiClient, config: CatalogLoaderConfig) -> Self {
        Self { client, config }
    }

    pub async fn run(&self, state: &SharedGalleryState) -> Result<LoadReport, GalleryError> {
        state.lock().await.begin_load();

        let listing = match self.client.list_pokemon(self.config.limit).await {
            Ok(listing) => listing,
            Err(error) => {
                state.lock().await.fail_load(error.to_string());
                return Err(error.into());
            }
        };

        let total = listing.results.len();
        let mut handles = Vec::with_capacity(total);
        for entry in listing.results {
            let client = self.client.clone();
            let language = self.config.language.clone();
            handles.push(tokio::spawn(async move {
                fetch_summary(&client, &entry, &language).await
            }));
        }

        let mut summaries = Vec::with_capacity(total);
        let mut failed = 0usize;
        let mut first_error: Option<String> = None;
        for handle in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    let error = GalleryError::TaskJoin(join_error.to_string());
                    state.lock().await.fail_load(error.to_string());
                    return Err(error);
                }
            };

            match outcome {
                Ok(summary) => summaries.push(summary),
                Err(error) => match self.config.failure_policy {
                    LoadFailurePolicy::FailFast => {
                        state.lock().await.fail_load(error.to_string());
                        return Err(error.into());
                    }
                    LoadFailurePolicy::KeepPartial => {
                        warn!(error = %error, "catalog item failed, keeping partial batch");
                        failed += 1;
                        first_error.get_or_insert_with(|| error.to_string());
                    }
                },
            }
        }

        if summaries.is_empty() && failed > 0 {
            let error = GalleryError::AllItemsFailed {
                total,
                first_error: first_error.unwrap_or_default(),
            };
            state.lock().await.fail_load(error.to_string());
            return Err(error);
        }

        let report = LoadReport {
            loaded: summaries.len(),
            failed,
        };
        info!(loaded = report.loaded, failed = report.failed, "catalog loaded");
        state.lock().await.complete_load(summaries);
        Ok(report)
    }
}

async fn fetch_summary(
    client: &PokeApiClient,
    entry: &PokemonListingEntry,
    language: &str,
) -> Result<PokemonSummary, KantoApiError> {
    let detail = client.fetch_detail(&entry.url).await?;
    let species = client.fetch_species(&detail.species.url).await?;
    let flavor_text =
        species
            .first_flavor_text(language)
            .ok_or_else(|| KantoApiError::MissingDescription {
                name: detail.name.clone(),
                language: language.to_string(),
            })?;

    Ok(PokemonSummary {
        id: detail.id,
        description: normalize_flavor_text(flavor_text),
        image_url: detail.sprites.other.official_artwork.front_default,
        name: detail.name,
    })
}

/// Flavor texts carry form feeds and hard line breaks from the game data.
fn normalize_flavor_text(raw: &str) -> String {
    raw.chars()
        .map(|character| match character {
            '\u{c}' | '\n' => ' ',
            other => other,
        })
        .collect()
}

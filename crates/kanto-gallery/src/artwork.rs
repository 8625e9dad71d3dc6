use std::collections::HashMap;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use kanto_api::PokeApiClient;

use crate::state::SharedGalleryState;

pub const DEFAULT_SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct ArtworkResolverConfig {
    pub sprite_base: String,
    pub reveal_delay_ms: u64,
}

impl Default for ArtworkResolverConfig {
    fn default() -> Self {
        Self {
            sprite_base: DEFAULT_SPRITE_BASE.to_string(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub resolved: usize,
    pub failed: usize,
    pub published: bool,
}

/// Resolves official-artwork URLs for the current catalog. One lookup per
/// entity, all independent; the join is a barrier before publication. The
/// mapping is published only when every lookup succeeded.
pub struct ArtworkResolver {
    client: PokeApiClient,
    config: ArtworkResolverConfig,
    reveal_timer: Option<JoinHandle<()>>,
}

impl ArtworkResolver {
    pub fn new(client: PokeApiClient, config: ArtworkResolverConfig) -> Self {
        Self {
            client,
            config,
            reveal_timer: None,
        }
    }

    pub async fn run_cycle(&mut self, state: &SharedGalleryState) -> ResolutionReport {
        let names: Vec<String> = {
            let mut guard = state.lock().await;
            guard.set_revealing(true);
            guard
                .catalog()
                .iter()
                .map(|summary| summary.name.clone())
                .collect()
        };

        let mut handles = Vec::with_capacity(names.len());
        for name in names {
            let client = self.client.clone();
            handles.push((
                name.clone(),
                tokio::spawn(async move { client.fetch_pokemon_by_name(&name).await }),
            ));
        }

        let mut mapping = HashMap::new();
        let mut errors = HashMap::new();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(record)) => {
                    mapping.insert(name, sprite_url(&self.config.sprite_base, record.id));
                }
                Ok(Err(error)) => {
                    warn!(name = %name, error = %error, "artwork lookup failed");
                    errors.insert(name, error.to_string());
                }
                Err(join_error) => {
                    warn!(name = %name, error = %join_error, "artwork lookup task failed");
                    errors.insert(name, join_error.to_string());
                }
            }
        }

        let report = ResolutionReport {
            resolved: mapping.len(),
            failed: errors.len(),
            published: errors.is_empty(),
        };

        {
            let mut guard = state.lock().await;
            if report.published {
                guard.publish_artwork(mapping);
            }
            guard.record_artwork_errors(errors);
        }
        info!(
            resolved = report.resolved,
            failed = report.failed,
            published = report.published,
            "artwork resolution cycle finished"
        );

        self.arm_reveal_timer(state.clone());
        report
    }

    /// Flips the reveal flag off after the configured delay. Owned by the
    /// resolver: a newer cycle aborts the previous timer, and dropping the
    /// resolver aborts it too, so a stale timer cannot flip display state
    /// after a newer cycle already did.
    fn arm_reveal_timer(&mut self, state: SharedGalleryState) {
        if let Some(previous) = self.reveal_timer.take() {
            previous.abort();
        }

        let delay = std::time::Duration::from_millis(self.config.reveal_delay_ms);
        self.reveal_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.lock().await.set_revealing(false);
        }));
    }
}

impl Drop for ArtworkResolver {
    fn drop(&mut self) {
        if let Some(timer) = self.reveal_timer.take() {
            timer.abort();
        }
    }
}

fn sprite_url(sprite_base: &str, id: u32) -> String {
    format!("{}/{id}.png", sprite_base.trim_end_matches('/'))
}

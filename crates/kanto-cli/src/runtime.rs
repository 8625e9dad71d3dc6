use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::sync::Mutex;
use tracing::warn;

use kanto_api::{PokeApiClient, PokeApiConfig};
use kanto_gallery::{
    render_gallery, ArtworkResolver, ArtworkResolverConfig, CatalogLoader, CatalogLoaderConfig,
    GalleryState, LoadFailurePolicy,
};

use crate::cli_args::{Cli, CliOutputFormat};

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let client = PokeApiClient::new(PokeApiConfig {
        api_base: cli.api_base.clone(),
        request_timeout_ms: cli.timeout_ms,
    })
    .context("failed to build pokeapi client")?;

    let state = Arc::new(Mutex::new(GalleryState::new()));
    let loader = CatalogLoader::new(
        client.clone(),
        CatalogLoaderConfig {
            limit: cli.limit,
            language: cli.language.clone(),
            failure_policy: if cli.keep_partial {
                LoadFailurePolicy::KeepPartial
            } else {
                LoadFailurePolicy::FailFast
            },
        },
    );

    if let Err(error) = loader.run(&state).await {
        bail!("{error}");
    }

    let resolver_config = ArtworkResolverConfig::default();
    let reveal_delay = Duration::from_millis(resolver_config.reveal_delay_ms);
    let mut resolver = ArtworkResolver::new(client, resolver_config);
    let resolution = resolver.run_cycle(&state).await;
    if !resolution.published {
        warn!(
            failed = resolution.failed,
            "artwork mapping left unchanged for this cycle"
        );
    }

    // Let the reveal timer fire before the final render.
    tokio::time::sleep(reveal_delay + Duration::from_millis(50)).await;

    let guard = state.lock().await;
    match cli.output {
        CliOutputFormat::Grid => print!("{}", render_gallery(&guard)),
        CliOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*guard)?),
    }

    Ok(())
}

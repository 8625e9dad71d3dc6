use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use tokio::sync::Mutex;

use kanto_api::{PokeApiClient, PokeApiConfig};
use kanto_gallery::{
    capitalize, render_gallery, ArtworkResolver, ArtworkResolverConfig, CatalogLoader,
    CatalogLoaderConfig, GalleryState, LoadFailurePolicy, LoadPhase, SharedGalleryState,
    DEFAULT_SPRITE_BASE,
};

fn client_for(server: &MockServer) -> PokeApiClient {
    PokeApiClient::new(PokeApiConfig {
        api_base: server.base_url(),
        request_timeout_ms: 5_000,
    })
    .expect("client should be created")
}

fn new_state() -> SharedGalleryState {
    Arc::new(Mutex::new(GalleryState::new()))
}

/// Mounts the listing plus detail, species, and artwork lookups for each
/// `(id, name, flavor)` row, mirroring the real API surface.
fn mount_catalog(server: &MockServer, rows: &[(u32, &str, &str)]) {
    let results: Vec<_> = rows
        .iter()
        .map(|(_, name, _)| {
            json!({
                "name": name,
                "url": format!("{}/pokemon/{name}/", server.base_url())
            })
        })
        .collect();
    server.mock(|when, then| {
        when.method(GET)
            .path("/pokemon")
            .query_param("limit", rows.len().to_string());
        then.status(200).json_body(json!({ "results": results }));
    });

    for (id, name, flavor) in rows {
        server.mock(|when, then| {
            when.method(GET).path(format!("/pokemon/{name}/"));
            then.status(200).json_body(json!({
                "id": id,
                "name": name,
                "species": {"url": format!("{}/pokemon-species/{id}/", server.base_url())},
                "sprites": {
                    "other": {
                        "official-artwork": {
                            "front_default": format!("https://img.example/official/{id}.png")
                        }
                    }
                }
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path(format!("/pokemon-species/{id}/"));
            then.status(200).json_body(json!({
                "flavor_text_entries": [
                    {"flavor_text": flavor, "language": {"name": "en"}}
                ]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path(format!("/pokemon/{name}"));
            then.status(200).json_body(json!({"id": id, "name": name}));
        });
    }
}

fn loader_for(server: &MockServer, limit: usize) -> CatalogLoader {
    CatalogLoader::new(
        client_for(server),
        CatalogLoaderConfig {
            limit,
            language: "en".to_string(),
            failure_policy: LoadFailurePolicy::FailFast,
        },
    )
}

fn resolver_for(server: &MockServer) -> ArtworkResolver {
    ArtworkResolver::new(
        client_for(server),
        ArtworkResolverConfig {
            sprite_base: DEFAULT_SPRITE_BASE.to_string(),
            reveal_delay_ms: 10,
        },
    )
}

#[tokio::test]
async fn integration_load_then_resolve_then_render() {
    let server = MockServer::start();
    mount_catalog(
        &server,
        &[
            (1, "bulbasaur", "A strange seed was\nplanted on its back."),
            (4, "charmander", "Obviously prefers\u{c}hot places."),
            (25, "pikachu", "Known to shock careless trainers."),
        ],
    );

    let state = new_state();
    let load = loader_for(&server, 3)
        .run(&state)
        .await
        .expect("load should succeed");
    assert_eq!(load.loaded, 3);

    let mut resolver = resolver_for(&server);
    let resolution = resolver.run_cycle(&state).await;
    assert_eq!(resolution.resolved, 3);
    assert!(resolution.published);

    tokio::time::sleep(Duration::from_millis(60)).await;

    let guard = state.lock().await;
    assert_eq!(guard.phase(), LoadPhase::Loaded);
    assert_eq!(
        guard.artwork_url("pikachu"),
        Some(format!("{DEFAULT_SPRITE_BASE}/25.png").as_str())
    );

    let rendered = render_gallery(&guard);
    let bulbasaur = rendered.find("Bulbasaur #1").expect("first card");
    let charmander = rendered.find("Charmander #4").expect("second card");
    let pikachu = rendered.find("Pikachu #25").expect("third card");
    assert!(bulbasaur < charmander && charmander < pikachu);
    assert!(rendered.contains("A strange seed was planted on its back."));
    assert!(rendered.contains(&format!("{DEFAULT_SPRITE_BASE}/25.png")));
}

#[tokio::test]
async fn integration_species_failure_aborts_whole_load() {
    let server = MockServer::start();
    mount_catalog(&server, &[(1, "bulbasaur", "A strange seed.")]);
    // Second entity whose species endpoint is broken.
    server.mock(|when, then| {
        when.method(GET)
            .path("/pokemon")
            .query_param("limit", "2");
        then.status(200).json_body(json!({
            "results": [
                {"name": "bulbasaur", "url": format!("{}/pokemon/bulbasaur/", server.base_url())},
                {"name": "charmander", "url": format!("{}/pokemon/charmander/", server.base_url())}
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/pokemon/charmander/");
        then.status(200).json_body(json!({
            "id": 4,
            "name": "charmander",
            "species": {"url": format!("{}/pokemon-species/4/", server.base_url())}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/pokemon-species/4/");
        then.status(500).body("boom");
    });

    let state = new_state();
    loader_for(&server, 2)
        .run(&state)
        .await
        .expect_err("load should fail");

    let guard = state.lock().await;
    assert_eq!(guard.phase(), LoadPhase::Idle);
    assert!(guard.catalog().is_empty());
    assert!(guard.error().expect("error should be stored").contains("500"));
    assert_eq!(render_gallery(&guard), format!("error: {}\n", guard.error().expect("error")));
}

#[tokio::test]
async fn integration_artwork_failure_keeps_previous_mapping_for_the_cycle() {
    let server = MockServer::start();
    mount_catalog(
        &server,
        &[(1, "bulbasaur", "A strange seed."), (25, "pikachu", "Shocking.")],
    );

    let state = new_state();
    loader_for(&server, 2)
        .run(&state)
        .await
        .expect("load should succeed");

    let mut resolver = resolver_for(&server);
    let first = resolver.run_cycle(&state).await;
    assert!(first.published);
    assert_eq!(state.lock().await.artwork_len(), 2);

    // A fresh load introduces mewtwo, whose artwork lookup 404s.
    let second_server = MockServer::start();
    mount_catalog(
        &second_server,
        &[(1, "bulbasaur", "A strange seed."), (25, "pikachu", "Shocking.")],
    );
    second_server.mock(|when, then| {
        when.method(GET)
            .path("/pokemon")
            .query_param("limit", "3");
        then.status(200).json_body(json!({
            "results": [
                {"name": "bulbasaur", "url": format!("{}/pokemon/bulbasaur/", second_server.base_url())},
                {"name": "pikachu", "url": format!("{}/pokemon/pikachu/", second_server.base_url())},
                {"name": "mewtwo", "url": format!("{}/pokemon/mewtwo/", second_server.base_url())}
            ]
        }));
    });
    second_server.mock(|when, then| {
        when.method(GET).path("/pokemon/mewtwo/");
        then.status(200).json_body(json!({
            "id": 150,
            "name": "mewtwo",
            "species": {"url": format!("{}/pokemon-species/150/", second_server.base_url())}
        }));
    });
    second_server.mock(|when, then| {
        when.method(GET).path("/pokemon-species/150/");
        then.status(200).json_body(json!({
            "flavor_text_entries": [
                {"flavor_text": "Created by genetic manipulation.", "language": {"name": "en"}}
            ]
        }));
    });
    second_server.mock(|when, then| {
        when.method(GET).path("/pokemon/mewtwo");
        then.status(404).body("Not Found");
    });

    loader_for(&second_server, 3)
        .run(&state)
        .await
        .expect("reload should succeed");

    let mut second_resolver = resolver_for(&second_server);
    let second = second_resolver.run_cycle(&state).await;
    assert_eq!(second.failed, 1);
    assert!(!second.published);

    let guard = state.lock().await;
    // Mapping is unchanged from the first cycle; mewtwo reads as a
    // structured per-entity failure, not a mapping entry.
    assert_eq!(guard.artwork_len(), 2);
    assert!(guard.artwork_error("mewtwo").is_some());
}

#[test]
fn integration_capitalize_matches_display_contract() {
    assert_eq!(capitalize("pikachu"), "Pikachu");
    assert_eq!(capitalize(""), "");
}

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    KantoApiError, PokemonDetail, PokemonIdRecord, PokemonListing, PokemonSpecies,
};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
/// Connection settings for `PokeApiClient`.
pub struct PokeApiConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
/// Read-only client over the public PokeAPI host. No auth, no retries.
pub struct PokeApiClient {
    client: reqwest::Client,
    config: PokeApiConfig,
}

impl PokeApiClient {
    pub fn new(config: PokeApiConfig) -> Result<Self, KantoApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint_url(&self, path: &str) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}/{}", path.trim_start_matches('/'))
    }

    /// `GET {api_base}/pokemon?limit={limit}`.
    pub async fn list_pokemon(&self, limit: usize) -> Result<PokemonListing, KantoApiError> {
        let url = format!("{}?limit={limit}", self.endpoint_url("pokemon"));
        self.get_json(&url).await
    }

    /// `GET <entity-url>`; the listing returns absolute URLs, fetched verbatim.
    pub async fn fetch_detail(&self, url: &str) -> Result<PokemonDetail, KantoApiError> {
        self.get_json(url).await
    }

    /// `GET <species-url>`; the detail response returns absolute URLs, fetched verbatim.
    pub async fn fetch_species(&self, url: &str) -> Result<PokemonSpecies, KantoApiError> {
        self.get_json(url).await
    }

    /// `GET {api_base}/pokemon/{name}`, reduced to the numeric id.
    pub async fn fetch_pokemon_by_name(
        &self,
        name: &str,
    ) -> Result<PokemonIdRecord, KantoApiError> {
        let url = self.endpoint_url(&format!("pokemon/{name}"));
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, KantoApiError> {
        debug!(url, "pokeapi request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(KantoApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

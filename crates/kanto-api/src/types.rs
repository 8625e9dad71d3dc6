use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One `{name, url}` row returned by the paged listing endpoint.
pub struct PokemonListingEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Response body of `GET /pokemon?limit=N`.
pub struct PokemonListing {
    pub results: Vec<PokemonListingEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Bare `{url}` reference to another API resource.
pub struct ResourceRef {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Bare `{name}` reference, used for language tags.
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OfficialArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SpriteCollections {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: OfficialArtwork,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Sprites {
    #[serde(default)]
    pub other: SpriteCollections,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Response body of `GET <entity-url>`, reduced to the fields the gallery reads.
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub species: ResourceRef,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
/// Response body of `GET <species-url>`, reduced to its flavor-text entries.
pub struct PokemonSpecies {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl PokemonSpecies {
    /// First flavor text tagged with `language`, in API order.
    pub fn first_flavor_text(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.flavor_text.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Response body of `GET /pokemon/<name>`, reduced to the numeric id.
pub struct PokemonIdRecord {
    pub id: u32,
}

#[derive(Debug, Error)]
/// Enumerates failures surfaced by `PokeApiClient`.
pub enum KantoApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("pokeapi returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no {language} flavor text for {name}")]
    MissingDescription { name: String, language: String },
}

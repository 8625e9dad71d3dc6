//! Typed read-only client for the PokeAPI endpoints the gallery depends on.
mod client;
mod types;

pub use client::{PokeApiClient, PokeApiConfig, DEFAULT_API_BASE};
pub use types::{
    FlavorTextEntry, KantoApiError, NamedResource, OfficialArtwork, PokemonDetail, PokemonIdRecord,
    PokemonListing, PokemonListingEntry, PokemonSpecies, ResourceRef, SpriteCollections, Sprites,
};

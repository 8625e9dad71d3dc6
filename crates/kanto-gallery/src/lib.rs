//! Gallery domain layer: state container, catalog loader, artwork resolver,
//! and card rendering.
mod artwork;
mod loader;
mod render;
mod state;

pub use artwork::{
    ArtworkResolver, ArtworkResolverConfig, ResolutionReport, DEFAULT_REVEAL_DELAY_MS,
    DEFAULT_SPRITE_BASE,
};
pub use loader::{
    CatalogLoader, CatalogLoaderConfig, GalleryError, LoadFailurePolicy, LoadReport,
    DEFAULT_LANGUAGE, KANTO_DEX_SIZE,
};
pub use render::{capitalize, render_gallery, IMAGE_PENDING_LINE, IMAGE_UNAVAILABLE_LINE};
pub use state::{GalleryState, LoadPhase, PokemonSummary, SharedGalleryState};

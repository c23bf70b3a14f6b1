//! Error types for map, entity and asset construction.
//!
//! Runtime queries (terrain heights, culling, physics) never fail; only
//! building things from external data can.

/// Errors from building a terrain grid.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map contains no tiles")]
    Empty,
}

/// Errors from constructing an entity.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("entity needs at least one animation")]
    EmptyAnimationSet,
    #[error("animation {0} has no frames")]
    EmptyAnimation(usize),
}

/// Errors from loading or resolving assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown sprite: {0}")]
    UnknownSprite(String),
    #[error("unknown animation: {0}")]
    UnknownAnimation(String),
}

/// Any error the engine surfaces to game code.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Entity(#[from] EntityError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

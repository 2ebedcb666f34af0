use thiserror::Error;

/// Errors surfaced by the card's core logic.
#[derive(Debug, Error)]
pub enum CardError {
    /// A step driver needs at least one step to dispatch.
    #[error("step list is empty")]
    NoSteps,
    /// A palette entry was not a `#rrggbb` hex color.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}

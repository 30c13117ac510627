use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("anchor point `{0}` is not supported")]
    UnsupportedAnchor(String),

    #[error("per-class counting is enabled but trail {0} has no class label")]
    MissingClassLabel(String),

    #[error("Config Error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[cfg(feature = "gui")]
    #[error("OpenCV Error: {0}")]
    GuiError(#[from] opencv::Error),
}

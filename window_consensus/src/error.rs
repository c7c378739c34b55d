use poa_graph::{ConfigError, GraphError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WindowError>;

/// Reasons a window cannot produce a consensus. Each carries the window id
/// so the caller can report it and move on to the next window.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window {id}: empty backbone or unequal quality length (backbone {backbone_len}, quality {quality_len})")]
    InvalidBackbone {
        id: u64,
        backbone_len: usize,
        quality_len: usize,
    },
    #[error("window {id}: quality length {quality_len} differs from sequence length {sequence_len}")]
    QualityLengthMismatch {
        id: u64,
        sequence_len: usize,
        quality_len: usize,
    },
    #[error("window {id}: layer range [{begin}, {end}) is invalid for a backbone of length {backbone_len}")]
    InvalidLayerCoordinates {
        id: u64,
        begin: u32,
        end: u32,
        backbone_len: u32,
    },
    #[error("window {id}: {source}")]
    InvalidConfig { id: u64, source: ConfigError },
    #[error("window {id}: {source}")]
    Graph { id: u64, source: GraphError },
}

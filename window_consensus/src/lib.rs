//! Consensus of one backbone window from the reads layered on it.
//!
//! A [Window] stores the backbone and every read fragment mapped to it, then
//! folds them into a partial order graph one at a time and reads the
//! heaviest path back out. Low-coverage flanks of long-read windows can be
//! trimmed off afterwards.
//!
//! ```
//! use window_consensus::{Window, WindowType, DEFAULT_CONFIG};
//! let backbone = b"ACGTACGTAC";
//! let mut window = Window::new(0, 0, WindowType::Tgs, backbone, b"!!!!!!!!!!").unwrap();
//! window.add_layer(b"ACGTACGTAC", None, 0, 10).unwrap();
//! // Too few layers for a graph; the backbone is kept.
//! assert!(!window.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
//! assert_eq!(window.consensus(), Some(&backbone[..]));
//! ```
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
mod error;
pub use error::*;
pub mod region;
pub mod trim;
mod window;
pub use window::*;
pub use poa_graph::{AlignmentConfig, AlignmentEngine, DEFAULT_CONFIG, STRICT_CONFIG};
#[cfg(test)]
mod tests;

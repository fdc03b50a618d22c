//! The preprocessing pipeline.
//!
//! - [`core`]: the `Preprocessor` implementation
//! - [`types`]: options and the processor struct
pub mod core;
pub mod types;

pub use types::{PreprocessOptions, Preprocessor};

//! codescope-core: a codebase analysis engine.
//!
//! Feed [`Engine::analyze`] a set of in-memory [`SourceFile`]s and get back
//! one [`AnalysisResult`] covering structure, dependencies, quality metrics,
//! security and performance issues and an architecture overview. No file I/O
//! happens inside the engine; the CLI (or any other caller) owns collection.

pub mod arch;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod graph;
pub mod intake;
pub mod lang;
pub mod quality;
pub mod scan;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use types::{AnalysisResult, SourceFile};

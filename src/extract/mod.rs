// src/extract/mod.rs
//! Structural extraction: per-file parsing into functions, classes,
//! interfaces, type aliases and exported symbols.
//!
//! Strategies sit behind the [`Parse`] capability trait so they are
//! interchangeable: the tree-sitter strategy covers the JS/TS family, the
//! heuristic strategy everything else. A single file's failure never aborts
//! the run; the caller logs it and drops the file from structural output.

pub mod complexity;
pub mod heuristic;
pub mod tree;

use crate::intake::NormalizedFile;
use crate::types::{ClassInfo, FunctionInfo, InterfaceInfo, TypeAliasInfo};

/// Structural facts extracted from one file.
#[derive(Debug, Default)]
pub struct PartialStructure {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    pub types: Vec<TypeAliasInfo>,
    pub exports: Vec<String>,
}

/// A non-fatal, per-file parse failure.
#[derive(Debug)]
pub struct ParseFailure {
    pub path: String,
    pub detail: String,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse failure in {}: {}", self.path, self.detail)
    }
}

/// Parsing capability. New languages plug in by implementing this trait.
pub trait Parse {
    fn parse(&self, file: &NormalizedFile<'_>) -> Result<PartialStructure, ParseFailure>;
}

/// Extracts structure from one file using the best available strategy.
///
/// # Errors
///
/// Returns the strategy's [`ParseFailure`]; callers treat it as non-fatal.
pub fn extract(file: &NormalizedFile<'_>) -> Result<PartialStructure, ParseFailure> {
    match file.lang {
        Some(lang) => tree::TreeStrategy::new(lang).parse(file),
        None => heuristic::HeuristicStrategy.parse(file),
    }
}

// src/config.rs
//! Engine configuration. All thresholds are configurable defaults, not
//! contracts: the shipped values mirror the dashboard's historical behavior.

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub intake: IntakeConfig,
    pub graph: GraphConfig,
    pub complexity: ComplexityConfig,
    pub duplication: DuplicationConfig,
    pub smells: SmellConfig,
    pub scoring: ScoringConfig,
    pub limits: LimitsConfig,
}

impl EngineConfig {
    /// Parses a TOML config, falling back to defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Extensions the engine will analyze.
    pub extensions: Vec<String>,
    /// Path substrings that exclude a file (vendor/build/test trees).
    pub exclude: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            extensions: SOURCE_EXTENSIONS.iter().map(ToString::to_string).collect(),
            exclude: EXCLUDED_SEGMENTS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// When false the builder degrades to the empty-default report shape,
    /// mirroring an unavailable resolution backend.
    pub enabled: bool,
    pub ranking_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ranking_size: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub hotspot_count: usize,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            low: 5,
            medium: 10,
            high: 20,
            hotspot_count: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DuplicationConfig {
    /// Sliding-window height in lines.
    pub window: usize,
    /// Blocks shorter than this (normalized chars) are skipped.
    pub min_block_chars: usize,
}

impl Default for DuplicationConfig {
    fn default() -> Self {
        Self {
            window: 4,
            min_block_chars: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmellConfig {
    pub max_function_lines: usize,
    pub max_params: usize,
    /// `.then(` links at or above this count flag a promise chain.
    pub max_chain_depth: usize,
}

impl Default for SmellConfig {
    fn default() -> Self {
        Self {
            max_function_lines: 50,
            max_params: 5,
            max_chain_depth: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub complexity_weight: f64,
    pub documentation_weight: f64,
    pub duplication_weight: f64,
    pub minor_penalty: f64,
    pub major_penalty: f64,
    pub critical_penalty: f64,
    pub minor_minutes: u64,
    pub major_minutes: u64,
    pub critical_minutes: u64,
    pub complex_function_minutes: u64,
    pub undocumented_minutes: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            complexity_weight: 2.0,
            documentation_weight: 0.2,
            duplication_weight: 1.5,
            minor_penalty: 1.0,
            major_penalty: 3.0,
            critical_penalty: 8.0,
            minor_minutes: 5,
            major_minutes: 20,
            critical_minutes: 60,
            complex_function_minutes: 15,
            undocumented_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Files larger than this are dropped at intake with a warning.
    pub max_file_bytes: usize,
    /// Lines longer than this are skipped by the pattern scanner.
    pub max_line_chars: usize,
    /// Average line length above this marks a file minified/generated.
    pub minified_avg_line_chars: usize,
    /// Wall-clock budget in milliseconds. Absent means no deadline; an
    /// explicit zero is a deadline that has already passed.
    pub deadline_ms: Option<u64>,
}

impl LimitsConfig {
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 512 * 1024,
            max_line_chars: 2_000,
            minified_avg_line_chars: 300,
            deadline_ms: None,
        }
    }
}

pub const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "py", "rs", "go", "java", "rb", "php", "vue", "svelte",
];

pub const EXCLUDED_SEGMENTS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "target",
    "vendor",
    "third_party",
    ".git",
    "coverage",
    "__tests__",
    "__pycache__",
    ".next",
    ".venv",
    ".test.",
    ".spec.",
    ".min.",
];

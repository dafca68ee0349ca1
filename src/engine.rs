// src/engine.rs
//! The analysis pipeline. One `Engine` per configuration; `analyze` is a
//! pure function of the input file set.
//!
//! Per-file work (extraction, import references, pattern scan, quality
//! facts) fans out over rayon. Everything that needs the whole-run view
//! (graph assembly, quality reduction, architecture) runs after the merge.

use crate::arch;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::extract::{self, PartialStructure};
use crate::graph::{self, imports, imports::ImportRef};
use crate::intake::{self, IntakeOutcome, NormalizedFile};
use crate::quality::{self, FileQuality};
use crate::scan;
use crate::types::{
    AnalysisResult, AnalysisStatus, CodeStructure, Issue, IssueCategory, SeverityCounts,
    SourceFile,
};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub struct Engine {
    config: EngineConfig,
}

struct FilePass {
    structure: Option<PartialStructure>,
    parse_warning: Option<String>,
    imports: Vec<ImportRef>,
    issues: Vec<Issue>,
    quality: FileQuality,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Runs the full pipeline over `input`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyFileSet`] for empty input. Per-file
    /// failures never abort the run; they surface as `warnings` entries.
    pub fn analyze(&self, input: &[SourceFile]) -> Result<AnalysisResult> {
        if input.is_empty() {
            return Err(EngineError::EmptyFileSet);
        }

        let started = Instant::now();
        let analyzed_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let deadline = self.config.limits.deadline();

        let IntakeOutcome { files, mut warnings } =
            intake::normalize(input, &self.config.intake, &self.config.limits);
        info!("analyzing {} of {} supplied files", files.len(), input.len());

        let passes: Vec<Option<FilePass>> = files
            .par_iter()
            .map(|file| {
                if deadline.is_some_and(|d| started.elapsed() >= d) {
                    return None;
                }
                Some(self.analyze_file(file))
            })
            .collect();

        let skipped = passes.iter().filter(|p| p.is_none()).count();
        let mut status = AnalysisStatus::Complete;
        if skipped > 0 {
            status = AnalysisStatus::Partial;
            warnings.push(format!("deadline exceeded, {skipped} files skipped"));
        }

        let mut structure = CodeStructure::default();
        let mut refs: Vec<(usize, Vec<ImportRef>)> = Vec::new();
        let mut security_issues = Vec::new();
        let mut performance_issues = Vec::new();
        let mut per_file_quality: Vec<(usize, FileQuality)> = Vec::new();

        for (idx, pass) in passes.into_iter().enumerate() {
            let Some(pass) = pass else { continue };
            if let Some(msg) = pass.parse_warning {
                warnings.push(msg);
            }
            if let Some(partial) = pass.structure {
                structure.functions.extend(partial.functions);
                structure.classes.extend(partial.classes);
                structure.interfaces.extend(partial.interfaces);
                structure.types.extend(partial.types);
                structure.exports.extend(partial.exports);
            }
            refs.push((idx, pass.imports));
            for issue in pass.issues {
                match issue.category {
                    IssueCategory::Vulnerability => security_issues.push(issue),
                    IssueCategory::Performance => performance_issues.push(issue),
                }
            }
            per_file_quality.push((idx, pass.quality));
        }

        sort_issues(&mut security_issues);
        sort_issues(&mut performance_issues);

        let dependencies = graph::build(&files, &refs, &self.config.graph);
        let quality = quality::assemble(&structure.functions, per_file_quality, &self.config);
        let patterns = arch::patterns(&files, &structure.classes);
        let architecture = arch::detect(&files, &dependencies.edges);

        debug!("analysis finished in {:?}", started.elapsed());

        Ok(AnalysisResult {
            status,
            file_count: files.len(),
            analyzed_at_ms,
            structure,
            security_summary: SeverityCounts::tally(&security_issues),
            performance_summary: SeverityCounts::tally(&performance_issues),
            security_issues,
            performance_issues,
            dependencies,
            quality,
            patterns,
            architecture,
            warnings,
        })
    }

    fn analyze_file(&self, file: &NormalizedFile<'_>) -> FilePass {
        let (structure, parse_warning) = match extract::extract(file) {
            Ok(partial) => (Some(partial), None),
            Err(failure) => {
                warn!("{failure}");
                (None, Some(failure.to_string()))
            }
        };

        let decl_lines: Vec<usize> = structure
            .as_ref()
            .map(|s| {
                s.functions
                    .iter()
                    .map(|f| f.start_line)
                    .chain(s.classes.iter().map(|c| c.start_line))
                    .collect()
            })
            .unwrap_or_default();

        FilePass {
            imports: imports::extract(file),
            issues: scan::scan_file(file, &self.config.limits),
            quality: quality::measure_file(file, &decl_lines, &self.config),
            structure,
            parse_warning,
        }
    }
}

fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line))
    });
}

// src/quality/mod.rs
//! Quality metrics: per-file facts are gathered in the parallel phase and
//! reduced here into one `QualityMetrics`.

pub mod debt;
pub mod docs;
pub mod duplication;
pub mod lines;
pub mod smells;

use crate::config::EngineConfig;
use crate::intake::NormalizedFile;
use crate::types::{
    CodeSmell, ComplexityDistribution, ComplexityHotspot, ComplexityReport, FunctionInfo,
    QualityMetrics,
};

/// Pure, per-file measurements.
#[derive(Debug, Default)]
pub struct FileQuality {
    pub lines: crate::types::LineMetrics,
    pub windows: duplication::FileWindows,
    pub docs: crate::types::DocumentationReport,
    pub smells: Vec<CodeSmell>,
}

/// Measures one file. `decl_lines` are the structural declaration start
/// lines used for documentation adjacency.
#[must_use]
pub fn measure_file(
    file: &NormalizedFile<'_>,
    decl_lines: &[usize],
    config: &EngineConfig,
) -> FileQuality {
    FileQuality {
        lines: lines::measure(file.content),
        windows: duplication::collect_windows(file.content, &config.duplication),
        docs: docs::measure(file.content, decl_lines),
        smells: smells::file_smells(file, &config.smells),
    }
}

/// Reduces per-file facts plus the extracted functions into the run report.
#[must_use]
pub fn assemble(
    functions: &[FunctionInfo],
    per_file: Vec<(usize, FileQuality)>,
    config: &EngineConfig,
) -> QualityMetrics {
    let line_metrics = lines::merge(per_file.iter().map(|(_, q)| q.lines));
    let documentation = docs::merge(per_file.iter().map(|(_, q)| q.docs));

    let window_parts: Vec<(usize, duplication::FileWindows)> = per_file
        .iter()
        .map(|(i, q)| {
            (
                *i,
                duplication::FileWindows {
                    windows: q.windows.windows.clone(),
                    scanned_lines: q.windows.scanned_lines,
                },
            )
        })
        .collect();
    let duplication = duplication::reduce(&window_parts);

    let mut code_smells: Vec<CodeSmell> = per_file
        .into_iter()
        .flat_map(|(_, q)| q.smells)
        .collect();
    code_smells.extend(smells::function_smells(functions, &config.smells));
    code_smells.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));

    let complexity = complexity_report(functions, config);
    let maintainability = debt::maintainability(
        complexity.average,
        &documentation,
        &duplication,
        &code_smells,
        &config.scoring,
    );
    let technical_debt = debt::technical_debt(
        functions,
        &documentation,
        &code_smells,
        &config.complexity,
        &config.scoring,
    );

    QualityMetrics {
        line_metrics,
        complexity,
        duplication,
        documentation,
        code_smells,
        maintainability,
        technical_debt,
    }
}

fn complexity_report(functions: &[FunctionInfo], config: &EngineConfig) -> ComplexityReport {
    let thresholds = &config.complexity;
    let mut distribution = ComplexityDistribution::default();
    let mut total = 0u64;
    for func in functions {
        total += u64::from(func.complexity);
        if func.complexity <= thresholds.low {
            distribution.low += 1;
        } else if func.complexity <= thresholds.medium {
            distribution.medium += 1;
        } else if func.complexity <= thresholds.high {
            distribution.high += 1;
        } else {
            distribution.very_high += 1;
        }
    }

    let average = if functions.is_empty() {
        0.0
    } else {
        total as f64 / functions.len() as f64
    };

    let mut ranked: Vec<&FunctionInfo> = functions.iter().collect();
    ranked.sort_by(|a, b| b.complexity.cmp(&a.complexity).then_with(|| a.name.cmp(&b.name)));
    let hotspots = ranked
        .into_iter()
        .take(thresholds.hotspot_count)
        .map(|f| ComplexityHotspot {
            name: f.name.clone(),
            file: f.file.clone(),
            complexity: f.complexity,
        })
        .collect();

    ComplexityReport {
        average,
        distribution,
        hotspots,
    }
}

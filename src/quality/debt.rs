// src/quality/debt.rs
//! Maintainability score and technical-debt estimate. The weights are
//! configurable defaults carried in `ScoringConfig`.

use crate::config::{ComplexityConfig, ScoringConfig};
use crate::types::{
    CodeSmell, DocumentationReport, DuplicationReport, FunctionInfo, MaintainabilityReport,
    SmellSeverity, TechnicalDebtReport,
};

#[must_use]
pub fn maintainability(
    average_complexity: f64,
    documentation: &DocumentationReport,
    duplication: &DuplicationReport,
    smells: &[CodeSmell],
    config: &ScoringConfig,
) -> MaintainabilityReport {
    let mut score = 100.0;
    score -= average_complexity * config.complexity_weight;
    // No declarations means no documentation shortfall, not a 0% coverage.
    if documentation.documented + documentation.undocumented > 0 {
        score -= (100.0 - documentation.coverage) * config.documentation_weight;
    }
    score -= duplication.percentage * config.duplication_weight;
    for smell in smells {
        score -= match smell.severity {
            SmellSeverity::Minor => config.minor_penalty,
            SmellSeverity::Major => config.major_penalty,
            SmellSeverity::Critical => config.critical_penalty,
        };
    }
    let score = score.clamp(0.0, 100.0);

    MaintainabilityReport {
        score,
        grade: grade_for(score),
    }
}

fn grade_for(score: f64) -> char {
    match score {
        s if s >= 90.0 => 'A',
        s if s >= 75.0 => 'B',
        s if s >= 60.0 => 'C',
        s if s >= 40.0 => 'D',
        _ => 'F',
    }
}

#[must_use]
pub fn technical_debt(
    functions: &[FunctionInfo],
    documentation: &DocumentationReport,
    smells: &[CodeSmell],
    complexity: &ComplexityConfig,
    config: &ScoringConfig,
) -> TechnicalDebtReport {
    let mut minutes = 0u64;
    for smell in smells {
        minutes += match smell.severity {
            SmellSeverity::Minor => config.minor_minutes,
            SmellSeverity::Major => config.major_minutes,
            SmellSeverity::Critical => config.critical_minutes,
        };
    }
    let over_threshold = functions
        .iter()
        .filter(|f| f.complexity > complexity.medium)
        .count() as u64;
    minutes += over_threshold * config.complex_function_minutes;
    minutes += documentation.undocumented as u64 * config.undocumented_minutes;

    TechnicalDebtReport {
        minutes,
        rating: rating_for(minutes),
    }
}

fn rating_for(minutes: u64) -> char {
    match minutes {
        0..=60 => 'A',
        61..=240 => 'B',
        241..=480 => 'C',
        481..=960 => 'D',
        _ => 'E',
    }
}

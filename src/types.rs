// src/types.rs
//! Output data model for a single analysis run.
//!
//! Everything here is created fresh inside one `Engine::analyze` call and
//! handed to the caller; the engine keeps nothing between runs. The wire
//! shape is camelCase JSON for the dashboard/documentation consumers.

use serde::Serialize;

/// One input record: a snapshot of a source file, owned by the caller.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    /// Caller-detected language tag, if any. Falls back to extension sniffing.
    pub language: Option<String>,
    pub content: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: None,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Issue severity, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Vulnerability,
    Performance,
}

/// A single detected security or performance issue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub rule: &'static str,
    pub category: IssueCategory,
    pub severity: Severity,
    pub file: String,
    pub line: usize,
    pub message: String,
    pub remediation: String,
    pub snippet: String,
}

/// Per-severity issue counts. Totals always equal the issue-list lengths
/// because they are tallied from the lists themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityCounts {
    #[must_use]
    pub fn tally(issues: &[Issue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Low => counts.low += 1,
                Severity::Medium => counts.medium += 1,
                Severity::High => counts.high += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// A function extracted from a source file. Complexity is never below 1.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    pub params: Vec<String>,
    pub return_type: Option<String>,
    pub is_async: bool,
    pub is_exported: bool,
    pub complexity: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
    pub file: String,
    pub start_line: usize,
    pub methods: Vec<String>,
    pub superclass: Option<String>,
    pub implements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasInfo {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStructure {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    pub types: Vec<TypeAliasInfo>,
    pub exports: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Package,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub id: String,
    pub kind: NodeKind,
    pub size: Option<usize>,
    pub fan_in: usize,
    pub fan_out: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Import,
    Require,
    Dynamic,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
    pub circular_dependencies: Vec<Vec<String>>,
    pub orphan_files: Vec<String>,
    pub most_imported: Vec<NodeRanking>,
    pub most_dependent: Vec<NodeRanking>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRanking {
    pub id: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMetrics {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub very_high: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityHotspot {
    pub name: String,
    pub file: String,
    pub complexity: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    pub average: f64,
    pub distribution: ComplexityDistribution,
    pub hotspots: Vec<ComplexityHotspot>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicationReport {
    pub percentage: f64,
    pub duplicated_blocks: usize,
    pub duplicated_lines: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationReport {
    pub coverage: f64,
    pub documented: usize,
    pub undocumented: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmellSeverity {
    Minor,
    Major,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSmell {
    pub kind: &'static str,
    pub severity: SmellSeverity,
    pub file: String,
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintainabilityReport {
    pub score: f64,
    pub grade: char,
}

impl Default for MaintainabilityReport {
    fn default() -> Self {
        Self {
            score: 100.0,
            grade: 'A',
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDebtReport {
    pub minutes: u64,
    pub rating: char,
}

impl Default for TechnicalDebtReport {
    fn default() -> Self {
        Self {
            minutes: 0,
            rating: 'A',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub line_metrics: LineMetrics,
    pub complexity: ComplexityReport,
    pub duplication: DuplicationReport,
    pub documentation: DocumentationReport,
    pub code_smells: Vec<CodeSmell>,
    pub maintainability: MaintainabilityReport,
    pub technical_debt: TechnicalDebtReport,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedPattern {
    pub name: &'static str,
    pub file: String,
    pub evidence: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    pub name: &'static str,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowEdge {
    pub from_layer: &'static str,
    pub to_layer: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureInfo {
    pub layers: Vec<LayerInfo>,
    pub endpoints: Vec<EndpointInfo>,
    pub data_flow: Vec<DataFlowEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Complete,
    Partial,
}

/// The terminal aggregate of one analysis run. Every section is always
/// present; a failed or disabled sub-analysis yields its empty default.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub file_count: usize,
    /// Unix epoch milliseconds at which the run started.
    pub analyzed_at_ms: u64,
    pub structure: CodeStructure,
    pub dependencies: DependencyReport,
    pub quality: QualityMetrics,
    pub security_issues: Vec<Issue>,
    pub performance_issues: Vec<Issue>,
    pub security_summary: SeverityCounts,
    pub performance_summary: SeverityCounts,
    pub patterns: Vec<DetectedPattern>,
    pub architecture: ArchitectureInfo,
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    /// Returns true if no section was degraded or skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == AnalysisStatus::Complete
    }
}

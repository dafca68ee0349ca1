// src/scan/rules.rs
//! The rule tables. Each rule is data: pattern, category, severity, message,
//! remediation. Engine control flow never special-cases a rule, so adding one
//! is a table edit.

use crate::types::{IssueCategory, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

pub struct Rule {
    pub id: &'static str,
    pub category: IssueCategory,
    pub severity: Severity,
    pub pattern: Regex,
    /// When present, a line matching this is exempt from the rule.
    pub unless: Option<Regex>,
    pub message: &'static str,
    pub remediation: &'static str,
}

/// Multi-line rule: an opener line followed by a closer line within the
/// look-ahead window.
pub struct WindowRule {
    pub id: &'static str,
    pub category: IssueCategory,
    pub severity: Severity,
    pub opener: Regex,
    pub closer: Regex,
    pub window: usize,
    pub message: &'static str,
    pub remediation: &'static str,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid rule pattern")
}

pub static LINE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule {
            id: "sec-eval",
            category: IssueCategory::Vulnerability,
            severity: Severity::Critical,
            pattern: re(r"\beval\s*\("),
            unless: None,
            message: "Use of eval() allows arbitrary code execution",
            remediation: "Replace eval() with JSON.parse or a safe expression evaluator",
        },
        Rule {
            id: "sec-function-constructor",
            category: IssueCategory::Vulnerability,
            severity: Severity::High,
            pattern: re(r"\bnew\s+Function\s*\("),
            unless: None,
            message: "Function constructor executes strings as code",
            remediation: "Define functions statically instead of compiling strings",
        },
        Rule {
            id: "sec-sql-concat",
            category: IssueCategory::Vulnerability,
            severity: Severity::Critical,
            pattern: re(
                r#"(?i)(select\s+.+\s+from|insert\s+into|update\s+\w+\s+set|delete\s+from).*(["']\s*\+|\$\{)"#,
            ),
            unless: None,
            message: "SQL statement built by string concatenation or interpolation",
            remediation: "Use parameterized queries or a query builder",
        },
        Rule {
            id: "sec-inner-html",
            category: IssueCategory::Vulnerability,
            severity: Severity::High,
            pattern: re(r"\.(innerHTML|outerHTML)\s*="),
            unless: None,
            message: "Direct HTML injection sink (possible XSS)",
            remediation: "Use textContent or a sanitizer before inserting markup",
        },
        Rule {
            id: "sec-document-write",
            category: IssueCategory::Vulnerability,
            severity: Severity::Medium,
            pattern: re(r"document\.write\s*\("),
            unless: None,
            message: "document.write can inject unsanitized markup",
            remediation: "Build DOM nodes explicitly or use a templating layer",
        },
        Rule {
            id: "sec-hardcoded-secret",
            category: IssueCategory::Vulnerability,
            severity: Severity::High,
            pattern: re(r#"(?i)\b(password|passwd|secret|api[_-]?key|auth[_-]?token)\b\s*[:=]\s*["'][^"']{6,}["']"#),
            unless: Some(re(r"(?i)(process\.env|import\.meta\.env|example|placeholder|<[^>]+>)")),
            message: "Possible hardcoded credential",
            remediation: "Load secrets from the environment or a secret manager",
        },
        Rule {
            id: "sec-shell-concat",
            category: IssueCategory::Vulnerability,
            severity: Severity::High,
            pattern: re(r"\b(exec|execSync|spawn|spawnSync)\s*\([^)]*(\+|\$\{)"),
            unless: None,
            message: "Shell command assembled from dynamic input",
            remediation: "Pass arguments as an array and avoid shell interpolation",
        },
        Rule {
            id: "sec-weak-random",
            category: IssueCategory::Vulnerability,
            severity: Severity::Medium,
            pattern: re(r"(?i)(token|secret|session|password|nonce)[^=\n]*=.*Math\.random"),
            unless: None,
            message: "Math.random is not cryptographically secure",
            remediation: "Use crypto.randomBytes or crypto.getRandomValues",
        },
        Rule {
            id: "sec-cleartext-http",
            category: IssueCategory::Vulnerability,
            severity: Severity::Low,
            pattern: re(r#"["']http://"#),
            unless: Some(re(r"http://(localhost|127\.0\.0\.1|0\.0\.0\.0)")),
            message: "Cleartext HTTP endpoint",
            remediation: "Prefer https:// for external endpoints",
        },
        Rule {
            id: "perf-json-clone",
            category: IssueCategory::Performance,
            severity: Severity::Medium,
            pattern: re(r"JSON\.parse\s*\(\s*JSON\.stringify"),
            unless: None,
            message: "Deep clone via JSON round-trip",
            remediation: "Use structuredClone or a targeted copy",
        },
        Rule {
            id: "perf-delete-property",
            category: IssueCategory::Performance,
            severity: Severity::Low,
            pattern: re(r"\bdelete\s+\w+[.\[]"),
            unless: None,
            message: "delete on object properties de-optimizes the object shape",
            remediation: "Set the property to undefined or use a Map",
        },
    ]
});

const LOOP_OPENER: &str = r"\b(for|while)\s*\(|\.forEach\s*\(|\.map\s*\(";

pub static WINDOW_RULES: Lazy<Vec<WindowRule>> = Lazy::new(|| {
    vec![
        WindowRule {
            id: "perf-nested-loop",
            category: IssueCategory::Performance,
            severity: Severity::Medium,
            opener: re(LOOP_OPENER),
            closer: re(LOOP_OPENER),
            window: 20,
            message: "Nested loops: possible O(n^2) traversal",
            remediation: "Index one collection by key to make the inner lookup O(1)",
        },
        WindowRule {
            id: "perf-await-in-loop",
            category: IssueCategory::Performance,
            severity: Severity::Medium,
            opener: re(r"\b(for|while)\s*\("),
            closer: re(r"\bawait\s"),
            window: 20,
            message: "Sequential awaits inside a loop",
            remediation: "Batch the work and use Promise.all where order allows",
        },
        WindowRule {
            id: "perf-dom-query-in-loop",
            category: IssueCategory::Performance,
            severity: Severity::Low,
            opener: re(LOOP_OPENER),
            closer: re(r"document\.(querySelector|querySelectorAll|getElementById)"),
            window: 20,
            message: "DOM query inside a loop",
            remediation: "Hoist the query out of the loop and reuse the node",
        },
        WindowRule {
            id: "perf-string-build-in-loop",
            category: IssueCategory::Performance,
            severity: Severity::Low,
            opener: re(LOOP_OPENER),
            closer: re(r#"\w\s*\+=\s*["'`]"#),
            window: 20,
            message: "String concatenation inside a loop",
            remediation: "Collect parts in an array and join once",
        },
        WindowRule {
            id: "perf-regexp-in-loop",
            category: IssueCategory::Performance,
            severity: Severity::Low,
            opener: re(LOOP_OPENER),
            closer: re(r"new\s+RegExp\s*\("),
            window: 20,
            message: "RegExp compiled inside a loop",
            remediation: "Compile the pattern once outside the loop",
        },
    ]
});

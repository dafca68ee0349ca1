// src/scan/mod.rs
//! Rule-driven issue scanning. Single-line rules run per line; window rules
//! pair an opener line with a closer within a bounded look-ahead. Matches at
//! the same (file, line, message) collapse to one issue. Never fatal:
//! unmatched content simply produces nothing.

pub mod rules;

use crate::config::LimitsConfig;
use crate::intake::NormalizedFile;
use crate::types::Issue;
use std::collections::HashSet;

const SNIPPET_CHARS: usize = 120;

#[must_use]
pub fn scan_file(file: &NormalizedFile<'_>, limits: &LimitsConfig) -> Vec<Issue> {
    let lines: Vec<&str> = file.content.lines().collect();
    let mut issues = Vec::new();
    let mut seen: HashSet<(usize, &'static str)> = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        if line.len() > limits.max_line_chars {
            continue;
        }

        for rule in rules::LINE_RULES.iter() {
            if !rule.pattern.is_match(line) {
                continue;
            }
            if rule.unless.as_ref().is_some_and(|u| u.is_match(line)) {
                continue;
            }
            push_issue(&mut issues, &mut seen, file, i + 1, line, IssueSource::Line(rule));
        }

        for rule in rules::WINDOW_RULES.iter() {
            if !rule.opener.is_match(line) {
                continue;
            }
            let end = (i + 1 + rule.window).min(lines.len());
            let hit = lines[i + 1..end]
                .iter()
                .any(|inner| inner.len() <= limits.max_line_chars && rule.closer.is_match(inner));
            if hit {
                push_issue(&mut issues, &mut seen, file, i + 1, line, IssueSource::Window(rule));
            }
        }
    }

    issues
}

enum IssueSource<'r> {
    Line(&'r rules::Rule),
    Window(&'r rules::WindowRule),
}

fn push_issue(
    issues: &mut Vec<Issue>,
    seen: &mut HashSet<(usize, &'static str)>,
    file: &NormalizedFile<'_>,
    line_no: usize,
    line: &str,
    source: IssueSource<'_>,
) {
    let (rule_id, category, severity, message, remediation) = match source {
        IssueSource::Line(r) => (r.id, r.category, r.severity, r.message, r.remediation),
        IssueSource::Window(r) => (r.id, r.category, r.severity, r.message, r.remediation),
    };
    if !seen.insert((line_no, message)) {
        return;
    }
    issues.push(Issue {
        rule: rule_id,
        category,
        severity,
        file: file.path.clone(),
        line: line_no,
        message: message.to_string(),
        remediation: remediation.to_string(),
        snippet: truncate(line.trim()),
    });
}

fn truncate(line: &str) -> String {
    line.chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueCategory, Severity};

    fn scan(content: &str) -> Vec<Issue> {
        let file = NormalizedFile {
            path: "src/app.js".to_string(),
            id: "src/app".to_string(),
            lang: crate::lang::Lang::from_ext("js"),
            content: Box::leak(content.to_string().into_boxed_str()),
        };
        scan_file(&file, &LimitsConfig::default())
    }

    #[test]
    fn eval_is_a_critical_vulnerability() {
        let issues = scan("const out = eval(userInput);");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].category, IssueCategory::Vulnerability);
        assert_eq!(issues[0].line, 1);
    }

    #[test]
    fn parameterized_query_is_not_flagged() {
        let issues = scan(r#"db.query("SELECT id FROM users WHERE id = ?", [id]);"#);
        assert!(issues.iter().all(|i| i.rule != "sec-sql-concat"));
    }

    #[test]
    fn concatenated_query_is_flagged() {
        let issues = scan(r#"db.query("SELECT id FROM users WHERE name = '" + name);"#);
        assert!(issues.iter().any(|i| i.rule == "sec-sql-concat"));
    }

    #[test]
    fn nested_loop_within_window_is_flagged_once() {
        let issues = scan(
            "for (const a of xs) {\n  doWork(a);\n  for (const b of ys) {\n    pair(a, b);\n  }\n}",
        );
        let nested: Vec<_> = issues.iter().filter(|i| i.rule == "perf-nested-loop").collect();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].line, 1);
    }

    #[test]
    fn distant_loops_are_not_paired() {
        let mut content = String::from("for (const a of xs) { use(a); }\n");
        content.push_str(&"doOtherWork();\n".repeat(25));
        content.push_str("for (const b of ys) { use(b); }\n");
        let issues = scan(&content);
        assert!(issues.iter().all(|i| i.rule != "perf-nested-loop"));
    }

    #[test]
    fn duplicate_matches_collapse() {
        // Two matches of one rule on one line collapse to a single issue.
        let issues = scan("eval(x); eval(y);");
        assert_eq!(issues.iter().filter(|i| i.rule == "sec-eval").count(), 1);
    }

    #[test]
    fn oversized_lines_are_skipped() {
        let long = format!("eval({});", "x".repeat(3000));
        assert!(scan(&long).is_empty());
    }

    #[test]
    fn env_loaded_secret_is_exempt() {
        let issues = scan(r#"const apiKey = process.env.API_KEY || "unset-placeholder";"#);
        assert!(issues.iter().all(|i| i.rule != "sec-hardcoded-secret"));
    }
}

// tests/unit_quality.rs
use codescope_core::config::EngineConfig;
use codescope_core::types::SourceFile;
use codescope_core::Engine;

fn src(path: &str, content: &str) -> SourceFile {
    SourceFile {
        path: path.to_string(),
        language: None,
        content: content.to_string(),
    }
}

fn analyze(files: Vec<SourceFile>) -> codescope_core::AnalysisResult {
    Engine::with_defaults().analyze(&files).unwrap()
}

#[test]
fn test_shared_block_counts_as_duplication() {
    // The same 6 substantial lines in two files; whitespace differs.
    let block = "const total = items.reduce((acc, item) => acc + item.price, 0);\nconst taxed = total * 1.2;\nconst rounded = Math.round(taxed * 100) / 100;\nconst label = formatCurrency(rounded);\nrender(label);\naudit(total, taxed, rounded);\n";
    let indented: String = block.lines().map(|l| format!("    {l}\n")).collect();
    let result = analyze(vec![
        src("src/a.ts", block),
        src("src/b.ts", &indented),
    ]);
    assert!(
        result.quality.duplication.duplicated_blocks > 0,
        "shared block not found"
    );
    assert!(result.quality.duplication.percentage > 0.0);
}

#[test]
fn test_unique_files_have_no_duplication() {
    let result = analyze(vec![
        src("src/a.ts", "export function alpha() {\n  return 1;\n}\n"),
        src("src/b.ts", "export function beta(x: number) {\n  return x * 2;\n}\n"),
    ]);
    assert_eq!(result.quality.duplication.duplicated_blocks, 0);
    assert_eq!(result.quality.duplication.percentage, 0.0);
}

#[test]
fn test_full_doc_coverage() {
    let result = analyze(vec![src(
        "src/documented.ts",
        "/** Greets a user. */\nfunction greet(name: string) {\n  return `hi ${name}`;\n}\n\n/** Says goodbye. */\nfunction bye(name: string) {\n  return `bye ${name}`;\n}\n",
    )]);
    let docs = result.quality.documentation;
    assert_eq!(docs.documented, 2);
    assert_eq!(docs.undocumented, 0);
    assert!((docs.coverage - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_documented_class_counts_toward_coverage() {
    let result = analyze(vec![src(
        "src/models/user.ts",
        "/**\n * A registered user.\n */\nclass User {}\n",
    )]);
    let docs = result.quality.documentation;
    assert_eq!(docs.documented, 1);
    assert_eq!(docs.undocumented, 0);
    assert!((docs.coverage - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_bare_class_is_undocumented() {
    let result = analyze(vec![src("src/models/user.ts", "class User {}\n")]);
    let docs = result.quality.documentation;
    assert_eq!(docs.documented, 0);
    assert_eq!(docs.undocumented, 1);
}

#[test]
fn test_zero_doc_coverage() {
    let result = analyze(vec![src(
        "src/bare.ts",
        "function one() {\n  return 1;\n}\nfunction two() {\n  return 2;\n}\n",
    )]);
    let docs = result.quality.documentation;
    assert_eq!(docs.documented, 0);
    assert_eq!(docs.undocumented, 2);
    assert!(docs.coverage.abs() < f64::EPSILON);
}

#[test]
fn test_long_function_smell() {
    let body = "  step();\n".repeat(60);
    let content = format!("function huge() {{\n{body}}}\n");
    let result = analyze(vec![src("src/huge.ts", &content)]);
    assert!(result
        .quality
        .code_smells
        .iter()
        .any(|s| s.kind == "long-function"));
}

#[test]
fn test_long_parameter_list_smell() {
    let result = analyze(vec![src(
        "src/wide.ts",
        "function wide(a, b, c, d, e, f, g) {\n  return a;\n}\n",
    )]);
    assert!(result
        .quality
        .code_smells
        .iter()
        .any(|s| s.kind == "long-parameter-list"));
}

#[test]
fn test_line_metrics_classification() {
    let result = analyze(vec![src(
        "src/mixed.ts",
        "// header comment\n\nconst x = 1;\n/* block\n * comment\n */\nconst y = 2;\n",
    )]);
    let lines = result.quality.line_metrics;
    assert_eq!(lines.total, 7);
    assert_eq!(lines.blank, 1);
    assert_eq!(lines.comment, 4);
    assert_eq!(lines.code, 2);
}

#[test]
fn test_complexity_buckets_follow_config() {
    let mut config = EngineConfig::default();
    config.complexity.low = 1;
    config.complexity.medium = 2;
    let branchy =
        "function f(x) {\n  if (x > 0) {\n    if (x > 1) {\n      return 2;\n    }\n  }\n  return 0;\n}\n";
    let result = Engine::new(config)
        .analyze(&[src("src/f.ts", branchy)])
        .unwrap();
    // complexity 3 lands in the high bucket once medium tops out at 2.
    assert_eq!(result.quality.complexity.distribution.high, 1);
    assert_eq!(result.quality.complexity.distribution.low, 0);
}

#[test]
fn test_maintainability_grade_bounds() {
    let result = analyze(vec![src(
        "src/clean.ts",
        "/** Adds. */\nexport function add(a: number, b: number): number {\n  return a + b;\n}\n",
    )]);
    let maint = &result.quality.maintainability;
    assert!(maint.score >= 0.0 && maint.score <= 100.0);
    assert!(matches!(maint.grade, 'A' | 'B' | 'C' | 'D' | 'F'));
}

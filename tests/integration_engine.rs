// tests/integration_engine.rs
//
// Whole-pipeline scenario: a small project with a three-file import ring,
// two orphans, one vulnerability and one duplicated block, checked across
// every section of the result.

use codescope_core::config::EngineConfig;
use codescope_core::types::{AnalysisStatus, NodeKind, Severity, SourceFile};
use codescope_core::Engine;

fn src(path: &str, content: &str) -> SourceFile {
    SourceFile {
        path: path.to_string(),
        language: None,
        content: content.to_string(),
    }
}

fn project() -> Vec<SourceFile> {
    vec![
        src(
            "src/services/order.ts",
            "import { pay } from './payment';\n\n/** Places an order. */\nexport function placeOrder(cart: Cart): Receipt {\n  if (cart.items.length === 0) {\n    throw new Error('empty cart');\n  }\n  return pay(cart);\n}\n",
        ),
        src(
            "src/services/payment.ts",
            "import { audit } from './audit';\n\nexport function pay(cart: Cart): Receipt {\n  const total = cart.items.reduce((acc, i) => acc + i.price, 0);\n  audit('pay', total);\n  return { total };\n}\n",
        ),
        src(
            "src/services/audit.ts",
            "import { placeOrder } from './order';\n\nexport function audit(kind: string, amount: number): void {\n  log.write(kind, amount);\n}\n",
        ),
        src(
            "src/utils/legacy.ts",
            "export function resolveField(obj: any, path: string) {\n  return eval('obj.' + path);\n}\n",
        ),
        src(
            "src/utils/scratch.ts",
            "export const SCRATCH = true;\n",
        ),
    ]
}

#[test]
fn test_end_to_end_sections() {
    let result = Engine::with_defaults().analyze(&project()).unwrap();

    assert_eq!(result.status, AnalysisStatus::Complete);
    assert_eq!(result.file_count, 5);

    // Structure: every exported function extracted.
    let names: Vec<&str> = result
        .structure
        .functions
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert!(names.contains(&"placeOrder"));
    assert!(names.contains(&"pay"));
    assert!(names.contains(&"audit"));

    // Graph: five file nodes, one three-module ring, two orphans.
    let file_nodes = result
        .dependencies
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::File)
        .count();
    assert_eq!(file_nodes, 5);
    assert_eq!(result.dependencies.circular_dependencies.len(), 1);
    assert_eq!(
        result.dependencies.circular_dependencies[0],
        vec![
            "src/services/audit",
            "src/services/order",
            "src/services/payment"
        ]
    );
    assert_eq!(
        result.dependencies.orphan_files,
        vec!["src/utils/legacy", "src/utils/scratch"]
    );

    // Issues: the eval in legacy.ts is critical and tallied.
    let eval_issue = result
        .security_issues
        .iter()
        .find(|i| i.rule == "sec-eval")
        .expect("eval should be flagged");
    assert_eq!(eval_issue.severity, Severity::Critical);
    assert_eq!(eval_issue.file, "src/utils/legacy.ts");
    assert_eq!(result.security_summary.critical, 1);

    // Architecture: services classify as business, utils as shared.
    let layer_names: Vec<&str> = result.architecture.layers.iter().map(|l| l.name).collect();
    assert!(layer_names.contains(&"business"));
    assert!(layer_names.contains(&"shared"));
}

#[test]
fn test_oversized_file_drops_with_warning() {
    let mut config = EngineConfig::default();
    config.limits.max_file_bytes = 100;
    let engine = Engine::new(config);
    let big = "const x = 1; // padding padding padding\n".repeat(10);
    let result = engine
        .analyze(&[
            src("src/big.ts", &big),
            src("src/ok.ts", "export const ok = 1;\n"),
        ])
        .unwrap();
    assert_eq!(result.file_count, 1);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("src/big.ts")));
    // A dropped file degrades nothing else.
    assert_eq!(result.status, AnalysisStatus::Complete);
}

#[test]
fn test_excluded_paths_never_analyzed() {
    let result = Engine::with_defaults()
        .analyze(&[
            src("node_modules/lib/index.ts", "eval(x);\n"),
            src("src/app.test.ts", "eval(x);\n"),
            src("src/app.ts", "export const app = 1;\n"),
        ])
        .unwrap();
    assert_eq!(result.file_count, 1);
    assert!(result.security_issues.is_empty());
}

#[test]
fn test_unknown_extension_is_dropped_silently() {
    let result = Engine::with_defaults()
        .analyze(&[
            src("README.md", "# docs\n"),
            src("src/app.ts", "export const app = 1;\n"),
        ])
        .unwrap();
    assert_eq!(result.file_count, 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_json_wire_shape_is_camel_case() {
    let result = Engine::with_defaults().analyze(&project()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("fileCount").is_some());
    assert!(json.get("securityIssues").is_some());
    assert!(json["dependencies"].get("circularDependencies").is_some());
    assert!(json["quality"].get("lineMetrics").is_some());
    assert_eq!(json["status"], "complete");
}

#[test]
fn test_zero_deadline_is_partial() {
    let mut config = EngineConfig::default();
    config.limits.deadline_ms = Some(0);
    let result = Engine::new(config).analyze(&project()).unwrap();
    assert_eq!(result.status, AnalysisStatus::Partial);
    assert!(result.structure.functions.is_empty());
    assert!(result.dependencies.edges.is_empty());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("deadline")));
}

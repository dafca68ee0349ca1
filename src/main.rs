use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use walkdir::WalkDir;

use codescope_core::config::{EngineConfig, SOURCE_EXTENSIONS};
use codescope_core::intake;
use codescope_core::types::{AnalysisResult, SourceFile};
use codescope_core::Engine;

const DEFAULT_TOML: &str = r#"# codescope.toml
[complexity]
low = 5
medium = 10
high = 20

[duplication]
window = 4

[smells]
max_function_lines = 50
max_params = 5

[limits]
max_file_bytes = 524288
"#;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Summary,
    Json,
}

#[derive(Parser)]
#[command(name = "codescope")]
#[command(about = "Codebase analysis: structure, dependencies, quality, issues")]
#[command(version)]
struct Cli {
    /// Directory (or single file) to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Path to a codescope.toml (defaults to <path>/codescope.toml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write a starter codescope.toml and exit
    #[arg(long)]
    init: bool,

    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.init {
        return handle_init();
    }

    let config = load_config(&cli)?;
    let files = collect_files(&cli.path)?;
    if files.is_empty() {
        println!("No source files found under {}.", cli.path.display());
        return Ok(());
    }
    if cli.verbose {
        println!("🔎 Analyzing {} files...", files.len());
    }

    let engine = Engine::new(config);
    let result = engine.analyze(&files)?;

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Summary => print_summary(&result),
    }

    if result.security_summary.critical > 0 {
        process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn handle_init() -> Result<()> {
    if Path::new("codescope.toml").exists() {
        println!("{}", "⚠️ codescope.toml already exists.".yellow());
    } else {
        fs::write("codescope.toml", DEFAULT_TOML)?;
        println!("{}", "✅ Created codescope.toml".green());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let path = match &cli.config {
        Some(explicit) => Some(explicit.clone()),
        None => {
            let local = cli.path.join("codescope.toml");
            local.exists().then_some(local)
        }
    };
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = EngineConfig::from_toml_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn collect_files(root: &Path) -> Result<Vec<SourceFile>> {
    let exclude: Vec<String> = codescope_core::config::EXCLUDED_SEGMENTS
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path());
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if intake::is_excluded(&rel_str, &exclude) {
            continue;
        }
        let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }
        // Non-UTF-8 files are skipped rather than failing the walk.
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };
        files.push(SourceFile {
            path: rel_str,
            language: None,
            content,
        });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn print_summary(result: &AnalysisResult) {
    println!("{}", "codescope report".bold());
    println!(
        "  files: {}   functions: {}   classes: {}",
        result.file_count,
        result.structure.functions.len(),
        result.structure.classes.len()
    );
    println!(
        "  quality: {} ({:.1})   debt: {} ({} min)",
        result.quality.maintainability.grade.to_string().bold(),
        result.quality.maintainability.score,
        result.quality.technical_debt.rating,
        result.quality.technical_debt.minutes
    );
    println!(
        "  duplication: {:.1}%   doc coverage: {:.1}%",
        result.quality.duplication.percentage, result.quality.documentation.coverage
    );

    let cycles = &result.dependencies.circular_dependencies;
    if cycles.is_empty() {
        println!("  {}", "no circular dependencies".green());
    } else {
        println!(
            "  {}",
            format!("{} circular dependency chains", cycles.len()).red().bold()
        );
        for cycle in cycles {
            println!("    {}", cycle.join(" -> "));
        }
    }

    print_issue_block("security", &result.security_issues);
    print_issue_block("performance", &result.performance_issues);

    for warning in &result.warnings {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }

    if result.security_summary.critical > 0 {
        println!(
            "{}",
            format!(
                "❌ {} critical security issues.",
                result.security_summary.critical
            )
            .red()
            .bold()
        );
    } else {
        println!("{}", "✅ No critical security issues.".green().bold());
    }
}

fn print_issue_block(label: &str, issues: &[codescope_core::types::Issue]) {
    if issues.is_empty() {
        return;
    }
    println!("  {label} issues: {}", issues.len());
    for issue in issues {
        println!(
            "    {}: {} [{}]",
            format!("{:?}", issue.severity).to_lowercase().red(),
            issue.message,
            issue.rule
        );
        println!("      {} {}:{}", "-->".blue(), issue.file, issue.line);
    }
}

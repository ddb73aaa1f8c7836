//! Brandguard CLI
//!
//! Command-line interface for brand-compliance checks.
//!
//! ## Usage
//!
//! ```bash
//! # Score a design against a brand rule set
//! brandguard analyze --ruleset brand.yaml --snapshot design.json
//!
//! # JSON report
//! brandguard analyze --ruleset brand.yaml --snapshot design.json --format json
//!
//! # Apply auto-fixes and write the fixed snapshot
//! brandguard fix --ruleset brand.yaml --snapshot design.json --output fixed.json
//!
//! # Validate a rule set
//! brandguard ruleset validate brand.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - 0: excellent or good
//! - 1: needs_work
//! - 2: poor
//! - 3: error

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use brandguard_core::{
    AutoFixEngine, ComplianceReport, DesignSnapshot, FixResult, RuleSet, ScoreLabel,
};
use brandguard_runtime::{Orchestrator, RuntimeConfig};

/// Brandguard: brand-guideline compliance for structured designs
#[derive(Parser)]
#[command(name = "brandguard")]
#[command(version)]
#[command(about = "Score design snapshots against brand rule sets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a design snapshot against a rule set
    Analyze {
        /// Path to the brand rule set (YAML or JSON)
        #[arg(short, long)]
        ruleset: PathBuf,

        /// Path to the design snapshot (YAML or JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show per-category details
        #[arg(long)]
        details: bool,

        /// Runtime configuration file (weights, analyzer settings)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Explicit timestamp for deterministic reports (RFC 3339).
        /// Example: --analyzed-at 2026-03-01T09:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        analyzed_at: Option<DateTime<Utc>>,
    },

    /// Apply auto-fixes to a design snapshot
    Fix {
        /// Path to the brand rule set (YAML or JSON)
        #[arg(short, long)]
        ruleset: PathBuf,

        /// Path to the design snapshot (YAML or JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Write the fixed snapshot to this file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate the fix list without applying anything
        #[arg(long)]
        preview: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Rule set management commands
    Ruleset {
        #[command(subcommand)]
        action: RulesetAction,
    },
}

#[derive(Subcommand)]
enum RulesetAction {
    /// Validate a rule set file
    Validate {
        /// Path to the rule set file
        path: PathBuf,
    },

    /// Show rule set details
    Show {
        /// Path to the rule set file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse an RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            format!("Invalid datetime format: {e}. Expected RFC 3339 (e.g. 2026-03-01T09:00:00Z)")
        })
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}

fn load_ruleset(path: &Path) -> Result<RuleSet> {
    let ruleset = if is_json(path) {
        RuleSet::from_json_file(path)
    } else {
        RuleSet::from_yaml_file(path)
    };
    ruleset.with_context(|| format!("Failed to load rule set from {:?}", path))
}

fn load_snapshot(path: &Path) -> Result<DesignSnapshot> {
    let snapshot = if is_json(path) {
        DesignSnapshot::from_json_file(path)
    } else {
        DesignSnapshot::from_yaml_file(path)
    };
    snapshot.with_context(|| format!("Failed to load snapshot from {:?}", path))
}

fn load_config(path: Option<&Path>) -> Result<RuntimeConfig> {
    let Some(path) = path else {
        return Ok(RuntimeConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let config = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match run().await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            ruleset,
            snapshot,
            format,
            details,
            config,
            analyzed_at,
        } => analyze_command(ruleset, snapshot, format, details, config, analyzed_at).await,

        Commands::Fix {
            ruleset,
            snapshot,
            output,
            preview,
            format,
        } => fix_command(ruleset, snapshot, output, preview, format).await,

        Commands::Ruleset { action } => match action {
            RulesetAction::Validate { path } => validate_ruleset(path),
            RulesetAction::Show { path } => show_ruleset(path),
        },
    }
}

async fn analyze_command(
    ruleset_path: PathBuf,
    snapshot_path: PathBuf,
    format: OutputFormat,
    details: bool,
    config_path: Option<PathBuf>,
    analyzed_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let ruleset = load_ruleset(&ruleset_path)?;
    let snapshot = load_snapshot(&snapshot_path)?;
    let mut config = load_config(config_path.as_deref())?;

    if analyzed_at.is_some() {
        config.determinism.analyzed_at = analyzed_at;
    }

    let orchestrator = Orchestrator::new(config);
    let report = orchestrator
        .analyze(&ruleset, &snapshot)
        .await
        .context("Analysis failed")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print_report(&report, details);
        }
    }

    Ok(exit_code_for(report.score_label))
}

fn exit_code_for(label: ScoreLabel) -> ExitCode {
    match label {
        ScoreLabel::Excellent | ScoreLabel::Good => ExitCode::from(0),
        ScoreLabel::NeedsWork => ExitCode::from(1),
        ScoreLabel::Poor => ExitCode::from(2),
    }
}

fn print_report(report: &ComplianceReport, details: bool) {
    println!(
        "{} / 100 ({})",
        report.compliance_score,
        report.score_label.as_str().to_uppercase()
    );
    println!();
    println!("{}", report.summary);

    if !report.violations.is_empty() {
        println!();
        println!("Violations:");
        for violation in &report.violations {
            let fixable = if violation.auto_fixable {
                " [auto-fixable]"
            } else {
                ""
            };
            println!(
                "  - [{}/{:?}] {}{}",
                violation.category.as_str(),
                violation.severity,
                violation.description,
                fixable
            );
        }
    }

    if details {
        println!();
        println!("--- Category Scores ---");
        println!();
        for score in &report.category_scores {
            println!(
                "{}: {} / 100 (weight {:.2}, {} violation{})",
                score.category.as_str(),
                score.score,
                score.weight,
                score.violation_count,
                if score.violation_count == 1 { "" } else { "s" }
            );
        }
    }
}

async fn fix_command(
    ruleset_path: PathBuf,
    snapshot_path: PathBuf,
    output: Option<PathBuf>,
    preview: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let ruleset = load_ruleset(&ruleset_path)?;
    let snapshot = load_snapshot(&snapshot_path)?;

    let orchestrator = Orchestrator::new(RuntimeConfig::default());
    let report = orchestrator
        .analyze(&ruleset, &snapshot)
        .await
        .context("Analysis failed")?;

    let engine = AutoFixEngine::new();

    if preview {
        let plan = engine.plan(&report.violations, &snapshot);
        match format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "applied_fixes": plan.applied_fixes,
                    "skipped_fixes": plan.skipped_fixes,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Text => {
                println!("Preview: no changes applied.");
                print_fix_lists(&plan.applied_fixes, &plan.skipped_fixes);
            }
        }
        return Ok(ExitCode::from(0));
    }

    let result: FixResult = engine.apply(&report.violations, &snapshot);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            print_fix_lists(&result.applied_fixes, &result.skipped_fixes);
        }
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result.fixed_snapshot)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write fixed snapshot to {:?}", path))?;
        eprintln!("Fixed snapshot written to {:?}", path);
    }

    Ok(ExitCode::from(0))
}

fn print_fix_lists(
    applied: &[brandguard_core::AppliedFix],
    skipped: &[brandguard_core::SkippedFix],
) {
    if applied.is_empty() {
        println!("No auto-fixable violations.");
    } else {
        println!("Applied fixes:");
        for fix in applied {
            println!("  - [{}] {}", fix.category.as_str(), fix.description);
        }
    }

    if !skipped.is_empty() {
        println!();
        println!("Skipped (manual attention needed):");
        for skip in skipped {
            println!(
                "  - [{}] {} ({})",
                skip.category.as_str(),
                skip.description,
                skip.reason
            );
        }
    }
}

fn validate_ruleset(path: PathBuf) -> Result<ExitCode> {
    let ruleset = if is_json(&path) {
        RuleSet::from_json_file(&path)
    } else {
        RuleSet::from_yaml_file(&path)
    };

    match ruleset {
        Ok(r) => {
            println!("Rule set is valid: {}", r.name);
            if let Some(version) = &r.version {
                println!("Version: {}", version);
            }
            println!("Colors: {}", r.colors.len());
            println!("Fonts: {}", r.fonts.len());
            Ok(ExitCode::from(0))
        }
        Err(e) => {
            eprintln!("Rule set validation failed: {}", e);
            Ok(ExitCode::from(1))
        }
    }
}

fn show_ruleset(path: PathBuf) -> Result<ExitCode> {
    let ruleset = load_ruleset(&path)?;

    println!("Rule set: {}", ruleset.name);
    if let Some(version) = &ruleset.version {
        println!("Version: {}", version);
    }
    if let Some(description) = &ruleset.description {
        println!("Description: {}", description);
    }
    println!();

    println!("Colors: {} rules", ruleset.colors.len());
    for color in &ruleset.colors {
        println!(
            "  - {} {} (tolerance {:.0}, usage {:?})",
            color.name,
            color.hex,
            color.tolerance(),
            color.usage
        );
    }
    println!();

    println!("Fonts: {} rules", ruleset.fonts.len());
    for font in &ruleset.fonts {
        let fallbacks = if font.fallbacks.is_empty() {
            String::new()
        } else {
            format!(" (fallbacks: {})", font.fallbacks.join(", "))
        };
        println!("  - {} [{}]{}", font.name, font.usage.as_str(), fallbacks);
    }
    println!();

    println!("Logo:");
    println!(
        "  Minimum size: {:.0}x{:.0}px",
        ruleset.logo.min_width, ruleset.logo.min_height
    );
    println!("  Clear space ratio: {}", ruleset.logo.clear_space_ratio);
    println!(
        "  Aspect ratio tolerance: {}",
        ruleset.logo.aspect_ratio_tolerance
    );
    println!();

    println!("Accessibility:");
    println!(
        "  Contrast: {} (normal), {} (large text)",
        ruleset.accessibility.min_contrast_ratio, ruleset.accessibility.large_text_min_contrast
    );
    println!("  Alt text required: {}", ruleset.accessibility.require_alt_text);
    println!();

    println!("Tone:");
    println!("  Style: {}", ruleset.tone.style.as_str());
    println!("  Banned words: {}", ruleset.tone.banned_words.len());
    println!("  Required phrases: {}", ruleset.tone.required_phrases.len());
    if let Some(limit) = ruleset.tone.max_sentence_length {
        println!("  Max sentence length: {} words", limit);
    }

    Ok(ExitCode::from(0))
}

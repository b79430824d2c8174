use crate::infra::{load_session, parse_scale_kind, parse_weighting, sample_session};
use ach_engine::analysis::{
    format_signed, AchEngine, AchReport, AnalysisSession, ScaleKind, WeightingMode,
};
use ach_engine::config::AppConfig;
use ach_engine::error::AppError;
use ach_engine::telemetry;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Session JSON with `hypotheses`, `evidence` and `scores` arrays
    #[arg(long)]
    pub(crate) session: PathBuf,
    /// Score convention (linear or logarithmic). Defaults to ACH_SCALE.
    #[arg(long, value_parser = parse_scale_kind)]
    pub(crate) scale: Option<ScaleKind>,
    /// Evidence weighting (identity, sats or explicit). Defaults to ACH_WEIGHTING.
    #[arg(long, value_parser = parse_weighting)]
    pub(crate) weighting: Option<WeightingMode>,
    /// Emit the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Also write the consistency matrix to this CSV file
    #[arg(long)]
    pub(crate) matrix_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score convention (linear or logarithmic). Defaults to logarithmic.
    #[arg(long, value_parser = parse_scale_kind)]
    pub(crate) scale: Option<ScaleKind>,
    /// Evidence weighting (identity or sats)
    #[arg(long, value_parser = parse_weighting)]
    pub(crate) weighting: Option<WeightingMode>,
    /// Emit the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        session,
        scale,
        weighting,
        json,
        matrix_csv,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let engine = build_engine(
        scale.map(|kind| kind.preset()).unwrap_or(config.scoring.scale),
        weighting.unwrap_or(config.scoring.weighting),
    );
    let loaded = load_session(&session)?;
    info!(path = %session.display(), "loaded ACH session");

    let report = engine.analyze(&loaded);

    if let Some(path) = matrix_csv {
        let file = File::create(&path)?;
        report.matrix.write_csv(BufWriter::new(file))?;
        info!(path = %path.display(), "wrote consistency matrix");
    }

    emit(&loaded, &report, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        scale,
        weighting,
        json,
    } = args;

    let engine = build_engine(
        scale.unwrap_or(ScaleKind::Logarithmic).preset(),
        weighting.unwrap_or_default(),
    );
    let session = sample_session();
    let report = engine.analyze(&session);

    if !json {
        println!("ACH scoring demo: cyber incident attribution");
    }
    emit(&session, &report, json)
}

fn build_engine(scale: ach_engine::analysis::Scale, weighting: WeightingMode) -> AchEngine {
    AchEngine::with_mode(scale, weighting)
}

fn emit(session: &AnalysisSession, report: &AchReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        render_report(session, report);
    }
    Ok(())
}

pub(crate) fn render_report(session: &AnalysisSession, report: &AchReport) {
    println!(
        "\nSession: {} hypotheses | {} evidence | {} scores ({} scale [{}, {}], {} weighting)",
        session.hypotheses.len(),
        session.evidence.len(),
        session.scores.len(),
        report.scale.kind(),
        format_signed(report.scale.min()),
        format_signed(report.scale.max()),
        report.weighting
    );

    println!("\nHypotheses (least contradicted first)");
    for entry in &report.likelihoods {
        let marker = if entry.is_least_contradicted { "*" } else { " " };
        println!(
            "{} {}. {} | weighted {} (raw {}) | likelihood {:.1}% | +{} / -{} / 0:{}",
            marker,
            entry.rank,
            entry.hypothesis_text,
            format_signed(entry.weighted_score),
            format_signed(entry.raw_score),
            entry.likelihood,
            entry.supporting_count,
            entry.contradicting_count,
            entry.neutral_count
        );
    }

    println!("\nEvidence diagnosticity (most diagnostic first)");
    for result in &report.diagnosticity {
        println!(
            "- {} [{:.0}] {}",
            result.evidence_title,
            result.diagnosticity,
            result.band.label()
        );
        println!("    {}", result.reasoning);
        if let Some(top) = &result.top_hypothesis {
            println!(
                "    favors {} ({})",
                top.hypothesis_text,
                format_signed(top.score)
            );
        }
    }

    println!("\nConsistency matrix");
    let header: Vec<&str> = report
        .matrix
        .hypotheses
        .iter()
        .map(|column| column.hypothesis_id.0.as_str())
        .collect();
    println!("  {:<48} {}", "Evidence", header.join("  "));
    for row in &report.matrix.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&header)
            .map(|(cell, id)| format!("{:<width$}", cell.marker, width = id.len()))
            .collect();
        println!("  {:<48} {}", row.evidence_title, cells.join("  "));
    }
}

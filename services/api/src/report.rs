use chrono::{DateTime, Local};
use clap::Args;
use red_flag_analyzer::analysis::{
    flag_record, ApplicantRecord, EvaluationResult, FlagSet, RecordGuard,
};
use red_flag_analyzer::error::AppError;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON applicant record
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Emit the evaluation result as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let payload: serde_json::Value = serde_json::from_str(&raw)?;
    let record = RecordGuard.record_from_payload(payload)?;

    let flags = flag_record(&record);
    if args.json {
        let result = EvaluationResult::from_flags(flags);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&record, flags, Local::now()));
    }

    Ok(())
}

pub(crate) fn run_sample() -> Result<(), AppError> {
    println!(
        "{}",
        serde_json::to_string_pretty(&ApplicantRecord::sample())?
    );
    Ok(())
}

fn render_report(record: &ApplicantRecord, flags: FlagSet, generated: DateTime<Local>) -> String {
    let clean = flags.is_clean();
    let result = EvaluationResult::from_flags(flags);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Red flag analysis ({})",
        generated.format("%Y-%m-%d %H:%M")
    );
    if let Some(business_type) = record.business_type {
        let _ = writeln!(out, "Business type: {}", business_type.label());
    }
    let _ = writeln!(
        out,
        "Final result: {} ({})",
        result.final_result.label(),
        result.final_result.summary()
    );

    if clean {
        let _ = writeln!(out, "No red flags raised.");
        return out;
    }

    render_section(&mut out, "Hard flags", result.hard_flags.iter().map(|f| f.label()));
    render_section(&mut out, "Soft flags", result.soft_flags.iter().map(|f| f.label()));
    render_section(
        &mut out,
        "Pattern flags",
        result.pattern_flags.iter().map(|f| f.label()),
    );
    let _ = writeln!(out, "{} flags in total", result.flag_count());
    out
}

fn render_section<'a>(out: &mut String, title: &str, labels: impl Iterator<Item = &'a str>) {
    let labels: Vec<&str> = labels.collect();
    if labels.is_empty() {
        return;
    }

    let _ = writeln!(out, "{title} ({})", labels.len());
    for label in labels {
        let _ = writeln!(out, "  - {label}");
    }
}

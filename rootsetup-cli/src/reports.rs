use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::runner::SetupRecord;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    runs: usize,
    completed: usize,
    records: &'a [SetupRecord],
}

fn completed_count(records: &[SetupRecord]) -> usize {
    records.iter().filter(|r| r.completed).count()
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn generate_console_report(
    out: &mut dyn Write,
    records: &[SetupRecord],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📋 Setup Results".bright_cyan().bold())?;
    writeln!(out, "{}", "================".cyan())?;

    let completed = completed_count(records);
    writeln!(out, "Runs: {}", records.len())?;
    writeln!(out, "Completed: {}", completed.to_string().green())?;
    writeln!(
        out,
        "Blocked: {}",
        (records.len() - completed).to_string().red()
    )?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for record in records {
        let status = if record.completed {
            "✅ DONE".green()
        } else {
            "❌ BLOCKED".red()
        };
        writeln!(
            out,
            "{} seed {} ({} picks)",
            status,
            record.seed.to_string().bold(),
            record.policy
        )?;
        if let (Some(step), Some(error)) = (&record.blocked_at, &record.error) {
            writeln!(out, "   Blocked at {step}: {}", error.red())?;
        }
        writeln!(out, "   Map: {}", or_none(record.map.as_deref()))?;
        writeln!(out, "   Deck: {}", or_none(record.deck.as_deref()))?;
        if !record.landmarks.is_empty() {
            writeln!(out, "   Landmarks: {}", record.landmarks.join(", "))?;
        }
        for hireling in &record.hirelings {
            let face = if hireling.demoted { "demoted" } else { "promoted" };
            writeln!(
                out,
                "   Hireling {}: {} ({face})",
                hireling.slot, hireling.name
            )?;
        }
        if !record.player_order.is_empty() {
            let order: Vec<String> = record.player_order.iter().map(ToString::to_string).collect();
            writeln!(out, "   Seating: {}", order.join(" → "))?;
        }
        for seat in &record.seats {
            let faction = if seat.militant {
                seat.faction.yellow()
            } else {
                seat.faction.normal()
            };
            writeln!(out, "     • seat {} (player {}): {faction}", seat.seat, seat.player)?;
        }
        if !record.leftover_factions.is_empty() {
            writeln!(out, "   Left in pool: {}", record.leftover_factions.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, records: &[SetupRecord]) -> Result<()> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        runs: records.len(),
        completed: completed_count(records),
        records,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, records: &[SetupRecord]) -> Result<()> {
    writeln!(out, "# Setup Results\n")?;
    let completed = completed_count(records);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Runs**: {}", records.len())?;
    writeln!(out, "- **Completed**: {completed}")?;
    writeln!(out, "- **Blocked**: {}\n", records.len() - completed)?;

    writeln!(out, "## Runs\n")?;
    writeln!(out, "| Seed | Status | Map | Deck | Landmarks | Hirelings | Factions |")?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for record in records {
        let status = match &record.error {
            Some(error) => format!("❌ {error}"),
            None if record.completed => "✅".to_string(),
            None => "…".to_string(),
        };
        let hirelings: Vec<&str> = record.hirelings.iter().map(|h| h.name.as_str()).collect();
        let factions: Vec<String> = record
            .seats
            .iter()
            .map(|seat| format!("P{}: {}", seat.player, seat.faction))
            .collect();
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            record.seed,
            status,
            or_none(record.map.as_deref()),
            or_none(record.deck.as_deref()),
            record.landmarks.join(", "),
            hirelings.join(", "),
            factions.join(", ")
        )?;
    }
    Ok(())
}

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Strategy, StrategyOutcome};

/// How many execution-board items the summary shows
const BOARD_PREVIEW: usize = 5;

/// Write the outcome as indented JSON
pub fn write_json(outcome: &StrategyOutcome, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, outcome).context("Failed to write JSON")?;
    Ok(())
}

/// Human-readable report of an outcome. Missing fields render as "N/A".
pub fn render_summary(outcome: &StrategyOutcome) -> String {
    match outcome {
        StrategyOutcome::Error(error) => {
            let mut out = format!("Error: {}\n", error.error);
            if let Some(raw) = &error.raw {
                let _ = writeln!(out, "Raw result: {}", raw);
            }
            out
        }
        StrategyOutcome::Strategy(strategy) => render_strategy(strategy),
    }
}

fn render_strategy(strategy: &Strategy) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "STARTUP STRATEGY RESULTS");
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "\nONE-LINER: {}", strategy.section("one_liner").text_or("N/A"));
    let _ = writeln!(out, "\nPROBLEM: {}", strategy.section("problem_statement").text_or("N/A"));

    let _ = writeln!(out, "\nTARGET PERSONAS:");
    for (i, persona) in strategy.section("target_personas").items().iter().enumerate() {
        let _ = writeln!(
            out,
            "   {}. {} ({})",
            i + 1,
            persona.get("name").text_or("N/A"),
            persona.get("segment").text_or("N/A")
        );
        let _ = writeln!(out, "      Jobs: {}", persona.get("primary_jobs").joined(", "));
        let _ = writeln!(out, "      Pains: {}", persona.get("top_pains").joined(", "));
    }

    let market = strategy.section("market");
    let _ = writeln!(out, "\nMARKET:");
    let _ = writeln!(out, "   Geography: {}", market.get("geo").text_or("N/A"));
    let _ = writeln!(
        out,
        "   TAM Estimate: {}",
        market.get("top_down_TAM_estimate").text_or("N/A")
    );

    let solution = strategy.section("solution");
    let _ = writeln!(out, "\nSOLUTION:");
    let _ = writeln!(out, "   V0 Scope (Weeks 1-4): {}", solution.get("v0_scope").joined(", "));
    let _ = writeln!(out, "   V1 Scope (Weeks 5-8): {}", solution.get("v1_scope").joined(", "));
    let _ = writeln!(out, "   V2 Scope (Weeks 9-12): {}", solution.get("v2_scope").joined(", "));

    let gtm = strategy.section("gtm");
    let _ = writeln!(out, "\nGTM:");
    let _ = writeln!(out, "   Positioning: {}", gtm.get("positioning").text_or("N/A"));
    let _ = writeln!(out, "   Channels: {}", gtm.get("channels").joined(", "));

    let tech = strategy.section("tech");
    let _ = writeln!(out, "\nTECH:");
    let _ = writeln!(out, "   Architecture: {}", tech.get("architecture").text_or("N/A"));
    let _ = writeln!(out, "   Stack: {}", tech.get("stack_choices").joined(", "));

    let finance = strategy.section("finance");
    let unit_economics = finance.get("unit_economics");
    let _ = writeln!(out, "\nFINANCE:");
    let _ = writeln!(out, "   Budget Ceiling: {}", finance.get("budget_ceiling").text_or("N/A"));
    let _ = writeln!(out, "   CAC: {}", unit_economics.get("cac").text_or("N/A"));
    let _ = writeln!(out, "   LTV: {}", unit_economics.get("ltv").text_or("N/A"));

    let _ = writeln!(out, "\nMETRICS:");
    let _ = writeln!(
        out,
        "   North Star: {}",
        strategy.section("metrics").get("north_star").text_or("N/A")
    );

    let _ = writeln!(out, "\nEXECUTION BOARD:");
    for item in strategy
        .section("execution_board")
        .items()
        .iter()
        .take(BOARD_PREVIEW)
    {
        let _ = writeln!(
            out,
            "   {}: {} (Due: {})",
            item.get("id").text_or("N/A"),
            item.get("title").text_or("N/A"),
            item.get("due").text_or("N/A")
        );
    }

    let assumptions = strategy.section("assumptions").items();
    if !assumptions.is_empty() {
        let _ = writeln!(out, "\nASSUMPTIONS:");
        for assumption in assumptions {
            let _ = writeln!(out, "   - {}", assumption.text_or("N/A"));
        }
    }

    out
}

//! Table output formatting for CLI commands
//!
//! Renders the question catalog, assessment results, and simulation reports
//! with comfy-table.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::percent;
use crate::domain::models::{AssessmentRecord, Category, ConvergenceResult, Question};
use crate::services::SimulationReport;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn category_cell(category: Category) -> Cell {
    Cell::new(format!("{category} {}", category.name()))
}

/// Format the question catalog
pub fn format_catalog(questions: &[Question]) -> String {
    let mut table = base_table();
    table.set_header(header(&["#", "A", "B"]));
    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {}", q.category_a(), q.category_a().statement())),
            Cell::new(format!("{} {}", q.category_b(), q.category_b().statement())),
        ]);
    }
    table.to_string()
}

/// Format stage-1 scores, highlighting the candidates
pub fn format_stage_one(result: &ConvergenceResult) -> String {
    let mut table = base_table();
    table.set_header(header(&["Type", "Votes", "Candidate"]));

    let mut rows: Vec<_> = result.stage_one().iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (category, votes) in rows {
        let is_candidate = result.candidates().contains(category);
        let name = category_cell(category);
        table.add_row(vec![
            if is_candidate {
                name.fg(Color::Cyan)
            } else {
                name
            },
            Cell::new(votes).set_alignment(CellAlignment::Right),
            Cell::new(if is_candidate { "yes" } else { "" }),
        ]);
    }
    table.to_string()
}

/// Format the per-round elimination trace
pub fn format_rounds(result: &ConvergenceResult) -> String {
    let mut table = base_table();
    table.set_header(header(&["Round", "Pick", "Leader", "Tally", "Gap"]));
    for round in result.rounds() {
        let leader = round.leader();
        table.add_row(vec![
            Cell::new(round.round).set_alignment(CellAlignment::Right),
            Cell::new(round.pick),
            Cell::new(leader.category),
            Cell::new(
                round
                    .standings
                    .iter()
                    .map(|t| format!("{}:{}", t.category, t.count))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Cell::new(round.gap).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

/// Format a list of stored assessments
pub fn format_records(records: &[AssessmentRecord]) -> String {
    let mut table = base_table();
    table.set_header(header(&["ID", "Subject", "Winner", "Confidence", "Rounds", "Completed"]));
    for record in records {
        let result = &record.result;
        let confidence = Cell::new(percent(result.confidence()));
        table.add_row(vec![
            Cell::new(&record.id.to_string()[..8]),
            Cell::new(&record.subject),
            category_cell(result.winner()),
            if result.is_early_stop() {
                confidence.fg(Color::Green)
            } else {
                confidence.fg(Color::Yellow)
            },
            Cell::new(result.rounds_used()).set_alignment(CellAlignment::Right),
            Cell::new(record.completed_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    table.to_string()
}

/// Format a simulation report
pub fn format_report(report: &SimulationReport) -> String {
    let mut summary = base_table();
    summary.set_header(header(&["Metric", "Value"]));

    let dominant = report
        .dominant
        .map_or_else(|| "none (uniform)".to_string(), |c| format!("{c} {}", c.name()));
    let mut rows = vec![
        ("Runs", report.runs.to_string()),
        ("Seed", report.seed.to_string()),
        ("Dominant type", dominant),
    ];
    if let Some(accuracy) = report.accuracy {
        rows.push(("Accuracy", percent(accuracy)));
    }
    if let Some(hit_rate) = report.candidate_hit_rate {
        rows.push(("In candidate set", percent(hit_rate)));
    }
    rows.extend([
        ("Early stops", percent(report.early_stop_rate)),
        ("Capped runs", report.capped_runs.to_string()),
        ("Mean rounds", format!("{:.2}", report.mean_rounds)),
        ("Mean confidence", format!("{:.3}", report.mean_confidence)),
        ("Min confidence", format!("{:.3}", report.min_confidence)),
    ]);
    for (metric, value) in rows {
        summary.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }

    let mut rounds = base_table();
    rounds.set_header(header(&["Rounds", "Runs"]));
    for (used, count) in &report.rounds_histogram {
        rounds.add_row(vec![Cell::new(used), Cell::new(count)]);
    }

    let mut winners = base_table();
    winners.set_header(header(&["Winner", "Runs"]));
    for (category, count) in &report.winner_counts {
        winners.add_row(vec![category_cell(*category), Cell::new(count)]);
    }

    format!("{summary}\n\n{rounds}\n\n{winners}")
}

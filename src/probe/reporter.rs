//! Console formatting for probe results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::ledger::{Ledger, RunSummary, TestResult};

const RULE_WIDTH: usize = 50;

/// One status line, e.g. `✅ PASS: Health Check - Health endpoint working correctly`
pub fn format_record(result: &TestResult) -> String {
    let label = if result.passed {
        result.status_label().green()
    } else {
        result.status_label().red()
    };
    format!("{}: {} - {}", label, result.test_name, result.message)
}

/// Success rate with one decimal place, `n/a` when nothing ran
pub fn format_success_rate(summary: &RunSummary) -> String {
    match summary.success_rate() {
        Some(rate) => format!("{:.1}%", rate),
        None => "n/a".to_string(),
    }
}

/// The end-of-run summary block, including the failed-test recap
pub fn format_summary(ledger: &Ledger) -> String {
    let summary = ledger.summary();
    let rate = format_success_rate(&summary);
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", rule));
    output.push_str(&format!("🏁 {}\n", "Test Summary".bold()));
    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!("Total Tests: {}\n", summary.total));
    output.push_str(&format!("✅ Passed: {}\n", summary.passed));
    output.push_str(&format!("❌ Failed: {}\n", summary.failed));
    output.push_str(&format!("Success Rate: {}\n", rate));

    if summary.failed > 0 {
        output.push_str(&format!("\n{}\n", "❌ Failed Tests:".red()));
        for result in ledger.failures() {
            output.push_str(&format!("  - {}: {}\n", result.test_name, result.message));
        }
    }

    output
}

/// Formats every recorded result as a table
pub fn format_table(ledger: &Ledger) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Probe", "Status", "Recorded", "Message"]);

    for result in ledger.results() {
        let status = if result.passed {
            "PASS".green().to_string()
        } else {
            "FAIL".red().to_string()
        };
        let recorded = result.timestamp_iso();
        builder.push_record([
            result.test_name.as_str(),
            &status,
            &recorded,
            &result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Prints the summary block to stdout
pub fn print_summary(ledger: &Ledger) {
    print!("{}", format_summary(ledger));
}

/// Prints the results table to stdout
pub fn print_table(ledger: &Ledger) {
    println!("\n{}", format_table(ledger));
}

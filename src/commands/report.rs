//! Report command - build and render a delivery report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::aggregation::{aggregate, AggregationResult};
use crate::source::{JsonlSource, RecordSource};
use crate::window::{plan, BucketPlan, RangeSelector};


const BAR_WIDTH: usize = 20;


/// Run the report command.
pub fn run(range: &str, inputs: &[PathBuf], at: Option<&str>, json: bool) -> Result<()> {
    let selector: RangeSelector = range.parse()?;

    let reference = match at {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid reference instant: {s}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let bucket_plan = plan(selector, reference);
    let source = JsonlSource::new(inputs);
    let records = source.fetch_records(bucket_plan.start, bucket_plan.end)?;
    let report = aggregate(&bucket_plan, &records)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_report(&bucket_plan, &report);

    Ok(())
}


/// Render the report to the terminal.
fn render_report(bucket_plan: &BucketPlan, report: &AggregationResult) {
    // Header
    println!("\n{}", "=".repeat(60));
    println!("{:^60}", "Message Delivery Report");
    println!("{}\n", "=".repeat(60));

    // Summary Statistics
    println!("SUMMARY");
    println!("{}", "-".repeat(40));
    println!("  Total Messages:      {:>15}", format_number(report.total_messages));
    println!("  Delivery Rate:       {:>14}%", format!("{:.1}", report.delivery_rate_percent));
    println!("  Active Recipients:   {:>15}", format_number(report.active_recipient_count));
    println!(
        "  Window:              {} to {}",
        bucket_plan.start.format("%Y-%m-%d %H:%M"),
        bucket_plan.end.format("%Y-%m-%d %H:%M")
    );

    // Status breakdown
    println!("\nMESSAGES BY STATUS");
    println!("{}", "-".repeat(40));
    let max_status = report.messages_by_status.values().copied().max().unwrap_or(0);
    for (status, count) in &report.messages_by_status {
        println!(
            "  {:12} {} {:>10}",
            status,
            create_bar(*count, max_status, BAR_WIDTH),
            format_number(*count)
        );
    }

    // Type breakdown
    println!("\nMESSAGES BY TYPE");
    println!("{}", "-".repeat(40));
    let max_type = report.messages_by_type.values().copied().max().unwrap_or(0);
    for (message_type, count) in &report.messages_by_type {
        println!(
            "  {:12} {} {:>10}",
            message_type,
            create_bar(*count, max_type, BAR_WIDTH),
            format_number(*count)
        );
    }

    // Top recipients
    if !report.top_recipients.is_empty() {
        println!("\nTOP RECIPIENTS");
        println!("{}", "-".repeat(40));
        for (i, recipient) in report.top_recipients.iter().enumerate() {
            println!(
                "  {}. {:30} {:>6}",
                i + 1,
                recipient.identifier,
                format_number(recipient.count)
            );
        }
    }

    // Time series
    println!("\nTIME SERIES");
    println!("{}", "-".repeat(40));
    let max_bucket = report
        .messages_by_bucket
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(0);
    for bucket in &report.messages_by_bucket {
        println!(
            "  {:12} {} {:>10}",
            bucket.label,
            create_bar(bucket.count, max_bucket, BAR_WIDTH),
            format_number(bucket.count)
        );
    }

    if report.skipped_malformed > 0 {
        println!(
            "\nWarning: {} record(s) skipped (missing timestamp)",
            report.skipped_malformed
        );
    }

    println!();
}


/// Create a simple text bar for visualization.
fn create_bar(value: u64, max_value: u64, width: usize) -> String {
    if max_value == 0 {
        return "░".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}


/// Format a number with commas.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_create_bar_empty() {
        assert_eq!(create_bar(0, 0, 4), "░░░░");
    }

    #[test]
    fn test_create_bar_full() {
        assert_eq!(create_bar(10, 10, 4), "████");
    }
}

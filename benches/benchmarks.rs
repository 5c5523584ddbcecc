//! Performance benchmarks for ProjectForge.
//!
//! This module contains benchmarks for:
//! - Role extraction over long record histories
//! - Markdown to HTML conversion of stage output
//! - Full report rendering
//!
//! Run with: `cargo bench`

use std::time::Duration;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use projectforge::report::{markdown_to_html, render_html, render_text, ReportSections};
use projectforge::{extract_safe, extract_strict, Role, RoleMap, RoleOutput, StepRecord};

// ============================================================================
// Fixtures
// ============================================================================

mod fixtures {
    use super::*;

    /// A record history where every role was retried `attempts` times.
    pub fn retried_records(attempts: usize) -> Vec<StepRecord> {
        (0..attempts)
            .flat_map(|attempt| {
                Role::ALL.into_iter().map(move |role| {
                    StepRecord::completed(
                        role.index(),
                        role.display_name(),
                        format!("{} attempt {attempt}", role.key()),
                        Duration::from_millis(10),
                    )
                })
            })
            .collect()
    }

    /// Stage output shaped like a typical architect response.
    pub fn stage_markdown(sections: usize) -> String {
        let mut out = String::new();
        for i in 0..sections {
            out.push_str(&format!("## Component {i}\n\n"));
            out.push_str("- **Table** `users`\n  - `id` uuid\n  - `email` text\n\n");
            out.push_str("**POST /api/trips**\n\n```json\n{\"distance_km\": 12.5}\n```\n\n");
            out.push_str("| Feature | Effort | Impact |\n|---|---|---|\n| Login | S | High |\n\n");
        }
        out
    }
}

// ============================================================================
// Extraction
// ============================================================================

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for attempts in [1, 10, 100] {
        let records = fixtures::retried_records(attempts);
        group.throughput(Throughput::Elements(records.len() as u64));

        group.bench_with_input(BenchmarkId::new("strict", attempts), &records, |b, records| {
            b.iter(|| extract_strict(black_box(records)));
        });
        group.bench_with_input(BenchmarkId::new("safe", attempts), &records, |b, records| {
            b.iter(|| extract_safe(black_box(records)));
        });
    }

    group.finish();
}

// ============================================================================
// Rendering
// ============================================================================

fn bench_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_to_html");

    for sections in [1, 10, 50] {
        let markdown = fixtures::stage_markdown(sections);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &markdown, |b, md| {
            b.iter(|| markdown_to_html(black_box(md)));
        });
    }

    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let body = fixtures::stage_markdown(10);
    let outputs = RoleMap::from_fn(|role| match role {
        Role::Manager => RoleOutput::Absent,
        _ => RoleOutput::Text(body.clone()),
    });
    let sections = ReportSections::new(&outputs, "[Task did not complete]");
    let generated = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();

    c.bench_function("render_text", |b| {
        b.iter(|| render_text(black_box(&sections), "Carbon tracker", generated));
    });
    c.bench_function("render_html", |b| {
        b.iter(|| render_html(black_box(&sections), "Carbon tracker", "20250101_090000"));
    });
}

criterion_group!(benches, bench_extraction, bench_markdown, bench_reports);
criterion_main!(benches);

use gametraits_codec::conformance::ConformanceReport;
use gametraits_codec::harness::{RunConfig, RunReport};
use gametraits_codec::{CodecStrategy, TraitSet};
use std::fmt::Write;

use crate::defaults;

pub fn print_strategies() {
    println!("\n📋 Available Strategies");
    for strategy in CodecStrategy::ALL {
        println!(
            "  • {:<11} {:<11} {}",
            strategy.name(),
            strategy.policy().to_string(),
            strategy.description()
        );
    }
    println!("\nDefault: {}", CodecStrategy::default());
}

/// Render benchmark results as a table, with each strategy's time relative
/// to the fastest one.
pub fn render_bench_reports(sample: &TraitSet, config: &RunConfig, reports: &[RunReport]) -> String {
    let mut out = String::new();
    let fastest = reports
        .iter()
        .map(|r| r.ns_per_op)
        .fold(f64::INFINITY, f64::min);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n⏱  Benchmark Results");
    let _ = writeln!(out, "  • Sample: {sample}");
    let _ = writeln!(out, "  • Iterations: {} (warmup {})", config.iterations, config.warmup);
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "{:<12} {:<11} {:>12} {:>8} {:>8}",
        "strategy", "policy", "ns/op", "bytes", "relative"
    );
    for r in reports {
        let relative = if fastest > 0.0 { r.ns_per_op / fastest } else { 1.0 };
        let _ = writeln!(
            out,
            "{:<12} {:<11} {:>12.1} {:>8} {:>7.2}x",
            r.strategy.name(),
            r.policy.to_string(),
            r.ns_per_op,
            r.encoded_len,
            relative
        );
    }
    out
}

pub fn render_conformance(reports: &[ConformanceReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n🔍 Conformance");
    for report in reports {
        if report.is_ok() {
            let _ = writeln!(
                out,
                "✓ {}: {} subsets OK",
                report.strategy, report.checked
            );
            continue;
        }
        let _ = writeln!(
            out,
            "✗ {}: {} failure(s) over {} subsets",
            report.strategy,
            report.failures.len(),
            report.checked
        );
        for failure in report.failures.iter().take(defaults::MAX_LISTED_FAILURES) {
            let _ = writeln!(
                out,
                "    - {:?} on {}: {}",
                failure.check, failure.subset, failure.detail
            );
        }
        if report.failures.len() > defaults::MAX_LISTED_FAILURES {
            let _ = writeln!(
                out,
                "    ... {} more",
                report.failures.len() - defaults::MAX_LISTED_FAILURES
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gametraits_codec::conformance::{Check, Failure};
    use gametraits_codec::DecodePolicy;

    fn report(strategy: CodecStrategy, ns_per_op: f64) -> RunReport {
        RunReport {
            strategy,
            policy: strategy.policy(),
            iterations: 10,
            total_ns: (ns_per_op * 10.0) as u64,
            ns_per_op,
            encoded_len: 20,
        }
    }

    #[test]
    fn test_relative_speed() {
        let reports = vec![
            report(CodecStrategy::Map, 400.0),
            report(CodecStrategy::HandRolled, 100.0),
        ];
        let config = RunConfig {
            iterations: 10,
            warmup: 0,
        };
        let text = render_bench_reports(&TraitSet::new(), &config, &reports);
        assert!(text.contains("4.00x"));
        assert!(text.contains("1.00x"));
        assert!(text.contains(&DecodePolicy::Permissive.to_string()));
    }

    #[test]
    fn test_failures_are_elided() {
        let failures = (0..8)
            .map(|i| Failure {
                check: Check::RoundTrip,
                subset: TraitSet::from_bits(i),
                detail: "boom".into(),
            })
            .collect();
        let report = ConformanceReport {
            strategy: CodecStrategy::Walk,
            checked: 128,
            failures,
        };
        let text = render_conformance(&[report]);
        assert!(text.contains("✗ walk: 8 failure(s)"));
        assert!(text.contains("... 3 more"));
    }
}

use anyhow::{Context, Result};
use gametraits_codec::harness;
use indicatif::{ProgressBar, ProgressStyle};

use crate::args::{BenchArgs, OutputFormat};
use crate::config::BenchConfig;
use crate::printing::render_bench_reports;

pub fn run_bench(args: &BenchArgs) -> Result<()> {
    let config = BenchConfig::from_args(args)?;
    if config.strategies.is_empty() {
        anyhow::bail!("No strategies selected");
    }
    let run_config = config.run_config();
    run_config.validate()?;
    let sample = config.sample_set();

    tracing::info!(
        strategies = config.strategies.len(),
        iterations = run_config.iterations,
        %sample,
        "starting benchmark"
    );

    let pb = if args.no_progress {
        None
    } else {
        let pb = ProgressBar::new(config.strategies.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let mut reports = Vec::with_capacity(config.strategies.len());
    for &strategy in &config.strategies {
        if let Some(pb) = &pb {
            pb.set_message(strategy.name());
        }
        let report = harness::run(strategy, &sample, &run_config)
            .with_context(|| format!("Benchmark failed for strategy {strategy}"))?;
        reports.push(report);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let content = match args.format {
        OutputFormat::Text => render_bench_reports(&sample, &run_config, &reports),
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Results written to: {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}

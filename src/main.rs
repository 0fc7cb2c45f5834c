// main.rs - CLI entry point

use std::time::Instant;

use domain_select::cli::Config;
use domain_select::core::{prepare_pool, run_selection, FilterStats};
use domain_select::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    // DOMAIN_SELECT_LOG sets the default level; RUST_LOG still wins when set
    let log_level = std::env::var("DOMAIN_SELECT_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    if args.list_scorers {
        let registry = ScorerRegistry::new();
        println!("🔬 Available identity scorers:");
        for (name, desc) in registry.list_scorers() {
            println!("  - {}: {}", name, desc);
        }
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation_result = validate_args(&args)?;
    let config = &validation_result.run_config;

    println!("🚀 domain-select v{}", VERSION);

    // Configure thread pool
    if let Some(n) = validation_result.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| SelectError::invalid(format!("Failed to configure thread pool: {}", e)))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    println!("📂 Sequences: {}", config.fasta.display());
    match &config.hierarchy {
        Some(path) => println!("🗂️  Classification: {}", path.display()),
        None => println!("🗂️  Classification: FASTA headers"),
    }
    let class_list: Vec<String> = config.classes.iter().map(|c| c.to_string()).collect();
    println!(
        "🎯 Classes: {} | max length: {} | count: {}",
        class_list.join(","),
        config.max_length,
        config.target_count
    );
    println!("🔬 Scorer: {}", config.scorer);

    let total_start = Instant::now();

    if validation_result.dry_run {
        let prepared = prepare_pool(config)?;
        println!("📊 Records read: {}", prepared.records_read);
        print_classification(prepared.class_map.stats());
        print_filter(&prepared.outcome.stats);
        if prepared.outcome.pool.len() < config.target_count {
            println!(
                "⚠️  Only {} candidates for {} requested",
                prepared.outcome.pool.len(),
                config.target_count
            );
        }
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    let outcome = run_selection(config)?;
    let summary = &outcome.summary;

    println!("📊 Records read: {}", summary.records_read);
    print_classification(&summary.classification);
    print_filter(&summary.filter);

    if summary.resumed > 0 {
        println!("🔁 Resumed from {} existing rows", summary.resumed);
    }
    println!("✅ Selected {} of {} requested", summary.selected, summary.requested);
    for (class, count) in &summary.selected_per_class {
        println!("   {} ({}): {}", class, class.description(), count);
    }
    if let Some(shortfall) = &summary.shortfall {
        println!(
            "⚠️  UNDER-SELECTED: requested {} but only {} candidates passed the filter",
            shortfall.requested, shortfall.available
        );
    }
    if let Some(last) = outcome.report.entries.last() {
        println!("📈 Max identity of last pick: {:.4}", last.identity);
    }

    println!("💾 Sequences: {}", config.output.display());
    println!("💾 Report: {}", config.report.display());
    if let Some(path) = &config.summary {
        println!("💾 Summary: {}", path.display());
    }
    println!("⏱️  Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn print_classification(stats: &ClassMapStats) {
    println!(
        "🗂️  Classified: {} | skipped: {} | conflicts: {}",
        stats.entries, stats.skipped, stats.conflicts
    );
}

fn print_filter(stats: &FilterStats) {
    println!(
        "🔍 Filter kept {} of {} (unclassified: {}, other class: {}, too long: {})",
        stats.retained,
        stats.total_seen,
        stats.dropped_unclassified,
        stats.dropped_class,
        stats.dropped_length
    );
    for (class, count) in &stats.retained_per_class {
        println!("   {} ({}): {}", class, class.description(), count);
    }
}

// verify_selection.rs - Re-check a selection: FASTA and report agree, identities recompute

use std::path::Path;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use domain_select::core::AlignmentConfig;
use domain_select::data::SequenceStore;
use domain_select::output::{read_report, verify_selection};
use domain_select::scorers::ScorerRegistry;
use domain_select::SelectError;

fn main() {
    let log_level = std::env::var("DOMAIN_SELECT_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ ERROR: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run() -> Result<bool, SelectError> {
    let matches = Command::new("Selection Verifier")
        .version(domain_select::VERSION)
        .about("Checks a domain-select output FASTA against its report and recomputes identities")
        .arg(Arg::new("fasta")
            .long("fasta")
            .value_name("FILE")
            .help("Selected domains FASTA written by domain-select")
            .required(true))
        .arg(Arg::new("report")
            .long("report")
            .value_name("FILE")
            .help("Selection report (TSV) written by domain-select")
            .required(true))
        .arg(Arg::new("scorer")
            .long("scorer")
            .value_name("NAME")
            .help("Identity scorer used for the run (default: global)")
            .default_value("global"))
        .arg(Arg::new("alignment-mode")
            .long("alignment-mode")
            .value_name("MODE")
            .help("Alignment preset used for the run (default: identity)")
            .default_value("identity"))
        .arg(Arg::new("match-score")
            .long("match-score")
            .value_name("N")
            .help("Custom match score used for the run (overrides --alignment-mode)")
            .value_parser(clap::value_parser!(i32)))
        .arg(Arg::new("mismatch-penalty")
            .long("mismatch-penalty")
            .value_name("N")
            .help("Custom mismatch score used for the run")
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(i32)))
        .arg(Arg::new("gap-open")
            .long("gap-open")
            .value_name("N")
            .help("Custom gap open penalty used for the run")
            .value_parser(clap::value_parser!(i32)))
        .arg(Arg::new("gap-extend")
            .long("gap-extend")
            .value_name("N")
            .help("Custom gap extend penalty used for the run")
            .value_parser(clap::value_parser!(i32)))
        .arg(Arg::new("kmer-size")
            .long("kmer-size")
            .value_name("K")
            .help("k-mer length used for the run (default: 3)")
            .value_parser(clap::value_parser!(usize))
            .default_value("3"))
        .arg(Arg::new("tolerance")
            .long("tolerance")
            .value_name("DELTA")
            .help("Largest accepted identity deviation (default: 0.0001, reports carry 4 decimals)")
            .value_parser(clap::value_parser!(f64))
            .default_value("0.0001"))
        .arg(Arg::new("quiet")
            .long("quiet")
            .help("Only print the verdict")
            .action(ArgAction::SetTrue))
        .get_matches();

    let fasta_path = matches.get_one::<String>("fasta").map(String::as_str).unwrap_or_default();
    let report_path = matches.get_one::<String>("report").map(String::as_str).unwrap_or_default();
    let scorer_name = matches.get_one::<String>("scorer").map(String::as_str).unwrap_or("global");
    let mode = matches.get_one::<String>("alignment-mode").map(String::as_str).unwrap_or("identity");
    let kmer_size = matches.get_one::<usize>("kmer-size").copied().unwrap_or(3);
    let tolerance = matches.get_one::<f64>("tolerance").copied().unwrap_or(1e-4);
    let quiet = matches.get_flag("quiet");

    let alignment = AlignmentConfig::resolve(
        mode,
        matches.get_one::<i32>("match-score").copied(),
        matches.get_one::<i32>("mismatch-penalty").copied(),
        matches.get_one::<i32>("gap-open").copied(),
        matches.get_one::<i32>("gap-extend").copied(),
    )
    .map_err(SelectError::InvalidParameter)?;
    let registry = ScorerRegistry::with_settings(alignment, kmer_size);
    let scorer = registry.get_scorer(scorer_name).ok_or_else(|| {
        SelectError::invalid(format!(
            "Invalid scorer '{}'. Available: {}",
            scorer_name,
            registry.get_scorer_names().join(", ")
        ))
    })?;

    let store = SequenceStore::from_fasta(Path::new(fasta_path), false)?;
    let entries = read_report(Path::new(report_path))?;

    if !quiet {
        println!("🔍 Verifying {} rows with scorer '{}'", entries.len(), scorer.name());
    }

    let verification = verify_selection(store.records(), &entries, scorer);

    if !quiet {
        for problem in &verification.problems {
            println!("   ❌ {}", problem);
        }
        match verification.worst_row {
            Some(row) => println!(
                "📏 Max identity deviation: {:.6} (row {})",
                verification.max_deviation, row
            ),
            None => println!("📏 Max identity deviation: {:.6}", verification.max_deviation),
        }
    }

    let passed = verification.passed(tolerance);
    if passed {
        println!("✅ Selection verified ({} rows)", verification.rows);
    } else {
        println!("❌ Selection does not match its report");
    }
    Ok(passed)
}

// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// domain-select - Greedy max-min diverse subset selection of protein domains
pub struct Args {
    /// path to domain sequences (FASTA, ASTRAL-style headers)
    #[argh(option)]
    pub fasta: Option<String>,

    /// path to SCOPe classification file (dir.cla.scope); classes are read from FASTA headers when omitted
    #[argh(option)]
    pub hierarchy: Option<String>,

    /// structural classes to keep, comma separated: a-l or A, B, A/B, A+B (default: a,b,c,d)
    #[argh(option, default = "String::from(\"a,b,c,d\")")]
    pub classes: String,

    /// maximum domain length in residues, inclusive (default: 70)
    #[argh(option, default = "70")]
    pub max_length: usize,

    /// number of domains to select (default: 30)
    #[argh(option, default = "30")]
    pub count: usize,

    /// output FASTA of selected domains (default: selected_domains.fa)
    #[argh(option)]
    pub output: Option<String>,

    /// output selection report (default: selection_info.tsv)
    #[argh(option)]
    pub report: Option<String>,

    /// write a JSON run summary to this path
    #[argh(option)]
    pub summary: Option<String>,

    /// identity scorer: global, ungapped, kmer (default: global)
    #[argh(option, default = "String::from(\"global\")")]
    pub scorer: String,

    /// alignment mode for the global scorer: identity, protein, strict (default: identity)
    #[argh(option, default = "String::from(\"identity\")")]
    pub alignment_mode: String,

    /// custom match score (overrides preset mode, enables custom mode)
    #[argh(option)]
    pub match_score: Option<i32>,

    /// custom mismatch penalty (overrides preset mode, enables custom mode)
    #[argh(option)]
    pub mismatch_penalty: Option<i32>,

    /// custom gap open penalty (overrides preset mode, enables custom mode)
    #[argh(option)]
    pub gap_open: Option<i32>,

    /// custom gap extend penalty (overrides preset mode, enables custom mode)
    #[argh(option)]
    pub gap_extend: Option<i32>,

    /// k-mer length for the kmer scorer (default: 3)
    #[argh(option, default = "3")]
    pub kmer_size: usize,

    /// reject residues outside the protein alphabet
    #[argh(switch)]
    pub strict_alphabet: bool,

    /// give each class its proportional share of the selection
    #[argh(switch)]
    pub balance_classes: bool,

    /// continue from the rows already present in the report file
    #[argh(switch)]
    pub resume: bool,

    /// rewrite the report every N selected domains
    #[argh(option)]
    pub checkpoint_interval: Option<usize>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// show a progress bar during selection
    #[argh(switch)]
    pub progress: bool,

    /// validate inputs and report the candidate pool without selecting
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// list available identity scorers and exit
    #[argh(switch)]
    pub list_scorers: bool,
}

extern crate keggannot;

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use getopts::Options;

use keggannot::config::Config;
use keggannot::enzyme_set::{EnzymeListKind, EnzymeSet};
use keggannot::kegg::KeggClient;
use keggannot::pathways::{aggregate_pathways, mark_pathways, report_file_name, write_report};
use keggannot::utils::{init_logging, open_input};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage_message(program: &str) -> String {
    format!("Usage: {} [options] source_file

Takes a file of EC numbers (or KO numbers with -k), one per line, finds the
KEGG pathways that contain them and downloads an image of each pathway with
the enzymes marked.  Images are saved as <pathway_id>.gif
",
            program)
}

fn print_usage(program: &str, opts: &Options) {
    let message = usage_message(program);
    print!("{}", opts.usage(&message));
}

fn eprint_usage(program: &str, opts: &Options) {
    let message = usage_message(program);
    eprint!("{}", opts.usage(&message));
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::new();

    opts.optflag("h", "help", "print this help message");
    opts.optflag("V", "version", "display the version, then exit");
    opts.optflag("q", "quiet", "output as little as possible, overrides verbose");
    opts.optflag("v", "verbose", "verbose output");
    opts.optflag("k", "ko_number", "input is a list of KO numbers [default: EC numbers]");
    opts.optflag("a", "allpath", "keep all pathways, even the global ones");
    opts.optflag("r", "report", "write a .csv file of the pathways and their enzymes");
    opts.optopt("C", "config-file", "JSON configuration file", "FILE");
    opts.optopt("o", "output-dir", "directory for the pathway images [default: .]", "DIR");

    let program = args[0].clone();

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprint_usage(&program, &opts);
            eprintln!("\noption error: {}", e);
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        print_usage(&program, &opts);
        process::exit(0);
    }

    if matches.opt_present("version") {
        println!("{} version {}", PKG_NAME, VERSION);
        process::exit(0);
    }

    if matches.free.is_empty() {
        eprintln!("needs a [source_file] argument");
        eprint_usage(&program, &opts);
        process::exit(1);
    }

    let quiet = matches.opt_present("quiet");
    let verbose = matches.opt_present("verbose") && !quiet;
    let keep_all_pathways = matches.opt_present("allpath");
    let write_csv_report = matches.opt_present("report");
    let list_kind =
        if matches.opt_present("ko_number") {
            EnzymeListKind::KoNumbers
        } else {
            EnzymeListKind::EcNumbers
        };

    let config =
        if let Some(config_file_name) = matches.opt_str("config-file") {
            Config::read(&config_file_name)?
        } else {
            Config::default()
        };

    let output_dir = matches.opt_str("output-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    init_logging("mark-kegg-pathway", verbose);

    let input_file_name = &matches.free[0];

    if !quiet {
        println!("Start at {}\n", Local::now());
    }

    if verbose {
        println!("Options:");
        println!("  input = {}", list_kind);
        println!("  allpath = {}", keep_all_pathways);
        println!("  report = {}", write_csv_report);
        println!("  output_dir = {}", output_dir.display());
    }

    let enzymes = EnzymeSet::read(open_input(input_file_name)?)?;

    if verbose {
        println!("there are a total of {} enzymes", enzymes.len());
    }

    let client = KeggClient::new(&config)?;

    if !quiet {
        println!("Querying KEGG for the pathways of each enzyme...");
    }

    let mut result = aggregate_pathways(&enzymes, list_kind, &client);

    if !keep_all_pathways {
        let removed = result.aggregate.remove_global_pathways(config.global_pathways.as_slice());
        tracing::info!("removed {} global pathway(s)", removed);
    }

    if write_csv_report {
        let report_path = report_file_name(input_file_name);
        write_report(&result.aggregate, Path::new(&report_path))?;
        if !quiet {
            println!("Wrote pathway report to {}", report_path);
        }
    }

    if !quiet {
        println!("Downloading marked pathways...");
    }

    let (saved, mark_failures) = mark_pathways(&result.aggregate, &client, &output_dir);

    if verbose {
        println!("saved {} pathway image(s)", saved.len());
    }

    result.failures.extend(mark_failures);

    if !result.failures.is_empty() {
        eprintln!("{} request(s) to KEGG failed:", result.failures.len());
        for failure in &result.failures {
            eprintln!("  {}: {}", failure.id, failure.error);
        }
    }

    if !quiet {
        println!("\nFinished at {}", Local::now());
    }

    Ok(())
}

extern crate keggannot;

use std::env;
use std::io::{self, Write};
use std::process;

use chrono::Local;
use getopts::Options;

use keggannot::extract::{IdentifierKind, tally_lines};
use keggannot::tally::{FrequencyTally, write_tally};
use keggannot::utils::{for_each_input, init_logging};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage_message(program: &str) -> String {
    format!("Usage: {} [-hvcV] -k|-e|-g|-t [source_file ...]

Given GFF or other text files, extracts one kind of annotation from each line
and prints each distinct annotation once, in the order first seen.  Reads
STDIN if no files are given.
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
    opts.optflag("v", "verbose", "verbose output");
    opts.optflag("k", "ko_number", "search for KO numbers");
    opts.optflag("e", "ec_number", "search for EC numbers");
    opts.optflag("g", "gene", "search for KEGG gene annotations");
    opts.optflag("t", "taxon", "search for taxon numbers");
    opts.optflag("c", "count", "print the number of times each annotation is seen");

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

    let kind =
        match IdentifierKind::from_flags(matches.opt_present("ec_number"),
                                         matches.opt_present("ko_number"),
                                         matches.opt_present("gene"),
                                         matches.opt_present("taxon")) {
            Ok(kind) => kind,
            Err(err) => {
                eprintln!("{}", err);
                eprint_usage(&program, &opts);
                process::exit(1);
            }
        };

    let verbose = matches.opt_present("verbose");
    let with_counts = matches.opt_present("count");

    init_logging("extract-annotations", verbose);

    if verbose {
        eprintln!("Start at {}\n", Local::now());
        eprintln!("Options:");
        eprintln!("  kind = {}", kind);
        eprintln!("  count = {}", with_counts);
    }

    let mut tally = FrequencyTally::new();

    if let Err(err) = for_each_input(&matches.free, |reader| tally_lines(reader, kind, &mut tally)) {
        eprintln!("{}", err);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_tally(&tally, with_counts, &mut out)?;
    out.flush()?;

    if verbose {
        eprintln!("\nFinished at {}", Local::now());
    }

    Ok(())
}

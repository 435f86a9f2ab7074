use std::fs;

use clap::Parser;
use ripple::{Context, run_script_with, util::logging::init_tracing};

/// ripple runs scripts written in a small dynamic language with closures and
/// deferred tasks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the contents argument as a path to a script file.
    #[arg(short, long)]
    file: bool,

    /// Print the value of the last top-level statement after the script and
    /// its tasks have finished.
    #[arg(short, long)]
    print_result: bool,

    /// Maximum number of nested function calls before a stack overflow
    /// error is raised.
    #[arg(long, default_value_t = ripple::DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// The script, or a path to it when --file is given.
    contents: String,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let context = Context::builder().max_call_depth(args.max_call_depth).build();

    if let Err(e) = run_script_with(&context, &script, args.print_result) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

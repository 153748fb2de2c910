//! Nova compiler CLI.

use novac::commands::{info_file, lex_file};
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: nova lex <file.nova>");
                return ExitCode::FAILURE;
            }
            lex_file(&args[2])
        }
        "info" => {
            if args.len() < 3 {
                eprintln!("Usage: nova info <file.nova>");
                return ExitCode::FAILURE;
            }
            info_file(&args[2])
        }
        other => {
            eprintln!("error: unknown command `{other}`");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Nova compiler");
    eprintln!();
    eprintln!("Usage: nova <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lex <file.nova>    Tokenize a source file and dump the token stream");
    eprintln!("  info <file.nova>   Show file metadata and a content preview");
}

//! Nick CLI
//!
//! Reads scripts through a reader with the alias sentinel installed.

use nickc::commands::{explain_error, parse_read_options, read_file};

fn main() {
    nickc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "read" => {
            let options = match parse_read_options(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!();
                    eprintln!("Usage: nickc read <file> [--trigger=C] [--case=MODE] [--no-color]");
                    std::process::exit(1);
                }
            };
            read_file(&options);
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: nickc explain <ERROR_CODE>");
                eprintln!("Example: nickc explain E0104");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("nickc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Nick reader driver");
    println!();
    println!("Usage: nickc <command> [options]");
    println!();
    println!("Commands:");
    println!("  read <file>       Read a script and print every datum");
    println!("  explain <code>    Explain an error code (e.g., E0102)");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Read options:");
    println!("  --trigger=<char>  Sentinel character (default: $)");
    println!("  --case=<mode>     upcase, downcase, preserve or invert (default: upcase)");
    println!("  --no-color        Disable colored diagnostics");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=nick_alias=debug) to trace reading.");
}

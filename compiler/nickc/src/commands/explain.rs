//! The `explain` command: describe an error code.

use nick_diagnostic::ErrorCode;

/// Print the description of `code_str`, or exit 1 if it is not a known code.
pub fn explain_error(code_str: &str) {
    let Some(code) = ErrorCode::parse(code_str) else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format E00XX (reader) or E01XX (aliased references).");
        eprintln!("Examples: E0002, E0102, E0104");
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
}

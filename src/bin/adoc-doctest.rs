//! adoc-doctest binary
//!
//! All logic is in the library; main only maps the exit code.

fn main() {
    if let Err(code) = adocheck::cli::run_doctest() {
        std::process::exit(code.as_i32());
    }
}

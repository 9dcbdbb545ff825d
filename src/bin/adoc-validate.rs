//! adoc-validate binary
//!
//! All logic is in the library; main only maps the exit code.

fn main() {
    if let Err(code) = adocheck::cli::run_validate() {
        std::process::exit(code.as_i32());
    }
}

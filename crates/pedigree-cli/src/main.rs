#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = pedigree_cli::run_from_env() {
        eprintln!("pedigree: {error}");
        std::process::exit(error.exit_code());
    }
}

//! h-matched tracker CLI entry point.

fn main() {
    if let Err(e) = hmatch_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

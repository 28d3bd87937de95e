//! Essential Agent example driven by a local host.

fn main() {
    if let Err(e) = essential_agent_example::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

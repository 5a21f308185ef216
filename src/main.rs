use clap::Parser;
use ganttscape::cli::commands::Cli;
use ganttscape::cli::handlers;
use ganttscape::logging::init_logging;

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

//! tabstash command line entry point.

use clap::Parser;
use tracing::error;

use tabstash::cli::{dispatch, Cli};
use tabstash::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = dispatch(cli) {
        error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

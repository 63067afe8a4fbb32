use clap::Parser;

mod cli;
mod config;
mod internal_error;
mod output;
mod telemetry;
mod todo;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let config = Config::resolve(cli.file);

    if let Err(e) = todo::commands::handle(cli.command, &config) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

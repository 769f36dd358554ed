use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::models::*;
pub use services::annotations::*;
pub use services::catalog::*;
pub use services::merge::*;
pub use services::output::*;
pub use services::storage::*;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = handle_runtime_commands(&cli) {
        print_failure(cli.json, &e);
        std::process::exit(1);
    }
}

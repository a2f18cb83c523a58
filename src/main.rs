use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Args;

mod cli;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match patterns::run(&args.patterns(), args.reverse) {
        Ok(lines) => lines.iter().for_each(|line| println!("{line}")),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

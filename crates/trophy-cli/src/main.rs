use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use trophy_cli::{run, Args};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let summary = run(&args)?;
    if args.show {
        println!("{}", summary.report);
    }
    Ok(())
}

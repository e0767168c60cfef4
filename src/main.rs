use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod coverage;
mod parsing;
mod taxonomy;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("asm_qc=debug,info")
    } else {
        EnvFilter::new("asm_qc=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Depth(args) => {
            cli::depth::run(args, cli.verbose)?;
        }
        cli::Commands::Linearize(args) => {
            cli::linearize::run(args, cli.verbose)?;
        }
        cli::Commands::PrepareDb(args) => {
            cli::prepare_db::run(args, cli.verbose)?;
        }
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.verbose)?;
        }
        cli::Commands::UpdateMeta(args) => {
            cli::update_meta::run(args, cli.verbose)?;
        }
    }

    Ok(())
}

#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;

use argh::FromArgs;
use error::CliError;
use log::LevelFilter;

#[derive(FromArgs, Debug)]
/// Lossless compression of raw bf16/fp16/fp32 tensor files
struct TopLevel {
    /// log planes, sizes and coder decisions
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Compress(commands::compress::CompressCmd),
    Decompress(commands::decompress::DecompressCmd),
    Inspect(commands::inspect::InspectCmd),
}

fn main() -> Result<(), CliError> {
    let cli: TopLevel = argh::from_env();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compress(cmd) => commands::compress::handle_compress_command(cmd)?,
        Commands::Decompress(cmd) => commands::decompress::handle_decompress_command(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::handle_inspect_command(cmd)?,
    }

    Ok(())
}

/// Logs warnings by default; `RUST_LOG` overrides, `--verbose` raises to debug.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Read;

use clap::Parser;
use miette::IntoDiagnostic;
use unibits::{EncodingFamily, Options, convert, stats, visualize};

#[derive(Debug, Parser)]
#[command(bin_name = "unibits")]
#[command(
    about = "🔍 Visualize codepoints, bytes, and bits of an encoded string, including what exactly is broken about malformed input"
)]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    /// Text to visualize; raw bytes are read from stdin when absent.
    pub input: Option<String>,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, clap::Args)]
pub struct GlobalOption {
    #[arg(
        long,
        short = 'e',
        value_name = "ENCODING",
        help = "Force-interpret the raw input bytes under this encoding, without conversion"
    )]
    pub encoding: Option<String>,

    #[arg(
        long,
        short = 'c',
        value_name = "ENCODING",
        help = "Re-encode the input into this encoding before visualizing"
    )]
    pub convert: Option<String>,

    #[arg(
        long,
        short = 'w',
        value_name = "COLUMNS",
        help = "Override the auto-detected terminal column width"
    )]
    pub width: Option<usize>,

    #[arg(
        long,
        help = "Treat East-Asian-ambiguous-width characters as 2 columns in the stats line"
    )]
    pub wide_ambiguous: bool,

    #[arg(long, help = "Suppress the one-line summary ahead of the render blocks")]
    pub no_stats: bool,

    #[arg(long, help = "List the supported encoding names and exit")]
    pub list_encodings: bool,

    #[arg(
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging"
    )]
    pub enable_logging: bool,
}

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if cli_arg.global_options.enable_logging {
        try_initialize_logging()?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start visualizing...", cli_arg = ?cli_arg);
    }

    if cli_arg.global_options.list_encodings {
        println!("{}", EncodingFamily::supported_names());
        return Ok(());
    }

    let mut bytes = read_input(cli_arg.input.as_deref())?;

    let declared = cli_arg.global_options.encoding.as_deref().unwrap_or("UTF-8");
    let mut family = EncodingFamily::resolve(declared)?;

    if let Some(target) = cli_arg.global_options.convert.as_deref() {
        let target_family = EncodingFamily::resolve(target)?;
        bytes = convert(&bytes, family, target_family);
        family = target_family;
    }

    let options = Options {
        width: cli_arg.global_options.width,
        wide_ambiguous: cli_arg.global_options.wide_ambiguous,
    };

    // The stats line and the blocks are both built before anything prints,
    // so a fatal error produces no partial output.
    let maybe_stats_line = if cli_arg.global_options.no_stats {
        None
    } else {
        Some(stats(&bytes, family, &options)?)
    };
    let rendered = visualize(&bytes, family, &options)?;

    if let Some(stats_line) = maybe_stats_line {
        println!("{stats_line}");
    }
    println!();
    print!("{rendered}");

    Ok(())
}

/// The positional argument wins; otherwise raw bytes come from stdin.
fn read_input(arg: Option<&str>) -> miette::Result<Vec<u8>> {
    match arg {
        Some(text) => Ok(text.as_bytes().to_vec()),
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .into_diagnostic()?;
            Ok(buffer)
        }
    }
}

fn try_initialize_logging() -> miette::Result<()> {
    let file = std::fs::File::create("log.txt").into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_max_level(tracing_core::LevelFilter::DEBUG)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

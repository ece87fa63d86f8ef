#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{process, time::Duration};

mod app;
mod commands;

use commands::Commands;

use hathi::ClientOptions;

use clap::{Args, Parser};
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                verbosity,
                quiet,
                timeout,
                proxy,
                base_url,
                debug_http,
            },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let options = ClientOptions {
        timeout: timeout.map(Duration::from_secs),
        proxy,
        verbose: debug_http,
        ..ClientOptions::default()
    };
    trace!("Client options: {options:?}");

    let message = command.execute(&options, base_url)?;
    println!("{message}");
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "hathi")]
#[clap(about = "Look up HathiTrust catalog records and digitized volumes by identifier")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Only log errors, the command output is still written to stdout.
    #[clap(short, long, global = true)]
    quiet: bool,

    /// Request timeout in seconds
    #[clap(long, global = true)]
    timeout: Option<u64>,

    /// Proxy used for requests, e.g. http://localhost:3128
    #[clap(long, global = true)]
    proxy: Option<String>,

    /// Catalog location, defaults to http://catalog.hathitrust.org
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Log the raw bytes of the HTTP connection (needs -vvvv to be visible)
    #[clap(long, global = true)]
    debug_http: bool,
}

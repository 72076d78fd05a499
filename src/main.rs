//! Purpose: `echomap` CLI entry point.
//! Role: Binary crate root; parses args and runs the serve loop.
//! Invariants: Process exit code is derived from `mapper::to_exit_code`.
//! Invariants: Terminal errors are emitted on stderr before exit.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use echomap::mapper::{Error, ErrorKind, to_exit_code};

mod serve;

use serve::{ServeConfig, serve};

#[derive(Parser)]
#[command(
    name = "echomap",
    version,
    about = "JSON mapper service with greeting/echo HTTP handlers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP greeting server.
    Serve {
        /// Socket address to bind.
        #[arg(long, default_value = "127.0.0.1:8787")]
        bind: SocketAddr,
        /// Permit binding to a non-loopback address.
        #[arg(long)]
        allow_non_loopback: bool,
    },
}

fn main() {
    let exit_code = match run(Cli::parse()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(hint) = err.hint() {
                eprintln!("hint: {hint}");
            }
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Serve {
            bind,
            allow_non_loopback,
        } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to start async runtime")
                        .with_source(err)
                })?;
            runtime.block_on(serve(ServeConfig {
                bind,
                allow_non_loopback,
            }))
        }
    }
}

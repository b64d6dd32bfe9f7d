//! SERV SPI diagnostic harness CLI.
//!
//! This binary exposes the harness operations as subcommands. It performs:
//! 1. **Single operations:** Write one word, load a program listing, reset the core.
//! 2. **Diagnostics:** Run one named check, the quick test, or the full suite.
//! 3. **Demos:** Load the canned hello-world program.
//!
//! The physical SPI driver is supplied by the host integration; this front end runs every
//! operation against the built-in simulated peer, which can be told to misbehave through
//! `--status-byte` and `--fail-after` to rehearse failure handling.

use std::path::PathBuf;
use std::process::ExitCode;
use std::{fmt, fs};

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use servdiag_core::Config;
use servdiag_core::bus::{StdDelay, Transport};
use servdiag_core::common::{MemAddr, STATUS_SENTINEL, Word};
use servdiag_core::diag::{self, Check, Suite, run_check};
use servdiag_core::sim::{self, programs};
use servdiag_core::soc::SimulatedPeer;

type Session = Transport<SimulatedPeer, StdDelay>;

#[derive(Parser, Debug)]
#[command(
    name = "servdiag",
    author,
    version,
    about = "SPI diagnostic harness for the SERV RISC-V soft core",
    long_about = "Drive a SERV core on FPGA over SPI: write words, load programs, and run the diagnostic suite.\n\nExamples:\n  servdiag suite\n  servdiag check status\n  servdiag write 10 0xABCDEF00\n  servdiag load --base 0 program.hex"
)]
struct Cli {
    /// JSON configuration file (bus, timing and suite parameters).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). Overridden by RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Status byte the simulated peer answers with.
    #[arg(long, value_parser = parse_u8, default_value_t = STATUS_SENTINEL, global = true)]
    status_byte: u8,

    /// Make the simulated peer fail every bus operation after this many.
    #[arg(long, global = true)]
    fail_after: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a single 32-bit word.
    Write {
        /// Target address (0-255).
        #[arg(value_parser = parse_u8)]
        address: u8,
        /// Value to write.
        #[arg(value_parser = parse_word)]
        value: Word,
    },

    /// Load a program listing (one word per line, `#` comments).
    Load {
        /// Listing file.
        file: PathBuf,
        /// Address of the first word.
        #[arg(long, value_parser = parse_u8, default_value_t = 0)]
        base: u8,
    },

    /// Run a single named check.
    Check {
        /// Check slug or name (see `servdiag checks`).
        name: Check,
    },

    /// Run the full diagnostic suite.
    Suite {
        /// Print the report as JSON instead of the text summary.
        #[arg(long)]
        json: bool,
    },

    /// One status read followed by the memory-write check.
    Quick,

    /// Fill addresses 0..16 with no-ops.
    Reset,

    /// Load the hello-world demo program at address 0.
    Hello,

    /// List the available checks in suite order.
    Checks,
}

/// Failure that ends the process with a non-zero exit code.
#[derive(Debug)]
struct CliError(String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<E: std::error::Error> From<E> for CliError {
    fn from(e: E) -> Self {
        Self(e.to_string())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the fmt subscriber; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Dispatches one subcommand. Returns whether the operation succeeded.
fn run(cli: Cli) -> Result<bool, CliError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Commands::Checks = cli.command {
        for check in Check::ALL {
            println!("{:<12} {}", check.slug(), check.name());
        }
        return Ok(true);
    }

    let mut transport = open_session(&cli, &config);

    let ok = match cli.command {
        Commands::Write { address, value } => {
            sim::write_word(&mut transport, MemAddr::new(address), value)?;
            true
        }
        Commands::Load { file, base } => {
            let listing = fs::read_to_string(&file)?;
            let program = sim::parse_program(&listing)?;
            sim::load_program(&mut transport, &program, MemAddr::new(base))?;
            println!(
                "Program loaded: {} words at address {base}",
                program.len()
            );
            true
        }
        Commands::Check { name } => {
            let outcome = run_check(name, &mut transport, &config.suite);
            println!("{outcome}");
            outcome.passed()
        }
        Commands::Suite { json } => {
            let report = Suite::new(&config).run(&mut transport);
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{report}");
            }
            report.overall_success()
        }
        Commands::Quick => diag::quick_test(&mut transport)?,
        Commands::Reset => {
            sim::reset_core(&mut transport)?;
            true
        }
        Commands::Hello => {
            sim::load_program(&mut transport, &programs::HELLO_WORLD, MemAddr::MIN)?;
            println!("Hello-world program loaded; it stores a HELLO pattern at 0x200");
            true
        }
        Commands::Checks => true,
    };

    let stats = transport.stats();
    info!(
        frames = stats.frames_written,
        reads = stats.status_reads,
        failures = stats.failures,
        "session closed"
    );
    Ok(ok)
}

/// Builds the transport over the simulated peer and logs the session banner.
fn open_session(cli: &Cli, config: &Config) -> Session {
    let mut peer = SimulatedPeer::new().with_status(cli.status_byte);
    if let Some(limit) = cli.fail_after {
        peer = peer.fail_after(limit);
    }

    info!(
        spi = config.bus.spi_id,
        baudrate = config.bus.baudrate,
        cs_pin = config.bus.cs_pin,
        "SPI session: mode 0, MSB first, 5-byte write frames (simulated peer)"
    );
    Transport::with_timing(peer, StdDelay, config.timing)
}

fn parse_u8(s: &str) -> Result<u8, String> {
    let word = parse_word(s)?;
    u8::try_from(word).map_err(|_| format!("`{s}` does not fit in 8 bits"))
}

fn parse_word(s: &str) -> Result<Word, String> {
    sim::loader::parse_word(s).ok_or_else(|| format!("`{s}` is not a 32-bit number"))
}

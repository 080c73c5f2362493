// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `photon-counts`
//! subcommands are contained in modules.
//!
//! Only 3 things should be public in this module: `PhotonCounts`,
//! `PhotonCounts::run`, and `PhotonCountsError`.

#[macro_use]
mod common;
mod ebounds;
mod error;
mod header;
mod info;
mod window;

pub use error::PhotonCountsError;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::debug;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "Inspect photon counts in FITS PHA/PHA2 spectral files"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct PhotonCounts {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    Info(info::InfoArgs),

    Header(header::HeaderArgs),

    Ebounds(ebounds::EboundsArgs),

    #[clap(
        about = "Select the photon counts of time bins inside a window relative to the trigger time."
    )]
    Window(window::WindowArgs),
}

impl PhotonCounts {
    pub fn run(self) -> Result<(), PhotonCountsError> {
        let GlobalArgs { verbosity } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");

        let sub_command = match &self.command {
            Command::Info(_) => "info",
            Command::Header(_) => "header",
            Command::Ebounds(_) => "ebounds",
            Command::Window(_) => "window",
        };
        debug!(
            "photon-counts {} {}",
            sub_command,
            env!("CARGO_PKG_VERSION")
        );
        display_build_info();

        match self.command {
            Command::Info(args) => args.run()?,
            Command::Header(args) => args.run()?,
            Command::Ebounds(args) => args.run()?,
            Command::Window(args) => {
                args.merge()?.parse()?.run()?;
            }
        }

        debug!("photon-counts {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write debug-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            debug!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => debug!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        debug!("            git head ref: {}", hr);
    }
    debug!("            {}", BUILT_TIME_UTC);
    debug!("         with compiler {}", RUSTC_VERSION);
}

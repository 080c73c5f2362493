// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Select the photon counts within a time window relative to the trigger.


use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{display_warnings, ArgFileTypes, InfoPrinter, Warn, ARG_FILE_HELP};
use crate::{
    constants::*,
    counts::{read_ebounds, CountsError, SpectrumLayout, TimeWindow, WindowCounts},
    fits::{FitsError, SpectralFile},
    PhotonCountsError,
};

lazy_static::lazy_static! {
    static ref START_HELP: String =
        format!("The start of the time window, relative to the trigger time [s]. Bins at exactly this time are excluded. Default: {DEFAULT_WINDOW_START}");

    static ref END_HELP: String =
        format!("The end of the time window, relative to the trigger time [s]. Bins at exactly this time are excluded. Default: {DEFAULT_WINDOW_END}");

    static ref SPECTRUM_EXTENSION_HELP: String =
        format!("The extension holding the time bins. Default: {SPECTRUM_EXTENSION}");

    static ref TIME_COLUMN_HELP: String =
        format!("The column with the time of each bin. Default: {TIME_COLUMN}");

    static ref COUNTS_COLUMN_HELP: String =
        format!("The column with the per-channel counts of each bin. Default: {COUNTS_COLUMN}");

    static ref TRIGGER_TIME_KEY_HELP: String =
        format!("The primary header key with the trigger time. Default: {TRIGGER_TIME_KEY}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct WindowArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The spectral (PHA/PHA2) fits file to read.
    #[clap(short, long, parse(from_os_str))]
    pub(super) data: Option<PathBuf>,

    #[clap(long, help = START_HELP.as_str(), allow_hyphen_values = true)]
    pub(super) start: Option<f64>,

    #[clap(long, help = END_HELP.as_str(), allow_hyphen_values = true)]
    pub(super) end: Option<f64>,

    #[clap(long, help = SPECTRUM_EXTENSION_HELP.as_str(), help_heading = "FILE LAYOUT")]
    pub(super) spectrum_extension: Option<String>,

    #[clap(long, help = TIME_COLUMN_HELP.as_str(), help_heading = "FILE LAYOUT")]
    pub(super) time_column: Option<String>,

    #[clap(long, help = COUNTS_COLUMN_HELP.as_str(), help_heading = "FILE LAYOUT")]
    pub(super) counts_column: Option<String>,

    #[clap(long, help = TRIGGER_TIME_KEY_HELP.as_str(), help_heading = "FILE LAYOUT")]
    pub(super) trigger_time_key: Option<String>,

    /// Also print the total counts of each selected time bin.
    #[clap(long)]
    #[serde(default)]
    pub(super) per_bin: bool,

    /// Write the selected counts to this file. Supported formats: toml, json
    #[clap(short, long, parse(from_os_str))]
    pub(super) output: Option<PathBuf>,
}

impl WindowArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<WindowArgs, PhotonCountsError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let WindowArgs {
                args_file: _,
                data,
                start,
                end,
                spectrum_extension,
                time_column,
                counts_column,
                trigger_time_key,
                per_bin,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(WindowArgs {
                args_file: None,
                data: cli_args.data.or(data),
                start: cli_args.start.or(start),
                end: cli_args.end.or(end),
                spectrum_extension: cli_args.spectrum_extension.or(spectrum_extension),
                time_column: cli_args.time_column.or(time_column),
                counts_column: cli_args.counts_column.or(counts_column),
                trigger_time_key: cli_args.trigger_time_key.or(trigger_time_key),
                per_bin: cli_args.per_bin || per_bin,
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Make sense of the (merged) arguments.
    pub(super) fn parse(self) -> Result<WindowParams, WindowArgsError> {
        trace!("{:#?}", self);

        let Self {
            args_file: _,
            data,
            start,
            end,
            spectrum_extension,
            time_column,
            counts_column,
            trigger_time_key,
            per_bin,
            output,
        } = self;

        let file = data.ok_or(WindowArgsError::NoData)?;
        let window = TimeWindow {
            start: start.unwrap_or(DEFAULT_WINDOW_START),
            end: end.unwrap_or(DEFAULT_WINDOW_END),
        };
        if window.start.is_nan() || window.end.is_nan() {
            return Err(WindowArgsError::NanWindow);
        }

        let default_layout = SpectrumLayout::default();
        let layout = SpectrumLayout {
            spectrum_extension: spectrum_extension.unwrap_or(default_layout.spectrum_extension),
            time_column: time_column.unwrap_or(default_layout.time_column),
            counts_column: counts_column.unwrap_or(default_layout.counts_column),
            trigger_time_key: trigger_time_key.unwrap_or(default_layout.trigger_time_key),
        };

        let output = match output {
            None => None,
            Some(output) => match ArgFileTypes::from_path(&output) {
                Some(output_type) => Some((output, output_type)),
                None => return Err(WindowArgsError::OutputType(output)),
            },
        };

        Ok(WindowParams {
            file,
            window,
            layout,
            per_bin,
            output,
        })
    }
}

#[derive(Error, Debug)]
pub(crate) enum WindowArgsError {
    #[error("No spectral file was supplied; use --data")]
    NoData,

    #[error("The time window's start and end must be numbers")]
    NanWindow,

    #[error("Output file '{}' doesn't have a recognised file extension! Valid extensions are: toml, json", .0.display())]
    OutputType(PathBuf),
}

/// Everything needed to select counts in a time window.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct WindowParams {
    pub(super) file: PathBuf,
    pub(super) window: TimeWindow,
    pub(super) layout: SpectrumLayout,
    pub(super) per_bin: bool,
    pub(super) output: Option<(PathBuf, ArgFileTypes)>,
}

/// The serialised form of [`WindowCounts`].
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(super) struct WindowOutput {
    pub(super) file: String,
    pub(super) trigger_time: f64,
    pub(super) total_rows: usize,
    pub(super) num_channels: usize,
    pub(super) total_counts: f64,
    pub(super) rows: Vec<usize>,
    pub(super) relative_times: Vec<f64>,
    /// Counts of each channel, summed over the selected time bins.
    pub(super) spectrum: Vec<f64>,
    /// Counts of each selected time bin and channel.
    pub(super) counts: Vec<Vec<f64>>,
    pub(super) window: TimeWindow,
}

impl WindowOutput {
    pub(super) fn new(file: &Path, result: &WindowCounts) -> WindowOutput {
        WindowOutput {
            file: file.display().to_string(),
            trigger_time: result.trigger_time,
            total_rows: result.total_rows,
            num_channels: result.num_channels(),
            total_counts: result.total_counts(),
            rows: result.rows.clone(),
            relative_times: result.relative_times.clone(),
            spectrum: result.spectrum().to_vec(),
            counts: result.counts.outer_iter().map(|row| row.to_vec()).collect(),
            window: result.window,
        }
    }
}

impl WindowParams {
    pub(super) fn run(&self) -> Result<WindowCounts, PhotonCountsError> {
        let mut file = SpectralFile::open(&self.file)?;
        let result = self.layout.extract_window(&mut file, self.window)?;

        // The energy bounds are only used for a consistency check.
        match read_ebounds(&mut file) {
            Ok(ebounds) => {
                if ebounds.len() != result.num_channels() {
                    format!(
                        "The ebounds extension has {} channels, but the counts have {}",
                        ebounds.len(),
                        result.num_channels()
                    )
                    .warn();
                }
            }
            Err(CountsError::Fits(FitsError::MissingExtension { .. })) => {
                debug!("No ebounds extension; not checking the number of channels");
            }
            Err(e) => format!("Couldn't read the energy bounds: {e}").warn(),
        }
        display_warnings();

        let mut printer = InfoPrinter::new(format!("Time window {}", self.window).into());
        printer.push_block(vec![
            format!("{}", self.file.display()).into(),
            format!("Trigger time: {}", result.trigger_time).into(),
        ]);
        printer.push_line(
            format!(
                "{} of {} time bins selected, {} channels",
                result.rows.len(),
                result.total_rows,
                result.num_channels()
            )
            .into(),
        );
        if self.per_bin {
            let block = result
                .rows
                .iter()
                .zip(result.relative_times.iter())
                .zip(result.light_curve().iter())
                .map(|((row, time), total)| {
                    format!("bin {row:>5} at {time:>+12.4} s: {total} counts").into()
                })
                .collect::<Vec<Cow<'static, str>>>();
            if !block.is_empty() {
                printer.push_block(block);
            }
        }
        printer.push_line(format!("Total counts: {}", result.total_counts()).into());
        printer.display();

        if let Some((output, output_type)) = &self.output {
            let serialised = WindowOutput::new(&self.file, &result);
            let contents = match output_type {
                ArgFileTypes::Toml => toml::to_string(&serialised)?,
                ArgFileTypes::Json => serde_json::to_string_pretty(&serialised)?,
            };
            let mut f = BufWriter::new(File::create(output)?);
            f.write_all(contents.as_bytes())?;
            f.flush()?;
            info!("Wrote {}", output.display());
        }

        Ok(result)
    }
}

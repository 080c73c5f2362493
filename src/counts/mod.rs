// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Extract photon counts within a time window relative to a trigger.
//!
//! The "spectrum" extension of a PHA/PHA2 file holds one row per time bin;
//! each row has a time and the counts of every energy channel. The primary
//! header holds the trigger time. Times are made relative to the trigger and
//! the rows inside an open interval are kept:
//!
//! ```text
//! read (time, counts, TRIGTIME) -> relative time -> mask -> masked counts
//! ```

mod ebounds;
mod error;

pub use ebounds::{read_ebounds, EnergyBounds};
pub use error::CountsError;

use std::{cmp::Ordering, fmt::Display};

use log::{debug, trace, warn};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{constants::*, fits::SpectralFile};

/// Time bins with their times shifted so that the trigger is at zero. This is
/// kept separate from the absolute times read from the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeTime {
    /// The trigger time that was subtracted.
    pub trigger_time: f64,
    /// One value per time bin, in file order.
    pub times: Vec<f64>,
}

impl RelativeTime {
    pub fn from_absolute(absolute_times: &[f64], trigger_time: f64) -> RelativeTime {
        RelativeTime {
            trigger_time,
            times: absolute_times.iter().map(|t| t - trigger_time).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// An open interval of trigger-relative time [s]. Times equal to either end
/// are outside of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_WINDOW_START,
            end: DEFAULT_WINDOW_END,
        }
    }
}

impl TimeWindow {
    pub fn contains(&self, time: f64) -> bool {
        self.start < time && time < self.end
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Where the time, counts and trigger time live in a file. The default is the
/// standard PHA/PHA2 layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumLayout {
    pub spectrum_extension: String,
    pub time_column: String,
    pub counts_column: String,
    pub trigger_time_key: String,
}

impl Default for SpectrumLayout {
    fn default() -> Self {
        Self {
            spectrum_extension: SPECTRUM_EXTENSION.to_string(),
            time_column: TIME_COLUMN.to_string(),
            counts_column: COUNTS_COLUMN.to_string(),
            trigger_time_key: TRIGGER_TIME_KEY.to_string(),
        }
    }
}

/// Counts that fall inside a [`TimeWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCounts {
    pub window: TimeWindow,
    pub trigger_time: f64,
    /// The number of time bins in the file, before masking.
    pub total_rows: usize,
    /// The indices of the time bins inside the window.
    pub rows: Vec<usize>,
    /// The trigger-relative times of the selected time bins.
    pub relative_times: Vec<f64>,
    /// The selected counts, with dimensions [time bin][channel].
    pub counts: Array2<f64>,
}

impl WindowCounts {
    pub fn num_channels(&self) -> usize {
        self.counts.len_of(Axis(1))
    }

    /// The counts of each channel, summed over the selected time bins.
    pub fn spectrum(&self) -> Array1<f64> {
        self.counts.sum_axis(Axis(0))
    }

    /// The counts of each selected time bin, summed over channels.
    pub fn light_curve(&self) -> Array1<f64> {
        self.counts.sum_axis(Axis(1))
    }

    pub fn total_counts(&self) -> f64 {
        self.counts.sum()
    }
}

impl SpectrumLayout {
    /// Read the counts of every time bin. The result has one row per time bin
    /// and one column per energy channel.
    pub fn load_counts(&self, file: &mut SpectralFile) -> Result<Array2<f64>, CountsError> {
        let column = file.read_column(&self.spectrum_extension, &self.counts_column)?;
        debug!(
            "Read {} time bins of {} channels from column '{}'",
            column.num_rows, column.repeat, column.name
        );
        let num_elements = column.data.len();
        Array2::from_shape_vec((column.num_rows, column.repeat), column.data).map_err(|_| {
            CountsError::LengthMismatch {
                what: "counts column",
                expected: column.num_rows * column.repeat,
                got: num_elements,
            }
        })
    }

    /// Read the time of every time bin, without any shifting.
    pub fn load_absolute_time(&self, file: &mut SpectralFile) -> Result<Vec<f64>, CountsError> {
        let column = file.read_column(&self.spectrum_extension, &self.time_column)?;
        if column.data.len() != column.num_rows {
            return Err(CountsError::LengthMismatch {
                what: "time column",
                expected: column.num_rows,
                got: column.data.len(),
            });
        }
        Ok(column.data)
    }

    pub fn load_trigger_time(&self, file: &mut SpectralFile) -> Result<f64, CountsError> {
        let trigger_time = file.read_numeric_key(PRIMARY_EXTENSION, &self.trigger_time_key)?;
        trace!("{} = {trigger_time}", self.trigger_time_key);
        Ok(trigger_time)
    }

    /// Read the time of every time bin and make it relative to the trigger
    /// time.
    pub fn load_time(&self, file: &mut SpectralFile) -> Result<RelativeTime, CountsError> {
        let absolute_times = self.load_absolute_time(file)?;
        let trigger_time = self.load_trigger_time(file)?;
        Ok(RelativeTime::from_absolute(&absolute_times, trigger_time))
    }

    /// Read a file and keep only the counts inside the time window.
    pub fn extract_window(
        &self,
        file: &mut SpectralFile,
        window: TimeWindow,
    ) -> Result<WindowCounts, CountsError> {
        let relative_time = self.load_time(file)?;
        let counts = self.load_counts(file)?;
        if relative_time.len() != counts.len_of(Axis(0)) {
            return Err(CountsError::LengthMismatch {
                what: "time and counts columns",
                expected: counts.len_of(Axis(0)),
                got: relative_time.len(),
            });
        }
        if window.start.partial_cmp(&window.end) != Some(Ordering::Less) {
            warn!("The time window {window} is empty; no time bins can be selected");
        }

        let mask = select_window(&relative_time.times, window.start, window.end);
        let selected = apply_mask(counts.view(), &mask)?;
        let rows: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
            .collect();
        let relative_times = rows.iter().map(|&i| relative_time.times[i]).collect();
        debug!(
            "{} of {} time bins are within {window}",
            rows.len(),
            relative_time.len()
        );

        Ok(WindowCounts {
            window,
            trigger_time: relative_time.trigger_time,
            total_rows: relative_time.len(),
            rows,
            relative_times,
            counts: selected,
        })
    }
}

/// Read the counts of every time bin from the standard "spectrum" extension.
pub fn load_counts(file: &mut SpectralFile) -> Result<Array2<f64>, CountsError> {
    SpectrumLayout::default().load_counts(file)
}

/// Read the time of every time bin from the standard "spectrum" extension and
/// subtract the primary header's TRIGTIME.
pub fn load_time(file: &mut SpectralFile) -> Result<RelativeTime, CountsError> {
    SpectrumLayout::default().load_time(file)
}

/// Read a file with the standard layout and keep only the counts inside the
/// time window.
pub fn extract_window(
    file: &mut SpectralFile,
    window: TimeWindow,
) -> Result<WindowCounts, CountsError> {
    SpectrumLayout::default().extract_window(file, window)
}

/// `true` for each time strictly between `lo` and `hi`. NaN times are never
/// selected.
pub fn select_window(relative_time: &[f64], lo: f64, hi: f64) -> Vec<bool> {
    let window = TimeWindow { start: lo, end: hi };
    relative_time.iter().map(|&t| window.contains(t)).collect()
}

/// Keep the rows of `counts` whose mask entry is `true`, in their original
/// order.
pub fn apply_mask(counts: ArrayView2<f64>, mask: &[bool]) -> Result<Array2<f64>, CountsError> {
    let num_rows = counts.len_of(Axis(0));
    if mask.len() != num_rows {
        return Err(CountsError::LengthMismatch {
            what: "time mask",
            expected: num_rows,
            got: mask.len(),
        });
    }
    let indices: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| m.then_some(i))
        .collect();
    Ok(counts.select(Axis(0), &indices))
}

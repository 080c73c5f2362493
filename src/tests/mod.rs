// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpful functions for tests; synthetic spectral files are written with
//! `fitsio` into temporary directories.

use std::path::Path;

use fitsio::{
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};
use ndarray::prelude::*;

pub(crate) const NUM_CHANNELS: usize = 128;

/// The trigger time that ends up in the primary header.
pub(crate) enum TriggerTime {
    Number(f64),
    Text(&'static str),
}

pub(crate) struct SyntheticSpectrum {
    pub(crate) times: Vec<f64>,
    /// Rows are time bins, columns are channels.
    pub(crate) counts: Array2<i32>,
    pub(crate) trigger_time: Option<TriggerTime>,
    pub(crate) write_spectrum: bool,
    pub(crate) write_ebounds: bool,
}

impl Default for SyntheticSpectrum {
    /// The scenario of six time bins around a trigger at t = 5, with 128
    /// channels. Each count encodes its row and channel.
    fn default() -> Self {
        let times = vec![-2.0, 0.0, 3.0, 9.0, 10.0, 15.0];
        let counts = Array2::from_shape_fn((times.len(), NUM_CHANNELS), |(row, chan)| {
            (row * 1000 + chan) as i32
        });
        Self {
            times,
            counts,
            trigger_time: Some(TriggerTime::Number(5.0)),
            write_spectrum: true,
            write_ebounds: true,
        }
    }
}

pub(crate) fn write_spectral_file(file: &Path, spectrum: &SyntheticSpectrum) {
    let mut fptr = FitsFile::create(file).open().unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    hdu.write_key(&mut fptr, "TELESCOP", "TEST").unwrap();
    match spectrum.trigger_time {
        Some(TriggerTime::Number(t)) => hdu.write_key(&mut fptr, "TRIGTIME", t).unwrap(),
        Some(TriggerTime::Text(t)) => hdu.write_key(&mut fptr, "TRIGTIME", t).unwrap(),
        None => (),
    }

    if spectrum.write_spectrum {
        let time_col = ColumnDescription::new("TIME")
            .with_type(ColumnDataType::Double)
            .create()
            .unwrap();
        let counts_col = ColumnDescription::new("COUNTS")
            .with_type(ColumnDataType::Int)
            .that_repeats(spectrum.counts.len_of(Axis(1)))
            .create()
            .unwrap();
        let hdu = fptr
            .create_table("SPECTRUM", &[time_col, counts_col])
            .unwrap();
        hdu.write_col(&mut fptr, "TIME", &spectrum.times).unwrap();
        let flat_counts: Vec<i32> = spectrum.counts.iter().copied().collect();
        hdu.write_col(&mut fptr, "COUNTS", &flat_counts).unwrap();
    }

    if spectrum.write_ebounds {
        let num_channels = spectrum.counts.len_of(Axis(1));
        let channel_col = ColumnDescription::new("CHANNEL")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap();
        let e_min_col = ColumnDescription::new("E_MIN")
            .with_type(ColumnDataType::Float)
            .create()
            .unwrap();
        let e_max_col = ColumnDescription::new("E_MAX")
            .with_type(ColumnDataType::Float)
            .create()
            .unwrap();
        let hdu = fptr
            .create_table("EBOUNDS", &[channel_col, e_min_col, e_max_col])
            .unwrap();
        let channels: Vec<i32> = (0..num_channels as i32).collect();
        let e_min: Vec<f32> = (0..num_channels).map(|i| 10.0 + i as f32).collect();
        let e_max: Vec<f32> = (0..num_channels).map(|i| 11.0 + i as f32).collect();
        hdu.write_col(&mut fptr, "CHANNEL", &channels).unwrap();
        hdu.write_col(&mut fptr, "E_MIN", &e_min).unwrap();
        hdu.write_col(&mut fptr, "E_MAX", &e_max).unwrap();
    }
}

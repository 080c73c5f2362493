// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The energy edges of each channel ("ebounds" extension).

use log::debug;

use super::CountsError;
use crate::{constants::*, fits::SpectralFile};

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyBounds {
    pub channels: Vec<i64>,
    /// The lower energy edge of each channel [keV].
    pub e_min: Vec<f64>,
    /// The upper energy edge of each channel [keV].
    pub e_max: Vec<f64>,
}

impl EnergyBounds {
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The lowest and highest energies covered by all channels. NaN edges are
    /// ignored.
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        let min = self
            .e_min
            .iter()
            .copied()
            .filter(|e| !e.is_nan())
            .reduce(f64::min)?;
        let max = self
            .e_max
            .iter()
            .copied()
            .filter(|e| !e.is_nan())
            .reduce(f64::max)?;
        Some((min, max))
    }
}

pub fn read_ebounds(file: &mut SpectralFile) -> Result<EnergyBounds, CountsError> {
    let channels = file.read_column(EBOUNDS_EXTENSION, CHANNEL_COLUMN)?;
    let e_min = file.read_column(EBOUNDS_EXTENSION, E_MIN_COLUMN)?;
    let e_max = file.read_column(EBOUNDS_EXTENSION, E_MAX_COLUMN)?;
    for (what, column) in [("E_MIN column", &e_min), ("E_MAX column", &e_max)] {
        if column.data.len() != channels.data.len() {
            return Err(CountsError::LengthMismatch {
                what,
                expected: channels.data.len(),
                got: column.data.len(),
            });
        }
    }
    debug!("Read energy bounds of {} channels", channels.data.len());

    Ok(EnergyBounds {
        channels: channels.data.into_iter().map(|c| c as i64).collect(),
        e_min: e_min.data,
        e_max: e_max.data,
    })
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print the energy bounds of each channel.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::PhotonCountsError;
use crate::{counts::read_ebounds, fits::SpectralFile};

/// Print the energy edges of each channel.
#[derive(Parser, Debug)]
pub(super) struct EboundsArgs {
    #[clap(name = "FILE", parse(from_os_str))]
    file: PathBuf,
}

impl EboundsArgs {
    pub(super) fn run(&self) -> Result<(), PhotonCountsError> {
        let mut file = SpectralFile::open(&self.file)?;
        let ebounds = read_ebounds(&mut file)?;

        info!("{:>7} {:>12} {:>12}", "CHANNEL", "E_MIN", "E_MAX");
        for ((channel, e_min), e_max) in ebounds
            .channels
            .iter()
            .zip(ebounds.e_min.iter())
            .zip(ebounds.e_max.iter())
        {
            info!("{channel:>7} {e_min:>12.4} {e_max:>12.4}");
        }
        match ebounds.energy_range() {
            Some((lo, hi)) => info!("{} channels covering {lo} to {hi}", ebounds.len()),
            None => info!("{} channels", ebounds.len()),
        }

        Ok(())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print the header of an extension.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::PhotonCountsError;
use crate::{
    constants::PRIMARY_EXTENSION,
    fits::{HeaderValue, SpectralFile},
};

/// Print every header card of an extension.
#[derive(Parser, Debug)]
pub(super) struct HeaderArgs {
    #[clap(name = "FILE", parse(from_os_str))]
    file: PathBuf,

    /// The name of the extension, e.g. "spectrum". Case-insensitive.
    #[clap(short, long, default_value = PRIMARY_EXTENSION)]
    extension: String,
}

impl HeaderArgs {
    pub(super) fn run(&self) -> Result<(), PhotonCountsError> {
        let mut file = SpectralFile::open(&self.file)?;
        let cards = file.header(&self.extension)?;

        info!("{} extension '{}':", self.file.display(), self.extension);
        for card in cards {
            let value = card.value.to_string();
            match (&card.value, card.comment.is_empty()) {
                (HeaderValue::Undefined, _) => info!("{:<8} {}", card.keyword, card.comment),
                (_, true) => info!("{:<8} = {value:>20}", card.keyword),
                (_, false) => info!("{:<8} = {value:>20} / {}", card.keyword, card.comment),
            }
        }

        Ok(())
    }
}

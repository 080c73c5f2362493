// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! List the extensions of a spectral fits file.

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;

use super::{common::InfoPrinter, PhotonCountsError};
use crate::fits::{ExtensionKind, SpectralFile};

/// List the extensions (HDUs) of a fits file and their columns.
#[derive(Parser, Debug)]
pub(super) struct InfoArgs {
    #[clap(name = "FILE", parse(from_os_str))]
    file: PathBuf,
}

impl InfoArgs {
    pub(super) fn run(&self) -> Result<(), PhotonCountsError> {
        let mut file = SpectralFile::open(&self.file)?;
        let extensions = file.extensions()?;

        let mut printer = InfoPrinter::new(format!("{}", self.file.display()).into());
        for ext in extensions {
            let name = ext.name.as_deref().unwrap_or("<unnamed>");
            let block = match ext.kind {
                ExtensionKind::Image { shape } if shape.is_empty() => {
                    vec![format!("{:>3} {name}: empty image", ext.index).into()]
                }
                ExtensionKind::Image { shape } => vec![format!(
                    "{:>3} {name}: image {}",
                    ext.index,
                    shape.iter().join("x")
                )
                .into()],
                ExtensionKind::Table { num_rows, columns } => vec![
                    format!("{:>3} {name}: table with {num_rows} rows", ext.index).into(),
                    format!("    columns: {}", columns.iter().join(", ")).into(),
                ],
                ExtensionKind::Other => vec![format!("{:>3} {name}", ext.index).into()],
            };
            printer.push_block(block);
        }
        printer.display();

        Ok(())
    }
}

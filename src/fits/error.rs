// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading in spectral fits files.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitsError {
    /// Error when opening a fits file.
    #[error(
        "{source_file}:{source_line}:{source_column}: Couldn't open {fits_filename}: {fits_error}"
    )]
    Open {
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// The requested extension (HDU) isn't in the file.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename}: Couldn't find extension '{extension}'")]
    MissingExtension {
        extension: Box<str>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// The requested column isn't in the extension's table.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} extension '{extension}': Couldn't find column '{column}'")]
    MissingColumn {
        column: Box<str>,
        extension: Box<str>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// Error describing a key that couldn't be found in a fits header.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} extension '{extension}': Couldn't find key {key}")]
    MissingHeaderKey {
        key: Box<str>,
        extension: Box<str>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// A key or column exists, but its value isn't numeric.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} extension '{extension}': {name} is not numeric ({found})")]
    TypeMismatch {
        name: Box<str>,
        found: Box<str>,
        extension: Box<str>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// Columns were requested from an extension that isn't a table.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} extension '{extension}': Tried to use as a table, but not a table")]
    NotTable {
        extension: Box<str>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// A generic error associated with the fitsio crate.
    #[error(
        "{source_file}:{source_line}:{source_column}: {fits_filename} extension '{extension}': {fits_error}"
    )]
    Fitsio {
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
        extension: Box<str>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },
}

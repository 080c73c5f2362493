// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all photon-counts command-line errors. This should be the
//! *only* error enum that the binary displays.

use thiserror::Error;

use super::window::WindowArgsError;
use crate::{counts::CountsError, fits::FitsError};

#[derive(Error, Debug)]
pub enum PhotonCountsError {
    /// The file doesn't have something we need, or it's the wrong type.
    #[error("{0}\n\nThis may not be a PHA/PHA2 spectral file; 'photon-counts info <FILE>' lists what it contains.")]
    SpectralFile(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv).")]
    Cfitsio(String),

    /// The file's data is inconsistent.
    #[error("{0}")]
    Counts(String),

    /// An error related to the window subcommand's arguments.
    #[error("{0}")]
    WindowArgs(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<FitsError> for PhotonCountsError {
    fn from(e: FitsError) -> Self {
        match e {
            FitsError::MissingExtension { .. }
            | FitsError::MissingColumn { .. }
            | FitsError::MissingHeaderKey { .. }
            | FitsError::TypeMismatch { .. }
            | FitsError::NotTable { .. } => Self::SpectralFile(e.to_string()),
            FitsError::Open { .. } | FitsError::Fitsio { .. } => Self::Cfitsio(e.to_string()),
        }
    }
}

impl From<CountsError> for PhotonCountsError {
    fn from(e: CountsError) -> Self {
        match e {
            CountsError::Fits(e) => Self::from(e),
            CountsError::LengthMismatch { .. } => Self::Counts(e.to_string()),
        }
    }
}

impl From<WindowArgsError> for PhotonCountsError {
    fn from(e: WindowArgsError) -> Self {
        Self::WindowArgs(e.to_string())
    }
}

impl From<std::io::Error> for PhotonCountsError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<serde_json::Error> for PhotonCountsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for PhotonCountsError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

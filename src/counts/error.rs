// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with extracting photon counts.

use thiserror::Error;

use crate::fits::FitsError;

#[derive(Error, Debug)]
pub enum CountsError {
    #[error("{what}: expected {expected} rows, but got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Fits(#[from] FitsError),
}

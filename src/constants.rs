// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Extension, column and keyword names are matched case-insensitively, so the
lower-case spellings here also find e.g. "SPECTRUM" and "COUNTS".
 */

/// The HDU holding the observation-wide header (including the trigger time).
/// This is always HDU 0, regardless of its EXTNAME.
pub const PRIMARY_EXTENSION: &str = "primary";

/// The binary table with one row per time bin.
pub const SPECTRUM_EXTENSION: &str = "spectrum";

/// The binary table mapping channels to energies.
pub const EBOUNDS_EXTENSION: &str = "ebounds";

/// The column of [`SPECTRUM_EXTENSION`] with the time of each bin.
pub const TIME_COLUMN: &str = "time";

/// The column of [`SPECTRUM_EXTENSION`] with the per-channel counts of each
/// bin.
pub const COUNTS_COLUMN: &str = "counts";

/// The primary header key holding the trigger time, in the same units and
/// epoch as [`TIME_COLUMN`].
pub const TRIGGER_TIME_KEY: &str = "TRIGTIME";

/// Columns of [`EBOUNDS_EXTENSION`].
pub const CHANNEL_COLUMN: &str = "CHANNEL";
pub const E_MIN_COLUMN: &str = "E_MIN";
pub const E_MAX_COLUMN: &str = "E_MAX";

/// The default start of the time window, relative to the trigger time [s].
pub const DEFAULT_WINDOW_START: f64 = 0.0;

/// The default end of the time window, relative to the trigger time [s].
pub const DEFAULT_WINDOW_END: f64 = 10.0;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Inspect photon counts in FITS PHA/PHA2 spectral files.

Open a file, read the per-time-bin counts of each energy channel, make the
times relative to the trigger time and keep the counts inside a time window:

```no_run
use photon_counts::{extract_window, SpectralFile, TimeWindow};

let mut file = SpectralFile::open("grb.pha2")?;
let result = extract_window(&mut file, TimeWindow { start: 0.0, end: 10.0 })?;
println!("{} of {} time bins", result.rows.len(), result.total_rows);
# Ok::<(), photon_counts::CountsError>(())
```
 */

pub mod constants;
pub mod counts;
pub mod fits;

mod cli;

#[cfg(test)]
mod tests;

// Re-exports.
pub use cli::{PhotonCounts, PhotonCountsError};
pub use counts::{
    apply_mask, extract_window, load_counts, load_time, read_ebounds, select_window,
    CountsError, EnergyBounds, RelativeTime, SpectrumLayout, TimeWindow, WindowCounts,
};
pub use fits::{FitsError, SpectralFile};

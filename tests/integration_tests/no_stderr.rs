// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, photon_counts, write_pha2};

#[test]
fn test_subcommands_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, true);
    let file = format!("{}", file.display());

    for args in [
        vec!["info", &file],
        vec!["header", &file],
        vec!["ebounds", &file],
        vec!["window", "--data", &file],
        vec!["-vv", "window", "--data", &file, "--per-bin"],
    ] {
        let cmd = photon_counts().args(&args).ok();
        assert!(cmd.is_ok(), "{args:?} failed: {}", cmd.err().unwrap());
        let (_, stderr) = get_cmd_output(cmd);
        assert!(stderr.is_empty(), "{args:?} stderr wasn't empty: {stderr}");
    }
}

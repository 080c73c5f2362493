// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for the info, header and ebounds subcommands.

use tempfile::TempDir;

use crate::{get_cmd_output, photon_counts, write_pha2, NUM_CHANNELS};

#[test]
fn test_info() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, true);

    let cmd = photon_counts()
        .args(["info", &format!("{}", file.display())])
        .ok();
    assert!(cmd.is_ok(), "info failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("PRIMARY"), "{stdout}");
    assert!(stdout.contains("SPECTRUM: table with 6 rows"), "{stdout}");
    assert!(stdout.contains("columns: TIME, COUNTS"), "{stdout}");
    assert!(stdout.contains("EBOUNDS: table with 128 rows"), "{stdout}");
}

#[test]
fn test_header() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, true);

    let cmd = photon_counts()
        .args(["header", &format!("{}", file.display())])
        .ok();
    assert!(cmd.is_ok(), "header failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("TRIGTIME"), "{stdout}");
    assert!(stdout.contains("'COUNT'"), "{stdout}");

    #[rustfmt::skip]
    let cmd = photon_counts()
        .args([
            "header", &format!("{}", file.display()),
            "--extension", "spectrum",
        ])
        .ok();
    assert!(cmd.is_ok(), "header failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("TTYPE1"), "{stdout}");
    assert!(stdout.contains("'TIME'"), "{stdout}");
}

#[test]
fn test_header_missing_extension() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, false);

    #[rustfmt::skip]
    let cmd = photon_counts()
        .args([
            "header", &format!("{}", file.display()),
            "--extension", "spectrum",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Couldn't find extension 'spectrum'"),
        "{stderr}"
    );
}

#[test]
fn test_ebounds() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, true);

    let cmd = photon_counts()
        .args(["ebounds", &format!("{}", file.display())])
        .ok();
    assert!(cmd.is_ok(), "ebounds failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("CHANNEL"), "{stdout}");
    assert!(
        stdout.contains(&format!("{NUM_CHANNELS} channels covering 0 to 1024")),
        "{stdout}"
    );
}

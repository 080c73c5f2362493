// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for the window subcommand.

use std::fs::read_to_string;

use approx::assert_abs_diff_eq;
use indoc::formatdoc;
use tempfile::TempDir;

use crate::{count, get_cmd_output, photon_counts, write_pha2, NUM_CHANNELS, TRIGGER_TIME};

#[test]
fn test_window_json_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    let output = tmp_dir.path().join("window.json");
    write_pha2(&file, true);

    #[rustfmt::skip]
    let cmd = photon_counts()
        .args([
            "window",
            "--data", &format!("{}", file.display()),
            "--start", "-6",
            "--end", "4.5",
            "--per-bin",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "window failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("3 of 6 time bins selected"), "{stdout}");

    let json: serde_json::Value = serde_json::from_str(&read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["total_rows"], 6);
    assert_eq!(json["num_channels"], NUM_CHANNELS);
    assert_eq!(json["rows"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["relative_times"], serde_json::json!([-5.0, -2.0, 4.0]));
    assert_abs_diff_eq!(json["trigger_time"].as_f64().unwrap(), TRIGGER_TIME);
    let counts = json["counts"].as_array().unwrap();
    assert_eq!(counts.len(), 3);
    for (selected, row) in counts.iter().zip([1, 2, 3]) {
        let selected = selected.as_array().unwrap();
        assert_eq!(selected.len(), NUM_CHANNELS);
        for (chan, c) in selected.iter().enumerate() {
            assert_abs_diff_eq!(c.as_f64().unwrap(), count(row, chan));
        }
    }
    let spectrum = json["spectrum"].as_array().unwrap();
    assert_abs_diff_eq!(
        spectrum[10].as_f64().unwrap(),
        count(1, 10) + count(2, 10) + count(3, 10)
    );
}

#[test]
fn test_window_boundaries_are_excluded() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, true);

    // Relative times are -7, -5, -2, 4, 5, 10; -5 and 5 sit on the edges.
    #[rustfmt::skip]
    let cmd = photon_counts()
        .args([
            "window",
            "--data", &format!("{}", file.display()),
            "--start", "-5",
            "--end", "5",
        ])
        .ok();
    assert!(cmd.is_ok(), "window failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("2 of 6 time bins selected"), "{stdout}");
}

#[test]
fn test_window_empty() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    write_pha2(&file, true);

    #[rustfmt::skip]
    let cmd = photon_counts()
        .args([
            "window",
            "--data", &format!("{}", file.display()),
            "--start", "4",
            "--end", "4",
        ])
        .ok();
    assert!(cmd.is_ok(), "window failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("0 of 6 time bins selected"), "{stdout}");
    assert!(stdout.contains("Total counts: 0"), "{stdout}");
    assert_eq!(stdout.matches("is empty").count(), 1, "{stdout}");
}

#[test]
fn test_window_args_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("grb.pha2");
    let output = tmp_dir.path().join("window.toml");
    let args_file = tmp_dir.path().join("args.toml");
    write_pha2(&file, true);
    std::fs::write(
        &args_file,
        formatdoc! {r#"
            data = "{}"
            start = 0.0
            end = 100.0
            output = "{}"
        "#, file.display(), output.display()},
    )
    .unwrap();

    // The CLI end overrides the file's.
    #[rustfmt::skip]
    let cmd = photon_counts()
        .args([
            "window", &format!("{}", args_file.display()),
            "--end", "10",
        ])
        .ok();
    assert!(cmd.is_ok(), "window failed: {}", cmd.err().unwrap());

    let written: toml::Value = toml::from_str(&read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written["rows"].as_array().unwrap(),
        &[toml::Value::Integer(3), toml::Value::Integer(4)]
    );
    assert_eq!(written["window"]["end"].as_float(), Some(10.0));
}

#[test]
fn test_window_missing_spectrum() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("trigger_only.fits");
    write_pha2(&file, false);

    let cmd = photon_counts()
        .args(["window", "--data", &format!("{}", file.display())])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Couldn't find extension 'spectrum'"),
        "{stderr}"
    );
    assert!(!stdout.contains("time bins selected"), "{stdout}");
}

#[test]
fn test_window_needs_data() {
    let cmd = photon_counts().args(["window", "--start", "0"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--data"), "{stderr}");
}

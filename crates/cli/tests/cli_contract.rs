use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

fn mapmeasure(data_dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("mapmeasure-cli");
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn length_prints_kilometers_for_one_degree() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["length", "0,0", "0,1"])
        .assert()
        .success()
        .stdout("111.20 km\n");
}

#[test]
fn length_honours_distance_unit_flag() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["length", "--distance-unit", "miles", "0,0", "0,1"])
        .assert()
        .success()
        .stdout("69.09 miles\n");
}

#[test]
fn length_accepts_western_points() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["length", "-1,0", "0,0"])
        .assert()
        .success()
        .stdout("111.20 km\n");
}

#[test]
fn length_requires_two_points() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path()).args(["length", "0,0"]).assert().failure();
}

#[test]
fn azimuth_due_north() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["azimuth", "0,0", "0,1"])
        .assert()
        .success()
        .stdout("0.00°\n");
}

#[test]
fn azimuth_due_east_in_radians() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["azimuth", "--angle-unit", "radians", "0,0", "1,0"])
        .assert()
        .success()
        .stdout("1.57 rad\n");
}

#[test]
fn azimuth_due_west_with_negative_longitude() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["azimuth", "0,0", "-1,0"])
        .assert()
        .success()
        .stdout("270.00°\n");
}

#[test]
fn azimuth_due_south_with_negative_latitude() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["azimuth", "--angle-unit", "radians", "-1,-1", "-1,-2"])
        .assert()
        .success()
        .stdout("3.14 rad\n");
}

#[test]
fn azimuth_rejects_nan() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["azimuth", "0,0", "NaN,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a finite number"));
}

#[test]
fn angle_right_turn() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["angle", "0,0", "0,1", "1,1"])
        .assert()
        .success()
        .stdout("90.00°\n");
}

#[test]
fn angle_with_negative_vertex() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["angle", "-1,0", "0,0", "1,1"])
        .assert()
        .success()
        .stdout("225.00°\n");
}

#[test]
fn angle_with_two_points_is_zero() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path()).args(["angle", "0,0", "0,1"]).assert().success().stdout("0\n");
}

#[test]
fn line_prints_label() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["line", "0,0", "0,1"])
        .assert()
        .success()
        .stdout("111.20 km | Azimuth: 0.00°\n");
}

#[test]
fn line_between_negative_points() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["line", "-1,0", "0,0"])
        .assert()
        .success()
        .stdout("111.20 km | Azimuth: 90.00°\n");
}

#[test]
fn line_emits_stable_json_contract() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    let output = mapmeasure(temp.path())
        .args(["line", "--json", "0,0", "0,1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");

    insta::assert_json_snapshot!("cli_line_one_degree_north", value);
}

#[test]
fn units_set_persists_between_runs() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["units", "set", "--distance-unit", "miles", "--angle-unit", "rad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance_unit: miles"));

    assert!(temp.path().join("preferences.json").exists());

    mapmeasure(temp.path())
        .args(["units", "show"])
        .assert()
        .success()
        .stdout("distance_unit: miles\nangle_unit: radians\n");

    mapmeasure(temp.path())
        .args(["azimuth", "0,0", "0,1"])
        .assert()
        .success()
        .stdout("0.00 rad\n");

    // Flags still win over the stored preference
    mapmeasure(temp.path())
        .args(["azimuth", "--angle-unit", "degrees", "0,0", "0,1"])
        .assert()
        .success()
        .stdout("0.00°\n");
}

#[test]
fn units_show_defaults_without_file() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["units", "show"])
        .assert()
        .success()
        .stdout("distance_unit: meters\nangle_unit: degrees\n");
}

#[test]
fn units_set_requires_a_flag() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["units", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to set"));
}

#[test]
fn unknown_unit_is_rejected() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    mapmeasure(temp.path())
        .args(["length", "--distance-unit", "furlongs", "0,0", "0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown distance unit 'furlongs'"));
}

#[test]
fn units_show_fails_on_corrupt_preferences() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    std::fs::write(temp.path().join("preferences.json"), "not json").expect("write should succeed");

    mapmeasure(temp.path())
        .args(["units", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read preferences"));
}

#[test]
fn version_prints_package_version() {
    cargo_bin_cmd!("mapmeasure-cli")
        .arg("version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

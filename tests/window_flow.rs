use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn finsight_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("finsight"))
}

fn run_ok(home: &tempfile::TempDir, args: &[&str]) {
    let mut cmd = finsight_cmd();
    cmd.env("FINSIGHT_HOME", home.path());
    cmd.args(args);
    cmd.assert().success();
}

fn run_ok_out(home: &tempfile::TempDir, args: &[&str]) -> String {
    let mut cmd = finsight_cmd();
    cmd.env("FINSIGHT_HOME", home.path());
    cmd.args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).expect("utf8 stdout")
}

fn login(home: &tempfile::TempDir) {
    run_ok(home, &["register", "maria", "--password", "hunter22"]);
    run_ok(home, &["login", "maria", "--password", "hunter22"]);
}

#[test]
fn custom_range_bounds_are_inclusive() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(
        &home,
        &["add", "income", "10", "Salary", "--date", "2026-03-01"],
    );
    run_ok(
        &home,
        &["add", "income", "20", "Salary", "--date", "2026-03-15"],
    );
    run_ok(
        &home,
        &["add", "income", "40", "Salary", "--date", "2026-03-31"],
    );
    run_ok(
        &home,
        &["add", "income", "80", "Salary", "--date", "2026-04-01"],
    );

    let out = run_ok_out(
        &home,
        &["summary", "--from", "2026-03-01", "--to", "2026-03-31"],
    );
    assert!(out.contains("income\t70"));
}

#[test]
fn custom_range_with_start_after_end_is_a_reported_error() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    let mut cmd = finsight_cmd();
    cmd.env("FINSIGHT_HOME", home.path());
    cmd.args(["summary", "--from", "2026-03-10", "--to", "2026-03-01"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid range"));
}

#[test]
fn unknown_period_names_the_accepted_set() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    let mut cmd = finsight_cmd();
    cmd.env("FINSIGHT_HOME", home.path());
    cmd.args(["summary", "--period", "fortnight"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period: fortnight"));
}

#[test]
fn all_time_sees_every_entry() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(
        &home,
        &["add", "income", "10", "Salary", "--date", "1999-01-01"],
    );
    run_ok(
        &home,
        &["add", "income", "20", "Salary", "--date", "2026-03-15"],
    );

    let out = run_ok_out(&home, &["summary", "--period", "all"]);
    assert!(out.contains("income\t30"));
}

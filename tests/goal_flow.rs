use assert_cmd::prelude::*;
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
fn e2e_month_scenario_hits_the_warning_band() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(
        &home,
        &["add", "income", "1000", "Salary", "--date", "2026-03-01"],
    );
    run_ok(
        &home,
        &["add", "expense", "200", "Food", "--date", "2026-03-05"],
    );
    run_ok(
        &home,
        &["add", "savings", "300", "Invest", "--date", "2026-03-05"],
    );
    run_ok(&home, &["goal", "set", "Food", "250"]);

    // A 30-day custom window pro-rates the monthly limit by exactly 1.0.
    let out = run_ok_out(
        &home,
        &["summary", "--from", "2026-03-01", "--to", "2026-03-30"],
    );
    assert!(out.contains("income\t1000"));
    assert!(out.contains("outflow\t200"));
    assert!(out.contains("savings\t300"));
    assert!(out.contains("balance\t500"));

    let report = run_ok_out(
        &home,
        &[
            "goal", "report", "--from", "2026-03-01", "--to", "2026-03-30", "--format", "tsv",
        ],
    );
    let food = report
        .lines()
        .find(|l| l.starts_with("Food\t"))
        .expect("food goal row");
    assert!(food.contains("\t200\t"));
    assert!(food.contains("80%"));
    assert!(food.contains("warning"));
}

#[test]
fn goal_set_is_an_upsert_leaving_one_row_with_the_latest_limit() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(&home, &["goal", "set", "Food", "250"]);
    run_ok(&home, &["goal", "set", "Food", "400"]);

    let db_path = home.path().join("data").join("finsight.sqlite3");
    let conn = rusqlite::Connection::open(db_path).expect("open sqlite");
    let (count, limit): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(monthly_limit) FROM goals WHERE category = 'Food'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("read goals");

    assert_eq!(count, 1);
    assert_eq!(limit, "400");
}

#[test]
fn over_budget_reports_full_bar_and_over_status() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(
        &home,
        &["add", "income", "1000", "Salary", "--date", "2026-03-01"],
    );
    run_ok(
        &home,
        &["add", "expense", "350", "Food", "--date", "2026-03-10"],
    );
    run_ok(&home, &["goal", "set", "Food", "250"]);

    let report = run_ok_out(
        &home,
        &[
            "goal", "report", "--from", "2026-03-01", "--to", "2026-03-30", "--format", "tsv",
        ],
    );
    let food = report
        .lines()
        .find(|l| l.starts_with("Food\t"))
        .expect("food goal row");
    // 140% of budget still displays as a full (clamped) bar.
    assert!(food.contains("100%"));
    assert!(food.contains("over"));
}

#[test]
fn income_sharing_the_goal_category_never_counts_as_spend() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(
        &home,
        &["add", "income", "5000", "Salary", "--date", "2026-03-01"],
    );
    run_ok(&home, &["goal", "set", "Salary", "100"]);

    let report = run_ok_out(
        &home,
        &[
            "goal", "report", "--from", "2026-03-01", "--to", "2026-03-30", "--format", "tsv",
        ],
    );
    let row = report
        .lines()
        .find(|l| l.starts_with("Salary\t"))
        .expect("salary goal row");
    assert!(row.contains("\t0\t"));
    assert!(row.contains("ok"));
}

#[test]
fn all_time_report_labels_the_limit_unscaled() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    run_ok(&home, &["goal", "set", "Food", "250"]);

    let report = run_ok_out(&home, &["goal", "report", "--period", "all"]);
    assert!(report.contains("LIMIT (UNSCALED)"));
}

#[test]
fn empty_goal_report_prints_a_placeholder() {
    let home = tempfile::tempdir().expect("tempdir");
    login(&home);

    let report = run_ok_out(&home, &["goal", "report", "--period", "all"]);
    assert!(report.contains("(no goals)"));
}

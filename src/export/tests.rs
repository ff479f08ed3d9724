#![allow(clippy::unwrap_used)]

use super::*;
use crate::engine::compute_budget;
use crate::plan::Plan;

fn body_lines(csv: &str) -> Vec<&str> {
    csv.lines().skip(1).collect()
}

// ── Format ────────────────────────────────────────────────────

#[test]
fn test_single_row() {
    let plan = Plan::new(&["jan"], &["Dev"]);
    let csv = plan.to_csv().unwrap();
    assert_eq!(
        csv,
        "month;role;commitmentLevel;hourlyRate;workingHoursPerDay;hours;amount\n\
         \"jan\";\"Dev\";\"50\";\"1000\";\"8\";\"84\";\"84000\"\n"
    );
}

#[test]
fn test_header_only_without_roles() {
    let plan = Plan::new(&["jan", "feb"], &[]);
    assert_eq!(plan.to_csv().unwrap(), format!("{HEADER}\n"));
}

#[test]
fn test_rows_are_month_major_in_stored_order() {
    let mut plan = Plan::new(&["mar", "jan"], &["A", "B"]);
    plan.move_role(1, 0);
    let csv = plan.to_csv().unwrap();
    let prefixes: Vec<String> = body_lines(&csv)
        .iter()
        .map(|l| l.split(';').take(2).collect::<Vec<_>>().join(";"))
        .collect();
    assert_eq!(
        prefixes,
        vec![
            "\"mar\";\"B\"",
            "\"mar\";\"A\"",
            "\"jan\";\"B\"",
            "\"jan\";\"A\"",
        ]
    );
}

#[test]
fn test_no_total_row() {
    let plan = Plan::default();
    let csv = plan.to_csv().unwrap();
    assert_eq!(body_lines(&csv).len(), 12 * 3);
    assert!(!csv.contains("\"total\""));
    assert!(csv.ends_with('\n'));
    assert!(!csv.ends_with("\n\n"));
    assert!(!csv.contains('\r'));
}

#[test]
fn test_quotes_in_role_names_are_doubled() {
    let mut plan = Plan::new(&["jan"], &["Dev"]);
    plan.rename_role("1", "The \"Lead\"; Dev");
    let csv = plan.to_csv().unwrap();
    assert!(csv.contains("\"The \"\"Lead\"\"; Dev\""));
}

#[test]
fn test_values_are_verbatim() {
    let mut plan = Plan::new(&["jan"], &["Dev"]);
    plan.set_hourly_rate("1", "99.95");
    plan.set_working_hours("1", "7.50");
    plan.set_commitment("1", "jan", 50);
    let csv = plan.to_csv().unwrap();
    // 21 * 7.5 * 0.5 = 78.75 -> 79; 79 * 99.95 = 7896.05
    assert_eq!(
        body_lines(&csv),
        vec!["\"jan\";\"Dev\";\"50\";\"99.95\";\"7.50\";\"79\";\"7896.05\""]
    );
}

#[test]
fn test_blank_rate_exports_empty_field() {
    let mut plan = Plan::new(&["jan"], &["Dev"]);
    plan.set_hourly_rate("1", "");
    let csv = plan.to_csv().unwrap();
    assert_eq!(
        body_lines(&csv),
        vec!["\"jan\";\"Dev\";\"50\";\"\";\"8\";\"84\";\"0\""]
    );
}

// ── Working-hours divergence ──────────────────────────────────

#[test]
fn test_blank_working_hours_fall_back_to_eight_in_export_only() {
    let mut plan = Plan::new(&["jan"], &["Dev"]);
    plan.set_working_hours("1", "");
    // The engine counts blank as 0 hours, so the amount is 0 ...
    assert!(plan.budget().grand_total().is_zero());
    // ... while the export recomputes hours with the 8 hour default.
    let csv = plan.to_csv().unwrap();
    assert_eq!(
        body_lines(&csv),
        vec!["\"jan\";\"Dev\";\"50\";\"1000\";\"\";\"84\";\"0\""]
    );
}

#[test]
fn test_zero_working_hours_fall_back_to_eight_in_export_only() {
    let mut plan = Plan::new(&["jan"], &["Dev"]);
    plan.set_working_hours("1", "0");
    let csv = plan.to_csv().unwrap();
    assert_eq!(
        body_lines(&csv),
        vec!["\"jan\";\"Dev\";\"50\";\"1000\";\"0\";\"84\";\"0\""]
    );
}

#[test]
fn test_stale_snapshot_amounts_are_used_verbatim() {
    let plan = Plan::new(&["jan"], &["Dev"]);
    let mut changed = plan.clone();
    changed.set_hourly_rate("1", "2000");
    // Amounts come from whichever snapshot is passed in.
    let csv = to_csv(plan.budget(), &changed.inputs()).unwrap();
    assert_eq!(
        body_lines(&csv),
        vec!["\"jan\";\"Dev\";\"50\";\"2000\";\"8\";\"84\";\"84000\""]
    );
    let fresh = compute_budget(&changed.inputs());
    let csv = to_csv(&fresh, &changed.inputs()).unwrap();
    assert!(csv.ends_with("\"168000\"\n"));
}

// ── Files ─────────────────────────────────────────────────────

#[test]
fn test_write_file_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(FILE_NAME);
    let mut plan = Plan::new(&["maj"], &["Utvecklare"]);
    plan.rename_role("1", "Systemutvecklare åäö");
    let text = plan.to_csv().unwrap();
    write_file(&path, &text).unwrap();
    let read = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read, text);
    assert!(read.contains("åäö"));
}

#[test]
fn test_write_file_bad_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join(FILE_NAME);
    assert!(write_file(&path, "x").is_err());
}

#[test]
fn test_resolve_path_directory_gets_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let resolved = resolve_path(dir.path().to_str().unwrap());
    assert_eq!(resolved, dir.path().join(FILE_NAME));
}

#[test]
fn test_resolve_path_file() {
    assert_eq!(
        resolve_path("/nonexistent/out.csv"),
        PathBuf::from("/nonexistent/out.csv")
    );
}

#[test]
fn test_default_path_file_name() {
    assert_eq!(default_path().file_name().unwrap(), FILE_NAME);
}

#[test]
fn test_content_type_declares_utf8() {
    assert!(CONTENT_TYPE.starts_with("text/csv"));
    assert!(CONTENT_TYPE.contains("utf-8"));
}

use pretty_assertions::assert_eq;
use serde_json::Value;
use servdiag_core::diag::{SuiteReport, TestOutcome, Verdict};

fn mixed_report() -> SuiteReport {
    let mut report = SuiteReport::new();
    report.record(TestOutcome::new("Basic SPI Communication", Verdict::Passed));
    report.record(TestOutcome::new("CPU Bootstrap Check", Verdict::Unverified));
    report.record(TestOutcome::errored(
        "Stress Test",
        "peripheral disconnected",
    ));
    report
}

#[test]
fn test_counts_and_overall() {
    let report = mixed_report();
    assert_eq!(report.total_count(), 3);
    assert_eq!(report.passed_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert!(!report.overall_success());
}

#[test]
fn test_all_passing_report_succeeds() {
    let mut report = SuiteReport::new();
    report.record(TestOutcome::new("a", Verdict::Passed));
    report.record(TestOutcome::new("b", Verdict::Unverified));
    assert!(report.overall_success());
}

#[test]
fn test_outcomes_keep_insertion_order() {
    let names: Vec<_> = mixed_report()
        .outcomes()
        .iter()
        .map(|o| o.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Basic SPI Communication", "CPU Bootstrap Check", "Stress Test"]
    );
}

#[test]
fn test_outcome_display() {
    assert_eq!(
        TestOutcome::new("Memory Write (32-bit)", Verdict::Passed).to_string(),
        "✓ PASS   - Memory Write (32-bit)"
    );
    assert_eq!(
        TestOutcome::new("Counting Loop Program", Verdict::Unverified).to_string(),
        "~ PASS   - Counting Loop Program (unverified)"
    );
    assert_eq!(
        TestOutcome::errored("Stress Test", "peripheral disconnected").to_string(),
        "✗ FAIL   - Stress Test (error: peripheral disconnected)"
    );
}

#[test]
fn test_summary_display() {
    let rule = "=".repeat(60);
    let expected = format!(
        "{rule}\nTEST SUMMARY\n{rule}\n\
         ✓ PASS   - Basic SPI Communication\n\
         ~ PASS   - CPU Bootstrap Check (unverified)\n\
         ✗ FAIL   - Stress Test (error: peripheral disconnected)\n\
         {rule}\nResults: 2/3 tests passed\n1 test(s) failed\n{rule}"
    );
    assert_eq!(mixed_report().to_string(), expected);
}

#[test]
fn test_summary_display_all_passed() {
    let mut report = SuiteReport::new();
    report.record(TestOutcome::new("Data Memory Write", Verdict::Passed));
    let text = report.to_string();
    assert!(text.contains("Results: 1/1 tests passed\nALL TESTS PASSED\n"));
}

#[test]
fn test_json_form() {
    let json: Value = serde_json::from_str(&mixed_report().to_json().unwrap()).unwrap();

    assert_eq!(json["passed"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["overall_success"], false);
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["verdict"], "passed");
    assert!(outcomes[0].get("error").is_none());
    assert_eq!(outcomes[1]["verdict"], "unverified");
    assert_eq!(outcomes[2]["verdict"], "failed");
    assert_eq!(outcomes[2]["error"], "peripheral disconnected");
}

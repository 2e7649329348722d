
use std::io::Write;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use commons::enable_logger;
use commons::FakeProcessManager;
use commons::ScriptedSender;
use restcase::execute_suite;
use restcase::CaseVerdict;
use restcase::DeployMode;
use restcase::FailureCause;
use restcase::Settings;
use restcase::TracingReporter;
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

fn settings_for(case_file: &NamedTempFile) -> Settings {
    let mut settings = Settings::default();
    settings.suite.case_path = case_file.path().to_path_buf();
    settings.deploy.mode = DeployMode::Cluster;
    settings.deploy.masters = 2;
    settings.deploy.tablets = 3;
    settings
}

fn write_cases(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn suite_should_deploy_run_and_tear_down() {
    enable_logger();
    let case_file = write_cases(
        r#"[
        {
            "caseId": "get_db",
            "desc": "database listing answers",
            "uri": "/dbs/test_db",
            "expect": { "status": 200 }
        },
        {
            "caseId": "query_rows",
            "uri": "/t/{id}",
            "uriParameters": { "id": ["1", "2"] },
            "expect": { "status": 200 }
        }
        ]"#,
    );

    let manager = Arc::new(FakeProcessManager::default());
    let sender = Arc::new(ScriptedSender::default());
    let outcome = execute_suite(
        &settings_for(&case_file),
        manager.clone(),
        sender.clone(),
        Arc::new(TracingReporter),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let summary = outcome.summary;
    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 0);
    // one call for get_db plus the two-candidate sweep of query_rows
    assert_eq!(summary.calls_passed, 3);
    assert_eq!(sender.count("/t/1"), 1);
    assert_eq!(sender.count("/t/2"), 1);

    // 2 masters + 3 tablets deployed, all stopped after the suite
    assert_eq!(manager.started.load(Ordering::SeqCst), 5);
    assert_eq!(manager.stopped.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn lifecycle_should_run_before_and_teardown_around_the_request() {
    let case_file = write_cases(
        r#"[{
            "caseId": "full_lifecycle",
            "uri": "/t/scratch_table",
            "beforeAction": [
                { "type": "execute", "statement": "CREATE TABLE scratch_table (id int)" },
                { "type": "insert", "table": "scratch_table", "rows": [[1], [2]] }
            ],
            "tearDown": [
                { "type": "execute", "statement": "DROP TABLE scratch_table" }
            ],
            "expect": { "status": 200 }
        }]"#,
    );

    let manager = Arc::new(FakeProcessManager::default());
    let sender = Arc::new(ScriptedSender::default());
    let outcome = execute_suite(
        &settings_for(&case_file),
        manager,
        sender.clone(),
        Arc::new(TracingReporter),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.summary.passed, 1);
    assert_eq!(sender.count("/v1/statement"), 2);
    assert_eq!(sender.count("/v1/tables/scratch_table/rows"), 1);
    let record = outcome.registry.get("full_lifecycle").unwrap();
    assert_eq!(record.teardown_runs, 1);
}

#[tokio::test]
async fn failing_expectation_should_report_cause_and_diffs() {
    let case_file = write_cases(
        r#"[{
            "caseId": "body_mismatch",
            "uri": "/t/42",
            "expect": {
                "status": 200,
                "fields": { "a.b": 1 }
            }
        }]"#,
    );

    let manager = Arc::new(FakeProcessManager::default());
    let sender = Arc::new(ScriptedSender::default().respond("/t/42", 200, r#"{"a":{"b":2}}"#));
    let outcome = execute_suite(
        &settings_for(&case_file),
        manager,
        sender,
        Arc::new(TracingReporter),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.summary.failed, 1);
    let record = outcome.registry.get("body_mismatch").unwrap();
    assert_eq!(
        record.verdict,
        Some(CaseVerdict::Failed(FailureCause::Assertion))
    );
    let diffs = record.diffs();
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].contains("field a.b"));
}

#[tokio::test]
async fn malformed_case_should_be_skipped_while_suite_continues() {
    let case_file = write_cases(
        r#"[
        {
            "caseId": "broken",
            "uri": "/t/{undeclared}",
            "expect": { "status": 200 }
        },
        {
            "caseId": "fine",
            "uri": "/dbs",
            "expect": { "status": 200 }
        }
        ]"#,
    );

    let manager = Arc::new(FakeProcessManager::default());
    let sender = Arc::new(ScriptedSender::default());
    let outcome = execute_suite(
        &settings_for(&case_file),
        manager,
        sender,
        Arc::new(TracingReporter),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let summary = outcome.summary;
    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.skipped, 1);
    let record = outcome.registry.get("broken").unwrap();
    assert_eq!(record.verdict, Some(CaseVerdict::Skipped));
}

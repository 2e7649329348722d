use serial_test::serial;
use temp_env::with_vars;

use super::*;

fn cleanup_all_restcase_env_vars() {
    for (key, _) in std::env::vars() {
        if key.starts_with("RESTCASE__") {
            std::env::remove_var(&key);
        }
    }
}

#[test]
#[serial]
fn default_config_should_initialize_with_hardcoded_values() {
    let settings = Settings::default();

    assert_eq!(settings.deploy.mode, DeployMode::Standalone);
    assert_eq!(settings.deploy.masters, 2);
    assert_eq!(settings.deploy.tablets, 3);
    assert_eq!(settings.http.request_timeout_in_ms, 10_000);
    assert_eq!(settings.runner.workers, 4);
    assert!(settings.runner.serial_groups.is_empty());
}

#[test]
#[serial]
fn load_should_merge_environment_overrides() {
    cleanup_all_restcase_env_vars();
    with_vars(
        vec![("RESTCASE__RUNNER__WORKERS", Some("9"))],
        || {
            let settings = Settings::load(None).unwrap();

            assert_eq!(settings.runner.workers, 9);
        },
    );
}

#[test]
#[serial]
fn load_should_merge_override_file_settings() {
    cleanup_all_restcase_env_vars();
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("override.toml");

    std::fs::write(
        &config_path,
        r#"
        [deploy]
        mode = "cluster"
        masters = 1
        tablets = 2

        [http]
        request_timeout_in_ms = 250
        "#,
    )
    .unwrap();

    let empty_vars: Vec<(&str, Option<&str>)> = vec![];
    with_vars(empty_vars, || {
        let settings = Settings::load(config_path.to_str()).unwrap();

        assert_eq!(settings.deploy.mode, DeployMode::Cluster);
        assert_eq!(settings.deploy.masters, 1);
        assert_eq!(settings.deploy.tablets, 2);
        assert_eq!(settings.http.request_timeout_in_ms, 250);
        // untouched sections keep defaults
        assert_eq!(settings.runner.workers, 4);
    });
}

#[test]
fn validate_should_reject_zero_workers() {
    let mut settings = Settings::default();
    settings.runner.workers = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn validate_should_reject_case_in_two_serial_groups() {
    let mut settings = Settings::default();
    settings
        .runner
        .serial_groups
        .insert("g1".into(), vec!["case_1".into()]);
    settings
        .runner
        .serial_groups
        .insert("g2".into(), vec!["case_1".into()]);

    assert!(settings.validate().is_err());
}

#[test]
fn validate_should_reject_cluster_without_tablets() {
    let mut settings = Settings::default();
    settings.deploy.mode = DeployMode::Cluster;
    settings.deploy.tablets = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn group_of_should_resolve_declared_membership() {
    let mut config = RunnerConfig::default();
    config
        .serial_groups
        .insert("shared_table".into(), vec!["c1".into(), "c2".into()]);

    assert_eq!(config.group_of("c1"), Some("shared_table"));
    assert_eq!(config.group_of("c3"), None);
}

mod harness;

use harness::deploy_config;
use shoal::error::LaunchError;
use shoal::service::build_launch_spec;

#[test]
fn command_line_tokens_appear_in_pinned_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = deploy_config(dir.path());
    config.nodes = 3;
    config.memory_mb = 512;
    config.vcores = 2;

    let spec = build_launch_spec(&config).unwrap();

    assert_eq!(
        &spec.command[..5],
        &[
            "-nodes=3".to_string(),
            "-memory=512".to_string(),
            "-virtualCores=2".to_string(),
            "-zkHost=zk1:2181".to_string(),
            "-port=8983".to_string(),
        ]
    );
    assert!(!spec.command.iter().any(|t| t.starts_with("-hdfs_home")));
}

#[test]
fn storage_home_token_present_only_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = deploy_config(dir.path());
    config.hdfs_home = Some("hdfs://nn:8020/search".into());

    let spec = build_launch_spec(&config).unwrap();

    assert!(spec
        .command
        .contains(&"-hdfs_home=hdfs://nn:8020/search".to_string()));
}

#[test]
fn output_is_redirected_into_the_manager_log_dir() {
    let dir = tempfile::tempdir().unwrap();
    let spec = build_launch_spec(&deploy_config(dir.path())).unwrap();

    let len = spec.command.len();
    assert_eq!(spec.command[len - 2], "1><LOG_DIR>/stdout");
    assert_eq!(spec.command[len - 1], "2><LOG_DIR>/stderr");
}

#[test]
fn classpath_merges_defaults_external_entries_and_pwd() {
    let dir = tempfile::tempdir().unwrap();
    let classpath_file = dir.path().join("extra-classpath.txt");
    std::fs::write(&classpath_file, "/opt/lib/a.jar\n\n  /opt/lib/b.jar  \n").unwrap();

    let mut config = deploy_config(dir.path());
    config.ext_classpath = Some(classpath_file);

    let spec = build_launch_spec(&config).unwrap();
    let classpath = &spec.environment["CLASSPATH"];

    assert_eq!(
        classpath,
        "{{MANAGER_CONF_DIR}}:/opt/lib/a.jar:/opt/lib/b.jar:{{PWD}}/*"
    );
}

#[test]
fn missing_package_fails_before_submission() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = deploy_config(dir.path());
    config.package = dir.path().join("nonexistent.bin");

    let err = build_launch_spec(&config).unwrap_err();

    assert!(matches!(
        err,
        LaunchError::ArtifactMissing { role: "package", .. }
    ));
}

#[test]
fn missing_archive_fails_before_submission() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = deploy_config(dir.path());
    config.archive = dir.path().join("nonexistent.tgz");

    let err = build_launch_spec(&config).unwrap_err();

    assert!(matches!(
        err,
        LaunchError::ArtifactMissing { role: "archive", .. }
    ));
}

#[test]
fn both_artifacts_are_staged_with_resolved_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let spec = build_launch_spec(&deploy_config(dir.path())).unwrap();

    let supervisor = &spec.staged_artifacts["supervisor"];
    let workload = &spec.staged_artifacts["workload"];
    assert_eq!(supervisor.size, "supervisor".len() as u64);
    assert_eq!(workload.size, "workload".len() as u64);
    assert!(supervisor.timestamp_ms > 0);
}

#[test]
fn config_snapshot_written_when_external_classpath_is_supplied() {
    let dir = tempfile::tempdir().unwrap();
    let classpath_file = dir.path().join("extra-classpath.txt");
    std::fs::write(&classpath_file, "/opt/lib/a.jar\n").unwrap();

    let mut config = deploy_config(dir.path());
    config.ext_classpath = Some(classpath_file);

    let spec = build_launch_spec(&config).unwrap();

    let snapshot = dir.path().join("ext-manager-conf.toml");
    assert!(snapshot.exists());
    assert!(spec
        .command
        .iter()
        .any(|t| t.starts_with("-conf=") && t.ends_with("ext-manager-conf.toml")));
}

#[test]
fn no_conf_token_without_an_external_classpath() {
    let dir = tempfile::tempdir().unwrap();
    let spec = build_launch_spec(&deploy_config(dir.path())).unwrap();

    assert!(!spec.command.iter().any(|t| t.starts_with("-conf=")));
    assert!(!dir.path().join("ext-manager-conf.toml").exists());
}

#[test]
fn supervisor_container_requests_the_fixed_capability() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = deploy_config(dir.path());
    config.memory_mb = 4096;
    config.vcores = 8;

    let spec = build_launch_spec(&config).unwrap();

    // Per-node requirements travel on the command line; the supervisor
    // container itself stays small.
    assert_eq!(spec.resources.memory_mb, 128);
    assert_eq!(spec.resources.vcores, 1);
    assert!(spec.command.contains(&"-memory=4096".to_string()));
}

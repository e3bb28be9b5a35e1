//! Info command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn info_reports_isolated_paths() {
  let env = TestEnv::new();

  env
    .subpack_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains(env.root_path().display().to_string()))
    .stdout(predicate::str::contains(env.profile_path().display().to_string()));
}

#[test]
fn info_json_is_machine_readable() {
  let env = TestEnv::new();

  let output = env.subpack_cmd().args(["info", "--output", "json"]).output().unwrap();
  assert!(output.status.success());

  let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(info["root"], env.root_path().display().to_string());
  assert_eq!(info["env_file"], env.env_file().display().to_string());
  assert!(info["platform"].as_str().unwrap().contains('-'));
}

#[test]
fn info_does_not_create_the_store() {
  let env = TestEnv::new();
  env.subpack_cmd().arg("info").assert().success();
  assert!(!env.root_path().exists());
}

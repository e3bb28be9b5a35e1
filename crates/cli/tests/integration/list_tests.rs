//! List and pwd command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn list_shows_whole_catalog() {
  let env = TestEnv::new();

  env
    .subpack_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("zig"))
    .stdout(predicate::str::contains("gccarmnone"))
    .stdout(predicate::str::contains("esbuild"));
}

#[test]
fn list_json_marks_installed_packages() {
  let env = TestEnv::new();
  env.fake_install("node_22.12.0", "bin/node", "0123456789");

  let output = env.subpack_cmd().args(["list", "--output", "json"]).output().unwrap();
  assert!(output.status.success());

  let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let rows = rows.as_array().unwrap();
  assert_eq!(rows.len(), 10);

  let node = rows.iter().find(|row| row["name"] == "node").unwrap();
  assert_eq!(node["installed"], true);
  assert_eq!(node["size_bytes"], 10);

  let zig = rows.iter().find(|row| row["name"] == "zig").unwrap();
  assert_eq!(zig["installed"], false);
  assert!(zig["size_bytes"].is_null());
}

#[test]
fn pwd_prints_install_directory() {
  let env = TestEnv::new();

  env
    .subpack_cmd()
    .args(["pwd", "node@20.1.0"])
    .assert()
    .success()
    .stdout(format!("{}\n", env.root_path().join("node_20.1.0").display()));
}

#[test]
fn pwd_unknown_package_fails() {
  let env = TestEnv::new();

  env
    .subpack_cmd()
    .args(["pwd", "cobol"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown package: cobol"));
}

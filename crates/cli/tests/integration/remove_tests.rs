//! Remove command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[cfg(unix)]
#[test]
fn remove_deletes_install_and_deregisters() {
  let env = TestEnv::new();
  env.fake_install("zig-0.14.1", "zig", "#!/bin/sh\n");
  env.fake_install("node_22.12.0", "bin/node", "#!/bin/sh\n");
  env.subpack_cmd().args(["install", "zig", "node"]).assert().success();

  env
    .subpack_cmd()
    .args(["remove", "zig"])
    .assert()
    .success()
    .stdout(predicate::str::contains("removing zig"))
    .stdout(predicate::str::contains("zig: removed"));

  assert!(!env.root_path().join("zig-0.14.1").exists());
  assert!(std::fs::symlink_metadata(env.root_path().join("zig")).is_err());

  let content = env.env_file_content();
  assert!(!content.contains("# Zig"));
  assert!(content.contains("# Node"));
}

#[test]
fn removing_missing_package_warns() {
  let env = TestEnv::new();

  env
    .subpack_cmd()
    .args(["remove", "bun"])
    .assert()
    .success()
    .stderr(predicate::str::contains("bun: was not installed"));
}

#[cfg(unix)]
#[test]
fn remove_preserves_foreign_env_lines() {
  let env = TestEnv::new();
  env.write_store_file("env", "export EDITOR=vi\n");
  env.fake_install("restic_0.16.4", "restic", "#!/bin/sh\n");
  env.subpack_cmd().args(["install", "restic"]).assert().success();

  env.subpack_cmd().args(["remove", "restic"]).assert().success();

  assert_eq!(env.env_file_content(), "export EDITOR=vi\n");
}

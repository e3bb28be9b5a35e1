//! Install and run command integration tests.
//!
//! Packages are laid out by hand, so these exercise the "already installed"
//! paths without downloading anything.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn unknown_package_fails_but_others_still_run() {
  let env = TestEnv::new();
  env.fake_install("restic_0.16.4", "restic", "#!/bin/sh\n");

  env
    .subpack_cmd()
    .args(["install", "cobol", "restic"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cobol: unknown package: cobol [UnknownPackage]"))
    .stderr(predicate::str::contains("1 of 2 package(s) failed"))
    .stdout(predicate::str::contains("restic: is already installed @"));
}

#[test]
fn fixed_version_is_rejected() {
  let env = TestEnv::new();

  env
    .subpack_cmd()
    .args(["install", "gccarmnone@12.0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("fixed version"));
}

#[cfg(unix)]
#[test]
fn already_installed_package_is_registered() {
  let env = TestEnv::new();
  env.fake_install("zig-0.14.1", "zig", "#!/bin/sh\n");

  env
    .subpack_cmd()
    .args(["install", "zig"])
    .assert()
    .success()
    .stdout(predicate::str::contains("zig: is already installed @"));

  let link = env.root_path().join("zig");
  assert_eq!(
    env.env_file_content(),
    format!("export PATH=$PATH:\"{}\"  # Zig\n", link.display())
  );
  assert!(std::fs::read_link(&link).unwrap().ends_with("zig-0.14.1"));

  let profile = std::fs::read_to_string(env.profile_path()).unwrap();
  assert!(profile.contains(&format!(". \"{}\"", env.env_file().display())));
}

#[cfg(unix)]
#[test]
fn repeated_install_keeps_one_env_line() {
  let env = TestEnv::new();
  env.fake_install("zig-0.14.1", "zig", "#!/bin/sh\n");
  env.fake_install("node_22.12.0", "bin/node", "#!/bin/sh\n");

  env.subpack_cmd().args(["install", "zig", "node"]).assert().success();
  env.subpack_cmd().args(["install", "zig"]).assert().success();
  env.subpack_cmd().args(["install", "zig"]).assert().success();

  let content = env.env_file_content();
  assert_eq!(content.matches("# Zig").count(), 1);
  assert_eq!(content.matches("# Node").count(), 1);

  let profile = std::fs::read_to_string(env.profile_path()).unwrap();
  assert_eq!(profile.matches("subpack/env").count(), 1);
}

#[cfg(unix)]
#[test]
fn run_passes_arguments_and_exit_code() {
  let env = TestEnv::new();
  env.fake_install("esbuild_0.23.1", "bin/esbuild", "#!/bin/sh\necho \"esbuild $@\"\nexit 7\n");

  env
    .subpack_cmd()
    .args(["run", "esbuild", "--", "--version", "app.js"])
    .assert()
    .code(7)
    .stdout(predicate::str::contains("esbuild --version app.js"));
}

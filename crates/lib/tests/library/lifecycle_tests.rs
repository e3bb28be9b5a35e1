//! Install, reinstall and removal through the public `Package` API.

use std::io::Write;
use std::path::PathBuf;

use bzip2::Compression;
use bzip2::write::BzEncoder;
use subpack_lib::extract::single_file::SingleFileBzip2;
use subpack_lib::{Descriptor, Error, PostInstall};

use super::common::{LocalFetcher, TestEnv, tarball};

const TOOL_URL: &str = "https://example.invalid/tool-1.0.tar.gz";

fn tool_descriptor() -> Descriptor {
  Descriptor::new("Tool", "1.0", "tool_1.0", "bin/tool", TOOL_URL, "tar.gz")
    .with_add_path("bin")
    .with_drilling()
}

fn tool_fetcher(env: &TestEnv) -> LocalFetcher {
  let archive = env.fixtures().join("tool.tar.gz");
  tarball(
    &archive,
    "tool-1.0",
    &[("bin/tool", "#!/bin/sh\necho tool\n"), ("share/README", "docs")],
  );
  LocalFetcher::default().serve(TOOL_URL, archive)
}

mod install {
  use super::*;

  #[test]
  fn end_to_end() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let pkg = ctx.package(tool_descriptor());

    let report = pkg.install(&ctx).unwrap();

    assert!(pkg.is_installed());
    assert_eq!(report.artifact, env.store.root().join("tool_1.0/bin/tool"));
    assert_eq!(report.drilled, 1);
    assert!(env.store.root().join("tool_1.0/share/README").is_file());

    let link = env.store.root().join("tool");
    assert_eq!(
      std::fs::read_link(&link).unwrap(),
      dunce::canonicalize(pkg.install_path()).unwrap()
    );
    assert_eq!(
      env.env_file_content(),
      format!("export PATH=$PATH:\"{}\"  # Tool\n", link.join("bin").display())
    );

    let profile = std::fs::read_to_string(&env.profile).unwrap();
    assert!(profile.contains(&format!(". \"{}\"", env.store.env_file().display())));

    assert!(env.tmp_entries().is_empty(), "download should be cleaned up");
  }

  #[test]
  fn ensure_installed_downloads_once() {
    let env = TestEnv::new();
    let fetcher = tool_fetcher(&env);
    let calls = fetcher.calls();
    let ctx = env.context(fetcher);
    let pkg = ctx.package(tool_descriptor());

    let first = pkg.ensure_installed(&ctx).unwrap();
    let second = pkg.ensure_installed(&ctx).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, pkg.artifact_path());
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn keep_download_leaves_archive_in_tmp() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let pkg = ctx.package(tool_descriptor().with_kept_download());

    pkg.install(&ctx).unwrap();

    assert_eq!(env.tmp_entries(), vec!["tool_1.0.tar.gz".to_string()]);
  }

  #[test]
  fn download_failure_leaves_no_install() {
    let env = TestEnv::new();
    let ctx = env.context(LocalFetcher::default());
    let pkg = ctx.package(tool_descriptor());

    let err = pkg.install(&ctx).unwrap_err();

    assert!(matches!(err, Error::DownloadFailed { ref url, .. } if url == TOOL_URL));
    assert!(!pkg.install_path().exists());
    assert_eq!(env.env_file_content(), "");
  }

  #[test]
  fn corrupt_archive_is_extraction_failure() {
    let env = TestEnv::new();
    let archive = env.fixtures().join("broken.tar.gz");
    std::fs::write(&archive, b"definitely not gzip").unwrap();
    let ctx = env.context(LocalFetcher::default().serve(TOOL_URL, archive));
    let pkg = ctx.package(tool_descriptor());

    let err = pkg.install(&ctx).unwrap_err();

    assert_eq!(err.kind(), "ExtractionFailed");
    assert!(!pkg.is_installed());
    assert!(env.tmp_entries().is_empty());
  }

  #[test]
  fn unknown_archive_kind_is_rejected() {
    let env = TestEnv::new();
    let archive = env.fixtures().join("tool.rar");
    std::fs::write(&archive, b"rar").unwrap();
    let url = "https://example.invalid/tool.rar";
    let ctx = env.context(LocalFetcher::default().serve(url, archive));
    let pkg = ctx.package(Descriptor::new("Tool", "1.0", "tool_1.0", "bin/tool", url, "rar"));

    let err = pkg.install(&ctx).unwrap_err();

    assert!(matches!(err, Error::UnsupportedArchiveKind { ref archive } if archive == "tool_1.0.rar"));
  }

  #[test]
  fn single_file_override_skips_registry() {
    let env = TestEnv::new();
    let archive = env.fixtures().join("restic.bz2");
    let mut encoder = BzEncoder::new(std::fs::File::create(&archive).unwrap(), Compression::default());
    encoder.write_all(b"#!/bin/sh\necho restic\n").unwrap();
    encoder.finish().unwrap();

    let url = "https://example.invalid/restic_0.16.4_linux_amd64.bz2";
    let ctx = env.context(LocalFetcher::default().serve(url, archive));
    let descriptor = Descriptor::new("Restic", "0.16.4", "restic_0.16.4", "restic", url, "bz2")
      .with_add_path(".")
      .with_drilling()
      .with_kept_download()
      .with_extractor(SingleFileBzip2::new("restic"));
    let pkg = ctx.package(descriptor);

    let report = pkg.install(&ctx).unwrap();

    assert_eq!(report.drilled, 0);
    assert_eq!(std::fs::read(pkg.artifact_path()).unwrap(), b"#!/bin/sh\necho restic\n");
    assert!(env.env_file_content().ends_with("  # Restic\n"));
  }

  #[test]
  fn post_install_hooks_run_after_extraction() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let pkg = ctx.package(tool_descriptor().with_post_install(PostInstall::Symlink {
      link: PathBuf::from("bin/tool-alias"),
      target: PathBuf::from("tool"),
    }));

    pkg.install(&ctx).unwrap();

    let alias = pkg.install_path().join("bin/tool-alias");
    assert_eq!(std::fs::read_to_string(alias).unwrap(), "#!/bin/sh\necho tool\n");
  }
}

mod remove {
  use super::*;

  #[test]
  fn deletes_install_and_registration() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let pkg = ctx.package(tool_descriptor());
    pkg.install(&ctx).unwrap();

    let report = pkg.remove(&ctx).unwrap();

    assert!(report.removed);
    assert!(report.unregistered);
    assert!(!pkg.install_path().exists());
    assert!(std::fs::symlink_metadata(env.store.root().join("tool")).is_err());
    assert_eq!(env.env_file_content(), "");
  }

  #[test]
  fn removing_twice_is_harmless() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let pkg = ctx.package(tool_descriptor());
    pkg.install(&ctx).unwrap();
    pkg.remove(&ctx).unwrap();

    let report = pkg.remove(&ctx).unwrap();

    assert!(!report.removed);
    assert!(!report.unregistered);
  }

  #[test]
  fn reinstall_after_remove_fetches_again() {
    let env = TestEnv::new();
    let fetcher = tool_fetcher(&env);
    let calls = fetcher.calls();
    let ctx = env.context(fetcher);
    let pkg = ctx.package(tool_descriptor());

    pkg.ensure_installed(&ctx).unwrap();
    pkg.remove(&ctx).unwrap();
    pkg.ensure_installed(&ctx).unwrap();

    assert_eq!(calls.get(), 2);
    assert!(pkg.is_installed());
  }

  fn other_version() -> Descriptor {
    Descriptor::new("Tool", "2.0", "tool_2.0", "bin/tool", TOOL_URL, "tar.gz")
      .with_add_path("bin")
      .with_drilling()
  }

  #[test]
  fn uninstalled_version_leaves_registered_one_alone() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let installed = ctx.package(tool_descriptor());
    installed.install(&ctx).unwrap();
    let env_before = env.env_file_content();

    let report = ctx.package(other_version()).remove(&ctx).unwrap();

    assert!(!report.removed);
    assert!(!report.unregistered);
    assert!(installed.is_installed());
    assert_eq!(env.env_file_content(), env_before);
    assert_eq!(
      std::fs::read_link(env.store.root().join("tool")).unwrap(),
      dunce::canonicalize(installed.install_path()).unwrap()
    );
  }

  #[test]
  fn installed_but_unregistered_version_keeps_path_entry() {
    let env = TestEnv::new();
    let ctx = env.context(tool_fetcher(&env));
    let older = ctx.package(other_version());
    let current = ctx.package(tool_descriptor());
    older.install(&ctx).unwrap();
    current.install(&ctx).unwrap();

    let report = older.remove(&ctx).unwrap();

    assert!(report.removed);
    assert!(!report.unregistered);
    assert!(!older.install_path().exists());
    assert!(env.env_file_content().ends_with("  # Tool\n"));
    assert!(current.artifact_path().is_file());
    assert_eq!(
      std::fs::read_link(env.store.root().join("tool")).unwrap(),
      dunce::canonicalize(current.install_path()).unwrap()
    );
  }
}

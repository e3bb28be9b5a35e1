//! PATH registration across packages and versions.

use subpack_lib::Descriptor;

use super::common::{LocalFetcher, TestEnv, tarball};

fn versioned(env: &TestEnv, version: &str) -> (Descriptor, LocalFetcher) {
  let url = format!("https://example.invalid/node-v{}.tar.gz", version);
  let archive = env.fixtures().join(format!("node-{}.tar.gz", version));
  tarball(
    &archive,
    &format!("node-v{}-linux-x64", version),
    &[("bin/node", version), ("lib/node_modules/npm/package.json", "{}")],
  );
  let descriptor = Descriptor::new("Node", version, format!("node_{}", version), "bin/node", &url, "tar.gz")
    .with_add_path("bin")
    .with_drilling();
  (descriptor, LocalFetcher::default().serve(&url, archive))
}

#[test]
fn switching_versions_moves_the_symlink() {
  let env = TestEnv::new();
  let (old, old_fetcher) = versioned(&env, "20.1.0");
  let (new, new_fetcher) = versioned(&env, "22.12.0");

  let ctx = env.context(old_fetcher);
  ctx.package(old).install(&ctx).unwrap();

  let ctx = env.context(new_fetcher);
  let pkg = ctx.package(new);
  pkg.install(&ctx).unwrap();

  let link = env.store.root().join("node");
  assert_eq!(std::fs::read_to_string(link.join("bin/node")).unwrap(), "22.12.0");
  assert_eq!(env.env_file_content().lines().count(), 1);
}

#[test]
fn register_path_repairs_missing_line() {
  let env = TestEnv::new();
  let (descriptor, fetcher) = versioned(&env, "22.12.0");
  let ctx = env.context(fetcher);
  let pkg = ctx.package(descriptor);
  pkg.install(&ctx).unwrap();

  std::fs::write(env.store.env_file(), "export EDITOR=vi\n").unwrap();
  pkg.register_path(&ctx).unwrap();

  let content = env.env_file_content();
  let lines: Vec<&str> = content.lines().collect();
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0], "export EDITOR=vi");
  assert!(lines[1].ends_with("  # Node"));
}

#[test]
fn profile_is_touched_once_across_packages() {
  let env = TestEnv::new();
  std::fs::write(&env.profile, "export EDITOR=vi\n").unwrap();

  let (node, fetcher) = versioned(&env, "22.12.0");
  let ctx = env.context(fetcher);
  let first = ctx.package(node).install(&ctx).unwrap();
  let again = ctx.resolve("node@22.12.0").unwrap().register_path(&ctx).unwrap().unwrap();

  assert_eq!(first.registration.unwrap().profile_updated, Some(env.profile.clone()));
  assert_eq!(again.profile_updated, None);
  let profile = std::fs::read_to_string(&env.profile).unwrap();
  assert_eq!(profile.matches("subpack/env").count(), 1);
}

//! The statically declared set of installable toolchains.
//!
//! Each entry builds a [`Descriptor`] for a platform and version. Entries
//! with `versioned: false` ship exactly one release.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::extract::single_file::SingleFileBzip2;
use crate::package::{Descriptor, PostInstall};
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;

pub struct Entry {
  /// Lookup key, the lowercase identity.
  pub key: &'static str,
  pub ident: &'static str,
  pub default_version: &'static str,
  pub versioned: bool,
  pub summary: &'static str,
  build: fn(&Platform, &str) -> Descriptor,
}

impl Entry {
  /// Descriptor for `version`, or the default version when `None`.
  pub fn descriptor(&self, platform: &Platform, version: Option<&str>) -> Result<Descriptor> {
    let version = match version {
      None => self.default_version,
      Some(v) if self.versioned => v,
      Some(v) if strip_v(v) == strip_v(self.default_version) => self.default_version,
      Some(v) => {
        return Err(Error::FixedVersion {
          package: self.key.to_string(),
          requested: v.to_string(),
        });
      }
    };
    Ok((self.build)(platform, version))
  }
}

impl fmt::Debug for Entry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Entry")
      .field("key", &self.key)
      .field("default_version", &self.default_version)
      .field("versioned", &self.versioned)
      .finish()
  }
}

pub static CATALOG: &[Entry] = &[
  Entry {
    key: "electron",
    ident: "Electron",
    default_version: "32.1.0",
    versioned: true,
    summary: "Electron desktop runtime",
    build: electron,
  },
  Entry {
    key: "zig",
    ident: "Zig",
    default_version: "0.14.1",
    versioned: true,
    summary: "Zig compiler and toolchain",
    build: zig,
  },
  Entry {
    key: "gccarmnone",
    ident: "GccArmNone",
    default_version: "13.2",
    versioned: false,
    summary: "Arm GNU toolchain, bare-metal (arm-none-eabi)",
    build: gcc_arm_none,
  },
  Entry {
    key: "gccarmlinux",
    ident: "GccArmLinux",
    default_version: "13.2",
    versioned: false,
    summary: "Arm GNU toolchain, Linux hard-float (arm-none-linux-gnueabihf)",
    build: gcc_arm_linux,
  },
  Entry {
    key: "tiprunone",
    ident: "TiPruNone",
    default_version: "2.3.3",
    versioned: false,
    summary: "TI PRU code generation tools",
    build: ti_pru_none,
  },
  Entry {
    key: "stlink",
    ident: "StLink",
    default_version: "v1.1.0",
    versioned: false,
    summary: "STM32CubeProgrammer command line tools",
    build: stlink,
  },
  Entry {
    key: "bun",
    ident: "Bun",
    default_version: "v1.2.2",
    versioned: true,
    summary: "Bun JavaScript runtime",
    build: bun,
  },
  Entry {
    key: "node",
    ident: "Node",
    default_version: "22.12.0",
    versioned: true,
    summary: "Node.js JavaScript runtime",
    build: node,
  },
  Entry {
    key: "esbuild",
    ident: "EsBuild",
    default_version: "0.23.1",
    versioned: true,
    summary: "esbuild JavaScript bundler",
    build: esbuild,
  },
  Entry {
    key: "restic",
    ident: "Restic",
    default_version: "0.16.4",
    versioned: true,
    summary: "restic backup program",
    build: restic,
  },
];

pub fn entries() -> &'static [Entry] {
  CATALOG
}

/// Case-insensitive lookup by key.
pub fn get(key: &str) -> Option<&'static Entry> {
  let key = key.to_lowercase();
  CATALOG.iter().find(|entry| entry.key == key)
}

pub fn resolve(spec: &PackageSpec, platform: &Platform) -> Result<Descriptor> {
  let entry = get(&spec.name).ok_or_else(|| Error::UnknownPackage {
    name: spec.name.clone(),
  })?;
  entry.descriptor(platform, spec.version.as_deref())
}

/// `name[@version]` as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
  pub name: String,
  pub version: Option<String>,
}

impl FromStr for PackageSpec {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();
    let (name, version) = match s.split_once('@') {
      Some((name, version)) => (name, Some(version)),
      None => (s, None),
    };
    if name.is_empty() {
      return Err(Error::UnknownPackage { name: s.to_string() });
    }
    Ok(Self {
      name: name.to_string(),
      version: version.filter(|v| !v.is_empty()).map(str::to_string),
    })
  }
}

impl fmt::Display for PackageSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.version {
      Some(version) => write!(f, "{}@{}", self.name, version),
      None => write!(f, "{}", self.name),
    }
  }
}

fn strip_v(version: &str) -> String {
  version.trim().to_lowercase().trim_start_matches('v').to_string()
}

fn exe(platform: &Platform) -> &'static str {
  platform.os.exe_suffix()
}

/// `linux` / `darwin` / `win32`, the naming Node-ecosystem releases use.
fn node_os(platform: &Platform) -> &'static str {
  match platform.os {
    Os::Windows => "win32",
    os => os.as_str(),
  }
}

fn electron(platform: &Platform, version: &str) -> Descriptor {
  let version = format!("v{}", strip_v(version));
  let url = format!(
    "https://github.com/electron/electron/releases/download/{v}/electron-{v}-{os}-{arch}.zip",
    v = version,
    os = node_os(platform),
    arch = platform.arch.short_name(),
  );
  Descriptor::new(
    "Electron",
    &version,
    format!("electron-{}", version),
    format!("electron{}", exe(platform)),
    url,
    "zip",
  )
}

fn zig(platform: &Platform, version: &str) -> Descriptor {
  let os = match platform.os {
    Os::Linux => "linux",
    Os::MacOs => "macos",
    Os::Windows => "windows",
  };
  let archive_kind = if platform.os.is_posix() { "tar.xz" } else { "zip" };
  let url = format!(
    "https://ziglang.org/download/{v}/zig-{arch}-{os}-{v}.{kind}",
    v = version,
    arch = platform.arch.as_str(),
    os = os,
    kind = archive_kind,
  );
  // Dev builds carry a `+<commit>` suffix that has no place in a directory name.
  let short = version.split('+').next().unwrap_or(version);
  Descriptor::new(
    "Zig",
    version,
    format!("zig-{}", short),
    format!("zig{}", exe(platform)),
    url,
    archive_kind,
  )
  .with_add_path(".")
  .with_drilling()
}

fn gcc_arm_none(_platform: &Platform, version: &str) -> Descriptor {
  Descriptor::new(
    "GccArmNone",
    version,
    format!("gcc-arm-none-eabi_{}", version),
    "bin/arm-none-eabi-gcc",
    "https://developer.arm.com/-/media/Files/downloads/gnu/13.2.rel1/binrel/arm-gnu-toolchain-13.2.rel1-x86_64-arm-none-eabi.tar.xz?rev=e434b9ea4afc4ed7998329566b764309&hash=688C370BF08399033CA9DE3C1CC8CF8E31D8C441",
    "tar.xz",
  )
  .with_add_path("bin")
  .with_drilling()
}

fn gcc_arm_linux(_platform: &Platform, version: &str) -> Descriptor {
  Descriptor::new(
    "GccArmLinux",
    version,
    format!("gcc-arm-linux-gnueabihf_{}", version),
    "bin/arm-none-linux-gnueabihf-gcc",
    "https://developer.arm.com/-/media/Files/downloads/gnu/13.2.rel1/binrel/arm-gnu-toolchain-13.2.rel1-x86_64-arm-none-linux-gnueabihf.tar.xz?rev=adb0c0238c934aeeaa12c09609c5e6fc&hash=68DA67DE12CBAD82A0FA4B75247E866155C93053",
    "tar.xz",
  )
  .with_add_path("bin")
  .with_drilling()
}

fn ti_pru_none(_platform: &Platform, version: &str) -> Descriptor {
  Descriptor::new(
    "TiPruNone",
    version,
    format!("ti-pru-none_{}", version),
    "bin/clpru",
    format!("https://subinitial.com/public/art/ti-cgt-pru_{}.tar.bz2", version),
    "tar.bz2",
  )
  .with_drilling()
}

fn stlink(_platform: &Platform, version: &str) -> Descriptor {
  Descriptor::new(
    "StLink",
    version,
    format!("stlink_{}", version),
    "STM32CubeProgrammer/bin/STM32_Programmer_CLI",
    format!("https://subinitial.com/public/art/stlink_{}.tar.bz2", version),
    "tar.bz2",
  )
  .with_drilling()
  .with_post_install(PostInstall::Script {
    path: PathBuf::from("install.sh"),
  })
}

fn bun(platform: &Platform, version: &str) -> Descriptor {
  let version = format!("v{}", strip_v(version));
  let os = match platform.os {
    Os::Windows => "windows",
    os => os.as_str(),
  };
  let arch = match platform.arch {
    Arch::X86_64 => "x64",
    Arch::Aarch64 => "aarch64",
  };
  let url = format!(
    "https://github.com/oven-sh/bun/releases/download/bun-{}/bun-{}-{}.zip",
    version, os, arch
  );
  let artifact = format!("bun{}", exe(platform));
  Descriptor::new("Bun", &version, format!("bun_{}", version), &artifact, url, "zip")
    .with_add_path(".")
    .with_drilling()
    .with_post_install(PostInstall::Symlink {
      link: PathBuf::from(format!("bunx{}", exe(platform))),
      target: PathBuf::from(artifact),
    })
}

fn node(platform: &Platform, version: &str) -> Descriptor {
  let version = strip_v(version);
  let (os, kind) = match platform.os {
    Os::Windows => ("win", "zip"),
    os => (os.as_str(), "tar.xz"),
  };
  let url = format!(
    "https://nodejs.org/dist/v{v}/node-v{v}-{os}-{arch}.{kind}",
    v = version,
    os = os,
    arch = platform.arch.short_name(),
    kind = kind,
  );
  Descriptor::new("Node", &version, format!("node_{}", version), "bin/node", url, kind)
    .with_add_path("bin")
    .with_drilling()
}

fn esbuild(platform: &Platform, version: &str) -> Descriptor {
  let version = strip_v(version);
  let target = format!("{}-{}", node_os(platform), platform.arch.short_name());
  let url = format!(
    "https://registry.npmjs.org/@esbuild/{t}/-/{t}-{v}.tgz",
    t = target,
    v = version
  );
  // npm tarballs wrap everything in `package/`, which drilling removes.
  Descriptor::new(
    "EsBuild",
    &version,
    format!("esbuild_{}", version),
    format!("bin/esbuild{}", exe(platform)),
    url,
    "tgz",
  )
  .with_drilling()
}

fn restic(platform: &Platform, version: &str) -> Descriptor {
  let version = strip_v(version);
  let url = format!(
    "https://github.com/restic/restic/releases/download/v{v}/restic_{v}_{os}_{arch}.bz2",
    v = version,
    os = platform.os.as_str(),
    arch = platform.arch.go_name(),
  );
  let binary = format!("restic{}", exe(platform));
  Descriptor::new("Restic", &version, format!("restic_{}", version), &binary, url, "bz2")
    .with_add_path(".")
    .with_drilling()
    .with_kept_download()
    .with_extractor(SingleFileBzip2::new(binary))
}

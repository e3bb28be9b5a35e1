//! Everything a lifecycle operation needs, resolved once per invocation.

use std::path::PathBuf;

use tracing::debug;

use crate::catalog;
use crate::env::PathRegistrar;
use crate::error::Result;
use crate::extract::ExtractorRegistry;
use crate::fetch::{Fetch, HttpFetcher};
use crate::package::{Descriptor, Package};
use crate::platform::HostInfo;
use crate::platform::paths::profile_path;
use crate::store::Store;

pub struct Context {
  host: HostInfo,
  store: Store,
  registrar: PathRegistrar,
  extractors: ExtractorRegistry,
  fetcher: Box<dyn Fetch>,
}

impl Context {
  /// Context with the default extractors and an HTTP fetcher.
  pub fn new(host: HostInfo, store: Store, profile: impl Into<PathBuf>) -> Self {
    let registrar = PathRegistrar::new(host.clone(), store.clone(), profile);
    let extractors = ExtractorRegistry::new(host.clone());
    Self {
      host,
      store,
      registrar,
      extractors,
      fetcher: Box::new(HttpFetcher::new()),
    }
  }

  /// Context for the running host, honouring `SUBPACK_ROOT` and `SUBPACK_PROFILE`.
  pub fn from_env() -> Result<Self> {
    let host = HostInfo::detect()?;
    let store = Store::for_host(&host);
    let profile = profile_path(&host);
    debug!(
      platform = %host.platform,
      root = %store.root().display(),
      profile = %profile.display(),
      "resolved context"
    );
    Ok(Self::new(host, store, profile))
  }

  pub fn with_fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
    self.fetcher = Box::new(fetcher);
    self
  }

  pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
    self.extractors = extractors;
    self
  }

  pub fn host(&self) -> &HostInfo {
    &self.host
  }

  pub fn store(&self) -> &Store {
    &self.store
  }

  pub fn registrar(&self) -> &PathRegistrar {
    &self.registrar
  }

  pub fn extractors(&self) -> &ExtractorRegistry {
    &self.extractors
  }

  pub fn fetcher(&self) -> &dyn Fetch {
    self.fetcher.as_ref()
  }

  /// Bind a descriptor to this context's store.
  pub fn package(&self, descriptor: Descriptor) -> Package {
    Package::new(descriptor, &self.store)
  }

  /// Look up `name[@version]` in the catalog.
  pub fn resolve(&self, spec: &str) -> Result<Package> {
    let spec: catalog::PackageSpec = spec.parse()?;
    let descriptor = catalog::resolve(&spec, &self.host.platform)?;
    Ok(self.package(descriptor))
  }
}

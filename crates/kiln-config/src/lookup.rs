//! Module request lookup against a [`ResolveConfig`].

use std::path::{Component, Path, PathBuf};

use oxc_resolver::{AliasValue, ResolveOptions};
use tracing::{debug, trace};

use crate::build::ResolveConfig;
use crate::error::{ConfigError, ResourceKind, Result};

/// Finds the file a module request refers to.
///
/// Aliases apply first (a key ending in `$` only matches exactly). Relative
/// requests are joined to the importing directory, bare requests are searched
/// in each `resolve.modules` root in order. A candidate is tried as written,
/// then with every extension in declared order, then as a package directory
/// (`package.json` main fields, then `index` plus an extension).
///
/// Single-name roots such as `node_modules` are looked up in every ancestor
/// directory. Roots with a path (`./src/components`) are anchored at the
/// project root.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{ModuleResolver, ResolveConfig};
///
/// let resolve = ResolveConfig::default();
/// let resolver = ModuleResolver::new(&resolve, "/project");
/// let path = resolver.resolve("./src/index").unwrap();
/// ```
pub struct ModuleResolver {
    resolver: oxc_resolver::Resolver,
    root: PathBuf,
}

impl ModuleResolver {
    pub fn new(config: &ResolveConfig, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let resolver = oxc_resolver::Resolver::new(ResolveOptions {
            alias: config
                .alias
                .iter()
                .map(|(key, target)| (key.clone(), vec![AliasValue::Path(target.clone())]))
                .collect(),
            modules: config
                .modules
                .iter()
                .map(|dir| module_root(&root, dir))
                .collect(),
            extensions: config.normalized_extensions().map(String::from).collect(),
            main_fields: vec!["module".into(), "main".into()],
            condition_names: vec![
                "browser".into(),
                "import".into(),
                "module".into(),
                "default".into(),
            ],
            symlinks: false,
            ..Default::default()
        });

        Self { resolver, root }
    }

    /// Resolve a request made from the project root.
    pub fn resolve(&self, request: &str) -> Result<PathBuf> {
        self.resolve_from(request, &self.root)
    }

    /// Resolve a request made by a module living in `importer_dir`.
    pub fn resolve_from(&self, request: &str, importer_dir: &Path) -> Result<PathBuf> {
        match self.resolver.resolve(importer_dir, request) {
            Ok(resolution) => {
                let path = resolution.into_path_buf();
                trace!(request, path = %path.display(), "resolved module");
                Ok(path)
            }
            Err(err) => {
                debug!(
                    request,
                    importer = %importer_dir.display(),
                    error = %err,
                    "module lookup failed"
                );
                Err(ConfigError::ResourceNotFound {
                    kind: ResourceKind::Module,
                    path: PathBuf::from(request),
                })
            }
        }
    }
}

/// A lookup root as the resolver expects it: a bare directory name, or an
/// absolute path for anything naming a location.
fn module_root(root: &Path, dir: &Path) -> String {
    let mut components = dir.components().peekable();
    let is_name =
        matches!(components.next(), Some(Component::Normal(_))) && components.peek().is_none();
    if is_name {
        return dir.to_string_lossy().into_owned();
    }

    let anchored = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .fold(root.to_path_buf(), |path, c| path.join(c));
    anchored.to_string_lossy().into_owned()
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::error::ResourceError;
use super::manifest::{Manifest, ManifestEntry};

/// Lazily populated byte cache keyed by manifest name.
#[derive(Debug, Default)]
pub struct ResourceCache {
    root: PathBuf,
    manifest: Option<Manifest>,
    loaded: HashMap<String, Rc<[u8]>>,
}

impl ResourceCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest: None,
            loaded: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installs a manifest, replacing any previous one. Cached bytes are dropped.
    pub fn set_manifest(&mut self, manifest: Manifest) {
        log::debug!("resource manifest set ({} entries)", manifest.len());
        self.manifest = Some(manifest);
        self.loaded.clear();
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn entry(&self, name: &str) -> Option<&ManifestEntry> {
        self.manifest.as_ref()?.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Full path of a named resource.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ResourceError> {
        let manifest = self.manifest.as_ref().ok_or(ResourceError::NoManifest)?;
        let entry = manifest
            .get(name)
            .ok_or_else(|| ResourceError::Unknown(name.to_string()))?;
        Ok(self.root.join(&entry.path))
    }

    /// Returns the bytes of a named resource, reading the file on first use.
    pub fn load(&mut self, name: &str) -> Result<Rc<[u8]>, ResourceError> {
        if let Some(bytes) = self.loaded.get(name) {
            return Ok(Rc::clone(bytes));
        }

        let path = self.resolve(name)?;
        let bytes: Rc<[u8]> = std::fs::read(&path)
            .map_err(|source| ResourceError::Io {
                name: name.to_string(),
                path: path.clone(),
                source,
            })?
            .into();

        log::trace!("loaded resource {name} ({} bytes)", bytes.len());
        self.loaded.insert(name.to_string(), Rc::clone(&bytes));
        Ok(bytes)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Drops the cached bytes for `name`. Returns `true` if they were cached.
    pub fn evict(&mut self, name: &str) -> bool {
        self.loaded.remove(name).is_some()
    }

    /// Drops all cached bytes; the manifest stays.
    pub fn clear(&mut self) {
        self.loaded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, ResourceCache) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("text")).unwrap();
        std::fs::write(dir.path().join("text/hello.txt"), b"hello").unwrap();

        let manifest: Manifest = serde_json::from_str(
            r#"{ "resources": {
                "hello":   { "path": "text/hello.txt" },
                "missing": { "path": "text/missing.txt" }
            } }"#,
        )
        .unwrap();

        let mut cache = ResourceCache::new(dir.path());
        cache.set_manifest(manifest);
        (dir, cache)
    }

    #[test]
    fn load_without_manifest_fails() {
        let mut cache = ResourceCache::new(".");
        assert!(matches!(cache.load("x"), Err(ResourceError::NoManifest)));
    }

    #[test]
    fn load_reads_once_and_caches() {
        let (dir, mut cache) = fixture();

        let first = cache.load("hello").unwrap();
        assert_eq!(&*first, b"hello");
        assert!(cache.is_loaded("hello"));

        // Served from cache even after the file changes on disk.
        std::fs::write(dir.path().join("text/hello.txt"), b"changed").unwrap();
        assert_eq!(&*cache.load("hello").unwrap(), b"hello");

        assert!(cache.evict("hello"));
        assert_eq!(&*cache.load("hello").unwrap(), b"changed");
    }

    #[test]
    fn unknown_and_unreadable_resources_error() {
        let (_dir, mut cache) = fixture();
        assert!(matches!(cache.load("nope"), Err(ResourceError::Unknown(n)) if n == "nope"));
        assert!(matches!(cache.load("missing"), Err(ResourceError::Io { .. })));
        assert!(!cache.is_loaded("missing"));
    }

    #[test]
    fn set_manifest_drops_cached_bytes() {
        let (_dir, mut cache) = fixture();
        cache.load("hello").unwrap();
        cache.set_manifest(Manifest::default());
        assert!(!cache.is_loaded("hello"));
        assert!(!cache.contains("hello"));
    }
}

//! Path Deriver
//!
//! Computes where a service's ORM artifacts live. Pure and infallible: the
//! service name is not validated here and nothing is checked on disk.

use std::path::Path;

/// ORM artifact directories of one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPaths {
    pub migrations_dir: String,
    pub models_dir: String,
    pub seeders_dir: String,
}

/// `rootDir/service/<orm lowercased>/{migrations,models,seeders}`
pub fn derive_paths(service: &str, orm: &str, root_dir: &str) -> DerivedPaths {
    let base = Path::new(root_dir).join(service).join(orm.to_lowercase());
    let dir = |leaf: &str| base.join(leaf).display().to_string();

    DerivedPaths {
        migrations_dir: dir("migrations"),
        models_dir: dir("models"),
        seeders_dir: dir("seeders"),
    }
}

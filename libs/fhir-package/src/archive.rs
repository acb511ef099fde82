//! Reading built archives back.

use crate::{PackageError, PackageIndex, PackageManifest, PackageResult};
use flate2::read::GzDecoder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tar::Archive;

const MANIFEST_PATH: &str = "package/package.json";
const INDEX_PATH: &str = "package/.index.json";

/// A package archive loaded into memory.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub manifest: PackageManifest,
    pub index: Option<PackageIndex>,
    /// Resource JSON keyed by archive path (`package/...`)
    pub resources: HashMap<String, Value>,
}

/// Load a `.tgz` package archive from disk.
pub fn load_archive(path: &Path) -> PackageResult<LoadedPackage> {
    from_tar_gz(fs::File::open(path)?)
}

/// Load a package archive from any reader of gzipped tar bytes.
pub fn from_tar_gz<R: Read>(reader: R) -> PackageResult<LoadedPackage> {
    let mut decoder = GzDecoder::new(reader);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;

    let mut archive = Archive::new(std::io::Cursor::new(decompressed));
    let mut files: HashMap<String, Vec<u8>> = HashMap::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.to_string_lossy().to_string();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        files.insert(path, contents);
    }

    let manifest: PackageManifest = files
        .get(MANIFEST_PATH)
        .ok_or_else(|| PackageError::MissingFile(MANIFEST_PATH.to_string()))
        .and_then(|bytes| Ok(serde_json::from_slice(bytes)?))?;

    let index = files
        .get(INDEX_PATH)
        .and_then(|bytes| serde_json::from_slice::<PackageIndex>(bytes).ok());

    let mut resources = HashMap::new();
    for (path, bytes) in &files {
        if path.starts_with("package/")
            && path.ends_with(".json")
            && path != MANIFEST_PATH
            && path != INDEX_PATH
        {
            resources.insert(path.clone(), serde_json::from_slice(bytes)?);
        }
    }

    Ok(LoadedPackage {
        manifest,
        index,
        resources,
    })
}

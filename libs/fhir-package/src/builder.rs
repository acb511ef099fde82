//! Resource discovery and archive writing.

use crate::{IndexEntry, PackageError, PackageIndex, PackageManifest, PackageResult, ResourceReference};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tar::{Builder, Header};

/// One FHIR resource file discovered under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Path relative to the source directory, `/`-separated
    pub relative_path: String,
    pub resource_type: String,
    pub id: Option<String>,
    pub url: Option<String>,
    pub version: Option<String>,
}

impl ResourceEntry {
    /// Index entry for this resource (`kind` is the lowercased type).
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            filename: self.relative_path.clone(),
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
            kind: Some(self.resource_type.to_lowercase()),
            url: self.url.clone(),
            version: self.version.clone(),
        }
    }

    /// Manifest reference for this resource (relative path minus `.json`).
    pub fn reference(&self) -> ResourceReference {
        let reference = self
            .relative_path
            .strip_suffix(".json")
            .unwrap_or(&self.relative_path)
            .to_string();
        ResourceReference {
            resource_type: self.resource_type.clone(),
            reference,
        }
    }
}

/// A file that looked like a resource but could not be read as one.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of [`scan_directory`].
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub resources: Vec<ResourceEntry>,
    pub skipped: Vec<SkippedFile>,
}

/// Recursively collect FHIR resource files under `dir`.
///
/// Accepts `*.json`, skipping dotfiles and `package*`/`index*` names (the
/// manifest and index are generated, never scanned). Files that fail to
/// parse as JSON are returned in `skipped` rather than aborting the scan.
/// Resources are ordered by relative path so archives come out
/// deterministic.
pub fn scan_directory(dir: &Path) -> PackageResult<ScanOutcome> {
    if !dir.is_dir() {
        return Err(PackageError::NotADirectory(dir.display().to_string()));
    }

    let mut outcome = ScanOutcome::default();
    walk(dir, dir, &mut outcome)?;
    outcome
        .resources
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(outcome)
}

fn walk(root: &Path, dir: &Path, outcome: &mut ScanOutcome) -> PackageResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(root, &path, outcome)?;
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_resource_file(file_name) {
            continue;
        }

        let relative_path = relative_slash_path(root, &path);
        match read_resource(&path) {
            Ok(value) => outcome.resources.push(ResourceEntry {
                relative_path,
                resource_type: value
                    .get("resourceType")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string(),
                id: string_field(&value, "id"),
                url: string_field(&value, "url"),
                version: string_field(&value, "version"),
            }),
            Err(err) => outcome.skipped.push(SkippedFile {
                path,
                reason: err.to_string(),
            }),
        }
    }
    Ok(())
}

fn is_resource_file(name: &str) -> bool {
    name.ends_with(".json")
        && !name.starts_with('.')
        && !name.starts_with("package")
        && !name.starts_with("index")
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_resource(path: &Path) -> PackageResult<Value> {
    Ok(serde_json::from_slice(&fs::read(path)?)?)
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Write the gzip-compressed package archive.
///
/// Layout: `package/package.json`, `package/.index.json`, then one
/// `package/<relative path>` entry per resource, read from `source_dir`.
pub fn build_archive(
    source_dir: &Path,
    manifest: &PackageManifest,
    resources: &[ResourceEntry],
    output: &Path,
) -> PackageResult<()> {
    manifest.validate()?;

    let index = PackageIndex {
        index_version: 1,
        files: resources.iter().map(ResourceEntry::index_entry).collect(),
    };

    let file = fs::File::create(output)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut tar = Builder::new(encoder);

    append_bytes(
        &mut tar,
        "package/package.json",
        &serde_json::to_vec_pretty(manifest)?,
    )?;
    append_bytes(
        &mut tar,
        "package/.index.json",
        &serde_json::to_vec_pretty(&index)?,
    )?;

    for resource in resources {
        let mut source = fs::File::open(source_dir.join(&resource.relative_path))?;
        tar.append_file(format!("package/{}", resource.relative_path), &mut source)?;
    }

    tar.into_inner()?.finish()?;
    Ok(())
}

fn append_bytes<W: std::io::Write>(
    tar: &mut Builder<W>,
    path: &str,
    bytes: &[u8],
) -> PackageResult<()> {
    let mut header = Header::new_gnu();
    header.set_size(bytes.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, path, bytes)?;
    Ok(())
}

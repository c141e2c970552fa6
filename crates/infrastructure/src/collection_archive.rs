use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use galaxy_rbac_core::{AppError, AppResult};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

const README: &str = "# Test collection\n\nBuilt for role based access control checks.\n";
const RUNTIME: &str = "---\nrequires_ansible: '>=2.9.10'\n";

/// In-memory collection tarball ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionArchive {
    /// `<namespace>-<name>-<version>.tar.gz`.
    pub file_name: String,
    /// Gzipped tar bytes.
    pub bytes: Vec<u8>,
    /// Hex sha256 of `bytes`.
    pub sha256: String,
}

/// Builds a minimal, importable collection archive.
///
/// The archive carries `MANIFEST.json`, `FILES.json`, `README.md` and
/// `meta/runtime.yml`; every file checksum in `FILES.json` is a sha256.
pub fn build_collection_archive(
    namespace: &str,
    name: &str,
    version: &str,
) -> AppResult<CollectionArchive> {
    let files_json = files_manifest();
    let files_bytes = to_json_bytes(&files_json)?;
    let manifest = collection_manifest(namespace, name, version, &sha256_hex(&files_bytes));
    let manifest_bytes = to_json_bytes(&manifest)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    {
        let mut builder = tar::Builder::new(&mut encoder);
        append_file(&mut builder, "MANIFEST.json", &manifest_bytes)?;
        append_file(&mut builder, "FILES.json", &files_bytes)?;
        append_file(&mut builder, "README.md", README.as_bytes())?;
        append_directory(&mut builder, "meta")?;
        append_file(&mut builder, "meta/runtime.yml", RUNTIME.as_bytes())?;
        builder.finish().map_err(archive_error)?;
    }
    let bytes = encoder.finish().map_err(archive_error)?;

    Ok(CollectionArchive {
        file_name: format!("{namespace}-{name}-{version}.tar.gz"),
        sha256: sha256_hex(&bytes),
        bytes,
    })
}

fn collection_manifest(namespace: &str, name: &str, version: &str, files_sha256: &str) -> Value {
    json!({
        "collection_info": {
            "namespace": namespace,
            "name": name,
            "version": version,
            "authors": ["galaxy-rbac"],
            "readme": "README.md",
            "tags": ["tools"],
            "description": "collection used by role based access control checks",
            "license": ["GPL-3.0-or-later"],
            "license_file": null,
            "dependencies": {},
            "repository": "https://example.com/galaxy-rbac",
            "documentation": null,
            "homepage": null,
            "issues": null,
        },
        "file_manifest_file": {
            "name": "FILES.json",
            "ftype": "file",
            "chksum_type": "sha256",
            "chksum_sha256": files_sha256,
            "format": 1,
        },
        "format": 1,
    })
}

fn files_manifest() -> Value {
    json!({
        "files": [
            directory_entry("."),
            file_entry("README.md", README.as_bytes()),
            directory_entry("meta"),
            file_entry("meta/runtime.yml", RUNTIME.as_bytes()),
        ],
        "format": 1,
    })
}

fn directory_entry(name: &str) -> Value {
    json!({
        "name": name,
        "ftype": "dir",
        "chksum_type": null,
        "chksum_sha256": null,
        "format": 1,
    })
}

fn file_entry(name: &str, content: &[u8]) -> Value {
    json!({
        "name": name,
        "ftype": "file",
        "chksum_type": "sha256",
        "chksum_sha256": sha256_hex(content),
        "format": 1,
    })
}

fn append_file<W: Write>(
    builder: &mut tar::Builder<W>,
    path: &str,
    content: &[u8],
) -> AppResult<()> {
    let mut header = tar::Header::new_gnu();
    header.set_path(path).map_err(archive_error)?;
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append(&header, content).map_err(archive_error)
}

fn append_directory<W: Write>(builder: &mut tar::Builder<W>, path: &str) -> AppResult<()> {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_path(path).map_err(archive_error)?;
    header.set_size(0);
    header.set_mode(0o755);
    header.set_cksum();
    builder.append(&header, std::io::empty()).map_err(archive_error)
}

fn to_json_bytes(value: &Value) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to encode collection metadata: {error}")))
}

fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

fn archive_error(error: std::io::Error) -> AppError {
    AppError::Internal(format!("failed to build collection archive: {error}"))
}

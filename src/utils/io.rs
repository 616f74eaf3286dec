use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::record::LeadRecord;

/// Input container. The `leads` wrapper is what upstream exports produce; a bare
/// array is what this tool writes, so both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LeadsDocument {
    Wrapped { leads: Vec<LeadRecord> },
    Bare(Vec<LeadRecord>),
}

/// Load the ordered lead records from a JSON file.
pub async fn load_leads(path: &Path) -> Result<Vec<LeadRecord>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    parse_leads(&content).with_context(|| format!("Failed to parse input file: {}", path.display()))
}

pub fn parse_leads(content: &str) -> Result<Vec<LeadRecord>> {
    let document: LeadsDocument = serde_json::from_str(content)?;
    Ok(match document {
        LeadsDocument::Wrapped { leads } => leads,
        LeadsDocument::Bare(leads) => leads,
    })
}

/// Serialize `value` as JSON indented by `indent` spaces per level.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<Vec<u8>> {
    let indent = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write `value` as pretty-printed JSON, creating the parent directory if needed.
pub async fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T, indent: usize) -> Result<()> {
    let buffer = to_json_pretty(value, indent)?;
    write_all_or_nothing(&[(path, buffer)]).await
}

/// Write every `(path, contents)` pair, or none of them.
///
/// Targets that are directories are refused before anything is written. Each
/// payload goes to a hidden sibling file first and is renamed over its target
/// only once all payloads are on disk.
pub async fn write_all_or_nothing(outputs: &[(&Path, Vec<u8>)]) -> Result<()> {
    for (path, _) in outputs {
        if fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false) {
            anyhow::bail!("Output path is a directory: {}", path.display());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        let staging = staging_path(path)?;
        if let Err(e) = fs::write(&staging, contents).await {
            let _ = fs::remove_file(&staging).await;
            discard_staged(&staged).await;
            return Err(e).with_context(|| format!("Failed to write output file: {}", path.display()));
        }
        staged.push((staging, *path));
    }

    for (index, (staging, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(staging, path).await {
            discard_staged(&staged[index..]).await;
            return Err(e).with_context(|| format!("Failed to write output file: {}", path.display()));
        }
    }

    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Output path has no file name: {}", path.display()))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}

async fn discard_staged(staged: &[(PathBuf, &Path)]) {
    for (staging, _) in staged {
        let _ = fs::remove_file(staging).await;
    }
}

use anyhow::Context;
use std::path::Path;
use tracing::{error, trace};

/// Reads a `.json` file from `path`.
pub async fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    trace!("reading file path: {}", path.display());
    let file = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    trace!("file read; deserializing bytes ...");
    let data: T = serde_json::from_slice(&file)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(data)
}

/// Writes `value` to `path` as indented JSON, replacing whatever was there.
///
/// Non-ASCII text is written as-is rather than `\u` escaped. The file is written in a
/// single create/write/close; there is no staging file, so an interrupted write can
/// leave it truncated.
pub async fn write_json<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(value).context("failed to serialize JSON")?;

    trace!("writing {} bytes to {}", bytes.len(), path.display());
    tokio::fs::write(path, bytes).await.map_err(|err| {
        error!("failed to write {}, error({err})", path.display());
        anyhow::Error::new(err).context(format!("failed to write {}", path.display()))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn write_then_read_keeps_unicode_unescaped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");

        write_json(&path, &json!({ "event": "Índice de Precios ¥" }))
            .await
            .expect("write");

        let raw = std::fs::read_to_string(&path).expect("read raw");
        assert!(raw.contains("Índice de Precios ¥"));
        assert!(raw.contains("\n  \"event\""));

        let back: Value = read_json(&path).await.expect("read back");
        assert_eq!(back["event"], "Índice de Precios ¥");
    }

    #[tokio::test]
    async fn write_overwrites_previous_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        std::fs::write(&path, "x".repeat(4096)).expect("seed");

        write_json(&path, &json!([])).await.expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "[]");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.json");
        assert!(write_json(&path, &json!({})).await.is_err());
    }
}

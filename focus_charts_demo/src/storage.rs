// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON persistence for the ordered focus list.
//!
//! The store is a JSON array of `{ "id": string, "text": string, "percent": number }` in rank
//! order. Loading is forgiving: a missing or unreadable store is an empty list, and malformed
//! entries are skipped. Percentages are stored for other consumers but recomputed on load.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use focus_core::FocusItem;
use serde_json::Value;

/// Reads the list stored at `path`.
pub(crate) fn load(path: &Path) -> Vec<FocusItem> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no focus store yet");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read focus store");
            return Vec::new();
        }
    };
    parse(&raw)
}

/// Parses a stored list, dropping entries that don't look like focus items.
pub(crate) fn parse(raw: &str) -> Vec<FocusItem> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "focus store is not valid JSON; starting empty");
            return Vec::new();
        }
    };
    let Value::Array(entries) = value else {
        tracing::warn!("focus store is not a JSON array; starting empty");
        return Vec::new();
    };
    let total = entries.len();
    let items: Vec<FocusItem> = entries
        .into_iter()
        .filter(is_valid_entry)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if items.len() != total {
        tracing::warn!(
            skipped = total - items.len(),
            "skipped malformed focus store entries"
        );
    }
    items
}

fn is_valid_entry(entry: &Value) -> bool {
    entry.get("id").is_some_and(Value::is_string)
        && entry.get("text").is_some_and(Value::is_string)
        && entry
            .get("percent")
            .and_then(Value::as_f64)
            .is_some_and(|p| p > 0.0)
}

/// Writes `items` to `path` as pretty-printed JSON.
pub(crate) fn save(path: &Path, items: &[FocusItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(items).context("failed to serialize focus list")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write focus store {}", path.display()))?;
    tracing::debug!(path = %path.display(), items = items.len(), "saved focus store");
    Ok(())
}

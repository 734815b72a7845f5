// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus items and their stable identifiers.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Opaque, stable identifier of a [`FocusItem`].
///
/// Ids are assigned once when an item is created and are never mutated. They are the only way
/// reorder commands refer to items, so ranks can shift freely underneath them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a raw identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One ranked allocation of attention.
///
/// `percent` is derived data: it is recomputed from the item's rank every time the owning list
/// changes, and there is no public setter for it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusItem {
    id: ItemId,
    text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    percent: f64,
}

impl FocusItem {
    /// Creates an item with no allocation yet (`percent == 0`).
    pub fn new(id: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            percent: 0.0,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// User-supplied label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Share of attention in `[0, 100]`, at full precision.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub(crate) fn set_percent(&mut self, percent: f64) {
        self.percent = percent;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier generation for new focus items.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::item::ItemId;

/// A source of fresh item identifiers.
///
/// Implementations should produce globally unique strings (e.g. random UUIDs). The engine still
/// guards against collisions with ids already in its list, so a weak source degrades to suffixed
/// ids rather than duplicates.
pub trait IdGenerator {
    /// Produces the next identifier.
    fn next_id(&mut self) -> ItemId;

    /// Notes an id that is already in use, e.g. one restored from storage.
    ///
    /// Generators with internal state should never issue `id` afterwards. The default does
    /// nothing.
    fn observe(&mut self, id: &ItemId) {
        let _ = id;
    }
}

impl<F: FnMut() -> ItemId> IdGenerator for F {
    fn next_id(&mut self) -> ItemId {
        self()
    }
}

/// Deterministic `prefix-N` ids.
///
/// This is the fallback for targets without a random source. Ids are unique per generator and
/// never reused, since the counter only moves forward. Observing `prefix-N` moves the counter
/// past `N`, so a restored list doesn't get its ids issued again.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Creates a generator yielding `prefix-1`, `prefix-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("focus")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ItemId {
        let id = ItemId::new(format!("{}-{}", self.prefix, self.next));
        self.next = self.next.saturating_add(1);
        id
    }

    fn observe(&mut self, id: &ItemId) {
        let seen = id
            .as_str()
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u64>().ok());
        if let Some(n) = seen {
            self.next = self.next.max(n.saturating_add(1));
        }
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random item ids.

use focus_core::{IdGenerator, ItemId};
use uuid::Uuid;

/// Random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ItemId {
        ItemId::new(Uuid::new_v4().to_string())
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The command interface a UI layer dispatches against a [`ReorderEngine`](crate::ReorderEngine).

extern crate alloc;

use alloc::string::String;

use crate::item::ItemId;

/// The fixed set of list operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Append a new item at the lowest rank.
    Add {
        /// Label of the new item.
        text: String,
    },
    /// Remove an item.
    Remove(ItemId),
    /// Move an item to rank 0.
    MoveToTop(ItemId),
    /// Swap an item with the one ranked directly above it.
    MoveUp(ItemId),
    /// Swap an item with the one ranked directly below it.
    MoveDown(ItemId),
    /// Move an item to the last rank.
    MoveToBottom(ItemId),
    /// Take `from` out of the list and reinsert it at the rank `to` currently holds.
    Reposition {
        /// The dragged item.
        from: ItemId,
        /// The drop target.
        to: ItemId,
    },
    /// Toggle selection of an item.
    Select(ItemId),
    /// Replace an item's label.
    Rename {
        /// Item to edit.
        id: ItemId,
        /// New label.
        text: String,
    },
    /// Remove every item.
    Clear,
}

/// Observable outcome of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// A new item was appended.
    Added(ItemId),
    /// An item was removed.
    Removed(ItemId),
    /// An item moved between ranks.
    Moved {
        /// The moved item.
        id: ItemId,
        /// Rank before the move.
        from: usize,
        /// Rank after the move.
        to: usize,
    },
    /// The selection changed (`None` means nothing is selected).
    Selected(Option<ItemId>),
    /// An item's label changed.
    Renamed(ItemId),
    /// The list was emptied.
    Cleared,
    /// The command was valid but had nothing to do (boundary move, same-item reposition, ...).
    Unchanged,
    /// The command referenced an id that is not in the list. Nothing was modified.
    InvalidReference(ItemId),
}

impl Change {
    /// Returns `true` if the list or selection was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged | Self::InvalidReference(_))
    }

    /// Returns `true` if item ranks (and therefore percentages) may have changed.
    pub fn affects_allocation(&self) -> bool {
        matches!(
            self,
            Self::Added(_) | Self::Removed(_) | Self::Moved { .. } | Self::Cleared
        )
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rank-ordered focus lists.
//!
//! A focus budget is an ordered list of items where each item's share of attention is derived
//! purely from its rank:
//! - [`rank_percentages`] and [`allocate`] turn an ordering into percentages using a doubling
//!   weight per rank (rank 0 is worth twice rank 1, which is worth twice rank 2, ...).
//! - [`ReorderEngine`] owns the ordered list, applies [`Command`]s to it, and recomputes the
//!   allocation for the whole list after every structural change.
//!
//! Geometry and color live downstream in `focus_charts`; this crate is pure list logic.

#![no_std]

extern crate alloc;

mod allocate;
mod command;
mod ids;
mod item;
mod reorder;

pub use allocate::{
    Allocation, AllocationError, MAX_RANKED_ITEMS, allocate, rank_percentages, reallocate,
};
pub use command::{Change, Command};
pub use ids::{IdGenerator, SequentialIds};
pub use item::{FocusItem, ItemId};
pub use reorder::ReorderEngine;

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rank-to-percentage allocation.
//!
//! The weight of rank `i` in a list of `n` items is `2^(n-1-i)`, so the total weight is
//! `2^n - 1` and `percent(i) = 2^(n-1-i) / (2^n - 1) * 100`.
//!
//! Computing the weights directly overflows `f64` once `n` passes ~1023. Instead we evaluate the
//! normalized form `percent(0) = 50 / (1 - 2^-n)` and halve it for every following rank. Halving
//! is exact in binary floating point, so adjacent ranks keep a ratio of exactly 2 and no
//! intermediate value exceeds 100.
//!
//! Results are never rounded here. Display rounding is a presentation concern (see
//! `focus_charts::format_percent`).

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::item::{FocusItem, ItemId};

/// Largest list the allocator accepts.
///
/// At this size the smallest share (`50 * 2^-999`) is still a normal `f64`, which keeps the
/// doubling ratio between adjacent ranks exact.
pub const MAX_RANKED_ITEMS: usize = 1000;

/// Mapping from item id to its percentage share.
pub type Allocation = HashMap<ItemId, f64>;

/// Errors returned by the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    /// The list is longer than [`MAX_RANKED_ITEMS`].
    OutOfRange {
        /// Length of the rejected list.
        len: usize,
        /// The maximum supported length.
        max: usize,
    },
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { len, max } => write!(
                f,
                "cannot allocate {len} ranked items: at most {max} are supported"
            ),
        }
    }
}

impl core::error::Error for AllocationError {}

/// Returns the percentage share of every rank in a list of `n` items, highest rank first.
///
/// `n == 0` yields an empty vector and `n == 1` yields `[100.0]`.
pub fn rank_percentages(n: usize) -> Result<Vec<f64>, AllocationError> {
    check_len(n)?;
    let mut out = Vec::with_capacity(n);
    fill(n, |p| out.push(p));
    Ok(out)
}

/// Allocates percentages to an ordered list of ids.
///
/// Ids are expected to be unique; if an id repeats, the entry for its last rank wins.
pub fn allocate(ordered_ids: &[ItemId]) -> Result<Allocation, AllocationError> {
    check_len(ordered_ids.len())?;
    let mut out = Allocation::with_capacity(ordered_ids.len());
    let mut ids = ordered_ids.iter();
    fill(ordered_ids.len(), |p| {
        if let Some(id) = ids.next() {
            out.insert(id.clone(), p);
        }
    });
    tracing::trace!(items = ordered_ids.len(), "allocated rank percentages");
    Ok(out)
}

/// Recomputes `percent` for every item in place, from its position in the slice.
pub fn reallocate(items: &mut [FocusItem]) -> Result<(), AllocationError> {
    check_len(items.len())?;
    write_percentages(items);
    Ok(())
}

/// Writes percentages without the length check.
///
/// Callers must guarantee `items.len() <= MAX_RANKED_ITEMS`.
pub(crate) fn write_percentages(items: &mut [FocusItem]) {
    let mut slots = items.iter_mut();
    fill(slots.len(), |p| {
        if let Some(item) = slots.next() {
            item.set_percent(p);
        }
    });
}

fn check_len(len: usize) -> Result<(), AllocationError> {
    if len > MAX_RANKED_ITEMS {
        tracing::debug!(len, max = MAX_RANKED_ITEMS, "rejected oversized focus list");
        return Err(AllocationError::OutOfRange {
            len,
            max: MAX_RANKED_ITEMS,
        });
    }
    Ok(())
}

fn fill(n: usize, mut emit: impl FnMut(f64)) {
    if n == 0 {
        return;
    }
    // 2^-n, exact by repeated halving.
    let mut tail = 1.0_f64;
    for _ in 0..n {
        tail *= 0.5;
    }
    let mut percent = 50.0 / (1.0 - tail);
    for _ in 0..n {
        emit(percent);
        percent *= 0.5;
    }
}

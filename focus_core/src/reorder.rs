// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owned, ordered focus list.
//!
//! [`ReorderEngine`] is the single owner of the ordering. Every operation is atomic from the
//! caller's point of view: the order is mutated, the allocation is recomputed for the *whole*
//! list, the revision is bumped, and a [`Change`] is returned. Callers only ever observe the
//! list through shared borrows between operations.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::allocate::{AllocationError, MAX_RANKED_ITEMS, write_percentages};
use crate::command::{Change, Command};
use crate::ids::{IdGenerator, SequentialIds};
use crate::item::{FocusItem, ItemId};

/// Owner of an ordered focus list.
#[derive(Clone, Debug)]
pub struct ReorderEngine<G = SequentialIds> {
    items: Vec<FocusItem>,
    selected: Option<ItemId>,
    revision: u64,
    ids: G,
}

impl ReorderEngine<SequentialIds> {
    /// Creates an empty list using [`SequentialIds`].
    pub fn new() -> Self {
        Self::with_id_generator(SequentialIds::default())
    }
}

impl Default for ReorderEngine<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> ReorderEngine<G> {
    /// Creates an empty list that draws new ids from `ids`.
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            revision: 0,
            ids,
        }
    }

    /// Restores a previously persisted list.
    ///
    /// Items keep their stored order. Repeated ids are dropped (the first occurrence wins) and
    /// stored percentages are discarded in favor of a fresh allocation. Every kept id is passed
    /// to [`IdGenerator::observe`].
    pub fn restore(mut ids: G, items: Vec<FocusItem>) -> Result<Self, AllocationError> {
        let mut seen = HashSet::with_capacity(items.len());
        let total = items.len();
        let mut items: Vec<FocusItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
        if items.len() > MAX_RANKED_ITEMS {
            return Err(AllocationError::OutOfRange {
                len: items.len(),
                max: MAX_RANKED_ITEMS,
            });
        }
        if items.len() != total {
            tracing::debug!(
                dropped = total - items.len(),
                "dropped focus items with repeated ids"
            );
        }
        for item in &items {
            ids.observe(item.id());
        }
        write_percentages(&mut items);
        Ok(Self {
            items,
            selected: None,
            revision: 0,
            ids,
        })
    }

    /// Items in rank order.
    pub fn items(&self) -> &[FocusItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Monotonic counter bumped by every command that modifies the list or selection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Ids in rank order.
    pub fn order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    /// Returns the rank of `id`, if present.
    pub fn rank_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&FocusItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The selected item id, if any.
    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    /// Rank of the selected item, if any.
    pub fn selected_rank(&self) -> Option<usize> {
        self.selected.as_ref().and_then(|id| self.rank_of(id))
    }

    /// Dispatches a [`Command`].
    ///
    /// Only [`Command::Add`] can fail, when the list is already at [`MAX_RANKED_ITEMS`].
    pub fn apply(&mut self, command: Command) -> Result<Change, AllocationError> {
        let change = match command {
            Command::Add { text } => return self.add(text),
            Command::Remove(id) => self.remove(&id),
            Command::MoveToTop(id) => self.move_to_top(&id),
            Command::MoveUp(id) => self.move_up(&id),
            Command::MoveDown(id) => self.move_down(&id),
            Command::MoveToBottom(id) => self.move_to_bottom(&id),
            Command::Reposition { from, to } => self.reposition(&from, &to),
            Command::Select(id) => self.select(&id),
            Command::Rename { id, text } => self.rename(&id, text),
            Command::Clear => self.clear(),
        };
        Ok(change)
    }

    /// Appends a new item at the lowest rank.
    pub fn add(&mut self, text: impl Into<String>) -> Result<Change, AllocationError> {
        if self.items.len() >= MAX_RANKED_ITEMS {
            return Err(AllocationError::OutOfRange {
                len: self.items.len() + 1,
                max: MAX_RANKED_ITEMS,
            });
        }
        let id = self.fresh_id();
        self.items.push(FocusItem::new(id.clone(), text));
        self.commit();
        tracing::debug!(id = %id, len = self.items.len(), "added focus item");
        Ok(Change::Added(id))
    }

    /// Removes an item. Clears the selection if it pointed at the removed item.
    pub fn remove(&mut self, id: &ItemId) -> Change {
        let Some(index) = self.rank_of(id) else {
            return invalid(id);
        };
        self.items.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.commit();
        tracing::debug!(id = %id, len = self.items.len(), "removed focus item");
        Change::Removed(id.clone())
    }

    /// Removes every item.
    pub fn clear(&mut self) -> Change {
        if self.items.is_empty() {
            return Change::Unchanged;
        }
        self.items.clear();
        self.selected = None;
        self.commit();
        tracing::debug!("cleared focus list");
        Change::Cleared
    }

    /// Replaces an item's label. Ranks are unaffected, so nothing is reallocated.
    pub fn rename(&mut self, id: &ItemId, text: impl Into<String>) -> Change {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return invalid(id);
        };
        let text = text.into();
        if item.text() == text {
            return Change::Unchanged;
        }
        item.set_text(text);
        self.revision += 1;
        Change::Renamed(id.clone())
    }

    /// Toggles the selection of `id`.
    pub fn select(&mut self, id: &ItemId) -> Change {
        if self.rank_of(id).is_none() {
            return invalid(id);
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
        self.revision += 1;
        Change::Selected(self.selected.clone())
    }

    /// Drops the current selection, if any.
    pub fn deselect(&mut self) -> Change {
        if self.selected.take().is_none() {
            return Change::Unchanged;
        }
        self.revision += 1;
        Change::Selected(None)
    }

    /// Moves `id` to rank 0.
    pub fn move_to_top(&mut self, id: &ItemId) -> Change {
        self.move_by(id, |_, _| 0)
    }

    /// Swaps `id` with its upper neighbor.
    pub fn move_up(&mut self, id: &ItemId) -> Change {
        self.move_by(id, |rank, _| rank.saturating_sub(1))
    }

    /// Swaps `id` with its lower neighbor.
    pub fn move_down(&mut self, id: &ItemId) -> Change {
        self.move_by(id, |rank, last| (rank + 1).min(last))
    }

    /// Moves `id` to the last rank.
    pub fn move_to_bottom(&mut self, id: &ItemId) -> Change {
        self.move_by(id, |_, last| last)
    }

    /// Removes `from` and reinserts it at the rank `to` holds before the move.
    ///
    /// On `[A, B, C]`, `reposition(C, A)` yields `[C, A, B]` and `reposition(A, C)` yields
    /// `[B, C, A]`.
    pub fn reposition(&mut self, from: &ItemId, to: &ItemId) -> Change {
        let Some(source) = self.rank_of(from) else {
            return invalid(from);
        };
        let Some(target) = self.rank_of(to) else {
            return invalid(to);
        };
        self.move_rank(source, target)
    }

    fn move_by(&mut self, id: &ItemId, target: impl FnOnce(usize, usize) -> usize) -> Change {
        let Some(rank) = self.rank_of(id) else {
            return invalid(id);
        };
        let last = self.items.len() - 1;
        self.move_rank(rank, target(rank, last))
    }

    fn move_rank(&mut self, from: usize, to: usize) -> Change {
        if from == to {
            return Change::Unchanged;
        }
        let item = self.items.remove(from);
        let id = item.id().clone();
        self.items.insert(to.min(self.items.len()), item);
        self.commit();
        tracing::debug!(id = %id, from, to, "moved focus item");
        Change::Moved { id, from, to }
    }

    fn commit(&mut self) {
        write_percentages(&mut self.items);
        self.revision += 1;
    }

    fn fresh_id(&mut self) -> ItemId {
        let base = self.ids.next_id();
        if self.rank_of(&base).is_none() {
            return base;
        }
        let mut suffix = 1_u32;
        loop {
            let candidate = ItemId::new(format!("{base}-{suffix}"));
            if self.rank_of(&candidate).is_none() {
                tracing::trace!(id = %candidate, "id generator collided; suffixed");
                return candidate;
            }
            suffix += 1;
        }
    }
}

fn invalid(id: &ItemId) -> Change {
    tracing::trace!(id = %id, "command referenced an unknown focus item");
    Change::InvalidReference(id.clone())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn engine_with(labels: &[&str]) -> ReorderEngine {
        let mut engine = ReorderEngine::new();
        for label in labels {
            engine.add(*label).unwrap();
        }
        engine
    }

    fn labels(engine: &ReorderEngine) -> Vec<&str> {
        engine.items().iter().map(FocusItem::text).collect()
    }

    fn id_of(engine: &ReorderEngine, label: &str) -> ItemId {
        engine
            .items()
            .iter()
            .find(|item| item.text() == label)
            .map(|item| item.id().clone())
            .expect("label present")
    }

    fn sorted_ids(engine: &ReorderEngine) -> Vec<ItemId> {
        let mut ids = engine.order();
        ids.sort();
        ids
    }

    #[test]
    fn add_appends_and_reallocates_everything() {
        let engine = engine_with(&["A", "B", "C"]);
        assert_eq!(labels(&engine), ["A", "B", "C"]);
        let percents: Vec<f64> = engine.items().iter().map(FocusItem::percent).collect();
        assert!((percents[0] - 400.0 / 7.0).abs() < 1e-9);
        assert!((percents[1] - 200.0 / 7.0).abs() < 1e-9);
        assert!((percents[2] - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn reposition_last_onto_first() {
        let mut engine = engine_with(&["A", "B", "C"]);
        let (a, c) = (id_of(&engine, "A"), id_of(&engine, "C"));
        let change = engine.reposition(&c, &a);
        assert_eq!(
            change,
            Change::Moved {
                id: c.clone(),
                from: 2,
                to: 0
            }
        );
        assert_eq!(labels(&engine), ["C", "A", "B"]);
        assert!((engine.get(&c).unwrap().percent() - 400.0 / 7.0).abs() < 1e-9);
        assert!((engine.get(&a).unwrap().percent() - 200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn reposition_first_onto_last() {
        let mut engine = engine_with(&["A", "B", "C"]);
        let (a, c) = (id_of(&engine, "A"), id_of(&engine, "C"));
        engine.reposition(&a, &c);
        assert_eq!(labels(&engine), ["B", "C", "A"]);
    }

    #[test]
    fn boundary_moves_are_no_ops() {
        let mut engine = engine_with(&["A", "B", "C"]);
        let before = engine.items().to_vec();
        let revision = engine.revision();
        let (a, c) = (id_of(&engine, "A"), id_of(&engine, "C"));

        assert_eq!(engine.move_up(&a), Change::Unchanged);
        assert_eq!(engine.move_to_top(&a), Change::Unchanged);
        assert_eq!(engine.move_down(&c), Change::Unchanged);
        assert_eq!(engine.move_to_bottom(&c), Change::Unchanged);
        assert_eq!(engine.reposition(&a, &a), Change::Unchanged);

        assert_eq!(engine.items(), &before[..]);
        assert_eq!(engine.revision(), revision);
    }

    #[test]
    fn unknown_ids_are_reported_not_applied() {
        let mut engine = engine_with(&["A", "B"]);
        let before = engine.items().to_vec();
        let ghost = ItemId::new("ghost");
        let a = id_of(&engine, "A");

        assert_eq!(
            engine.move_to_top(&ghost),
            Change::InvalidReference(ghost.clone())
        );
        assert_eq!(
            engine.reposition(&a, &ghost),
            Change::InvalidReference(ghost.clone())
        );
        assert_eq!(engine.remove(&ghost), Change::InvalidReference(ghost.clone()));
        assert_eq!(engine.select(&ghost), Change::InvalidReference(ghost));
        assert_eq!(engine.items(), &before[..]);
    }

    #[test]
    fn moves_are_permutations() {
        let mut engine = engine_with(&["A", "B", "C", "D", "E"]);
        let ids = sorted_ids(&engine);
        let script = [
            Command::MoveToBottom(id_of(&engine, "A")),
            Command::MoveUp(id_of(&engine, "D")),
            Command::MoveDown(id_of(&engine, "B")),
            Command::MoveToTop(id_of(&engine, "E")),
            Command::Reposition {
                from: id_of(&engine, "C"),
                to: id_of(&engine, "B"),
            },
        ];
        for command in script {
            let change = engine.apply(command).unwrap();
            assert!(change.affects_allocation(), "{change:?}");
            assert_eq!(sorted_ids(&engine), ids);
            let total: f64 = engine.items().iter().map(FocusItem::percent).sum();
            assert!((total - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn move_up_and_down_swap_neighbors() {
        let mut engine = engine_with(&["A", "B", "C"]);
        let b = id_of(&engine, "B");
        engine.move_up(&b);
        assert_eq!(labels(&engine), ["B", "A", "C"]);
        engine.move_down(&b);
        engine.move_down(&b);
        assert_eq!(labels(&engine), ["A", "C", "B"]);
    }

    #[test]
    fn selection_follows_item_and_clears_on_remove() {
        let mut engine = engine_with(&["A", "B", "C"]);
        let c = id_of(&engine, "C");
        assert_eq!(engine.select(&c), Change::Selected(Some(c.clone())));
        engine.move_to_top(&c);
        assert_eq!(engine.selected_rank(), Some(0));

        engine.remove(&c);
        assert_eq!(engine.selected(), None);
        assert_eq!(labels(&engine), ["A", "B"]);
        assert!((engine.items()[0].percent() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn select_twice_toggles_off() {
        let mut engine = engine_with(&["A"]);
        let a = id_of(&engine, "A");
        engine.select(&a);
        assert_eq!(engine.select(&a), Change::Selected(None));
        assert_eq!(engine.deselect(), Change::Unchanged);
    }

    #[test]
    fn clear_and_rename() {
        let mut engine = engine_with(&["A", "B"]);
        let a = id_of(&engine, "A");
        assert_eq!(engine.rename(&a, "Alpha"), Change::Renamed(a.clone()));
        assert_eq!(engine.rename(&a, "Alpha"), Change::Unchanged);
        assert_eq!(labels(&engine), ["Alpha", "B"]);

        assert_eq!(engine.apply(Command::Clear).unwrap(), Change::Cleared);
        assert!(engine.is_empty());
        assert_eq!(engine.clear(), Change::Unchanged);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut engine = engine_with(&["A", "B"]);
        let b = id_of(&engine, "B");
        engine.remove(&b);
        engine.add("C").unwrap();
        assert_ne!(id_of(&engine, "C"), b);
    }

    #[test]
    fn colliding_generator_gets_suffixed_ids() {
        let mut engine = ReorderEngine::with_id_generator(|| ItemId::new("same"));
        engine.add("A").unwrap();
        engine.add("B").unwrap();
        engine.add("C").unwrap();
        let ids: Vec<&str> = engine.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, ["same", "same-1", "same-2"]);
    }

    #[test]
    fn restore_drops_repeated_ids_and_recomputes() {
        let mut stale = FocusItem::new("x", "first");
        stale.set_percent(12.0);
        let items = vec![
            stale,
            FocusItem::new("y", "second"),
            FocusItem::new("x", "duplicate"),
        ];
        let engine = ReorderEngine::restore(SequentialIds::default(), items).unwrap();
        assert_eq!(labels(&engine), ["first", "second"]);
        assert!((engine.items()[0].percent() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn restored_sequential_ids_are_not_reissued() {
        let mut first = engine_with(&["A", "B", "C"]);
        let c = id_of(&first, "C");
        first.remove(&id_of(&first, "A"));

        let mut restored =
            ReorderEngine::restore(SequentialIds::default(), first.items().to_vec()).unwrap();
        restored.add("D").unwrap();
        let d = id_of(&restored, "D");
        assert_eq!(d, ItemId::new("focus-4"));
        assert_ne!(d, c);
        assert_eq!(restored.len(), 3);
    }

    #[test]
    fn add_past_the_cap_fails_without_touching_the_list() {
        let items = (0..MAX_RANKED_ITEMS)
            .map(|i| FocusItem::new(format!("id-{i}"), "x"))
            .collect();
        let mut engine = ReorderEngine::restore(SequentialIds::default(), items).unwrap();
        let revision = engine.revision();
        let err = engine
            .apply(Command::Add {
                text: "one too many".into(),
            })
            .unwrap_err();
        assert!(matches!(err, AllocationError::OutOfRange { .. }));
        assert_eq!(engine.len(), MAX_RANKED_ITEMS);
        assert_eq!(engine.revision(), revision);
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use tracing::debug;

use crate::ids::PropertyId;

/// Checked rows of a table, constrained to the ids of the current list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    universe: BTreeSet<PropertyId>,
    selected: BTreeSet<PropertyId>,
}

impl Selection {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = PropertyId>,
    {
        Self {
            universe: ids.into_iter().collect(),
            selected: BTreeSet::new(),
        }
    }

    /// Replaces the known ids. Members from the previous list are dropped.
    pub fn set_universe<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = PropertyId>,
    {
        self.universe = ids.into_iter().collect();
        self.selected.clear();
    }

    /// Returns false when `id` is not part of the current list.
    pub fn select_one(&mut self, id: &PropertyId) -> bool {
        if !self.universe.contains(id) {
            debug!(%id, "ignoring selection of unknown property");
            return false;
        }
        self.selected.insert(id.clone());
        true
    }

    pub fn deselect_one(&mut self, id: &PropertyId) {
        self.selected.remove(id);
    }

    pub fn select_all(&mut self) {
        self.selected = self.universe.clone();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &BTreeSet<PropertyId> {
        &self.selected
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.selected.contains(id)
    }

    pub fn knows(&self, id: &PropertyId) -> bool {
        self.universe.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_all(&self) -> bool {
        !self.universe.is_empty() && self.selected.len() == self.universe.len()
    }

    pub fn is_some(&self) -> bool {
        !self.selected.is_empty() && self.selected.len() < self.universe.len()
    }

    pub fn is_any(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.selected.len() == 1
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::ids::PropertyId;
use crate::model::{ChannelChoice, Property};

/// What happens to row channel choices when a table receives a new list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelRetention {
    /// Every row starts over at `none`.
    #[default]
    ResetOnNewList,
    /// Rows whose id survives keep their choice.
    KeepById,
}

/// Per-row channel selector values. Accepts any value; callers that need
/// validation go through `PropertyTable::try_set_channel`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelSelections {
    choices: BTreeMap<PropertyId, ChannelChoice>,
}

static NO_CHOICE: ChannelChoice = ChannelChoice::None;

impl ChannelSelections {
    pub fn new(records: &[Property]) -> Self {
        let mut selections = Self::default();
        selections.reset(records);
        selections
    }

    pub fn reset(&mut self, records: &[Property]) {
        self.choices = records
            .iter()
            .map(|record| (record.id.clone(), ChannelChoice::None))
            .collect();
    }

    pub fn retain_by_id(&mut self, records: &[Property]) {
        let mut previous = std::mem::take(&mut self.choices);
        self.choices = records
            .iter()
            .map(|record| {
                let choice = previous.remove(&record.id).unwrap_or_default();
                (record.id.clone(), choice)
            })
            .collect();
    }

    pub fn reconcile(&mut self, records: &[Property], retention: ChannelRetention) {
        match retention {
            ChannelRetention::ResetOnNewList => self.reset(records),
            ChannelRetention::KeepById => self.retain_by_id(records),
        }
    }

    pub fn set_channel(&mut self, id: PropertyId, choice: ChannelChoice) {
        self.choices.insert(id, choice);
    }

    pub fn choice(&self, id: &PropertyId) -> &ChannelChoice {
        self.choices.get(id).unwrap_or(&NO_CHOICE)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

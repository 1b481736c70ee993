// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::channels::{ChannelRetention, ChannelSelections};
use crate::format::{format_address, format_event};
use crate::ids::PropertyId;
use crate::model::{ChannelChoice, Property};
use crate::pagination::{PageSize, Pagination};
use crate::selection::Selection;

pub const COLUMN_TITLES: [&str; 7] = [
    "Property",
    "Address",
    "BuyTime",
    "BuyPrice",
    "SellTime",
    "SellPrice",
    "External",
];

const NONE_OPTION_LABEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    ToggleRow { id: PropertyId, checked: bool },
    ToggleAll(bool),
    SetPage(usize),
    SetPageSize(PageSize),
    SetChannel { id: PropertyId, choice: ChannelChoice },
    Delete,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredReason {
    UnknownProperty(PropertyId),
    NothingSelected,
    EditNeedsSingleSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    SelectionChanged { selected: usize },
    PageChanged(usize),
    PageSizeChanged(PageSize),
    ChannelChanged { id: PropertyId, choice: ChannelChoice },
    /// The caller owns deletion and clearing the selection afterwards.
    DeleteRequested(BTreeSet<PropertyId>),
    EditUnavailable(PropertyId),
    Ignored(IgnoredReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxView {
    pub checked: bool,
    pub indeterminate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkActionsView {
    pub selected: usize,
    pub delete_enabled: bool,
    pub edit_enabled: bool,
}

impl BulkActionsView {
    pub fn label(&self) -> String {
        format!("{} selected", self.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRow {
    Columns([&'static str; 7]),
    BulkActions(BulkActionsView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOption {
    pub value: ChannelChoice,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSelectorView {
    pub value: ChannelChoice,
    pub options: Vec<ChannelOption>,
}

impl ChannelSelectorView {
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.value == self.value)
            .map(|option| option.label.as_str())
            .unwrap_or_else(|| self.value.as_str())
    }

    /// The option after the current value, wrapping. A value that is not
    /// among the options restarts from the first one.
    pub fn next_choice(&self) -> ChannelChoice {
        let next = match self
            .options
            .iter()
            .position(|option| option.value == self.value)
        {
            Some(index) => (index + 1) % self.options.len(),
            None => 0,
        };
        self.options
            .get(next)
            .map(|option| option.value.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: PropertyId,
    pub checked: bool,
    pub avatar: String,
    pub address: String,
    pub bought: String,
    pub buy_price: String,
    pub sold: String,
    pub sell_price: String,
    pub channel: ChannelSelectorView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub page_size: PageSize,
    pub total_count: usize,
    pub options: [PageSize; 3],
    pub range_label: String,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: HeaderRow,
    pub select_all: CheckboxView,
    pub rows: Vec<RowView>,
    pub footer: PaginationView,
}

/// State of one property table: the record list plus its selection,
/// pagination and per-row channel selectors.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    records: Arc<[Property]>,
    total_count: usize,
    selection: Selection,
    pagination: Pagination,
    channels: ChannelSelections,
    retention: ChannelRetention,
}

impl PropertyTable {
    pub fn new(records: Arc<[Property]>, total_count: usize) -> Self {
        let selection = Selection::new(records.iter().map(|record| record.id.clone()));
        let channels = ChannelSelections::new(&records);
        Self {
            records,
            total_count,
            selection,
            pagination: Pagination::default(),
            channels,
            retention: ChannelRetention::default(),
        }
    }

    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.pagination.set_page_size(size);
        self
    }

    pub fn with_retention(mut self, retention: ChannelRetention) -> Self {
        self.retention = retention;
        self
    }

    /// Installs a record list. Handing back the list already held (same
    /// allocation) only updates the count; any other list rebuilds the
    /// selection universe and the channel selectors. Returns whether the
    /// list was replaced.
    pub fn set_records(&mut self, records: Arc<[Property]>, total_count: usize) -> bool {
        self.total_count = total_count;
        if Arc::ptr_eq(&self.records, &records) {
            return false;
        }

        self.selection
            .set_universe(records.iter().map(|record| record.id.clone()));
        self.channels.reconcile(&records, self.retention);
        debug!(
            rows = records.len(),
            total_count,
            retention = ?self.retention,
            "property list replaced"
        );
        self.records = records;
        true
    }

    pub fn records(&self) -> &[Property] {
        &self.records
    }

    pub fn records_handle(&self) -> Arc<[Property]> {
        Arc::clone(&self.records)
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn channels(&self) -> &ChannelSelections {
        &self.channels
    }

    pub fn visible(&self) -> &[Property] {
        self.pagination.slice(&self.records)
    }

    pub fn dispatch(&mut self, command: TableCommand) -> Vec<TableEvent> {
        debug!(?command, "table command");
        match command {
            TableCommand::ToggleRow { id, checked } => {
                if !self.selection.knows(&id) {
                    return vec![TableEvent::Ignored(IgnoredReason::UnknownProperty(id))];
                }
                if checked {
                    self.selection.select_one(&id);
                } else {
                    self.selection.deselect_one(&id);
                }
                vec![self.selection_changed()]
            }
            TableCommand::ToggleAll(checked) => {
                if checked {
                    self.selection.select_all();
                } else {
                    self.selection.deselect_all();
                }
                vec![self.selection_changed()]
            }
            TableCommand::SetPage(page) => {
                self.pagination.set_page(page);
                vec![TableEvent::PageChanged(page)]
            }
            TableCommand::SetPageSize(size) => {
                self.pagination.set_page_size(size);
                vec![TableEvent::PageSizeChanged(size)]
            }
            TableCommand::SetChannel { id, choice } => {
                if !self.selection.knows(&id) {
                    debug!(%id, "channel change for unknown property ignored");
                    return vec![TableEvent::Ignored(IgnoredReason::UnknownProperty(id))];
                }
                self.channels.set_channel(id.clone(), choice.clone());
                vec![TableEvent::ChannelChanged { id, choice }]
            }
            TableCommand::Delete => {
                if !self.selection.is_any() {
                    return vec![TableEvent::Ignored(IgnoredReason::NothingSelected)];
                }
                vec![TableEvent::DeleteRequested(self.selection.selected().clone())]
            }
            TableCommand::Edit => match self.single_selected() {
                Some(id) => vec![TableEvent::EditUnavailable(id)],
                None => vec![TableEvent::Ignored(IgnoredReason::EditNeedsSingleSelection)],
            },
        }
    }

    /// Channel change that is rejected unless the row exists and offers
    /// the chosen channel.
    pub fn try_set_channel(
        &mut self,
        id: &PropertyId,
        choice: ChannelChoice,
    ) -> Result<Vec<TableEvent>> {
        let Some(record) = self.records.iter().find(|record| &record.id == id) else {
            bail!("property {id} is not in the current list");
        };
        if let ChannelChoice::Channel(name) = &choice
            && !record.has_channel(name)
        {
            let offered = std::iter::once(ChannelChoice::NONE_LABEL)
                .chain(record.channels())
                .collect::<Vec<_>>()
                .join(", ");
            bail!("property {id} has no {name:?} channel; offered: {offered}");
        }
        Ok(self.dispatch(TableCommand::SetChannel {
            id: id.clone(),
            choice,
        }))
    }

    pub fn view(&self) -> TableView {
        let header = if self.selection.is_any() {
            HeaderRow::BulkActions(BulkActionsView {
                selected: self.selection.len(),
                delete_enabled: true,
                edit_enabled: self.selection.is_one(),
            })
        } else {
            HeaderRow::Columns(COLUMN_TITLES)
        };

        let rows = self
            .visible()
            .iter()
            .map(|record| self.row_view(record))
            .collect();

        TableView {
            header,
            select_all: CheckboxView {
                checked: self.selection.is_all(),
                indeterminate: self.selection.is_some(),
            },
            rows,
            footer: self.pagination_view(),
        }
    }

    fn row_view(&self, record: &Property) -> RowView {
        let (bought, buy_price) = format_event(Some(&record.bought));
        let (sold, sell_price) = format_event(record.sold.as_ref());
        let mut options = Vec::with_capacity(record.external_accounts.len() + 1);
        options.push(ChannelOption {
            value: ChannelChoice::None,
            label: NONE_OPTION_LABEL.to_owned(),
        });
        options.extend(record.external_accounts.iter().map(|external| ChannelOption {
            value: ChannelChoice::channel(external.channel.clone()),
            label: format!("{} : {}", external.channel, external.account),
        }));

        RowView {
            id: record.id.clone(),
            checked: self.selection.contains(&record.id),
            avatar: record.picture_handle.clone(),
            address: format_address(&record.address),
            bought,
            buy_price,
            sold,
            sell_price,
            channel: ChannelSelectorView {
                value: self.channels.choice(&record.id).clone(),
                options,
            },
        }
    }

    fn pagination_view(&self) -> PaginationView {
        PaginationView {
            page: self.pagination.page(),
            page_size: self.pagination.size(),
            total_count: self.total_count,
            options: PageSize::ALL,
            range_label: self.pagination.range_label(self.total_count),
            has_prev: self.pagination.has_prev(),
            has_next: self.pagination.has_next(self.total_count),
        }
    }

    fn selection_changed(&self) -> TableEvent {
        TableEvent::SelectionChanged {
            selected: self.selection.len(),
        }
    }

    fn single_selected(&self) -> Option<PropertyId> {
        if !self.selection.is_one() {
            return None;
        }
        self.selection.selected().iter().next().cloned()
    }
}

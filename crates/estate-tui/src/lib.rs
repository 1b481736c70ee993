// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use estate_app::paths;
use estate_app::{
    CheckboxView, HeaderRow, IgnoredReason, PaginationView, Property, PropertyId, PropertyTable,
    RowView, TableCommand, TableEvent, TableView,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::collections::BTreeSet;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

const CHECKED_MARK: &str = "[x]";
const INDETERMINATE_MARK: &str = "[-]";
const UNCHECKED_MARK: &str = "[ ]";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

/// One load of the record source.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBatch {
    pub records: Vec<Property>,
    /// Full count as reported by the source; may exceed `records.len()`.
    pub total_count: usize,
}

impl PropertyBatch {
    pub fn complete(records: Vec<Property>) -> Self {
        let total_count = records.len();
        Self {
            records,
            total_count,
        }
    }
}

pub trait PropertyRuntime {
    fn load_properties(&mut self) -> Result<PropertyBatch>;
    fn delete_properties(&mut self, ids: &BTreeSet<PropertyId>) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    MoveCursor(isize),
    ToggleFocused,
    ToggleAll,
    NextPage,
    PrevPage,
    GrowPageSize,
    ShrinkPageSize,
    CycleChannel,
    Delete,
    Edit,
    Reload,
    ToggleHelp,
}

pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    cursor: usize,
    status_line: Option<String>,
    status_token: u64,
    help_visible: bool,
}

pub fn run_app<R: PropertyRuntime>(table: &mut PropertyTable, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = reload(table, runtime) {
        warn!("initial property load failed: {error:#}");
        emit_status(&mut view_data, &internal_tx, format!("load failed: {error}"));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(&mut view_data, &internal_rx);

        let view = table.view();
        if let Err(error) = terminal.draw(|frame| render(frame, &view, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(table, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn reload<R: PropertyRuntime>(table: &mut PropertyTable, runtime: &mut R) -> Result<()> {
    let batch = runtime.load_properties()?;
    let rows = batch.records.len();
    table.set_records(batch.records.into(), batch.total_count);
    info!(rows, total_count = table.total_count(), "properties loaded");
    Ok(())
}

fn key_action(key: KeyEvent) -> Option<KeyAction> {
    match (key.code, key.modifiers) {
        // Covers ctrl+q as well.
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(KeyAction::Quit),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(KeyAction::MoveCursor(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(KeyAction::MoveCursor(-1)),
        (KeyCode::Char(' '), _) => Some(KeyAction::ToggleFocused),
        (KeyCode::Char('a'), _) => Some(KeyAction::ToggleAll),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) | (KeyCode::PageDown, _) => {
            Some(KeyAction::NextPage)
        }
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) | (KeyCode::PageUp, _) => {
            Some(KeyAction::PrevPage)
        }
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Some(KeyAction::GrowPageSize),
        (KeyCode::Char('-'), _) => Some(KeyAction::ShrinkPageSize),
        (KeyCode::Char('c'), _) | (KeyCode::Enter, _) => Some(KeyAction::CycleChannel),
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => Some(KeyAction::Delete),
        (KeyCode::Char('e'), _) => Some(KeyAction::Edit),
        (KeyCode::Char('r'), _) => Some(KeyAction::Reload),
        (KeyCode::Char('?'), _) => Some(KeyAction::ToggleHelp),
        _ => None,
    }
}

/// Returns true when the app should exit.
fn handle_key_event<R: PropertyRuntime>(
    table: &mut PropertyTable,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let Some(action) = key_action(key) else {
        return false;
    };

    if view_data.help_visible {
        match action {
            KeyAction::Quit | KeyAction::ToggleHelp => view_data.help_visible = false,
            _ => {}
        }
        return false;
    }

    match action {
        KeyAction::Quit => return true,
        KeyAction::ToggleHelp => view_data.help_visible = true,
        KeyAction::MoveCursor(delta) => move_cursor(table, view_data, delta),
        KeyAction::Reload => match reload(table, runtime) {
            Ok(()) => {
                clamp_cursor(table, view_data);
                emit_status(view_data, internal_tx, "reloaded");
            }
            Err(error) => emit_status(view_data, internal_tx, format!("reload failed: {error}")),
        },
        action => {
            if let Some(command) = command_for_action(table, view_data, action) {
                let events = table.dispatch(command);
                apply_events(table, runtime, view_data, internal_tx, events);
            }
        }
    }
    false
}

fn command_for_action(
    table: &PropertyTable,
    view_data: &ViewData,
    action: KeyAction,
) -> Option<TableCommand> {
    let view = table.view();
    let focused = view.rows.get(view_data.cursor);
    match action {
        KeyAction::ToggleFocused => focused.map(|row| TableCommand::ToggleRow {
            id: row.id.clone(),
            checked: !row.checked,
        }),
        // Mirrors a header checkbox click: indeterminate counts as unchecked.
        KeyAction::ToggleAll => Some(TableCommand::ToggleAll(!view.select_all.checked)),
        KeyAction::NextPage => view
            .footer
            .has_next
            .then(|| TableCommand::SetPage(view.footer.page + 1)),
        KeyAction::PrevPage => view
            .footer
            .has_prev
            .then(|| TableCommand::SetPage(view.footer.page - 1)),
        KeyAction::GrowPageSize => Some(TableCommand::SetPageSize(view.footer.page_size.next())),
        KeyAction::ShrinkPageSize => Some(TableCommand::SetPageSize(view.footer.page_size.prev())),
        KeyAction::CycleChannel => focused.map(|row| TableCommand::SetChannel {
            id: row.id.clone(),
            choice: row.channel.next_choice(),
        }),
        KeyAction::Delete => Some(TableCommand::Delete),
        KeyAction::Edit => Some(TableCommand::Edit),
        KeyAction::Quit | KeyAction::MoveCursor(_) | KeyAction::Reload | KeyAction::ToggleHelp => {
            None
        }
    }
}

fn apply_events<R: PropertyRuntime>(
    table: &mut PropertyTable,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: Vec<TableEvent>,
) {
    for event in events {
        match event {
            TableEvent::DeleteRequested(ids) => {
                let message = match delete_and_reload(table, runtime, &ids) {
                    Ok(removed) => format!("deleted {removed} of {}", ids.len()),
                    Err(error) => {
                        warn!("delete failed: {error:#}");
                        format!("delete failed: {error}")
                    }
                };
                clamp_cursor(table, view_data);
                emit_status(view_data, internal_tx, message);
            }
            TableEvent::PageChanged(_) | TableEvent::PageSizeChanged(_) => {
                clamp_cursor(table, view_data);
                if let Some(message) = event_status(&event) {
                    emit_status(view_data, internal_tx, message);
                }
            }
            event => {
                if let Some(message) = event_status(&event) {
                    emit_status(view_data, internal_tx, message);
                }
            }
        }
    }
}

fn delete_and_reload<R: PropertyRuntime>(
    table: &mut PropertyTable,
    runtime: &mut R,
    ids: &BTreeSet<PropertyId>,
) -> Result<usize> {
    let removed = runtime.delete_properties(ids)?;
    info!(requested = ids.len(), removed, "properties deleted");
    table.dispatch(TableCommand::ToggleAll(false));
    reload(table, runtime)?;
    Ok(removed)
}

fn event_status(event: &TableEvent) -> Option<String> {
    match event {
        TableEvent::SelectionChanged { .. } => None,
        TableEvent::PageChanged(page) => Some(format!("page {}", page + 1)),
        TableEvent::PageSizeChanged(size) => Some(format!("{} rows per page", size.rows())),
        TableEvent::ChannelChanged { id, choice } => Some(format!("{id}: {}", choice.as_str())),
        TableEvent::DeleteRequested(ids) => Some(format!("deleting {}", ids.len())),
        TableEvent::EditUnavailable(id) => Some(format!("edit {id}: not implemented yet")),
        TableEvent::Ignored(IgnoredReason::NothingSelected) => {
            Some("select rows to delete".to_owned())
        }
        TableEvent::Ignored(IgnoredReason::EditNeedsSingleSelection) => {
            Some("edit needs exactly one row".to_owned())
        }
        TableEvent::Ignored(IgnoredReason::UnknownProperty(id)) => {
            Some(format!("unknown property {id}"))
        }
    }
}

fn move_cursor(table: &PropertyTable, view_data: &mut ViewData, delta: isize) {
    let rows = table.visible().len();
    if rows == 0 {
        view_data.cursor = 0;
        return;
    }
    let next = if delta.is_negative() {
        view_data.cursor.saturating_sub(delta.unsigned_abs())
    } else {
        view_data.cursor.saturating_add(delta as usize)
    };
    view_data.cursor = next.min(rows - 1);
}

fn clamp_cursor(table: &PropertyTable, view_data: &mut ViewData) {
    let rows = table.visible().len();
    view_data.cursor = view_data.cursor.min(rows.saturating_sub(1));
}

fn render(frame: &mut ratatui::Frame<'_>, view: &TableView, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_table(frame, layout[0], view, view_data);

    let footer = Paragraph::new(footer_text(&view.footer))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, layout[1]);

    let status = Paragraph::new(status_text(view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, view: &TableView, view_data: &ViewData) {
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        header_cells(view)
            .into_iter()
            .map(|label| Cell::from(label).style(header_style)),
    );

    let rows = view.rows.iter().enumerate().map(|(index, row)| {
        let mut style = Style::default();
        if row.checked {
            style = style.fg(Color::Cyan);
        }
        if index == view_data.cursor {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        Row::new(row_cells(row).into_iter().map(Cell::from)).style(style)
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Min(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!("properties ({})", paths::dashboard::PROPERTIES))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn checkbox_mark(checkbox: CheckboxView) -> &'static str {
    if checkbox.checked {
        CHECKED_MARK
    } else if checkbox.indeterminate {
        INDETERMINATE_MARK
    } else {
        UNCHECKED_MARK
    }
}

fn header_cells(view: &TableView) -> Vec<String> {
    let mut cells = vec![checkbox_mark(view.select_all).to_owned()];
    match &view.header {
        HeaderRow::Columns(titles) => {
            cells.extend(titles.iter().map(|title| (*title).to_owned()));
        }
        HeaderRow::BulkActions(bulk) => {
            cells.push(bulk.label());
            let mut actions = Vec::new();
            if bulk.delete_enabled {
                actions.push("d delete");
            }
            if bulk.edit_enabled {
                actions.push("e edit");
            }
            cells.push(actions.join("  "));
        }
    }
    cells
}

fn row_cells(row: &RowView) -> Vec<String> {
    vec![
        if row.checked {
            CHECKED_MARK
        } else {
            UNCHECKED_MARK
        }
        .to_owned(),
        avatar_label(&row.avatar),
        row.address.clone(),
        row.bought.clone(),
        row.buy_price.clone(),
        row.sold.clone(),
        row.sell_price.clone(),
        row.channel.selected_label().to_owned(),
    ]
}

fn avatar_label(handle: &str) -> String {
    handle
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(handle)
        .to_owned()
}

fn footer_text(footer: &PaginationView) -> String {
    let sizes = footer
        .options
        .iter()
        .map(|size| {
            if *size == footer.page_size {
                format!("[{}]", size.rows())
            } else {
                size.rows().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let prev = if footer.has_prev { "‹" } else { " " };
    let next = if footer.has_next { "›" } else { " " };
    format!(
        "rows per page: {sizes} | {} | {prev} page {} {next}",
        footer.range_label,
        footer.page + 1
    )
}

fn status_text(view_data: &ViewData) -> String {
    let default = "j/k move | space/a check | h/l page | +/- size | c channel | d delete | e edit | r reload | ? help | q";
    match &view_data.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "j/k, up/down    move between rows on this page\n\
     space           check or uncheck the focused row\n\
     a               check or uncheck every row\n\
     h/l, left/right previous or next page\n\
     +/-             cycle rows per page (5, 10, 25)\n\
     c, enter        cycle the focused row's channel\n\
     d, delete       delete checked rows\n\
     e               edit the checked row\n\
     r               reload properties\n\
     ?, esc          close help\n\
     q, ctrl+q       quit"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        InternalEvent, KeyAction, PropertyBatch, PropertyRuntime, ViewData, avatar_label,
        footer_text, handle_key_event, header_cells, key_action, row_cells, status_text,
    };
    use anyhow::{Result, bail};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use estate_app::{ChannelChoice, PageSize, Property, PropertyId, PropertyTable};
    use estate_testkit::{PropertyFaker, sample_property};
    use std::collections::BTreeSet;
    use std::sync::mpsc;

    #[derive(Debug, Default)]
    struct TestRuntime {
        records: Vec<Property>,
        reported_total: Option<usize>,
        load_count: usize,
        deleted: Vec<BTreeSet<PropertyId>>,
        fail_delete: bool,
    }

    impl TestRuntime {
        fn with_records(records: Vec<Property>) -> Self {
            Self {
                records,
                ..Self::default()
            }
        }
    }

    impl PropertyRuntime for TestRuntime {
        fn load_properties(&mut self) -> Result<PropertyBatch> {
            self.load_count += 1;
            let mut batch = PropertyBatch::complete(self.records.clone());
            if let Some(total) = self.reported_total {
                batch.total_count = total;
            }
            Ok(batch)
        }

        fn delete_properties(&mut self, ids: &BTreeSet<PropertyId>) -> Result<usize> {
            if self.fail_delete {
                bail!("store is read-only");
            }
            let before = self.records.len();
            self.records.retain(|record| !ids.contains(&record.id));
            self.deleted.push(ids.clone());
            Ok(before - self.records.len())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn internal_tx() -> mpsc::Sender<InternalEvent> {
        let (tx, _rx) = mpsc::channel();
        tx
    }

    fn loaded(runtime: &mut TestRuntime) -> PropertyTable {
        let mut table = PropertyTable::new(Vec::new().into(), 0);
        super::reload(&mut table, runtime).expect("load test properties");
        table
    }

    fn press(
        table: &mut PropertyTable,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        code: KeyCode,
    ) -> bool {
        handle_key_event(table, runtime, view_data, &internal_tx(), key(code))
    }

    #[test]
    fn key_mapping_covers_table_actions() {
        assert_eq!(key_action(key(KeyCode::Char('j'))), Some(KeyAction::MoveCursor(1)));
        assert_eq!(key_action(key(KeyCode::Up)), Some(KeyAction::MoveCursor(-1)));
        assert_eq!(key_action(key(KeyCode::Char(' '))), Some(KeyAction::ToggleFocused));
        assert_eq!(key_action(key(KeyCode::Char('a'))), Some(KeyAction::ToggleAll));
        assert_eq!(key_action(key(KeyCode::Right)), Some(KeyAction::NextPage));
        assert_eq!(key_action(key(KeyCode::Char('+'))), Some(KeyAction::GrowPageSize));
        assert_eq!(key_action(key(KeyCode::Char('c'))), Some(KeyAction::CycleChannel));
        assert_eq!(key_action(key(KeyCode::Char('d'))), Some(KeyAction::Delete));
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(key_action(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn space_checks_focused_row_and_switches_header() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(1).properties(3));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('j'));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char(' '));

        let view = table.view();
        assert!(view.rows[1].checked);
        assert_eq!(header_cells(&view), vec!["[-]", "1 selected", "d delete  e edit"]);
    }

    #[test]
    fn toggle_all_from_indeterminate_selects_everything() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(2).properties(4));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char(' '));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('a'));
        assert!(table.selection().is_all());
        assert_eq!(header_cells(&table.view())[0], "[x]");

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('a'));
        assert!(!table.selection().is_any());
    }

    #[test]
    fn delete_calls_runtime_then_clears_selection_and_reloads() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(3).properties(3));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();
        let first = table.view().rows[0].id.clone();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char(' '));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('d'));

        assert_eq!(runtime.deleted, vec![BTreeSet::from([first.clone()])]);
        assert_eq!(runtime.load_count, 2);
        assert_eq!(table.records().len(), 2);
        assert!(table.records().iter().all(|record| record.id != first));
        assert!(!table.selection().is_any());
        assert_eq!(view_data.status_line.as_deref(), Some("deleted 1 of 1"));
    }

    #[test]
    fn failed_delete_keeps_selection() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(4).properties(2));
        runtime.fail_delete = true;
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('a'));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('d'));

        assert!(table.selection().is_all());
        let status = view_data.status_line.clone().unwrap_or_default();
        assert!(status.contains("delete failed"), "got {status}");
    }

    #[test]
    fn delete_without_selection_reports_hint() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(5).properties(2));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('d'));
        assert!(runtime.deleted.is_empty());
        assert_eq!(view_data.status_line.as_deref(), Some("select rows to delete"));
    }

    #[test]
    fn paging_stops_at_reported_total() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(6).properties(12));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        for _ in 0..5 {
            press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('l'));
        }
        assert_eq!(table.pagination().page(), 2);
        assert_eq!(table.view().rows.len(), 2);

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('h'));
        assert_eq!(table.pagination().page(), 1);
    }

    #[test]
    fn page_size_cycle_keeps_page_and_clamps_cursor() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(7).properties(12));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('l'));
        for _ in 0..4 {
            press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('j'));
        }
        assert_eq!(view_data.cursor, 4);

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('+'));
        assert_eq!(table.pagination().size(), PageSize::Ten);
        assert_eq!(table.pagination().page(), 1);
        assert_eq!(table.view().rows.len(), 2);
        assert_eq!(view_data.cursor, 1);
    }

    #[test]
    fn channel_key_cycles_focused_row() {
        let mut runtime = TestRuntime::with_records(vec![sample_property(
            "a",
            &[("airbnb", "a-1"), ("vrbo", "a-2")],
        )]);
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('c'));
        assert_eq!(
            table.channels().choice(&PropertyId::from("a")),
            &ChannelChoice::channel("airbnb")
        );
        assert_eq!(row_cells(&table.view().rows[0])[7], "airbnb : a-1");

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('c'));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('c'));
        assert!(table.channels().choice(&PropertyId::from("a")).is_none());
    }

    #[test]
    fn reload_with_new_list_resets_channels() {
        let mut runtime =
            TestRuntime::with_records(vec![sample_property("a", &[("airbnb", "a-1")])]);
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('c'));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('r'));
        assert!(table.channels().choice(&PropertyId::from("a")).is_none());
        assert_eq!(view_data.status_line.as_deref(), Some("reloaded"));
    }

    #[test]
    fn edit_is_placeholder_for_single_selection() {
        let mut runtime = TestRuntime::with_records(vec![sample_property("a", &[])]);
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char(' '));
        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('e'));
        assert_eq!(
            view_data.status_line.as_deref(),
            Some("edit a: not implemented yet")
        );
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(8).properties(3));
        let mut table = loaded(&mut runtime);
        let mut view_data = ViewData::default();

        press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('?'));
        assert!(view_data.help_visible);
        assert!(!press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('q')));
        assert!(!view_data.help_visible);
        assert!(press(&mut table, &mut runtime, &mut view_data, KeyCode::Char('q')));
    }

    #[test]
    fn footer_reports_range_and_active_size() {
        let mut runtime = TestRuntime::with_records(PropertyFaker::new(9).properties(3));
        runtime.reported_total = Some(13);
        let table = loaded(&mut runtime);
        let text = footer_text(&table.view().footer);
        assert!(text.contains("[5] 10 25"), "got {text}");
        assert!(text.contains("1–5 of 13"), "got {text}");
        assert!(text.contains("page 1 ›"), "got {text}");
    }

    #[test]
    fn avatar_label_uses_file_name() {
        assert_eq!(avatar_label("/assets/properties/p-1.jpg"), "p-1.jpg");
        assert_eq!(avatar_label("plain"), "plain");
        assert_eq!(avatar_label("trailing/"), "trailing/");
    }

    #[test]
    fn status_text_prefixes_transient_message() {
        let mut view_data = ViewData::default();
        assert!(status_text(&view_data).starts_with("j/k move"));
        view_data.status_line = Some("page 2".to_owned());
        assert!(status_text(&view_data).starts_with("page 2 | "));
    }
}

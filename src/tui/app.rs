use crate::todo::models::{self, Filter, Item, ItemId, Snapshot};
use crate::todo::store::{StoreHandle, SubscriptionId};
use crate::tui::edit::Draft;
use crate::tui::handlers::{DraftAction, HelpModeAction, KeyHandler, NormalModeAction};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// View state for the list screen.
///
/// The item collection itself lives in the store; `App` only keeps the last
/// snapshot it was notified with and derives everything it shows from it.
#[derive(Debug)]
pub struct App {
    store: StoreHandle,
    snapshot: Rc<RefCell<Snapshot>>,
    subscription: SubscriptionId,
    pub active_filter: Filter,
    /// Item currently being renamed, if any.
    pub editing: Option<ItemId>,
    pub rename_draft: Draft,
    pub composer: Draft,
    pub composer_focused: bool,
    pub selected_index: usize,
    pub help_mode: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: StoreHandle, active_filter: Filter) -> Self {
        let snapshot = Rc::new(RefCell::new(store.borrow().items()));
        let sink = Rc::clone(&snapshot);
        let subscription = store
            .borrow_mut()
            .subscribe(move |items| *sink.borrow_mut() = Rc::clone(items));

        Self {
            store,
            snapshot,
            subscription,
            active_filter,
            editing: None,
            rename_draft: Draft::new(),
            composer: Draft::new(),
            composer_focused: false,
            selected_index: 0,
            help_mode: false,
            should_quit: false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.snapshot.borrow())
    }

    pub fn visible_items(&self) -> Vec<Item> {
        let snapshot = self.snapshot();
        models::visible_items(&snapshot, self.active_filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.visible_items().into_iter().nth(self.selected_index)
    }

    pub fn total_items(&self) -> usize {
        self.snapshot().len()
    }

    pub fn remaining_count(&self) -> usize {
        models::remaining_count(&self.snapshot())
    }

    pub fn completed_count(&self) -> usize {
        models::completed_count(&self.snapshot())
    }

    /// Completes everything unless everything is already completed.
    pub fn toggle_all_target(&self) -> bool {
        self.remaining_count() > 0
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            Event::FocusLost => {
                self.blur();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event);
        } else if self.editing.is_some() {
            self.handle_rename_key(key_event);
        } else if self.composer_focused {
            self.handle_composer_key(key_event);
        } else {
            self.handle_normal_mode_key(key_event);
        }
        self.clamp_selection();
        Ok(())
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::Quit => self.should_quit = true,
            NormalModeAction::MoveSelectionUp => self.move_selection_up(),
            NormalModeAction::MoveSelectionDown => self.move_selection_down(),
            NormalModeAction::FocusComposer => self.composer_focused = true,
            NormalModeAction::ToggleSelectedItem => self.toggle_selected_item(),
            NormalModeAction::StartRename => self.start_rename(),
            NormalModeAction::RemoveSelectedItem => self.remove_selected_item(),
            NormalModeAction::ToggleAll => self.toggle_all(),
            NormalModeAction::ClearCompleted => self.clear_completed(),
            NormalModeAction::CycleFilter => self.set_filter(self.active_filter.next()),
            NormalModeAction::ShowAll => self.set_filter(Filter::All),
            NormalModeAction::ShowActive => self.set_filter(Filter::Active),
            NormalModeAction::ShowCompleted => self.set_filter(Filter::Completed),
            NormalModeAction::ToggleHelpMode => self.help_mode = true,
            NormalModeAction::None => {}
        }
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.help_mode = false;
        }
    }

    fn handle_rename_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_draft_key(key_event) {
            DraftAction::Confirm => self.commit_rename(),
            DraftAction::Cancel => self.cancel_rename(),
            DraftAction::Blur => {
                self.commit_rename();
                match key_event.code {
                    KeyCode::Up => self.move_selection_up(),
                    KeyCode::Down => self.move_selection_down(),
                    _ => {}
                }
            }
            action => apply_draft_action(&mut self.rename_draft, action),
        }
    }

    fn handle_composer_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_draft_key(key_event) {
            DraftAction::Confirm => self.commit_new_item(),
            DraftAction::Cancel => {
                self.composer.clear();
                self.composer_focused = false;
            }
            DraftAction::Blur => self.composer_focused = false,
            action => apply_draft_action(&mut self.composer, action),
        }
    }

    /// The focused input lost focus: a rename in progress is committed, the
    /// composer keeps its draft.
    pub fn blur(&mut self) {
        if self.editing.is_some() {
            self.commit_rename();
        }
        self.composer_focused = false;
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_items().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_items().len();
        if self.selected_index >= visible {
            self.selected_index = visible.saturating_sub(1);
        }
    }

    fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter changed");
        self.active_filter = filter;
        self.selected_index = 0;
    }

    fn toggle_selected_item(&mut self) {
        if let Some(item) = self.selected_item() {
            self.store.borrow_mut().toggle(&item);
        }
    }

    fn remove_selected_item(&mut self) {
        if let Some(item) = self.selected_item() {
            self.store.borrow_mut().remove(&item);
        }
    }

    fn toggle_all(&mut self) {
        if self.total_items() == 0 {
            return;
        }
        let completed = self.toggle_all_target();
        self.store.borrow_mut().toggle_all(completed);
    }

    fn clear_completed(&mut self) {
        if self.completed_count() == 0 {
            return;
        }
        self.store.borrow_mut().clear_completed();
    }

    fn start_rename(&mut self) {
        if let Some(item) = self.selected_item() {
            self.rename_draft = Draft::from_text(item.title);
            self.editing = Some(item.id);
        }
    }

    fn commit_rename(&mut self) {
        if let Some(id) = self.editing.take() {
            let title = self.rename_draft.take();
            self.store.borrow_mut().rename(id, title);
        }
    }

    fn cancel_rename(&mut self) {
        self.editing = None;
        self.rename_draft.clear();
    }

    fn commit_new_item(&mut self) {
        let title = self.composer.take();
        let id = self.store.borrow_mut().add(title);
        if let Some(position) = self.visible_items().iter().position(|item| item.id == id) {
            self.selected_index = position;
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Ok(mut store) = self.store.try_borrow_mut() {
            store.unsubscribe(self.subscription);
        }
    }
}

fn apply_draft_action(draft: &mut Draft, action: DraftAction) {
    match action {
        DraftAction::Backspace => draft.backspace(),
        DraftAction::Delete => draft.delete(),
        DraftAction::MoveCursorLeft => draft.move_cursor_left(),
        DraftAction::MoveCursorRight => draft.move_cursor_right(),
        DraftAction::MoveCursorHome => draft.move_cursor_home(),
        DraftAction::MoveCursorEnd => draft.move_cursor_end(),
        DraftAction::MoveToPreviousWord => draft.move_to_previous_word(),
        DraftAction::MoveToNextWord => draft.move_to_next_word(),
        DraftAction::DeleteWordBackward => draft.delete_word_backward(),
        DraftAction::InsertChar(c) => draft.insert_char(c),
        DraftAction::Confirm | DraftAction::Cancel | DraftAction::Blur | DraftAction::None => {}
    }
}

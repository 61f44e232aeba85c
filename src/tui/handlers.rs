use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_normal_mode_key(key_event: KeyEvent) -> NormalModeAction {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                NormalModeAction::Quit
            }
            KeyCode::Char('q') => NormalModeAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => NormalModeAction::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => NormalModeAction::MoveSelectionDown,
            KeyCode::Char('a') | KeyCode::Char('i') => NormalModeAction::FocusComposer,
            KeyCode::Enter | KeyCode::Char(' ') => NormalModeAction::ToggleSelectedItem,
            KeyCode::Char('e') => NormalModeAction::StartRename,
            KeyCode::Char('d') | KeyCode::Delete => NormalModeAction::RemoveSelectedItem,
            KeyCode::Char('t') => NormalModeAction::ToggleAll,
            KeyCode::Char('c') => NormalModeAction::ClearCompleted,
            KeyCode::Char('f') => NormalModeAction::CycleFilter,
            KeyCode::Char('1') => NormalModeAction::ShowAll,
            KeyCode::Char('2') => NormalModeAction::ShowActive,
            KeyCode::Char('3') => NormalModeAction::ShowCompleted,
            KeyCode::Char('?') => NormalModeAction::ToggleHelpMode,
            _ => NormalModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    /// Keys shared by the composer and the rename editor.
    pub fn handle_draft_key(key_event: KeyEvent) -> DraftAction {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Esc => DraftAction::Cancel,
            KeyCode::Enter => DraftAction::Confirm,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => DraftAction::Blur,
            KeyCode::Backspace => DraftAction::Backspace,
            KeyCode::Delete => DraftAction::Delete,
            KeyCode::Left if ctrl => DraftAction::MoveToPreviousWord,
            KeyCode::Right if ctrl => DraftAction::MoveToNextWord,
            KeyCode::Left => DraftAction::MoveCursorLeft,
            KeyCode::Right => DraftAction::MoveCursorRight,
            KeyCode::Home => DraftAction::MoveCursorHome,
            KeyCode::End => DraftAction::MoveCursorEnd,
            KeyCode::Char('w') if ctrl => DraftAction::DeleteWordBackward,
            KeyCode::Char('c') if ctrl => DraftAction::Cancel,
            KeyCode::Char(c) => DraftAction::InsertChar(c),
            _ => DraftAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum NormalModeAction {
    None,
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    FocusComposer,
    ToggleSelectedItem,
    StartRename,
    RemoveSelectedItem,
    ToggleAll,
    ClearCompleted,
    CycleFilter,
    ShowAll,
    ShowActive,
    ShowCompleted,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum DraftAction {
    None,
    Cancel,
    Confirm,
    /// The input lost focus without an explicit confirm or cancel.
    Blur,
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    MoveToPreviousWord,
    MoveToNextWord,
    DeleteWordBackward,
    InsertChar(char),
}

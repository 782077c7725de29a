//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    TurnLeft,
    TurnRight,
    Forward,
    LoopStart,
    LoopEnd,
    Run,
    ClearProgram,
    ResetBoard,
    RandomTrack,
    ToggleConfig,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    ToggleCell,
    SaveTrack,
    Help,
    Dismiss,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        // Shift is implied by the character itself for '[', ']' and '?'
        self.key == key && (self.modifiers == modifiers || modifiers == KeyModifiers::SHIFT)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Close help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Programming,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::TurnLeft, "Left", "Turn left"),
                Keybinding::new(KeyCode::Right, KeyAction::TurnRight, "Right", "Turn right"),
                Keybinding::new(KeyCode::Up, KeyAction::Forward, "Up", "Forward"),
                Keybinding::new(KeyCode::Char('f'), KeyAction::Forward, "F", "Forward"),
                Keybinding::new(KeyCode::Char('['), KeyAction::LoopStart, "[", "Loop start"),
                Keybinding::new(KeyCode::Char(']'), KeyAction::LoopEnd, "]", "Loop end"),
                Keybinding::new(KeyCode::Enter, KeyAction::Run, "Enter", "Run"),
                Keybinding::new(KeyCode::Char('c'), KeyAction::ClearProgram, "C", "Clear program"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::ResetBoard, "N", "Reset board"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::RandomTrack, "R", "Random track"),
                Keybinding::new(KeyCode::Char('e'), KeyAction::ToggleConfig, "E", "Edit track"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Configuring,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::CursorUp, "Up", "Cursor up"),
                Keybinding::new(KeyCode::Down, KeyAction::CursorDown, "Down", "Cursor down"),
                Keybinding::new(KeyCode::Left, KeyAction::CursorLeft, "Left", "Cursor left"),
                Keybinding::new(KeyCode::Right, KeyAction::CursorRight, "Right", "Cursor right"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::ToggleCell, "Space", "Toggle cell"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::SaveTrack, "S", "Save track"),
                Keybinding::new(KeyCode::Char('e'), KeyAction::ToggleConfig, "E", "Done editing"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key press to an action in `mode`
    pub fn lookup(&self, mode: &AppMode, key: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        // Exact modifier matches win so Ctrl+C never clears the program
        let bindings = self.get_bindings(mode);
        bindings
            .iter()
            .find(|b| b.key == key && b.modifiers == modifiers)
            .or_else(|| bindings.iter().find(|b| b.matches(key, modifiers)))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Programming => vec![
                KeyAction::TurnLeft,
                KeyAction::Forward,
                KeyAction::LoopStart,
                KeyAction::Run,
                KeyAction::ClearProgram,
                KeyAction::ToggleConfig,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Configuring => vec![
                KeyAction::CursorUp,
                KeyAction::ToggleCell,
                KeyAction::SaveTrack,
                KeyAction::ToggleConfig,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == action) else {
                continue;
            };
            // Arrow groups collapse into a single hint
            let item = match action {
                KeyAction::TurnLeft => NavBarItem {
                    key_display: "Left/Right/Up".to_string(),
                    action_label: "Move".to_string(),
                },
                KeyAction::LoopStart => NavBarItem {
                    key_display: "[ ]".to_string(),
                    action_label: "Loop".to_string(),
                },
                KeyAction::CursorUp => NavBarItem {
                    key_display: "Arrows".to_string(),
                    action_label: "Cursor".to_string(),
                },
                _ => NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                },
            };
            items.push(item);
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Program", |a| {
                matches!(
                    a,
                    KeyAction::TurnLeft
                        | KeyAction::TurnRight
                        | KeyAction::Forward
                        | KeyAction::LoopStart
                        | KeyAction::LoopEnd
                        | KeyAction::Run
                        | KeyAction::ClearProgram
                )
            }),
            ("Track", |a| {
                matches!(
                    a,
                    KeyAction::ResetBoard
                        | KeyAction::RandomTrack
                        | KeyAction::ToggleConfig
                        | KeyAction::CursorUp
                        | KeyAction::CursorDown
                        | KeyAction::CursorLeft
                        | KeyAction::CursorRight
                        | KeyAction::ToggleCell
                        | KeyAction::SaveTrack
                )
            }),
            ("General", |a| {
                matches!(a, KeyAction::Help | KeyAction::Dismiss | KeyAction::Quit)
            }),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

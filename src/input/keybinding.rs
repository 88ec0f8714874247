//! Keybinding registry and matcher.
//!
//! A registry is built once from an ordered list of chord definitions. Bad
//! definitions are reported as diagnostics and left out rather than aborting
//! construction, so a broken user keymap still leaves the rest usable.
//!
//! Matching is exact on modifiers: a binding without ctrl does not fire while
//! ctrl is held. When two definitions share a key combination the first one
//! registered wins; when two share an action name the last one is returned by
//! [`KeybindingRegistry::binding_for_action`].

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{KeyChord, Modifiers};

/// Grouping used by the help overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCategory {
    Navigation,
    Selection,
    Panes,
    View,
    Sort,
    Bookmarks,
    Application,
}

impl KeyCategory {
    pub const ALL: [KeyCategory; 7] = [
        KeyCategory::Navigation,
        KeyCategory::Selection,
        KeyCategory::Panes,
        KeyCategory::View,
        KeyCategory::Sort,
        KeyCategory::Bookmarks,
        KeyCategory::Application,
    ];

    /// Get display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Selection => "Selection",
            Self::Panes => "Panes",
            Self::View => "View",
            Self::Sort => "Sort",
            Self::Bookmarks => "Bookmarks",
            Self::Application => "Application",
        }
    }
}

impl FromStr for KeyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category {s:?}"))
    }
}

/// A declarative binding as written in a keymap file.
///
/// Every field defaults so that incomplete entries reach validation instead of
/// failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordDefinition {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl ChordDefinition {
    pub fn new(
        key: impl Into<String>,
        modifiers: Modifiers,
        action: impl Into<String>,
        description: impl Into<String>,
        category: KeyCategory,
    ) -> Self {
        Self {
            key: key.into(),
            modifiers,
            action: action.into(),
            description: description.into(),
            category: category.display_name().to_lowercase(),
        }
    }
}

/// A validated, matchable binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub chord: KeyChord,
    pub action: String,
    pub description: String,
    pub category: KeyCategory,
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The definition was dropped
    Error,
    /// The definition was kept but may not behave as intended
    Warning,
}

/// Problem found while building a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingDiagnostic {
    /// Position of the offending definition in the input list
    pub index: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for KeybindingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: binding #{}: {}", self.index, self.message)
    }
}

/// Keymap file layout (`[[binding]]` tables)
#[derive(Debug, Clone, Default, Deserialize)]
struct KeymapFile {
    #[serde(default, rename = "binding")]
    bindings: Vec<ChordDefinition>,
}

/// Lookup table from key chords to actions
#[derive(Debug, Clone, Default)]
pub struct KeybindingRegistry {
    bindings: Vec<KeyBinding>,
    /// combo string -> index of first binding registered for it
    by_combo: HashMap<String, usize>,
    /// action -> index of last binding registered for it
    by_action: HashMap<String, usize>,
    diagnostics: Vec<KeybindingDiagnostic>,
}

impl KeybindingRegistry {
    /// Build a registry from definitions in priority order.
    pub fn new(definitions: impl IntoIterator<Item = ChordDefinition>) -> Self {
        let mut registry = Self::default();

        for (index, definition) in definitions.into_iter().enumerate() {
            match validate(&definition) {
                Ok((category, warning)) => {
                    if let Some(message) = warning {
                        registry.warn(index, message);
                    }
                    registry.insert(index, definition, category);
                }
                Err(message) => registry.diagnostics.push(KeybindingDiagnostic {
                    index,
                    severity: Severity::Error,
                    message,
                }),
            }
        }

        for diagnostic in &registry.diagnostics {
            match diagnostic.severity {
                Severity::Error => tracing::warn!(%diagnostic, "invalid keybinding dropped"),
                Severity::Warning => tracing::debug!(%diagnostic, "keybinding warning"),
            }
        }

        registry
    }

    fn insert(&mut self, index: usize, definition: ChordDefinition, category: KeyCategory) {
        let chord = KeyChord::with_modifiers(definition.key, definition.modifiers);
        let combo = chord.combo_string();
        let position = self.bindings.len();

        if let Some(&first) = self.by_combo.get(&combo) {
            let message = format!(
                "key combination {} is already bound to {:?}; this binding will never match",
                format_key_combo(&chord),
                self.bindings[first].action
            );
            self.warn(index, message);
        } else {
            self.by_combo.insert(combo, position);
        }

        if let Some(previous) = self.by_action.insert(definition.action.clone(), position) {
            let message = format!(
                "action {:?} is already bound to {}; reverse lookup now returns {}",
                definition.action,
                format_key_combo(&self.bindings[previous].chord),
                format_key_combo(&chord)
            );
            self.warn(index, message);
        }

        self.bindings.push(KeyBinding {
            chord,
            action: definition.action,
            description: definition.description,
            category,
        });
    }

    fn warn(&mut self, index: usize, message: String) {
        self.diagnostics.push(KeybindingDiagnostic {
            index,
            severity: Severity::Warning,
            message,
        });
    }

    /// Registry with the built-in keymap
    pub fn with_defaults() -> Self {
        Self::new(super::defaults::default_definitions())
    }

    /// Parse a TOML keymap (`[[binding]]` tables).
    ///
    /// Only malformed TOML is an error; invalid bindings become diagnostics.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: KeymapFile = toml::from_str(content)?;
        Ok(Self::new(file.bindings))
    }

    /// Load a keymap file, falling back to the defaults when it doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::with_defaults());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read keymap file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse keymap file: {}", path.display()))
    }

    /// Resolve a key event to an action name.
    pub fn match_chord(&self, event: &KeyChord) -> Option<&str> {
        self.by_combo
            .get(&event.combo_string())
            .map(|&index| self.bindings[index].action.as_str())
    }

    /// Binding that triggers `action` (the last registered one)
    pub fn binding_for_action(&self, action: &str) -> Option<&KeyBinding> {
        self.by_action.get(action).map(|&index| &self.bindings[index])
    }

    /// All valid bindings in registration order
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Bindings grouped by category, categories in display order, empty ones
    /// skipped.
    pub fn bindings_by_category(&self) -> Vec<(KeyCategory, Vec<&KeyBinding>)> {
        KeyCategory::ALL
            .into_iter()
            .map(|category| {
                let bindings = self
                    .bindings
                    .iter()
                    .filter(|binding| binding.category == category)
                    .collect::<Vec<_>>();
                (category, bindings)
            })
            .filter(|(_, bindings)| !bindings.is_empty())
            .collect()
    }

    /// Errors and warnings collected during construction
    pub fn diagnostics(&self) -> &[KeybindingDiagnostic] {
        &self.diagnostics
    }

    /// Whether any definition was dropped
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Check required fields and the category. Returns the parsed category and an
/// optional non-fatal warning.
fn validate(definition: &ChordDefinition) -> Result<(KeyCategory, Option<String>), String> {
    if definition.key.is_empty() {
        return Err("missing required field `key`".to_string());
    }
    if definition.action.trim().is_empty() {
        return Err("missing required field `action`".to_string());
    }
    if definition.category.trim().is_empty() {
        return Err("missing required field `category`".to_string());
    }
    let category = definition.category.parse::<KeyCategory>()?;

    let warning = definition
        .description
        .trim()
        .is_empty()
        .then(|| format!("action {:?} has no description", definition.action));

    Ok((category, warning))
}

/// Human-readable label for a chord, e.g. "Ctrl+Shift+↑".
///
/// Modifiers always appear in the order Ctrl, Alt, Shift, Cmd.
pub fn format_key_combo(chord: &KeyChord) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (held, label) in [
        (chord.modifiers.ctrl, "Ctrl"),
        (chord.modifiers.alt, "Alt"),
        (chord.modifiers.shift, "Shift"),
        (chord.modifiers.meta, "Cmd"),
    ] {
        if held {
            parts.push(label.to_string());
        }
    }

    let key = match chord.key.as_str() {
        " " | "Space" => "Space".to_string(),
        "ArrowUp" => "↑".to_string(),
        "ArrowDown" => "↓".to_string(),
        "ArrowLeft" => "←".to_string(),
        "ArrowRight" => "→".to_string(),
        "Enter" => "↵".to_string(),
        "Escape" => "Esc".to_string(),
        "Backspace" => "⌫".to_string(),
        "Tab" => "⇥".to_string(),
        other if chord.is_printable() => other.to_uppercase(),
        other => other.to_string(),
    };
    parts.push(key);
    parts.join("+")
}

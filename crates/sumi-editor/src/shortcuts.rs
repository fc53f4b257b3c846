//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native hosts share it.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolBrush,
    ToolPencil,
    ToolEraser,
    ToolSelect,

    // ── Edit ──
    Undo,
    Redo,

    // ── File (the host owns the dialogs) ──
    SaveProject,
    LoadProject,
}

impl ShortcutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::ToolBrush => "tool_brush",
            ShortcutAction::ToolPencil => "tool_pencil",
            ShortcutAction::ToolEraser => "tool_eraser",
            ShortcutAction::ToolSelect => "tool_select",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::SaveProject => "save_project",
            ShortcutAction::LoadProject => "load_project",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Ctrl and ⌘ are interchangeable.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Z"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd {
            return match key {
                "z" | "Z" if shift => Some(ShortcutAction::Redo),
                "z" | "Z" => Some(ShortcutAction::Undo),
                "s" | "S" => Some(ShortcutAction::SaveProject),
                "o" | "O" => Some(ShortcutAction::LoadProject),
                _ => None,
            };
        }

        // ── Single keys ──
        match key {
            "b" => Some(ShortcutAction::ToolBrush),
            "p" => Some(ShortcutAction::ToolPencil),
            "e" => Some(ShortcutAction::ToolEraser),
            "v" => Some(ShortcutAction::ToolSelect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tool_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("b", false, false, false, false),
            Some(ShortcutAction::ToolBrush)
        );
        assert_eq!(
            ShortcutMap::resolve("p", false, false, false, false),
            Some(ShortcutAction::ToolPencil)
        );
        assert_eq!(
            ShortcutMap::resolve("e", false, false, false, false),
            Some(ShortcutAction::ToolEraser)
        );
        assert_eq!(
            ShortcutMap::resolve("v", false, false, false, false),
            Some(ShortcutAction::ToolSelect)
        );
    }

    #[test]
    fn resolve_undo_redo() {
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
        // Browsers report "Z" while Shift is held.
        assert_eq!(
            ShortcutMap::resolve("Z", true, true, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn resolve_file_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("s", true, false, false, false),
            Some(ShortcutAction::SaveProject)
        );
        assert_eq!(
            ShortcutMap::resolve("o", false, false, false, true),
            Some(ShortcutAction::LoadProject)
        );
    }

    #[test]
    fn command_combos_do_not_switch_tools() {
        assert_eq!(ShortcutMap::resolve("b", true, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("x", false, false, false, false), None);
    }
}

//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Click").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard and pointer shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Space", false, "Toggle all LEDs"),
            Shortcut::new("Escape", false, "Quit"),
            Shortcut::new("Click", false, "Toggle a clickable LED"),
            Shortcut::new("Middle click", false, "Switch LED shape"),
            Shortcut::new("Click", true, "Switch LED shape"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Click", true, "").format(), "Ctrl+Click");
        assert_eq!(Shortcut::new("Space", false, "").format(), "Space");
        assert_eq!(ShortcutRegistry::all().len(), 5);
    }
}

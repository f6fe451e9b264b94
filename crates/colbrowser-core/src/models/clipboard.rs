use super::{Item, ItemKind};

/// Paste behavior of the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    /// Items were copied.
    #[default]
    Copy,
    /// Items were cut (move on paste).
    Cut,
}

/// Lightweight descriptor of an item placed on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub path: String,
    pub name: String,
    pub kind: ItemKind,
}

impl From<&Item> for ClipboardEntry {
    fn from(item: &Item) -> Self {
        Self {
            path: item.path.clone(),
            name: item.name.clone(),
            kind: item.kind,
        }
    }
}

/// In-memory clipboard owned by one widget instance.
///
/// Survives navigation; a new copy/cut overwrites it and a successful paste
/// consumes it.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entries: Vec<ClipboardEntry>,
    mode: ClipboardMode,
}

impl Clipboard {
    /// Replace the contents with copied items.
    pub fn copy<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>) {
        self.fill(items, ClipboardMode::Copy);
    }

    /// Replace the contents with cut items.
    pub fn cut<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>) {
        self.fill(items, ClipboardMode::Cut);
    }

    fn fill<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>, mode: ClipboardMode) {
        self.entries = items.into_iter().map(ClipboardEntry::from).collect();
        self.mode = mode;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.mode = ClipboardMode::Copy;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn mode(&self) -> ClipboardMode {
        self.mode
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Whether `path` is waiting to be moved by a cut.
    pub fn is_cut(&self, path: &str) -> bool {
        self.mode == ClipboardMode::Cut && self.entries.iter().any(|e| e.path == path)
    }

    /// Short status text, e.g. "2 items cut".
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let noun = if self.len() == 1 { "item" } else { "items" };
        let verb = match self.mode {
            ClipboardMode::Copy => "copied",
            ClipboardMode::Cut => "cut",
        };
        Some(format!("{} {} {}", self.len(), noun, verb))
    }
}

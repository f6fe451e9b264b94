//! Render models.
//!
//! Everything the widget draws is derived here from [`SessionState`] and
//! [`BrowserConfig`]; the components only map these values to markup.

use crate::config::BrowserConfig;
use crate::models::{FileCategory, Item, ItemKind};
use crate::path::{join_path, last_segment, normalize_path, segments_below_root};
use crate::remote::resource_url;
use crate::session::SessionState;

/// One breadcrumb segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub path: String,
    /// The last (current) segment is not clickable.
    pub clickable: bool,
    pub is_root: bool,
}

/// Icon shown on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileIcon {
    Parent,
    Folder,
    Image,
    Xml,
    Json,
    Css,
    File,
}

impl TileIcon {
    pub fn for_item(item: &Item) -> Self {
        if item.is_parent() {
            return Self::Parent;
        }
        match item.category() {
            None => Self::Folder,
            Some(FileCategory::Image) => Self::Image,
            Some(FileCategory::Xml) => Self::Xml,
            Some(FileCategory::Json) => Self::Json,
            Some(FileCategory::Css) => Self::Css,
            Some(FileCategory::Other) => Self::File,
        }
    }
}

/// One grid tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub path: String,
    pub kind: ItemKind,
    pub icon: TileIcon,
    /// Image URL for thumbnails; on load error the tile falls back to
    /// [`TileIcon::File`].
    pub thumbnail: Option<String>,
    pub selected: bool,
    /// Pending move after a cut.
    pub cut: bool,
}

/// Everything needed to draw the widget once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrowserView {
    pub crumbs: Vec<Crumb>,
    pub tiles: Vec<Tile>,
    pub show_load_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub selection_count: usize,
    pub clipboard_summary: Option<String>,
    pub can_paste: bool,
}

/// Root button followed by one segment per component below the root.
pub fn breadcrumb(root: &str, current: &str) -> Vec<Crumb> {
    let root = normalize_path(root);
    let segments = segments_below_root(current, &root);
    let root_label = last_segment(&root).unwrap_or("/").to_string();

    let mut crumbs = vec![Crumb {
        label: root_label,
        path: root.clone(),
        clickable: !segments.is_empty(),
        is_root: true,
    }];

    let mut path = root;
    for (idx, segment) in segments.iter().enumerate() {
        path = join_path(&path, segment);
        crumbs.push(Crumb {
            label: segment.to_string(),
            path: path.clone(),
            clickable: idx + 1 < segments.len(),
            is_root: false,
        });
    }
    crumbs
}

/// "Load more" is shown iff the count is a nonzero multiple of the page size.
///
/// The server reports no total, so a full last page still shows the button.
pub fn show_load_more(loaded: usize, page_size: usize) -> bool {
    page_size > 0 && loaded > 0 && loaded % page_size == 0
}

pub fn tiles(state: &SessionState, config: &BrowserConfig) -> Vec<Tile> {
    state
        .items
        .iter()
        .map(|item| {
            let icon = TileIcon::for_item(item);
            Tile {
                name: item.name.clone(),
                path: item.path.clone(),
                kind: item.kind,
                icon,
                thumbnail: (icon == TileIcon::Image)
                    .then(|| resource_url(&config.api_base, &item.path)),
                selected: state.is_selected(&item.path),
                cut: state.clipboard.is_cut(&item.path),
            }
        })
        .collect()
}

/// Build the full view model.
pub fn build(state: &SessionState, config: &BrowserConfig, loading: bool) -> BrowserView {
    BrowserView {
        crumbs: breadcrumb(&config.root, &state.current_path),
        tiles: tiles(state, config),
        show_load_more: !loading
            && state.error.is_none()
            && show_load_more(state.items.len(), config.page_size),
        loading,
        error: state.error.clone(),
        selection_count: state.selected_items().len(),
        clipboard_summary: state.clipboard.summary(),
        can_paste: !state.clipboard.is_empty(),
    }
}

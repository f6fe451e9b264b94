//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use colbrowser_core::TileIcon;
use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowUp as Up, LuBraces as FileJson, LuChevronRight as ChevronRight,
        LuClipboardPaste as Paste, LuCopy as Copy, LuCornerLeftUp as Parent,
        LuFile as File, LuFileCode as FileXml, LuFolder as Folder, LuHouse as Home,
        LuImage as FileImage, LuLogIn as Login, LuPalette as FileCss, LuPencil as Edit,
        LuRefreshCw as Refresh, LuScissors as Cut, LuTrash2 as Delete, LuUpload as Upload,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowReturnLeft as Parent, BsArrowUp as Up, BsArrowClockwise as Refresh,
        BsBoxArrowInRight as Login, BsChevronRight as ChevronRight, BsClipboard as Paste,
        BsFileEarmark as File, BsFileEarmarkCode as FileXml, BsFileEarmarkImage as FileImage,
        BsFiles as Copy, BsFiletypeCss as FileCss, BsFiletypeJson as FileJson,
        BsFolderFill as Folder, BsHouseFill as Home, BsPencil as Edit, BsScissors as Cut,
        BsTrash as Delete, BsUpload as Upload, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(HOME, Home);
themed_icon!(UP, Up);
themed_icon!(PARENT, Parent);
themed_icon!(FOLDER, Folder);
themed_icon!(FILE, File);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_XML, FileXml);
themed_icon!(FILE_JSON, FileJson);
themed_icon!(FILE_CSS, FileCss);
themed_icon!(REFRESH, Refresh);
themed_icon!(UPLOAD, Upload);
themed_icon!(COPY, Copy);
themed_icon!(CUT, Cut);
themed_icon!(PASTE, Paste);
themed_icon!(EDIT, Edit);
themed_icon!(DELETE, Delete);
themed_icon!(LOGIN, Login);
themed_icon!(CLOSE, Close);

/// Icon for a grid tile.
pub fn tile_icon(icon: TileIcon) -> Icon {
    match icon {
        TileIcon::Parent => PARENT,
        TileIcon::Folder => FOLDER,
        TileIcon::Image => FILE_IMAGE,
        TileIcon::Xml => FILE_XML,
        TileIcon::Json => FILE_JSON,
        TileIcon::Css => FILE_CSS,
        TileIcon::File => FILE,
    }
}

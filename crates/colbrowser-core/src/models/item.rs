use serde::{Deserialize, Serialize};

/// Reserved entry name meaning "navigate to parent".
pub const PARENT_NAME: &str = "..";

/// Node type in the remote repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Folder-like container.
    Collection,
    /// Leaf file-like node.
    Resource,
}

/// One normalized entry of a collection listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name (`..` for the parent entry)
    pub name: String,
    /// Absolute path, always inside the configured root
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// MIME type reported by the server, used only for icon selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl Item {
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME
    }

    pub fn is_collection(&self) -> bool {
        self.kind == ItemKind::Collection
    }

    /// File category for icon selection; `None` for collections.
    pub fn category(&self) -> Option<FileCategory> {
        match self.kind {
            ItemKind::Collection => None,
            ItemKind::Resource => Some(FileCategory::detect(self.mime.as_deref(), &self.name)),
        }
    }
}

/// Recognized resource categories for icons and thumbnails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Xml,
    Json,
    Css,
    Other,
}

impl FileCategory {
    /// Detect the category, trusting the MIME type first and falling back
    /// to the file extension.
    pub fn detect(mime: Option<&str>, name: &str) -> Self {
        mime.and_then(Self::from_mime)
            .unwrap_or_else(|| Self::from_extension(name))
    }

    /// Category from a MIME type. `None` when the type says nothing useful.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence.starts_with("image/") {
            return Some(Self::Image);
        }
        match essence.as_str() {
            "application/xml" | "text/xml" | "application/xquery" | "application/xslt+xml" => {
                Some(Self::Xml)
            }
            "application/json" | "text/json" => Some(Self::Json),
            "text/css" => Some(Self::Css),
            _ if essence.ends_with("+xml") => Some(Self::Xml),
            _ if essence.ends_with("+json") => Some(Self::Json),
            _ => None,
        }
    }

    /// Category from a file name extension.
    pub fn from_extension(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Other;
        };
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "bmp" | "ico" => Self::Image,
            "xml" | "xsl" | "xslt" | "xq" | "xql" | "xqm" | "xquery" | "xconf" | "html" => Self::Xml,
            "json" => Self::Json,
            "css" => Self::Css,
            _ => Self::Other,
        }
    }
}

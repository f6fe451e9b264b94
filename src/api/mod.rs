//! Browser side of the remote-collection client.
//!
//! - [`FetchTransport`] - `gloo-net` transport with request timeout
//! - [`BrowserFile`] - Upload handle wrapping a `web_sys::File`

mod fetch;

use colbrowser_core::RemoteClient;

pub use fetch::{BrowserFile, FetchTransport};

/// Remote client used by the widget.
pub type BrowserClient = RemoteClient<FetchTransport>;

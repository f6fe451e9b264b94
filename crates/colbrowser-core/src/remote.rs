//! Remote-collection client.
//!
//! Requests are described by plain [`HttpRequest`] values built from the
//! endpoint functions below, executed by a platform [`Transport`], and the
//! answers are interpreted by [`crate::response`]. [`RemoteClient`] ties the
//! three together and implements [`CollectionApi`], the seam the controller
//! talks to.

use std::cell::RefCell;

use serde_json::{Value, json};

use crate::config::normalize_base;
use crate::error::{ApiError, ValidationError};
use crate::listing::{RawEntry, extract_entries};
use crate::path::{last_segment, normalize_path, parent_path};
use crate::response::{
    LoginResult, OperationResult, UploadResult, ensure_success, login_result, operation_result,
    sniff_json, upload_result,
};

/// Multipart field name carrying uploaded file bytes.
pub const UPLOAD_FIELD: &str = "file[]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Encode form pairs as a urlencoded string.
    pub fn form_encoded(pairs: &[(String, String)]) -> String {
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A fully built request, independent of any HTTP library.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

/// Status, content type and text of an HTTP answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// A file handed to the uploader.
pub trait UploadFile {
    fn file_name(&self) -> String;
}

/// Executes requests on the current platform.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type File: UploadFile;

    async fn send(&self, request: HttpRequest) -> Result<RawResponse, ApiError>;

    /// POST `file` as multipart form data under `field`.
    async fn send_multipart(
        &self,
        url: &str,
        field: &str,
        file: &Self::File,
    ) -> Result<RawResponse, ApiError>;
}

/// Repository operations used by the controller.
#[allow(async_fn_in_trait)]
pub trait CollectionApi {
    type File: UploadFile;

    /// Point subsequent requests at another server.
    fn set_api_base(&self, api_base: &str);

    /// Fetch one page of `path` and extract its raw entries.
    async fn list_collection(
        &self,
        path: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<RawEntry>, ApiError>;

    async fn upload_file(
        &self,
        collection: &str,
        file: &Self::File,
    ) -> Result<UploadResult, ApiError>;

    async fn delete_items(
        &self,
        collection: &str,
        paths: &[String],
    ) -> Result<OperationResult, ApiError>;

    async fn rename_item(&self, old_path: &str, new_name: &str)
    -> Result<OperationResult, ApiError>;

    async fn copy_items(
        &self,
        sources: &[String],
        target: &str,
        current: &str,
    ) -> Result<OperationResult, ApiError>;

    async fn move_items(
        &self,
        sources: &[String],
        target: &str,
        current: &str,
    ) -> Result<OperationResult, ApiError>;

    async fn login(&self, user: &str, password: &str) -> Result<LoginResult, ApiError>;
}

// =============================================================================
// Endpoints
// =============================================================================

/// Encode each segment of an absolute path, dropping the leading slash.
fn encode_path(path: &str) -> String {
    normalize_path(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `{base}/api/collections/{path}`
pub fn collection_url(base: &str, path: &str) -> String {
    let encoded = encode_path(path);
    if encoded.is_empty() {
        format!("{}/api/collections", base)
    } else {
        format!("{}/api/collections/{}", base, encoded)
    }
}

/// `{base}/api/collections/{collection}/resources/{name}`, also used as the
/// raw resource URL for thumbnails.
pub fn resource_url(base: &str, path: &str) -> String {
    let name = last_segment(path).unwrap_or_default();
    format!(
        "{}/resources/{}",
        collection_url(base, &parent_path(path)),
        urlencoding::encode(name)
    )
}

pub fn list_request(base: &str, path: &str, start: usize, end: usize) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        url: format!("{}?start={}&end={}", collection_url(base, path), start, end),
        body: RequestBody::Empty,
    }
}

pub fn upload_url(base: &str, collection: &str) -> String {
    format!(
        "{}/api/upload?collection={}",
        base,
        urlencoding::encode(&normalize_path(collection))
    )
}

pub fn delete_request(
    base: &str,
    collection: &str,
    paths: &[String],
) -> Result<HttpRequest, ValidationError> {
    if paths.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let query = paths
        .iter()
        .map(|p| format!("remove={}", urlencoding::encode(p)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(HttpRequest {
        method: Method::Delete,
        url: format!("{}?{}", collection_url(base, collection), query),
        body: RequestBody::Empty,
    })
}

pub fn rename_request(
    base: &str,
    old_path: &str,
    new_name: &str,
) -> Result<HttpRequest, ValidationError> {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name.contains('/') || new_name == ".." {
        return Err(ValidationError::InvalidName(new_name.to_string()));
    }
    Ok(HttpRequest {
        method: Method::Patch,
        url: resource_url(base, old_path),
        body: RequestBody::Json(json!({ "name": new_name })),
    })
}

/// Collection the sources live in: the parent of the first absolute path, or
/// `current` for relative sources.
pub fn source_collection(sources: &[String], current: &str) -> String {
    match sources.first() {
        Some(first) if first.starts_with('/') => parent_path(first),
        _ => normalize_path(current),
    }
}

/// Build a copy (`action = "copy"`) or move (`action = "move"`) request.
pub fn transfer_request(
    base: &str,
    action: &str,
    sources: &[String],
    target: &str,
    current: &str,
) -> Result<HttpRequest, ValidationError> {
    if sources.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let collection = source_collection(sources, current);
    Ok(HttpRequest {
        method: Method::Post,
        url: format!("{}/{}", collection_url(base, &collection), action),
        body: RequestBody::Json(json!({
            "target": normalize_path(target),
            "sources": sources,
        })),
    })
}

pub fn login_request(base: &str, user: &str, password: &str) -> HttpRequest {
    HttpRequest {
        method: Method::Post,
        url: format!("{}/api/login/", base),
        body: RequestBody::Form(vec![
            ("user".to_string(), user.to_string()),
            ("password".to_string(), password.to_string()),
        ]),
    }
}

// =============================================================================
// Client
// =============================================================================

/// [`CollectionApi`] over HTTP, generic in the transport.
pub struct RemoteClient<T> {
    transport: T,
    api_base: RefCell<String>,
}

impl<T: Transport> RemoteClient<T> {
    pub fn new(transport: T, api_base: &str) -> Self {
        Self {
            transport,
            api_base: RefCell::new(normalize_base(api_base)),
        }
    }

    pub fn api_base(&self) -> String {
        self.api_base.borrow().clone()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> CollectionApi for RemoteClient<T> {
    type File = T::File;

    fn set_api_base(&self, api_base: &str) {
        *self.api_base.borrow_mut() = normalize_base(api_base);
    }

    async fn list_collection(
        &self,
        path: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<RawEntry>, ApiError> {
        let request = list_request(&self.api_base(), path, start, end);
        let response = self.transport.send(request).await?;
        ensure_success(&response)?;
        let value = sniff_json(&response)?;
        extract_entries(&value)
    }

    async fn upload_file(
        &self,
        collection: &str,
        file: &Self::File,
    ) -> Result<UploadResult, ApiError> {
        let url = upload_url(&self.api_base(), collection);
        let response = self
            .transport
            .send_multipart(&url, UPLOAD_FIELD, file)
            .await?;
        upload_result(&response)
    }

    async fn delete_items(
        &self,
        collection: &str,
        paths: &[String],
    ) -> Result<OperationResult, ApiError> {
        let request = delete_request(&self.api_base(), collection, paths)?;
        let response = self.transport.send(request).await?;
        operation_result(&response)
    }

    async fn rename_item(
        &self,
        old_path: &str,
        new_name: &str,
    ) -> Result<OperationResult, ApiError> {
        let request = rename_request(&self.api_base(), old_path, new_name)?;
        let response = self.transport.send(request).await?;
        operation_result(&response)
    }

    async fn copy_items(
        &self,
        sources: &[String],
        target: &str,
        current: &str,
    ) -> Result<OperationResult, ApiError> {
        let request = transfer_request(&self.api_base(), "copy", sources, target, current)?;
        let response = self.transport.send(request).await?;
        operation_result(&response)
    }

    async fn move_items(
        &self,
        sources: &[String],
        target: &str,
        current: &str,
    ) -> Result<OperationResult, ApiError> {
        let request = transfer_request(&self.api_base(), "move", sources, target, current)?;
        let response = self.transport.send(request).await?;
        operation_result(&response)
    }

    async fn login(&self, user: &str, password: &str) -> Result<LoginResult, ApiError> {
        let response = self
            .transport
            .send(login_request(&self.api_base(), user, password))
            .await?;
        login_result(&response)
    }
}

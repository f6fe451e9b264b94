//! Browser transport over the Fetch API.
//!
//! Every request races a timer: when it fires the request is aborted through
//! an `AbortController` and reported as a timeout.

use std::cell::Cell;
use std::rc::Rc;

use colbrowser_core::remote::RequestBody;
use colbrowser_core::{ApiError, HttpRequest, Method, RawResponse, Transport, UploadFile};
use gloo_net::http::{Method as HttpMethod, Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use web_sys::{AbortController, File, FormData, RequestCredentials};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A file picked by the user or dropped onto the widget.
#[derive(Clone, Debug)]
pub struct BrowserFile(File);

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self(file)
    }
}

impl UploadFile for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }
}

// =============================================================================
// Deadline
// =============================================================================

/// Aborts the request it guards once `timeout_ms` elapses. Dropping it
/// cancels the timer.
struct Deadline {
    controller: AbortController,
    expired: Rc<Cell<bool>>,
    _timer: Timeout,
}

impl Deadline {
    fn start(timeout_ms: u32) -> Result<Self, ApiError> {
        let controller = AbortController::new()
            .map_err(|_| ApiError::Network("failed to create abort controller".to_string()))?;
        let expired = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let expired = expired.clone();
            Timeout::new(timeout_ms, move || {
                expired.set(true);
                controller.abort();
            })
        };
        Ok(Self {
            controller,
            expired,
            _timer: timer,
        })
    }

    fn attach(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.abort_signal(Some(&self.controller.signal()))
    }

    fn error(&self, err: gloo_net::Error) -> ApiError {
        if self.expired.get() {
            ApiError::Network("timed out".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

// =============================================================================
// Transport
// =============================================================================

/// [`Transport`] backed by `gloo-net`. Cookies are sent so a login session
/// applies to later requests.
#[derive(Clone, Copy, Debug)]
pub struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    fn builder(url: &str, method: HttpMethod) -> RequestBuilder {
        RequestBuilder::new(url)
            .method(method)
            .credentials(RequestCredentials::Include)
    }

    async fn execute(&self, deadline: &Deadline, request: Request) -> Result<RawResponse, ApiError> {
        let response = request.send().await.map_err(|e| deadline.error(e))?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.text().await.map_err(|e| deadline.error(e))?;
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

fn http_method(method: Method) -> HttpMethod {
    match method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
    }
}

fn build_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(format!("failed to build request: {}", err))
}

impl Transport for FetchTransport {
    type File = BrowserFile;

    async fn send(&self, request: HttpRequest) -> Result<RawResponse, ApiError> {
        let deadline = Deadline::start(self.timeout_ms)?;
        let builder = deadline.attach(Self::builder(&request.url, http_method(request.method)));
        let built = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder
                .header("Content-Type", FORM_CONTENT_TYPE)
                .body(RequestBody::form_encoded(pairs)),
        }
        .map_err(build_error)?;
        self.execute(&deadline, built).await
    }

    async fn send_multipart(
        &self,
        url: &str,
        field: &str,
        file: &Self::File,
    ) -> Result<RawResponse, ApiError> {
        let form = FormData::new()
            .map_err(|_| ApiError::Network("failed to create form data".to_string()))?;
        form.append_with_blob_and_filename(field, &file.0, &file.0.name())
            .map_err(|_| ApiError::Network(format!("failed to attach {}", file.0.name())))?;

        let deadline = Deadline::start(self.timeout_ms)?;
        let built = deadline
            .attach(Self::builder(url, HttpMethod::POST))
            .body(form)
            .map_err(build_error)?;
        self.execute(&deadline, built).await
    }
}

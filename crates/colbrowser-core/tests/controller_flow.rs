//! Controller behaviour against an in-memory repository.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

use colbrowser_core::error::ValidationError;
use colbrowser_core::models::{ClipboardMode, NoticeLevel};
use colbrowser_core::path::{is_within_root, join_path, last_segment, parent_path};
use colbrowser_core::remote::UploadFile;
use colbrowser_core::response::{LoginResult, OperationResult, UploadResult};
use colbrowser_core::{
    ApiError, BrowserConfig, CollectionApi, Controller, KeyAction, LoadOutcome, Modifiers, Notice,
    Prompt, RawEntry, Surface,
};

const ROOT: &str = "/db/apps/test";

// =============================================================================
// Fakes
// =============================================================================

struct TestFile(String);

impl UploadFile for TestFile {
    fn file_name(&self) -> String {
        self.0.clone()
    }
}

/// Paths mapped to "is collection".
#[derive(Default)]
struct FakeRepo {
    nodes: RefCell<BTreeMap<String, bool>>,
    calls: RefCell<Vec<String>>,
    fail_next: RefCell<Option<ApiError>>,
    api_base: RefCell<String>,
}

impl FakeRepo {
    fn with(paths: &[(&str, bool)]) -> Self {
        let repo = Self::default();
        for (path, is_collection) in paths {
            repo.nodes
                .borrow_mut()
                .insert(path.to_string(), *is_collection);
        }
        repo
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn calls_starting(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn fail_with(&self, err: ApiError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Copy `source` and everything below it into `target`.
    fn copy_tree(&self, source: &str, target: &str) {
        let Some(name) = last_segment(source) else {
            return;
        };
        let dest = join_path(target, name);
        let prefix = format!("{}/", source);
        let copies: Vec<(String, bool)> = self
            .nodes
            .borrow()
            .iter()
            .filter(|(p, _)| *p == source || p.starts_with(&prefix))
            .map(|(p, c)| (format!("{}{}", dest, &p[source.len()..]), *c))
            .collect();
        self.nodes.borrow_mut().extend(copies);
    }

    fn remove_tree(&self, source: &str) {
        let prefix = format!("{}/", source);
        self.nodes
            .borrow_mut()
            .retain(|p, _| p != source && !p.starts_with(&prefix));
    }
}

fn ok() -> OperationResult {
    OperationResult {
        status: Some("ok".to_string()),
        ..OperationResult::default()
    }
}

impl CollectionApi for FakeRepo {
    type File = TestFile;

    fn set_api_base(&self, api_base: &str) {
        *self.api_base.borrow_mut() = api_base.to_string();
    }

    async fn list_collection(
        &self,
        path: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<RawEntry>, ApiError> {
        tokio::task::yield_now().await;
        self.calls
            .borrow_mut()
            .push(format!("list {} {}-{}", path, start, end));
        self.take_failure()?;
        let children: Vec<RawEntry> = self
            .nodes
            .borrow()
            .iter()
            .filter(|(p, _)| parent_path(p) == path && p.as_str() != path)
            .map(|(p, is_collection)| RawEntry {
                path: Some(p.clone()),
                is_collection: Some(*is_collection),
                ..RawEntry::named(last_segment(p).unwrap_or_default())
            })
            .collect();
        Ok(children.into_iter().skip(start).take(end - start).collect())
    }

    async fn upload_file(
        &self,
        collection: &str,
        file: &Self::File,
    ) -> Result<UploadResult, ApiError> {
        self.calls.borrow_mut().push(format!("upload {}", file.0));
        self.take_failure()?;
        self.nodes
            .borrow_mut()
            .insert(join_path(collection, &file.0), false);
        Ok(UploadResult {
            files: vec![file.0.clone()],
            message: None,
        })
    }

    async fn delete_items(
        &self,
        _collection: &str,
        paths: &[String],
    ) -> Result<OperationResult, ApiError> {
        self.calls.borrow_mut().push(format!("delete {}", paths.join(",")));
        self.take_failure()?;
        for path in paths {
            self.remove_tree(path);
        }
        Ok(ok())
    }

    async fn rename_item(
        &self,
        old_path: &str,
        new_name: &str,
    ) -> Result<OperationResult, ApiError> {
        self.calls.borrow_mut().push(format!("rename {}", old_path));
        self.take_failure()?;
        let is_collection = self.nodes.borrow_mut().remove(old_path).unwrap_or(false);
        self.nodes
            .borrow_mut()
            .insert(join_path(&parent_path(old_path), new_name), is_collection);
        Ok(ok())
    }

    async fn copy_items(
        &self,
        sources: &[String],
        target: &str,
        _current: &str,
    ) -> Result<OperationResult, ApiError> {
        self.calls.borrow_mut().push(format!("copy -> {}", target));
        self.take_failure()?;
        for source in sources {
            self.copy_tree(source, target);
        }
        Ok(ok())
    }

    async fn move_items(
        &self,
        sources: &[String],
        target: &str,
        _current: &str,
    ) -> Result<OperationResult, ApiError> {
        self.calls.borrow_mut().push(format!("move -> {}", target));
        self.take_failure()?;
        for source in sources {
            self.copy_tree(source, target);
            self.remove_tree(source);
        }
        Ok(ok())
    }

    async fn login(&self, user: &str, password: &str) -> Result<LoginResult, ApiError> {
        self.calls.borrow_mut().push(format!("login {}", user));
        if password == "secret" {
            Ok(LoginResult {
                user: Some(user.to_string()),
                message: None,
            })
        } else {
            Err(ApiError::http(401, "wrong password"))
        }
    }
}

#[derive(Default)]
struct ScriptedSurface {
    notices: RefCell<Vec<Notice>>,
    renders: Cell<usize>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<Prompt>>,
    answers: RefCell<VecDeque<Option<String>>>,
    slept: RefCell<Vec<u32>>,
    opened: RefCell<Vec<String>>,
}

impl ScriptedSurface {
    fn last_notice(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    fn answer(&self, answer: Option<&str>) {
        self.answers.borrow_mut().push_back(answer.map(String::from));
    }
}

impl Surface for ScriptedSurface {
    fn render(&self) {
        self.renders.set(self.renders.get() + 1);
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    async fn confirm(&self, _message: &str) -> bool {
        tokio::task::yield_now().await;
        self.confirm_answer.get()
    }

    async fn prompt(&self, prompt: Prompt) -> Option<String> {
        self.prompts.borrow_mut().push(prompt);
        self.answers.borrow_mut().pop_front().flatten()
    }

    async fn sleep(&self, ms: u32) {
        self.slept.borrow_mut().push(ms);
    }

    fn now_ms(&self) -> f64 {
        1_000.0
    }

    fn open_resource(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

type TestController = Controller<FakeRepo, ScriptedSurface>;

fn sample_repo() -> FakeRepo {
    FakeRepo::with(&[
        ("/db/apps/test/a.xml", false),
        ("/db/apps/test/b.xml", false),
        ("/db/apps/test/sub", true),
        ("/db/apps/test/sub/inner.xml", false),
        ("/db/apps/other", true),
    ])
}

async fn started(repo: FakeRepo, config: BrowserConfig) -> TestController {
    let controller = Controller::new(repo, ScriptedSurface::default(), config);
    controller.start().await.unwrap();
    controller
}

async fn started_default() -> TestController {
    started(sample_repo(), BrowserConfig::new("http://host", ROOT)).await
}

fn names(controller: &TestController) -> Vec<String> {
    controller
        .state()
        .items
        .iter()
        .map(|i| i.name.clone())
        .collect()
}

// =============================================================================
// Loading & navigation
// =============================================================================

#[tokio::test]
async fn test_initial_load_records_range() {
    let controller = started_default().await;
    let state = controller.state();
    assert_eq!(state.current_path, ROOT);
    assert_eq!(state.loaded_ranges.iter().collect::<Vec<_>>(), vec!["0-50"]);
    assert!(state.selected.is_empty());
    assert_eq!(state.items.len(), 3);
    assert!(state.cache.contains_key(ROOT));
    drop(state);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_navigation_outside_root_is_refused() {
    let controller = started_default().await;
    let calls = controller.api().calls.borrow().len();

    let err = controller.navigate_to("/db/apps/other").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::OutsideRoot { .. })
    ));
    assert_eq!(controller.current_path(), ROOT);
    assert_eq!(controller.api().calls.borrow().len(), calls);
    let notice = controller.surface().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
}

#[tokio::test]
async fn test_navigate_into_and_up() {
    let controller = started_default().await;
    controller.navigate_to("/db/apps/test/sub/").await.unwrap();
    assert_eq!(controller.current_path(), "/db/apps/test/sub");
    // the fake lists no parent entry, the children are there
    assert_eq!(names(&controller), vec!["inner.xml"]);

    controller.navigate_up().await.unwrap();
    assert_eq!(controller.current_path(), ROOT);

    assert_eq!(
        controller.navigate_to(ROOT).await.unwrap(),
        LoadOutcome::Unchanged
    );
}

#[tokio::test]
async fn test_open_resource_hands_url_to_surface() {
    let controller = started_default().await;
    controller.open("/db/apps/test/a.xml").await.unwrap();
    assert_eq!(
        controller.surface().opened.borrow().as_slice(),
        ["http://host/api/collections/db/apps/test/resources/a.xml"]
    );

    controller.open("/db/apps/test/sub").await.unwrap();
    assert_eq!(controller.current_path(), "/db/apps/test/sub");
}

#[tokio::test]
async fn test_append_of_fetched_range_makes_no_call() {
    let repo = sample_repo();
    let controller = started(repo, BrowserConfig::new("", ROOT).with_page_size(3)).await;
    assert!(controller.view().show_load_more);

    assert_eq!(controller.load_more().await.unwrap(), LoadOutcome::Loaded(0));
    let lists = controller.api().calls_starting("list");
    assert_eq!(lists, 2);

    assert_eq!(controller.load_more().await.unwrap(), LoadOutcome::Skipped);
    assert_eq!(controller.api().calls_starting("list"), lists);
}

#[tokio::test]
async fn test_overlapping_load_is_ignored() {
    let controller = Controller::new(
        sample_repo(),
        ScriptedSurface::default(),
        BrowserConfig::new("", ROOT),
    );
    let (first, second) = tokio::join!(
        controller.load_collection(ROOT, false),
        controller.load_collection(ROOT, false)
    );
    assert_eq!(first.unwrap(), LoadOutcome::Loaded(3));
    assert_eq!(second.unwrap(), LoadOutcome::Busy);
    assert_eq!(controller.api().calls_starting("list"), 1);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_root_change_discards_inflight_load() {
    let repo = sample_repo();
    repo.nodes
        .borrow_mut()
        .insert("/db/apps/other/x.xml".to_string(), false);
    let controller = Controller::new(repo, ScriptedSurface::default(), BrowserConfig::new("", ROOT));

    let (first, second) = tokio::join!(controller.start(), controller.set_root("/db/apps/other"));
    assert_eq!(first.unwrap(), LoadOutcome::Stale);
    assert_eq!(second.unwrap(), LoadOutcome::Loaded(1));
    assert_eq!(controller.current_path(), "/db/apps/other");
    assert_eq!(names(&controller), vec!["x.xml"]);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_dot_segments_stay_inside_root() {
    let controller = started_default().await;
    let calls = controller.api().calls.borrow().len();

    let err = controller.navigate_to("/db/apps/test/../..").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::OutsideRoot { ref path, .. }) if path == "/db"
    ));
    assert_eq!(
        controller.navigate_to("/db/apps/test/sub/..").await.unwrap(),
        LoadOutcome::Unchanged
    );
    assert_eq!(controller.api().calls.borrow().len(), calls);

    controller.navigate_to("/db/apps/test/./sub/").await.unwrap();
    assert_eq!(controller.current_path(), "/db/apps/test/sub");
}

#[tokio::test]
async fn test_load_outside_root_is_refused() {
    let controller = started_default().await;
    let calls = controller.api().calls.borrow().len();

    let err = controller
        .load_collection("/db/apps/other", false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::OutsideRoot { .. })
    ));
    assert_eq!(controller.current_path(), ROOT);
    assert_eq!(names(&controller), vec!["a.xml", "b.xml", "sub"]);
    assert_eq!(controller.api().calls.borrow().len(), calls);
}

#[tokio::test]
async fn test_root_change_during_delete_confirm() {
    let controller = started_default().await;
    controller.surface().confirm_answer.set(true);
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());

    let (deleted, rooted) = tokio::join!(
        controller.perform_delete(),
        controller.set_root("/db/apps/other")
    );
    assert!(deleted.unwrap());
    assert_eq!(rooted.unwrap(), LoadOutcome::Loaded(0));
    assert!(!controller.api().exists("/db/apps/test/a.xml"));

    let root = controller.config().root;
    assert_eq!(root, "/db/apps/other");
    assert_eq!(controller.current_path(), root);
    assert!(is_within_root(&controller.current_path(), &root));
    assert!(controller.state().items.is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_navigation_during_delete_confirm_is_kept() {
    let controller = started_default().await;
    controller.surface().confirm_answer.set(true);
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());

    let (deleted, navigated) = tokio::join!(
        controller.perform_delete(),
        controller.navigate_to("/db/apps/test/sub")
    );
    assert!(deleted.unwrap());
    navigated.unwrap();
    assert_eq!(controller.current_path(), "/db/apps/test/sub");
    assert_eq!(names(&controller), vec!["inner.xml"]);
}

#[tokio::test]
async fn test_failed_load_shows_error() {
    let repo = sample_repo();
    repo.fail_with(ApiError::http(500, "boom"));
    let controller = Controller::new(repo, ScriptedSurface::default(), BrowserConfig::new("", ROOT));

    assert!(controller.start().await.is_err());
    let view = controller.view();
    assert!(view.tiles.is_empty());
    assert!(view.error.unwrap().contains("500"));
    assert!(!view.show_load_more);
    assert_eq!(
        controller.surface().last_notice().unwrap().level,
        NoticeLevel::Error
    );
}

// =============================================================================
// Selection & clipboard
// =============================================================================

#[tokio::test]
async fn test_click_modifiers() {
    let controller = started_default().await;
    let a = "/db/apps/test/a.xml";
    let b = "/db/apps/test/b.xml";

    controller.toggle_selection(a, Modifiers::default());
    controller.toggle_selection(b, Modifiers::default());
    assert_eq!(controller.state().selected_paths(), vec![b]);

    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    controller.toggle_selection(a, ctrl);
    assert_eq!(controller.state().selected_paths(), vec![a, b]);
    controller.toggle_selection(a, ctrl);
    assert_eq!(controller.state().selected_paths(), vec![b]);

    controller.toggle_selection("/db/apps/test/missing", ctrl);
    assert_eq!(controller.state().selected.len(), 1);
}

#[tokio::test]
async fn test_context_selection() {
    let controller = started_default().await;
    let a = "/db/apps/test/a.xml";
    let b = "/db/apps/test/b.xml";
    let sub = "/db/apps/test/sub";
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    controller.toggle_selection(a, ctrl);
    controller.toggle_selection(b, ctrl);

    controller.select_for_context(a);
    assert_eq!(controller.state().selected_paths(), vec![a, b]);

    controller.select_for_context(sub);
    assert_eq!(controller.state().selected_paths(), vec![sub]);
}

#[tokio::test]
async fn test_refresh_picks_up_new_items() {
    let controller = started_default().await;
    let lists = controller.api().calls_starting("list");
    controller
        .api()
        .nodes
        .borrow_mut()
        .insert("/db/apps/test/c.xml".to_string(), false);

    controller.refresh().await.unwrap();
    assert_eq!(controller.api().calls_starting("list"), lists + 1);
    assert!(names(&controller).contains(&"c.xml".to_string()));
    assert_eq!(controller.current_path(), ROOT);
}

#[tokio::test]
async fn test_copy_then_paste_keeps_source() {
    let controller = started_default().await;
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());
    assert_eq!(controller.perform_copy(), 1);
    assert_eq!(controller.state().clipboard.mode(), ClipboardMode::Copy);

    controller.navigate_to("/db/apps/test/sub").await.unwrap();
    controller.perform_paste().await.unwrap();

    assert!(controller.api().exists("/db/apps/test/a.xml"));
    assert!(controller.api().exists("/db/apps/test/sub/a.xml"));
    assert!(controller.state().clipboard.is_empty());
    assert_eq!(names(&controller), vec!["a.xml", "inner.xml"]);
}

#[tokio::test]
async fn test_cut_then_paste_moves() {
    let controller = started_default().await;
    controller.toggle_selection("/db/apps/test/b.xml", Modifiers::default());
    assert_eq!(controller.perform_cut(), 1);
    assert!(controller.view().tiles.iter().any(|t| t.cut));

    controller.navigate_to("/db/apps/test/sub").await.unwrap();
    controller.perform_paste().await.unwrap();

    assert!(!controller.api().exists("/db/apps/test/b.xml"));
    assert!(controller.api().exists("/db/apps/test/sub/b.xml"));
    assert!(controller.state().clipboard.is_empty());
}

#[tokio::test]
async fn test_empty_clipboard_paste_is_refused() {
    let controller = started_default().await;
    let err = controller.perform_paste().await.unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::EmptyClipboard));
    assert_eq!(controller.api().calls_starting("copy"), 0);
}

#[tokio::test]
async fn test_copy_without_selection_warns() {
    let controller = started_default().await;
    assert_eq!(controller.perform_copy(), 0);
    assert!(controller.state().clipboard.is_empty());
    assert_eq!(
        controller.surface().last_notice().unwrap().level,
        NoticeLevel::Warning
    );
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_delete_confirmed() {
    let controller = started_default().await;
    controller.surface().confirm_answer.set(true);
    controller.select_all();
    controller.toggle_selection(
        "/db/apps/test/sub",
        Modifiers {
            meta: true,
            ..Modifiers::default()
        },
    );

    assert!(controller.perform_delete().await.unwrap());
    assert!(!controller.api().exists("/db/apps/test/a.xml"));
    assert!(!controller.api().exists("/db/apps/test/b.xml"));
    assert!(controller.api().exists("/db/apps/test/sub"));
    assert!(controller.state().selected.is_empty());
    assert_eq!(names(&controller), vec!["sub"]);
}

#[tokio::test]
async fn test_delete_cancelled_makes_no_call() {
    let controller = started_default().await;
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());
    assert!(!controller.perform_delete().await.unwrap());
    assert_eq!(controller.api().calls_starting("delete"), 0);
    assert_eq!(controller.state().selected.len(), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_selection() {
    let controller = started_default().await;
    controller.surface().confirm_answer.set(true);
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());
    controller.api().fail_with(ApiError::http(403, "forbidden"));

    let err = controller.perform_delete().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(
        controller.state().selected_paths(),
        vec!["/db/apps/test/a.xml"]
    );
    let notice = controller.surface().last_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.text.starts_with("Delete failed"));
}

#[tokio::test]
async fn test_second_modal_is_rejected() {
    let controller = started_default().await;
    controller.surface().confirm_answer.set(false);
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());

    let (first, second) = tokio::join!(controller.perform_delete(), controller.perform_rename());
    assert_eq!(first.unwrap(), false);
    assert_eq!(
        second.unwrap_err(),
        ApiError::Validation(ValidationError::DialogOpen)
    );
    assert!(controller.surface().prompts.borrow().is_empty());

    // the guard is released once the dialog resolves
    controller.surface().answer(None);
    assert!(!controller.perform_rename().await.unwrap());
}

#[tokio::test]
async fn test_rename_single_item() {
    let controller = started_default().await;
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());
    controller.surface().answer(Some(" c.xml "));

    assert!(controller.perform_rename().await.unwrap());
    assert!(controller.api().exists("/db/apps/test/c.xml"));
    assert_eq!(names(&controller), vec!["b.xml", "c.xml", "sub"]);
    let prompt = controller.surface().prompts.borrow()[0].clone();
    assert_eq!(prompt.default, "a.xml");
    assert!(!prompt.masked);
}

#[tokio::test]
async fn test_rename_needs_exactly_one() {
    let controller = started_default().await;
    controller.select_all();
    let err = controller.perform_rename().await.unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::RenameNeedsSingle));
    assert_eq!(controller.api().calls_starting("rename"), 0);
}

#[tokio::test]
async fn test_uploads_are_sequential_then_reload() {
    let controller = started_default().await;
    let files = vec![TestFile("x.xml".into()), TestFile("y.xml".into())];

    assert_eq!(controller.upload_files(files).await.unwrap(), 2);
    let calls = controller.api().calls.borrow().clone();
    let uploads: Vec<_> = calls.iter().filter(|c| c.starts_with("upload")).collect();
    assert_eq!(uploads, vec!["upload x.xml", "upload y.xml"]);
    // reload comes after the last upload
    assert!(calls.last().unwrap().starts_with("list"));
    assert_eq!(controller.surface().slept.borrow().as_slice(), [1000]);
    assert!(names(&controller).contains(&"y.xml".to_string()));
}

#[tokio::test]
async fn test_upload_failure_stops_batch() {
    let controller = started_default().await;
    controller.api().fail_with(ApiError::Network("offline".into()));
    let files = vec![TestFile("x.xml".into()), TestFile("y.xml".into())];

    assert!(controller.upload_files(files).await.is_err());
    assert_eq!(controller.api().calls_starting("upload"), 1);
    assert!(controller.surface().slept.borrow().is_empty());
}

#[tokio::test]
async fn test_drop_onto_collection_moves_selection() {
    let controller = started_default().await;
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());
    controller.toggle_selection(
        "/db/apps/test/b.xml",
        Modifiers {
            shift: true,
            ..Modifiers::default()
        },
    );
    let payload = controller.drag_payload("/db/apps/test/a.xml");
    assert_eq!(payload.len(), 2);

    controller
        .move_into("/db/apps/test/sub", payload)
        .await
        .unwrap();
    assert!(controller.api().exists("/db/apps/test/sub/b.xml"));
    assert_eq!(names(&controller), vec!["sub"]);
}

#[tokio::test]
async fn test_drop_into_itself_is_refused() {
    let controller = started_default().await;
    let payload = controller.drag_payload("/db/apps/test/sub");
    let err = controller
        .move_into("/db/apps/test/sub", payload)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MoveIntoSelf(_))
    ));
    assert_eq!(controller.api().calls_starting("move"), 0);
}

// =============================================================================
// Session & configuration
// =============================================================================

#[tokio::test]
async fn test_login_prompts_twice() {
    let controller = started_default().await;
    controller.surface().answer(Some("admin"));
    controller.surface().answer(Some("secret"));

    assert!(controller.perform_login().await.unwrap());
    let prompts = controller.surface().prompts.borrow().clone();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].masked);
    assert_eq!(controller.api().calls_starting("login admin"), 1);
    assert_eq!(controller.api().calls_starting("list"), 2);
}

#[tokio::test]
async fn test_login_rejected() {
    let controller = started_default().await;
    controller.surface().answer(Some("admin"));
    controller.surface().answer(Some("nope"));

    let err = controller.perform_login().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_set_root_keeps_clipboard() {
    let controller = started_default().await;
    controller.toggle_selection("/db/apps/test/a.xml", Modifiers::default());
    controller.perform_copy();

    controller.set_root("/db/apps").await.unwrap();
    let state = controller.state();
    assert_eq!(state.current_path, "/db/apps");
    assert!(!state.cache.contains_key(ROOT));
    assert_eq!(state.clipboard.len(), 1);
}

#[tokio::test]
async fn test_set_api_base_reloads_current() {
    let controller = started_default().await;
    controller.set_api_base("http://other/").await.unwrap();
    assert_eq!(controller.api().api_base.borrow().as_str(), "http://other");
    assert_eq!(controller.config().api_base, "http://other");
    assert_eq!(controller.api().calls_starting("list"), 2);

    assert_eq!(
        controller.set_api_base("http://other").await.unwrap(),
        LoadOutcome::Unchanged
    );
}

#[tokio::test]
async fn test_keyboard_dispatch() {
    let controller = started_default().await;
    controller.dispatch(KeyAction::SelectAll).await.unwrap();
    assert_eq!(controller.state().selected.len(), 3);
    assert!(controller.shortcuts_active(false));

    controller.dispatch(KeyAction::ClearSelection).await.unwrap();
    assert!(!controller.shortcuts_active(false));

    controller.toggle_selection("/db/apps/test/sub", Modifiers::default());
    controller.dispatch(KeyAction::Open).await.unwrap();
    assert_eq!(controller.current_path(), "/db/apps/test/sub");
}

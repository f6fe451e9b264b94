//! Interaction/state controller.
//!
//! Owns the [`SessionState`] of one widget instance and turns user intents
//! into state transitions and [`CollectionApi`] calls. The UI side is
//! reached through [`Surface`]: re-rendering, notices, modal dialogs and
//! timers.
//!
//! # Concurrency
//!
//! Everything runs on one thread. Methods take `&self` and keep the state
//! borrowed only between awaits, so other input events can interleave with
//! an in-flight request:
//! - `loading` makes overlapping [`Controller::load_collection`] calls no-ops
//! - a generation counter discards loads started before a `root`/`api-base`
//!   change
//! - only one confirm/prompt may be pending; a second one is rejected
//! - reloads after a mutation read the current path once the mutation is
//!   done, and every load is confined to the configured root

use std::cell::{Cell, Ref, RefCell};

use crate::config::{BrowserConfig, normalize_base};
use crate::error::{ApiError, ValidationError};
use crate::keymap::{self, KeyAction};
use crate::listing::normalize_listing;
use crate::models::{ClipboardMode, Item, Notice};
use crate::path::{is_within_root, normalize_path, parent_path};
use crate::remote::{CollectionApi, UploadFile, resource_url, source_collection};
use crate::session::{SessionState, range_token};
use crate::view::{self, BrowserView};

/// Modifier keys held during a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

/// A text prompt shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub default: String,
    /// Render as a password field.
    pub masked: bool,
}

/// The UI the controller drives.
#[allow(async_fn_in_trait)]
pub trait Surface {
    /// State changed; redraw.
    fn render(&self);

    fn notify(&self, notice: Notice);

    /// Ask for confirmation. Resolves when the user decides.
    async fn confirm(&self, message: &str) -> bool;

    /// Ask for a line of text. `None` means cancelled.
    async fn prompt(&self, prompt: Prompt) -> Option<String>;

    async fn sleep(&self, ms: u32);

    /// Milliseconds since the epoch.
    fn now_ms(&self) -> f64;

    /// Show a resource to the user (e.g. in a new tab).
    fn open_resource(&self, url: &str);
}

/// What a load request ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched; carries the number of items kept.
    Loaded(usize),
    /// The range was already fetched.
    Skipped,
    /// Another load was in flight.
    Busy,
    /// Navigation target equals the current path.
    Unchanged,
    /// The configuration changed while the request was in flight.
    Stale,
}

/// Clears `loading` on drop unless a newer generation took over.
struct LoadingGuard<'a> {
    loading: &'a Cell<bool>,
    generation: &'a Cell<u64>,
    started: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.generation.get() == self.started {
            self.loading.set(false);
        }
    }
}

/// Marks a confirm/prompt as pending for its lifetime.
struct ModalGuard<'a>(&'a Cell<bool>);

impl Drop for ModalGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Controller<A, S> {
    api: A,
    surface: S,
    config: RefCell<BrowserConfig>,
    state: RefCell<SessionState>,
    loading: Cell<bool>,
    generation: Cell<u64>,
    modal_open: Cell<bool>,
}

impl<A: CollectionApi, S: Surface> Controller<A, S> {
    pub fn new(api: A, surface: S, config: BrowserConfig) -> Self {
        api.set_api_base(&config.api_base);
        Self {
            api,
            surface,
            state: RefCell::new(SessionState::new(&config.root)),
            config: RefCell::new(config),
            loading: Cell::new(false),
            generation: Cell::new(0),
            modal_open: Cell::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> BrowserConfig {
        self.config.borrow().clone()
    }

    /// Read access to the session state. Do not hold across an await.
    pub fn state(&self) -> Ref<'_, SessionState> {
        self.state.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn current_path(&self) -> String {
        self.state.borrow().current_path.clone()
    }

    pub fn view(&self) -> BrowserView {
        view::build(&self.state.borrow(), &self.config.borrow(), self.loading.get())
    }

    fn report(&self, action: &str, err: &ApiError) {
        self.surface.notify(Notice::failure(action, err));
    }

    fn reject(&self, action: &str, err: ValidationError) -> ApiError {
        let err = ApiError::from(err);
        self.report(action, &err);
        err
    }

    fn begin_modal(&self, action: &str) -> Result<ModalGuard<'_>, ApiError> {
        if self.modal_open.replace(true) {
            return Err(self.reject(action, ValidationError::DialogOpen));
        }
        Ok(ModalGuard(&self.modal_open))
    }

    // =========================================================================
    // Loading & navigation
    // =========================================================================

    /// Load the configured root.
    pub async fn start(&self) -> Result<LoadOutcome, ApiError> {
        let root = self.config.borrow().root.clone();
        self.load_collection(&root, false).await
    }

    /// Fetch a page of `path`.
    ///
    /// A fresh load (`append == false`) resets the listing, selection,
    /// fetched ranges and the cache entry of `path`. Appending continues the
    /// current listing and skips ranges that were already fetched; an append
    /// for a path other than the current one is treated as a fresh load.
    /// Paths outside the configured root are refused.
    pub async fn load_collection(&self, path: &str, append: bool) -> Result<LoadOutcome, ApiError> {
        let path = normalize_path(path);
        let root = self.config.borrow().root.clone();
        if !is_within_root(&path, &root) {
            return Err(self.reject(
                "Loading collection",
                ValidationError::OutsideRoot { path, root },
            ));
        }
        if self.loading.get() {
            return Ok(LoadOutcome::Busy);
        }

        let page_size = self.config.borrow().page_size;
        let (path, append, start) = {
            let mut state = self.state.borrow_mut();
            let append = append && path == state.current_path;
            if append {
                (state.current_path.clone(), true, state.items.len())
            } else {
                state.reset_listing(&path);
                (state.current_path.clone(), false, 0)
            }
        };
        let token = range_token(start, start + page_size);
        if append && self.state.borrow().loaded_ranges.contains(&token) {
            return Ok(LoadOutcome::Skipped);
        }

        self.loading.set(true);
        let guard = LoadingGuard {
            loading: &self.loading,
            generation: &self.generation,
            started: self.generation.get(),
        };
        self.surface.render();

        let result = self.api.list_collection(&path, start, start + page_size).await;
        if self.generation.get() != guard.started {
            return Ok(LoadOutcome::Stale);
        }

        let root = self.config.borrow().root.clone();
        match result {
            Ok(entries) => {
                let items = normalize_listing(entries, &path, &root);
                let count = items.len();
                let now = self.surface.now_ms();
                self.state
                    .borrow_mut()
                    .record_page(items, append, token, now);
                drop(guard);
                self.surface.render();
                Ok(LoadOutcome::Loaded(count))
            }
            Err(err) => {
                self.state
                    .borrow_mut()
                    .record_failure(err.to_string(), append);
                drop(guard);
                self.report("Loading collection", &err);
                self.surface.render();
                Err(err)
            }
        }
    }

    /// Fetch the next page of the current path.
    pub async fn load_more(&self) -> Result<LoadOutcome, ApiError> {
        let current = self.current_path();
        self.load_collection(&current, true).await
    }

    /// Drop the cached listing of the current path and load it again.
    pub async fn refresh(&self) -> Result<LoadOutcome, ApiError> {
        let current = self.current_path();
        self.state.borrow_mut().invalidate(&current);
        self.load_collection(&current, false).await
    }

    /// Fresh load of the path that is current at call time, not one captured
    /// before an await.
    async fn reload_current(&self) -> Result<LoadOutcome, ApiError> {
        let current = self.current_path();
        self.load_collection(&current, false).await
    }

    /// Navigate to `path` if it lies inside the root.
    pub async fn navigate_to(&self, path: &str) -> Result<LoadOutcome, ApiError> {
        let target = normalize_path(path);
        let root = self.config.borrow().root.clone();
        if !is_within_root(&target, &root) {
            return Err(self.reject(
                "Navigation",
                ValidationError::OutsideRoot { path: target, root },
            ));
        }
        if target == normalize_path(&self.current_path()) {
            return Ok(LoadOutcome::Unchanged);
        }
        self.load_collection(&target, false).await
    }

    pub async fn navigate_up(&self) -> Result<LoadOutcome, ApiError> {
        let parent = parent_path(&self.current_path());
        self.navigate_to(&parent).await
    }

    /// Open a listed item: enter collections, hand resources to the surface.
    pub async fn open(&self, path: &str) -> Result<(), ApiError> {
        let item = self.state.borrow().find_item(path).cloned();
        match item {
            Some(item) if item.is_collection() => {
                self.navigate_to(&item.path).await?;
            }
            Some(item) => {
                let url = resource_url(&self.config.borrow().api_base, &item.path);
                self.surface.open_resource(&url);
            }
            None => {}
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Apply a click on `path`.
    ///
    /// Plain click replaces the selection, Ctrl/Cmd toggles membership and
    /// Shift adds while keeping the rest. The parent entry is not selectable.
    pub fn toggle_selection(&self, path: &str, modifiers: Modifiers) {
        {
            let mut state = self.state.borrow_mut();
            let is_parent = match state.find_item(path) {
                Some(item) => item.is_parent(),
                None => return,
            };
            if is_parent {
                return;
            }
            if modifiers.ctrl || modifiers.meta {
                state.toggle(path);
            } else if modifiers.shift {
                state.add_to_selection(path);
            } else {
                state.select_only(path);
            }
        }
        self.surface.render();
    }

    /// Right click: keep a selection that already contains `path`, else
    /// select just `path`.
    pub fn select_for_context(&self, path: &str) {
        if self.state.borrow().is_selected(path) {
            return;
        }
        self.toggle_selection(path, Modifiers::default());
    }

    pub fn select_all(&self) {
        self.state.borrow_mut().select_all();
        self.surface.render();
    }

    pub fn clear_selection(&self) {
        self.state.borrow_mut().clear_selection();
        self.surface.render();
    }

    /// Paths carried by a drag starting on `path`: the whole selection if
    /// `path` is part of it, else `path` alone.
    pub fn drag_payload(&self, path: &str) -> Vec<String> {
        let state = self.state.borrow();
        if state.is_selected(path) {
            state.selected_paths()
        } else {
            vec![path.to_string()]
        }
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    pub fn perform_copy(&self) -> usize {
        self.fill_clipboard(ClipboardMode::Copy)
    }

    pub fn perform_cut(&self) -> usize {
        self.fill_clipboard(ClipboardMode::Cut)
    }

    fn fill_clipboard(&self, mode: ClipboardMode) -> usize {
        let summary = {
            let mut state = self.state.borrow_mut();
            let selected: Vec<Item> = state.selected_items().into_iter().cloned().collect();
            if selected.is_empty() {
                None
            } else {
                match mode {
                    ClipboardMode::Copy => state.clipboard.copy(&selected),
                    ClipboardMode::Cut => state.clipboard.cut(&selected),
                }
                state.clipboard.summary().map(|s| (selected.len(), s))
            }
        };
        match summary {
            Some((count, text)) => {
                self.surface.notify(Notice::info(text));
                self.surface.render();
                count
            }
            None => {
                self.surface.notify(Notice::warning("Nothing selected"));
                0
            }
        }
    }

    /// Paste the clipboard into the current path.
    ///
    /// Copies or moves depending on the clipboard mode. One successful
    /// paste consumes the clipboard in either mode.
    pub async fn perform_paste(&self) -> Result<(), ApiError> {
        let (sources, mode, target) = {
            let state = self.state.borrow();
            (
                state.clipboard.paths(),
                state.clipboard.mode(),
                state.current_path.clone(),
            )
        };
        if sources.is_empty() {
            return Err(self.reject("Paste", ValidationError::EmptyClipboard));
        }

        let result = match mode {
            ClipboardMode::Copy => self.api.copy_items(&sources, &target, &target).await,
            ClipboardMode::Cut => self.api.move_items(&sources, &target, &target).await,
        };
        if let Err(err) = result {
            self.report("Paste", &err);
            return Err(err);
        }

        {
            let mut state = self.state.borrow_mut();
            state.invalidate(&target);
            if mode == ClipboardMode::Cut {
                state.invalidate(&source_collection(&sources, &target));
            }
            state.clipboard.clear();
        }
        self.surface
            .notify(Notice::success(format!("Pasted {} item(s)", sources.len())));
        self.reload_current().await?;
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Delete the selection after confirmation. `Ok(false)` if cancelled.
    pub async fn perform_delete(&self) -> Result<bool, ApiError> {
        let (paths, names, collection) = {
            let state = self.state.borrow();
            let selected = state.selected_items();
            (
                selected.iter().map(|i| i.path.clone()).collect::<Vec<_>>(),
                selected.iter().map(|i| i.name.clone()).collect::<Vec<_>>(),
                state.current_path.clone(),
            )
        };
        if paths.is_empty() {
            return Err(self.reject("Delete", ValidationError::EmptySelection));
        }

        let message = match names.as_slice() {
            [name] => format!("Delete '{}'?", name),
            _ => format!("Delete {} items?", names.len()),
        };
        let confirmed = {
            let _modal = self.begin_modal("Delete")?;
            self.surface.confirm(&message).await
        };
        if !confirmed {
            return Ok(false);
        }

        if let Err(err) = self.api.delete_items(&collection, &paths).await {
            self.report("Delete", &err);
            return Err(err);
        }

        {
            let mut state = self.state.borrow_mut();
            state.clear_selection();
            state.invalidate(&collection);
        }
        self.surface
            .notify(Notice::success(format!("Deleted {} item(s)", paths.len())));
        self.reload_current().await?;
        Ok(true)
    }

    /// Rename the single selected item. `Ok(false)` if cancelled or unchanged.
    pub async fn perform_rename(&self) -> Result<bool, ApiError> {
        let selected: Vec<Item> = self
            .state
            .borrow()
            .selected_items()
            .into_iter()
            .cloned()
            .collect();
        let [item] = selected.as_slice() else {
            return Err(self.reject("Rename", ValidationError::RenameNeedsSingle));
        };

        let answer = {
            let _modal = self.begin_modal("Rename")?;
            self.surface
                .prompt(Prompt {
                    message: format!("Rename '{}' to:", item.name),
                    default: item.name.clone(),
                    masked: false,
                })
                .await
        };
        let new_name = answer.map(|n| n.trim().to_string()).unwrap_or_default();
        if new_name.is_empty() || new_name == item.name {
            return Ok(false);
        }

        if let Err(err) = self.api.rename_item(&item.path, &new_name).await {
            self.report("Rename", &err);
            return Err(err);
        }

        let current = self.current_path();
        self.state.borrow_mut().invalidate(&current);
        self.surface.notify(Notice::success(format!(
            "Renamed '{}' to '{}'",
            item.name, new_name
        )));
        self.reload_current().await?;
        Ok(true)
    }

    /// Upload files one after another into the current path, then reload
    /// after the settle delay.
    ///
    /// Stops at the first failure; files already sent stay on the server.
    pub async fn upload_files(&self, files: Vec<A::File>) -> Result<usize, ApiError> {
        if files.is_empty() {
            return Ok(0);
        }
        let collection = self.current_path();
        self.surface
            .notify(Notice::info(format!("Uploading {} file(s)…", files.len())));

        for file in &files {
            if let Err(err) = self.api.upload_file(&collection, file).await {
                self.state.borrow_mut().invalidate(&collection);
                self.report(&format!("Upload of '{}'", file.file_name()), &err);
                return Err(err);
            }
        }

        self.state.borrow_mut().invalidate(&collection);
        self.surface
            .notify(Notice::success(format!("Uploaded {} file(s)", files.len())));

        let delay = self.config.borrow().settle_delay_ms;
        self.surface.sleep(delay).await;
        self.reload_current().await?;
        Ok(files.len())
    }

    /// Move `sources` into the collection `target` (drag and drop).
    pub async fn move_into(&self, target: &str, sources: Vec<String>) -> Result<(), ApiError> {
        let target = normalize_path(target);
        let root = self.config.borrow().root.clone();
        if sources.is_empty() {
            return Err(self.reject("Move", ValidationError::EmptySelection));
        }
        if !is_within_root(&target, &root) {
            return Err(self.reject(
                "Move",
                ValidationError::OutsideRoot { path: target, root },
            ));
        }
        if let Some(source) = sources.iter().find(|s| is_within_root(&target, s)) {
            return Err(self.reject("Move", ValidationError::MoveIntoSelf(source.clone())));
        }

        let current = self.current_path();
        if let Err(err) = self.api.move_items(&sources, &target, &current).await {
            self.report("Move", &err);
            return Err(err);
        }

        {
            let mut state = self.state.borrow_mut();
            state.invalidate(&target);
            state.invalidate(&current);
        }
        self.surface.notify(Notice::success(format!(
            "Moved {} item(s) to {}",
            sources.len(),
            target
        )));
        self.reload_current().await?;
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Ask for credentials and log in. `Ok(false)` if cancelled.
    pub async fn perform_login(&self) -> Result<bool, ApiError> {
        let (user, password) = {
            let _modal = self.begin_modal("Login")?;
            let user = self
                .surface
                .prompt(Prompt {
                    message: "User name".to_string(),
                    default: String::new(),
                    masked: false,
                })
                .await
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty());
            let Some(user) = user else {
                return Ok(false);
            };
            let password = self
                .surface
                .prompt(Prompt {
                    message: format!("Password for {}", user),
                    default: String::new(),
                    masked: true,
                })
                .await;
            let Some(password) = password else {
                return Ok(false);
            };
            (user, password)
        };
        self.login(&user, &password).await?;
        Ok(true)
    }

    /// Log in and reload the current listing with the new session.
    pub async fn login(&self, user: &str, password: &str) -> Result<(), ApiError> {
        match self.api.login(user, password).await {
            Ok(result) => {
                let name = result.user.unwrap_or_else(|| user.to_string());
                self.surface
                    .notify(Notice::success(format!("Logged in as {}", name)));
                self.refresh().await?;
                Ok(())
            }
            Err(err) => {
                self.report("Login", &err);
                Err(err)
            }
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    fn bump_generation(&self) {
        self.generation.set(self.generation.get() + 1);
        self.loading.set(false);
    }

    /// Switch to a new root: all loaded and cached state is dropped (the
    /// clipboard is kept) and the new root is fetched.
    pub async fn set_root(&self, root: &str) -> Result<LoadOutcome, ApiError> {
        let root = normalize_path(root);
        if self.config.borrow().root == root {
            return Ok(LoadOutcome::Unchanged);
        }
        self.config.borrow_mut().root = root.clone();
        self.bump_generation();
        {
            let mut state = self.state.borrow_mut();
            let clipboard = std::mem::take(&mut state.clipboard);
            *state = SessionState::new(&root);
            state.clipboard = clipboard;
        }
        self.load_collection(&root, false).await
    }

    /// Point at another server and reload the current path from it.
    pub async fn set_api_base(&self, api_base: &str) -> Result<LoadOutcome, ApiError> {
        let api_base = normalize_base(api_base);
        if self.config.borrow().api_base == api_base {
            return Ok(LoadOutcome::Unchanged);
        }
        self.api.set_api_base(&api_base);
        self.config.borrow_mut().api_base = api_base;
        self.bump_generation();
        let current = self.current_path();
        self.state.borrow_mut().invalidate(&current);
        self.load_collection(&current, false).await
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    pub fn shortcuts_active(&self, has_focus: bool) -> bool {
        keymap::shortcuts_active(has_focus, self.state.borrow().selected.len())
    }

    /// Run a keyboard action.
    pub async fn dispatch(&self, action: KeyAction) -> Result<(), ApiError> {
        match action {
            KeyAction::Copy => {
                self.perform_copy();
            }
            KeyAction::Cut => {
                self.perform_cut();
            }
            KeyAction::Paste => self.perform_paste().await?,
            KeyAction::Delete => {
                self.perform_delete().await?;
            }
            KeyAction::Rename => {
                self.perform_rename().await?;
            }
            KeyAction::SelectAll => self.select_all(),
            KeyAction::ClearSelection => self.clear_selection(),
            KeyAction::Open => {
                let selected = self.state.borrow().selected_paths();
                if let [path] = selected.as_slice() {
                    self.open(path).await?;
                }
            }
        }
        Ok(())
    }
}

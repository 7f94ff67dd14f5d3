//! The application store.
//!
//! Holds the current [`AppState`] snapshot, applies actions through the
//! [`RootReducer`], runs [`Thunk`]s against the injected API ports and
//! notifies subscribers after every state change.

pub mod lifecycle;
pub mod mvi;
mod thunk;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::Utc;
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::api::{ApiClients, MaterialQuery};
use crate::config::Config;
use crate::entities::{DownloadItem, Material};
use crate::slices::auth::AuthAction;
use crate::slices::banners::BannersAction;
use crate::slices::categories::CategoriesAction;
use crate::slices::downloads::DownloadsAction;
use crate::slices::materials::MaterialsAction;
use crate::slices::theme::{ThemeAction, ThemeMode};
use crate::slices::{AppAction, AppState, RootReducer};

use lifecycle::RequestId;
use mvi::Reducer;
use thunk::Settlement;

pub use thunk::{Fence, Thunk, ThunkError};

/// Callback run after every dispatch with the new state.
pub type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Cloneable handle to one shared store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    api: ApiClients,
    config: Config,
    state: RwLock<Arc<AppState>>,
    /// Serializes reduce + notify. Reentrant so listeners may dispatch.
    dispatch_lock: ReentrantMutex<()>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    watch_tx: watch::Sender<Arc<AppState>>,
    next_request: AtomicU64,
    next_subscription: AtomicU64,
    /// Newest superseding request per fence key.
    latest: Mutex<HashMap<&'static str, RequestId>>,
    tasks: Mutex<Vec<AbortHandle>>,
    closed: AtomicBool,
}

impl Store {
    pub fn new(api: ApiClients, config: &Config) -> Self {
        let state = Arc::new(AppState::new(config));
        let (watch_tx, _) = watch::channel(state.clone());
        Self {
            inner: Arc::new(StoreInner {
                api,
                config: config.clone(),
                state: RwLock::new(state),
                dispatch_lock: ReentrantMutex::new(()),
                listeners: Mutex::new(Vec::new()),
                watch_tx,
                next_request: AtomicU64::new(0),
                next_subscription: AtomicU64::new(0),
                latest: Mutex::new(HashMap::new()),
                tasks: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Current snapshot. Cheap: the tree is shared, not copied.
    pub fn get_state(&self) -> Arc<AppState> {
        self.inner.state.read().clone()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Apply a synchronous action and notify subscribers.
    pub fn dispatch(&self, action: impl Into<AppAction>) {
        let action = action.into();
        let _guard = self.inner.dispatch_lock.lock();
        if self.is_shut_down() {
            debug!(slice = action.slice(), "Dispatch after shutdown ignored");
            return;
        }

        let next = {
            let mut slot = self.inner.state.write();
            let current = std::mem::take(&mut *slot);
            let next = Arc::new(RootReducer::reduce(Arc::unwrap_or_clone(current), action));
            *slot = next.clone();
            next
        };
        self.notify(next);
    }

    /// Issue an async command.
    ///
    /// `Pending` is applied before this returns. The API call runs on a
    /// spawned task, so the request settles even if the handle is dropped.
    /// Must be called from within a tokio runtime.
    pub fn dispatch_thunk(&self, thunk: Thunk) -> ThunkHandle {
        let operation = thunk.operation();
        if self.is_shut_down() {
            debug!(operation, "Thunk after shutdown ignored");
            return ThunkHandle {
                operation,
                task: None,
            };
        }

        let request = self.issue(&thunk);
        let store = self.clone();
        let task = tokio::spawn(async move {
            let fence = thunk.fence();
            let settlement = thunk.execute(&store.inner.api, request).await;
            store.settle(operation, request, fence, settlement)
        });

        let mut tasks = self.inner.tasks.lock();
        tasks.retain(|handle| !handle.is_finished());
        tasks.push(task.abort_handle());

        ThunkHandle {
            operation,
            task: Some(task),
        }
    }

    /// Fire and forget. Rejections end up in the slice and in the log.
    pub fn spawn(&self, thunk: Thunk) {
        drop(self.dispatch_thunk(thunk));
    }

    pub fn subscribe(&self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Receiver that always holds the latest snapshot.
    pub fn watch(&self) -> watch::Receiver<Arc<AppState>> {
        self.inner.watch_tx.subscribe()
    }

    /// Abort in-flight thunks and drop subscribers. Later dispatches are
    /// ignored. Idempotent.
    ///
    /// Waits for a dispatch already in progress, listeners included, to
    /// finish. Safe to call from a listener.
    pub fn shutdown(&self) {
        let _guard = self.inner.dispatch_lock.lock();
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let tasks = std::mem::take(&mut *self.inner.tasks.lock());
        let mut aborted = 0;
        for task in tasks.iter().filter(|task| !task.is_finished()) {
            task.abort();
            aborted += 1;
        }
        self.inner.listeners.lock().clear();
        info!(aborted, "Store shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::Login {
            email: email.into(),
            password: password.into(),
        })
    }

    pub fn register(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> ThunkHandle {
        self.dispatch_thunk(Thunk::Register {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        })
    }

    pub fn sign_out(&self) {
        self.dispatch(AuthAction::SignOut);
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub fn fetch_categories(&self) -> ThunkHandle {
        self.dispatch_thunk(Thunk::FetchCategories)
    }

    pub fn refresh_categories(&self) -> ThunkHandle {
        self.dispatch_thunk(Thunk::RefreshCategories)
    }

    pub fn search_categories(&self, query: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::SearchCategories(query.into()))
    }

    /// Local override until the next fetch. Nothing is sent to the server.
    pub fn update_category_count(&self, id: impl Into<String>, count: u32) {
        self.dispatch(CategoriesAction::UpdateCount {
            id: id.into(),
            count,
        });
    }

    // ========================================================================
    // Materials
    // ========================================================================

    pub fn fetch_materials(&self, query: MaterialQuery) -> ThunkHandle {
        self.dispatch_thunk(Thunk::FetchMaterials(query))
    }

    /// Next page of the current list, or `None` when the server reported
    /// no more.
    pub fn load_more_materials(&self) -> Option<ThunkHandle> {
        let query = self.get_state().materials.next_page_query()?;
        Some(self.fetch_materials(query))
    }

    pub fn fetch_material(&self, id: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::FetchMaterial(id.into()))
    }

    /// Record `query` as the search text and search with the current filters.
    pub fn search_materials(&self, query: impl Into<String>) -> ThunkHandle {
        let query = query.into();
        self.dispatch(MaterialsAction::SetSearchQuery(query.clone()));
        let filters = self.get_state().materials.filters.clone();
        self.dispatch_thunk(Thunk::SearchMaterials { query, filters })
    }

    /// Point the detail view at data the caller already holds. An entry
    /// already in the store is kept as the fresher copy.
    pub fn set_current_material(&self, material: Option<Material>) {
        self.dispatch(MaterialsAction::SetCurrentMaterial(material));
    }

    pub fn fetch_recent_materials(&self) -> ThunkHandle {
        let limit = self.inner.config.materials.recent_limit;
        self.dispatch_thunk(Thunk::FetchRecentMaterials(limit))
    }

    pub fn fetch_popular_materials(&self) -> ThunkHandle {
        let limit = self.inner.config.materials.popular_limit;
        self.dispatch_thunk(Thunk::FetchPopularMaterials(limit))
    }

    pub fn fetch_bookmarked_materials(&self) -> ThunkHandle {
        self.dispatch_thunk(Thunk::FetchBookmarkedMaterials)
    }

    pub fn toggle_bookmark(&self, id: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::ToggleBookmark(id.into()))
    }

    /// Progress above 100 is sent as 100.
    pub fn update_progress(&self, id: impl Into<String>, progress: u8) -> ThunkHandle {
        self.dispatch_thunk(Thunk::UpdateProgress {
            id: id.into(),
            progress: progress.min(100),
        })
    }

    pub fn increment_views(&self, id: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::IncrementViews(id.into()))
    }

    // ========================================================================
    // Banners
    // ========================================================================

    pub fn fetch_banners(&self) -> ThunkHandle {
        self.dispatch_thunk(Thunk::FetchBanners)
    }

    pub fn track_banner_impression(&self, id: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::TrackBannerImpression(id.into()))
    }

    pub fn track_banner_click(&self, id: impl Into<String>) -> ThunkHandle {
        self.dispatch_thunk(Thunk::TrackBannerClick(id.into()))
    }

    /// Re-evaluate banner date windows against the wall clock.
    pub fn update_active_banners(&self) {
        self.dispatch(BannersAction::UpdateActive { now: Utc::now() });
    }

    // ========================================================================
    // Theme and downloads
    // ========================================================================

    pub fn set_theme_mode(&self, mode: ThemeMode) {
        self.dispatch(ThemeAction::SetMode(mode));
    }

    pub fn toggle_theme(&self) {
        self.dispatch(ThemeAction::Toggle);
    }

    pub fn add_download(&self, item: DownloadItem) {
        self.dispatch(DownloadsAction::Add(item));
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Allocate a request id and apply its `Pending` action.
    fn issue(&self, thunk: &Thunk) -> RequestId {
        let _guard = self.inner.dispatch_lock.lock();
        let request = RequestId::new(self.inner.next_request.fetch_add(1, Ordering::Relaxed) + 1);
        if let Some(fence) = thunk.fence().filter(|fence| fence.supersedes) {
            self.inner
                .latest
                .lock()
                .entry(fence.key)
                .and_modify(|latest| *latest = (*latest).max(request))
                .or_insert(request);
        }
        info!(operation = thunk.operation(), request = request.get(), "Thunk issued");
        self.dispatch(thunk.pending(request));
        request
    }

    fn settle(
        &self,
        operation: &'static str,
        request: RequestId,
        fence: Option<Fence>,
        settlement: Settlement,
    ) -> Result<(), ThunkError> {
        let _guard = self.inner.dispatch_lock.lock();
        if self.is_shut_down() {
            debug!(operation, request = request.get(), "Settlement after shutdown ignored");
            return Err(ThunkError::ShutDown { operation });
        }
        if self.is_stale(fence, request) {
            info!(operation, request = request.get(), "Dropping stale response");
            return Err(ThunkError::Superseded { operation });
        }

        let Settlement { action, rejection } = settlement;
        self.dispatch(action);
        match rejection {
            Some(reason) => {
                warn!(operation, request = request.get(), %reason, "Thunk rejected");
                Err(ThunkError::Rejected { operation, reason })
            }
            None => {
                debug!(operation, request = request.get(), "Thunk fulfilled");
                Ok(())
            }
        }
    }

    fn is_stale(&self, fence: Option<Fence>, request: RequestId) -> bool {
        if !self.inner.config.store.fence_stale_responses {
            return false;
        }
        fence
            .and_then(|fence| self.inner.latest.lock().get(fence.key).copied())
            .is_some_and(|latest| latest > request)
    }

    /// The watch channel is updated first so that a listener which
    /// dispatches again cannot leave it holding an older snapshot.
    fn notify(&self, state: Arc<AppState>) {
        self.inner.watch_tx.send_replace(state.clone());
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&state);
        }
    }
}

/// Awaitable outcome of a dispatched thunk.
///
/// Dropping it does not cancel the request.
pub struct ThunkHandle {
    operation: &'static str,
    task: Option<JoinHandle<Result<(), ThunkError>>>,
}

impl ThunkHandle {
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Future for ThunkHandle {
    type Output = Result<(), ThunkError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let operation = self.operation;
        let Some(task) = self.task.as_mut() else {
            return Poll::Ready(Err(ThunkError::ShutDown { operation }));
        };
        Pin::new(task).poll(cx).map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(ThunkError::ShutDown { operation }),
        })
    }
}

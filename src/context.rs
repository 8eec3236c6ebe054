//! Monitor Context
//!
//! Built once per page and shared by `Rc` with every handler. Owns the
//! polling handle and the animation registry, so tearing down is a single
//! [`MonitorContext::stop`].

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::animation::Animator;
use crate::config::MonitorConfig;
use crate::error::MonitorResult;
use crate::extensions::{Extension, ExtensionRegistry};
use crate::refresh::{fetch_plan, RefreshState, Refresher, StatsSource};
use crate::stats::{StatKey, StatUpdate, StatsView};
use crate::timing::SharedScheduler;

/// Runs a future to completion on the local executor
pub type Spawner = Rc<dyn Fn(Pin<Box<dyn Future<Output = ()>>>)>;

/// Page-specific setup performed by [`MonitorContext::init`]
pub trait PageSetup {
    /// Attach event listeners
    fn wire_events(&self, ctx: &Rc<MonitorContext>) -> MonitorResult<()>;

    /// Tooltips, dialogs and other third-party widgets
    fn init_widgets(&self, ctx: &Rc<MonitorContext>) -> MonitorResult<()>;

    /// Path of the current document
    fn current_path(&self) -> String;
}

pub struct MonitorContext {
    config: MonitorConfig,
    scheduler: SharedScheduler,
    refresher: Refresher,
    animator: Animator<StatKey>,
    extensions: RefCell<ExtensionRegistry>,
    source: Rc<dyn StatsSource>,
    view: Rc<dyn StatsView>,
    spawner: Spawner,
    initialized: Cell<bool>,
}

impl MonitorContext {
    pub fn new(
        config: MonitorConfig,
        scheduler: SharedScheduler,
        source: Rc<dyn StatsSource>,
        view: Rc<dyn StatsView>,
        spawner: Spawner,
    ) -> Rc<Self> {
        let refresher = Refresher::new(
            Rc::clone(&scheduler),
            config.refresh_interval_ms,
            config.dashboard_path.clone(),
        );
        let animator = Animator::new(
            Rc::clone(&scheduler),
            config.animation_duration_ms,
            config.animation_frame_ms,
        );

        Rc::new(Self {
            config,
            scheduler,
            refresher,
            animator,
            extensions: RefCell::new(ExtensionRegistry::with_placeholders()),
            source,
            view,
            spawner,
            initialized: Cell::new(false),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &SharedScheduler {
        &self.scheduler
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresher.state()
    }

    pub fn animator(&self) -> &Animator<StatKey> {
        &self.animator
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Replace the extension for the same capability. Only effective before `init`.
    pub fn register_extension(&self, extension: Box<dyn Extension>) {
        self.extensions.borrow_mut().register(extension);
    }

    /// Run the page setup once: events, widgets, extensions, then polling.
    ///
    /// Returns `false` if the context was already initialized.
    pub fn init(self: &Rc<Self>, page: &dyn PageSetup) -> bool {
        if self.initialized.replace(true) {
            tracing::debug!("monitor already initialized");
            return false;
        }

        if let Err(e) = page.wire_events(self) {
            tracing::warn!(error = %e, "event wiring incomplete");
        }
        if let Err(e) = page.init_widgets(self) {
            tracing::warn!(error = %e, "widget initialization incomplete");
        }
        self.extensions.borrow().initialize_all();

        let path = page.current_path();
        self.start_auto_refresh(&path);

        tracing::info!("Escola Clima Monitor initialized");
        true
    }

    /// Fetch the latest snapshot and animate changed counters
    pub async fn refresh(&self) {
        let plan = fetch_plan(self.source.as_ref(), self.view.as_ref()).await;
        self.apply(&plan);
    }

    /// Animate each planned counter into the view
    pub fn apply(&self, plan: &[StatUpdate]) {
        for update in plan {
            let key = update.key;
            let view = Rc::clone(&self.view);
            self.animator.animate(key, update.from, update.to, move |value| {
                view.set_stat_text(key, &value.to_string());
            });
        }
    }

    /// Start a refresh without waiting for it
    pub fn refresh_in_background(self: &Rc<Self>) {
        let ctx = Rc::clone(self);
        (self.spawner)(Box::pin(async move { ctx.refresh().await }));
    }

    /// Begin polling if `path` is the dashboard route
    pub fn start_auto_refresh(self: &Rc<Self>, path: &str) -> RefreshState {
        let weak = Rc::downgrade(self);
        self.refresher.start(path, move || {
            if let Some(ctx) = weak.upgrade() {
                ctx.refresh_in_background();
            }
        })
    }

    /// Tab visibility changed; a visible tab refreshes right away on any page
    pub fn on_visibility_change(self: &Rc<Self>, hidden: bool) {
        if hidden {
            tracing::debug!("page hidden");
            return;
        }
        tracing::debug!(polling = ?self.refresher.state(), "page visible, refreshing stats");
        self.refresh_in_background();
    }

    /// Stop polling and any running animations
    pub fn stop(&self) {
        self.refresher.stop();
        self.animator.cancel_all();
    }
}

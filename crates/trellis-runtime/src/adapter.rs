#![forbid(unsafe_code)]

//! Background reload pipeline.
//!
//! [`ReloadAdapter`] turns sections of layout nodes into sections of
//! arrangements for a [`ReloadableSurface`], without blocking the thread
//! that owns the surface.
//!
//! # Threads
//!
//! - The **foreground** thread owns the adapter and the surface. It starts
//!   reloads and drives delivery with [`ReloadAdapter::pump`] and friends.
//! - One **worker** thread runs the provider and measures/arranges each item.
//!   At most one reload is live; starting another cancels it.
//!
//! # Incremental delivery
//!
//! When a reload starts with an empty snapshot, the worker hands every
//! finished item to the foreground (a *hop*) and waits for the answer. The
//! foreground publishes the partial snapshot unless the surface is tracking
//! or decelerating, in which case the insert stays buffered and goes out with
//! a later hop. When the snapshot already has content, only the final result
//! is published, as one full swap.
//!
//! # Example
//!
//! ```ignore
//! let mut adapter = ReloadAdapter::new(surface, AdapterConfig::default())?;
//! adapter.reload(
//!     ReloadOptions::default().width(320.0),
//!     || vec![Section::new(rows())],
//!     || println!("done"),
//! );
//! adapter.pump_until_idle(Duration::from_secs(1))?;
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::mpsc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, trace, warn};
use trellis_core::{Axis, Point, Size};
use trellis_layout::{Arrangement, LayoutNode};

use crate::cancel::{CancelToken, CancelTrigger};
use crate::error::PipelineError;
use crate::section::{IndexPath, Section};
use crate::surface::ReloadableSurface;
use crate::worker::LayoutWorker;

/// Arranged sections as published to the surface.
pub type Snapshot = Vec<Section<Arrangement>>;

/// How long `pump_until_idle` blocks before re-checking the worker.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Adapter construction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Identifier passed to [`ReloadableSurface::register_views`].
    pub reuse_id: String,
    /// Name of the worker thread.
    pub worker_name: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            reuse_id: "ReloadAdapter".to_owned(),
            worker_name: "trellis-layout".to_owned(),
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn reuse_id(mut self, reuse_id: impl Into<String>) -> Self {
        self.reuse_id = reuse_id.into();
        self
    }

    #[must_use]
    pub fn worker_name(mut self, worker_name: impl Into<String>) -> Self {
        self.worker_name = worker_name.into();
        self
    }
}

/// Parameters of one reload.
///
/// Only the dimension perpendicular to the surface's scroll axis constrains
/// items: width for vertical surfaces, height for horizontal ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReloadOptions {
    pub width: f64,
    pub height: f64,
    /// Compute on the calling thread and publish once.
    pub synchronous: bool,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self {
            width: f64::MAX,
            height: f64::MAX,
            synchronous: false,
        }
    }
}

impl ReloadOptions {
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }
}

/// Lifecycle of the most recent reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Nothing has been loaded yet.
    #[default]
    Idle,
    /// A background reload is in flight.
    Computing,
    /// The last reload published its final snapshot.
    Completed,
    /// The last reload was cancelled and nothing replaced it.
    Cancelled,
    /// The worker died before the last reload finished. The next reload
    /// starts a fresh worker.
    Failed,
}

/// Per-item layout function for one reload.
#[derive(Debug, Clone, Copy)]
struct ItemLayout {
    axis: Axis,
    width: f64,
    height: f64,
}

impl ItemLayout {
    fn arrange(&self, node: LayoutNode) -> Arrangement {
        match self.axis {
            Axis::Vertical => node.arrangement_within(Point::ZERO, Some(self.width), None),
            Axis::Horizontal => node.arrangement_within(Point::ZERO, None, Some(self.height)),
        }
    }

    fn arrange_section(&self, section: Section<LayoutNode>) -> Section<Arrangement> {
        section.map(|node| self.arrange(node))
    }
}

/// Worker-to-foreground hand-off.
enum Hop {
    /// One more item is ready. The worker blocks until `reply` says whether
    /// the buffered inserts went out.
    Partial {
        generation: u64,
        snapshot: Snapshot,
        inserts: Vec<IndexPath>,
        reply: mpsc::SyncSender<bool>,
    },
    /// Everything is computed.
    Final {
        generation: u64,
        snapshot: Snapshot,
        inserts: Vec<IndexPath>,
        incremental: bool,
    },
}

impl Hop {
    fn generation(&self) -> u64 {
        match self {
            Self::Partial { generation, .. } | Self::Final { generation, .. } => *generation,
        }
    }
}

struct InFlight {
    generation: u64,
    trigger: CancelTrigger,
    completion: Option<Box<dyn FnOnce()>>,
    started: Instant,
    foreground: Duration,
}

/// Feeds a [`ReloadableSurface`] from a background layout worker.
///
/// The adapter is not `Send`: completion callbacks run on the thread that
/// created it, and so does every surface call. Reloading or pumping from any
/// other thread panics.
pub struct ReloadAdapter<S: ReloadableSurface> {
    owner: ThreadId,
    surface: S,
    config: AdapterConfig,
    snapshot: Snapshot,
    state: PipelineState,
    worker: LayoutWorker,
    hop_sender: mpsc::Sender<Hop>,
    hops: mpsc::Receiver<Hop>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl<S: ReloadableSurface> ReloadAdapter<S> {
    /// Register views on `surface` and start the worker thread.
    pub fn new(mut surface: S, config: AdapterConfig) -> Result<Self, PipelineError> {
        surface.register_views(&config.reuse_id);
        let worker = LayoutWorker::spawn(&config.worker_name)?;
        let (hop_sender, hops) = mpsc::channel();
        Ok(Self {
            owner: thread::current().id(),
            surface,
            config,
            snapshot: Vec::new(),
            state: PipelineState::Idle,
            worker,
            hop_sender,
            hops,
            generation: 0,
            in_flight: None,
        })
    }

    /// Recompute the surface's content.
    ///
    /// Any in-flight reload is cancelled first. If both dimensions are
    /// non-positive nothing else happens. Otherwise `provider` runs on the
    /// calling thread (`synchronous`) or the worker, and `completion` runs on
    /// this thread once the final snapshot is published. A cancelled reload
    /// never calls its completion.
    pub fn reload<P, C>(&mut self, options: ReloadOptions, provider: P, completion: C)
    where
        P: FnOnce() -> Vec<Section<LayoutNode>> + Send + 'static,
        C: FnOnce() + 'static,
    {
        self.assert_owner("reload");
        self.cancel_in_flight();

        if options.width <= 0.0 && options.height <= 0.0 {
            debug!(
                width = options.width,
                height = options.height,
                "reload skipped: no room"
            );
            return;
        }

        let layout = ItemLayout {
            axis: self.surface.scroll_axis(),
            width: options.width,
            height: options.height,
        };

        if options.synchronous {
            self.reload_synchronously(layout, provider, completion);
        } else {
            self.reload_asynchronously(layout, provider, Box::new(completion));
        }
    }

    /// Publish an already computed snapshot.
    ///
    /// Cancels any in-flight reload, replaces the snapshot and asks the
    /// surface for a full reload. Nothing is measured.
    pub fn reload_arrangement(&mut self, snapshot: Snapshot) {
        self.assert_owner("reload_arrangement");
        self.cancel_in_flight();
        self.snapshot = snapshot;
        self.surface.reload_data_sync();
        self.state = PipelineState::Completed;
        debug!(sections = self.snapshot.len(), "precomputed snapshot published");
    }

    fn reload_synchronously<P, C>(&mut self, layout: ItemLayout, provider: P, completion: C)
    where
        P: FnOnce() -> Vec<Section<LayoutNode>>,
        C: FnOnce(),
    {
        let started = Instant::now();
        self.snapshot = provider()
            .into_iter()
            .map(|section| layout.arrange_section(section))
            .collect();
        self.surface.reload_data_sync();
        self.state = PipelineState::Completed;
        info!(
            total_ms = millis(started.elapsed()),
            sections = self.snapshot.len(),
            "synchronous reload finished"
        );
        completion();
    }

    fn reload_asynchronously<P>(
        &mut self,
        layout: ItemLayout,
        provider: P,
        completion: Box<dyn FnOnce()>,
    ) where
        P: FnOnce() -> Vec<Section<LayoutNode>> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let incremental = self.snapshot.is_empty();
        let (token, trigger) = CancelToken::new();
        let hops = self.hop_sender.clone();

        self.in_flight = Some(InFlight {
            generation,
            trigger,
            completion: Some(completion),
            started: Instant::now(),
            foreground: Duration::ZERO,
        });
        self.state = PipelineState::Computing;

        if !self.worker.is_alive() {
            match LayoutWorker::spawn(&self.config.worker_name) {
                Ok(worker) => {
                    warn!(generation, "layout worker died, respawned");
                    self.worker = worker;
                }
                Err(err) => {
                    self.abandon_in_flight(&err);
                    return;
                }
            }
        }

        let job = Box::new(move || {
            compute(generation, layout, provider, incremental, &token, &hops);
        });
        if let Err(err) = self.worker.submit(job) {
            self.abandon_in_flight(&err);
            return;
        }
        debug!(generation, incremental, "reload queued");
        crate::debug_trace!("reload queued: generation={} incremental={}", generation, incremental);
    }

    /// Handle every hop already waiting, without blocking.
    ///
    /// Returns the number of hops handled. If the worker has died with a
    /// reload in flight, that reload ends in [`PipelineState::Failed`].
    pub fn pump(&mut self) -> usize {
        self.assert_owner("pump");
        let handled = self.drain_hops();
        self.reap_dead_worker();
        handled
    }

    /// Wait up to `timeout` for a single hop and handle it.
    ///
    /// Returns `false` if none arrived in time.
    pub fn pump_one(&mut self, timeout: Duration) -> bool {
        self.assert_owner("pump_one");
        match self.hops.recv_timeout(timeout) {
            Ok(hop) => {
                self.handle_hop(hop);
                true
            }
            Err(_) => false,
        }
    }

    /// Handle hops until no reload is in flight.
    ///
    /// A worker that dies on the way ends the reload in
    /// [`PipelineState::Failed`] and yields
    /// [`PipelineError::WorkerDisconnected`].
    pub fn pump_until_idle(&mut self, timeout: Duration) -> Result<(), PipelineError> {
        self.assert_owner("pump_until_idle");
        let deadline = Instant::now() + timeout;
        while let Some(generation) = self.in_flight.as_ref().map(|f| f.generation) {
            let now = Instant::now();
            if now >= deadline {
                return Err(PipelineError::Timeout {
                    waited: timeout,
                    generation,
                });
            }
            match self.hops.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
                Ok(hop) => self.handle_hop(hop),
                Err(_) => {
                    if self.reap_dead_worker() {
                        return Err(PipelineError::WorkerDisconnected);
                    }
                }
            }
        }
        Ok(())
    }

    fn drain_hops(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(hop) = self.hops.try_recv() {
            self.handle_hop(hop);
            handled += 1;
        }
        handled
    }

    /// Fail the in-flight reload if the worker is gone.
    ///
    /// Hops the worker sent before dying are handled first. Returns whether a
    /// reload was failed.
    fn reap_dead_worker(&mut self) -> bool {
        if self.in_flight.is_none() || self.worker.is_alive() {
            return false;
        }
        self.drain_hops();
        if self.in_flight.is_none() {
            return false;
        }
        self.abandon_in_flight(&PipelineError::WorkerDisconnected);
        true
    }

    /// End the in-flight reload without publishing or calling its completion.
    fn abandon_in_flight(&mut self, err: &PipelineError) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.trigger.cancel();
            self.state = PipelineState::Failed;
            error!(%err, generation = in_flight.generation, "reload failed");
            crate::debug_trace!("reload failed: generation={}", in_flight.generation);
        }
    }

    fn assert_owner(&self, operation: &str) {
        assert_eq!(
            thread::current().id(),
            self.owner,
            "ReloadAdapter::{operation} called off the thread that created the adapter"
        );
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.trigger.cancel();
            self.state = PipelineState::Cancelled;
            debug!(generation = in_flight.generation, "reload cancelled");
            crate::debug_trace!("reload cancelled: generation={}", in_flight.generation);
        }
        // Unblock a worker waiting on a stale hop.
        self.drain_hops();
    }

    fn is_current(&self, generation: u64) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation && !f.trigger.is_cancelled())
    }

    fn surface_is_moving(&self) -> bool {
        self.surface.is_tracking() || self.surface.is_decelerating()
    }

    fn handle_hop(&mut self, hop: Hop) {
        let generation = hop.generation();
        if !self.is_current(generation) {
            trace!(generation, "stale hop discarded");
            if let Hop::Partial { reply, .. } = hop {
                let _ = reply.send(false);
            }
            return;
        }

        let started = Instant::now();
        match hop {
            Hop::Partial {
                snapshot,
                inserts,
                reply,
                ..
            } => {
                let published = if self.surface_is_moving() {
                    trace!(generation, pending = inserts.len(), "surface moving, inserts withheld");
                    false
                } else {
                    self.update(snapshot, &inserts, true);
                    true
                };
                let _ = reply.send(published);
                if let Some(in_flight) = self.in_flight.as_mut() {
                    in_flight.foreground += started.elapsed();
                }
            }
            Hop::Final {
                snapshot,
                inserts,
                incremental,
                ..
            } => {
                self.update(snapshot, &inserts, incremental);
                self.state = PipelineState::Completed;
                if let Some(in_flight) = self.in_flight.take() {
                    let foreground = in_flight.foreground + started.elapsed();
                    info!(
                        generation,
                        total_ms = millis(in_flight.started.elapsed()),
                        foreground_ms = millis(foreground),
                        sections = self.snapshot.len(),
                        "reload finished"
                    );
                    crate::debug_trace!("reload finished: generation={}", generation);
                    if let Some(completion) = in_flight.completion {
                        completion();
                    }
                }
            }
        }
    }

    /// Replace the snapshot and tell the surface what changed.
    ///
    /// First content and non-incremental publishes reload everything.
    /// Otherwise inserts into sections the surface already knows go out as
    /// item inserts, and every section beyond the previous count goes out as
    /// a section insert.
    fn update(&mut self, snapshot: Snapshot, inserts: &[IndexPath], incremental: bool) {
        let was_empty = self.snapshot.is_empty();
        let previous_sections = self.snapshot.len();
        self.snapshot = snapshot;

        if was_empty || !incremental {
            self.surface.reload_data_sync();
            return;
        }

        let mut new_sections: BTreeSet<usize> = (previous_sections..self.snapshot.len()).collect();
        let mut items = Vec::new();
        for &path in inserts {
            if path.section >= previous_sections {
                new_sections.insert(path.section);
            } else {
                items.push(path);
            }
        }

        if !items.is_empty() {
            self.surface.insert_items(&items);
        }
        if !new_sections.is_empty() {
            let sections: Vec<usize> = new_sections.into_iter().collect();
            self.surface.insert_sections(&sections);
        }
    }

    // --- Data source ------------------------------------------------------

    pub fn number_of_sections(&self) -> usize {
        self.snapshot.len()
    }

    /// Items in `section`, or zero if it does not exist.
    pub fn number_of_items(&self, section: usize) -> usize {
        self.snapshot.get(section).map_or(0, Section::len)
    }

    pub fn item_arrangement(&self, path: IndexPath) -> Option<&Arrangement> {
        self.snapshot.get(path.section)?.items.get(path.item)
    }

    /// Cell size for the item at `path`.
    pub fn item_size(&self, path: IndexPath) -> Option<Size> {
        self.item_arrangement(path).map(|a| a.frame.size())
    }

    pub fn header_size(&self, section: usize) -> Option<Size> {
        let header = self.snapshot.get(section)?.header.as_ref()?;
        Some(header.frame.size())
    }

    pub fn footer_size(&self, section: usize) -> Option<Size> {
        let footer = self.snapshot.get(section)?.footer.as_ref()?;
        Some(footer.frame.size())
    }

    /// The published snapshot.
    pub fn snapshot(&self) -> &[Section<Arrangement>] {
        &self.snapshot
    }

    /// No reload is in flight.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: ReloadableSurface> Drop for ReloadAdapter<S> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.trigger.cancel();
        }
    }
}

impl<S: ReloadableSurface> fmt::Debug for ReloadAdapter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadAdapter")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("sections", &self.snapshot.len())
            .finish_non_exhaustive()
    }
}

/// Worker side of an asynchronous reload.
fn compute<P>(
    generation: u64,
    layout: ItemLayout,
    provider: P,
    incremental: bool,
    token: &CancelToken,
    hops: &mpsc::Sender<Hop>,
) where
    P: FnOnce() -> Vec<Section<LayoutNode>>,
{
    if token.is_cancelled() {
        return;
    }

    let mut pending: Snapshot = Vec::new();
    let mut pending_inserts: Vec<IndexPath> = Vec::new();

    for (section_index, section) in provider().into_iter().enumerate() {
        let header = section.header.map(|node| layout.arrange(node));
        let footer = section.footer.map(|node| layout.arrange(node));
        let mut items = Vec::with_capacity(section.items.len());

        for (item_index, node) in section.items.into_iter().enumerate() {
            if token.is_cancelled() {
                crate::debug_trace!("reload aborted: generation={}", generation);
                return;
            }
            items.push(layout.arrange(node));

            if !incremental {
                continue;
            }

            pending_inserts.push(IndexPath::new(section_index, item_index));
            let mut partial = pending.clone();
            partial.push(Section {
                header: header.clone(),
                items: items.clone(),
                footer: footer.clone(),
            });

            let (reply, published) = mpsc::sync_channel(1);
            let hop = Hop::Partial {
                generation,
                snapshot: partial,
                inserts: pending_inserts.clone(),
                reply,
            };
            if hops.send(hop).is_err() {
                return;
            }
            match published.recv() {
                Ok(true) => pending_inserts.clear(),
                Ok(false) => {}
                Err(_) => return,
            }
        }

        pending.push(Section {
            header,
            items,
            footer,
        });
    }

    if token.is_cancelled() {
        return;
    }
    let _ = hops.send(Hop::Final {
        generation,
        snapshot: pending,
        inserts: pending_inserts,
        incremental,
    });
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCall};
    use std::cell::Cell;
    use std::rc::Rc;
    use trellis_core::Rect;
    use trellis_layout::SizeLayout;

    const WAIT: Duration = Duration::from_secs(5);

    fn row(height: f64) -> LayoutNode {
        LayoutNode::new(SizeLayout::new().height(height))
    }

    /// Sections with the given item counts; item `i` is `10 + i` tall.
    fn sections(counts: &[usize]) -> Vec<Section<LayoutNode>> {
        counts
            .iter()
            .map(|&count| Section::new((0..count).map(|i| row(10.0 + i as f64))))
            .collect()
    }

    fn failing_provider() -> Vec<Section<LayoutNode>> {
        panic!("provider failed")
    }

    fn adapter() -> ReloadAdapter<RecordingSurface> {
        let surface = RecordingSurface::new(Rect::new(0.0, 0.0, 320.0, 480.0));
        ReloadAdapter::new(surface, AdapterConfig::default().reuse_id("cell")).unwrap()
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    fn options() -> ReloadOptions {
        ReloadOptions::default().width(320.0)
    }

    fn calls_after_register(adapter: &mut ReloadAdapter<RecordingSurface>) -> Vec<SurfaceCall> {
        let mut calls = adapter.surface_mut().take_calls();
        if calls.first() == Some(&SurfaceCall::RegisterViews("cell".into())) {
            calls.remove(0);
        }
        calls
    }

    #[test]
    fn new_registers_views() {
        let adapter = adapter();
        assert_eq!(
            adapter.surface().calls(),
            &[SurfaceCall::RegisterViews("cell".into())]
        );
        assert_eq!(adapter.state(), PipelineState::Idle);
        assert!(adapter.is_idle());
    }

    #[test]
    fn synchronous_reload_publishes_once() {
        let mut adapter = adapter();
        let (count, done) = counter();
        adapter.reload(options().synchronous(true), || sections(&[2, 1]), done);

        assert_eq!(count.get(), 1);
        assert_eq!(adapter.state(), PipelineState::Completed);
        assert_eq!(adapter.number_of_sections(), 2);
        assert_eq!(adapter.number_of_items(0), 2);
        assert_eq!(adapter.number_of_items(1), 1);
        assert_eq!(adapter.number_of_items(9), 0);
        assert_eq!(adapter.item_size(IndexPath::new(0, 1)), Some(Size::new(320.0, 11.0)));
        assert_eq!(calls_after_register(&mut adapter), vec![SurfaceCall::ReloadData]);
    }

    #[test]
    fn first_load_publishes_item_by_item() {
        let mut adapter = adapter();
        let (count, done) = counter();
        adapter.reload(options(), || sections(&[2, 1]), done);
        assert_eq!(adapter.state(), PipelineState::Computing);

        adapter.pump_until_idle(WAIT).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(adapter.state(), PipelineState::Completed);
        assert_eq!(
            calls_after_register(&mut adapter),
            vec![
                SurfaceCall::ReloadData,
                SurfaceCall::InsertItems(vec![IndexPath::new(0, 1)]),
                SurfaceCall::InsertSections(vec![1]),
            ]
        );
        assert_eq!(adapter.number_of_items(0), 2);
        assert_eq!(adapter.number_of_items(1), 1);
    }

    #[test]
    fn interaction_withholds_inserts_until_surface_settles() {
        let mut adapter = adapter();
        let (count, done) = counter();
        adapter.reload(options(), || sections(&[3]), done);

        assert!(adapter.pump_one(WAIT));
        assert_eq!(adapter.number_of_items(0), 1);

        adapter.surface_mut().set_tracking(true);
        assert!(adapter.pump_one(WAIT));
        assert_eq!(adapter.number_of_items(0), 1);

        adapter.surface_mut().set_tracking(false);
        adapter.surface_mut().set_decelerating(true);
        assert!(adapter.pump_one(WAIT));
        assert_eq!(adapter.number_of_items(0), 1);

        adapter.surface_mut().set_decelerating(false);
        adapter.pump_until_idle(WAIT).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(adapter.number_of_items(0), 3);
        assert_eq!(
            calls_after_register(&mut adapter),
            vec![
                SurfaceCall::ReloadData,
                SurfaceCall::InsertItems(vec![IndexPath::new(0, 1), IndexPath::new(0, 2)]),
            ]
        );
    }

    #[test]
    fn second_reload_supersedes_first() {
        let mut adapter = adapter();
        let (release, gate) = mpsc::channel::<()>();
        let (first, first_done) = counter();
        adapter.reload(
            options(),
            move || {
                let _ = gate.recv();
                sections(&[4])
            },
            first_done,
        );

        let (second, second_done) = counter();
        adapter.reload(options(), || sections(&[1, 1]), second_done);
        let _ = release.send(());
        adapter.pump_until_idle(WAIT).unwrap();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(adapter.number_of_sections(), 2);
        assert_eq!(adapter.number_of_items(0), 1);
        assert_eq!(
            calls_after_register(&mut adapter),
            vec![SurfaceCall::ReloadData, SurfaceCall::InsertSections(vec![1])]
        );
    }

    #[test]
    fn reload_over_content_swaps_once() {
        let mut adapter = adapter();
        adapter.reload(options().synchronous(true), || sections(&[1]), || {});
        adapter.surface_mut().take_calls();

        let (count, done) = counter();
        adapter.reload(options(), || sections(&[3, 2]), done);
        adapter.pump_until_idle(WAIT).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(adapter.surface().calls(), &[SurfaceCall::ReloadData]);
        assert_eq!(adapter.number_of_items(0), 3);
        assert_eq!(adapter.number_of_items(1), 2);
    }

    #[test]
    fn precomputed_snapshot_cancels_and_replaces() {
        let mut adapter = adapter();
        let (release, gate) = mpsc::channel::<()>();
        let (count, done) = counter();
        adapter.reload(
            options(),
            move || {
                let _ = gate.recv();
                sections(&[2])
            },
            done,
        );

        let arrangement = row(7.0).arrangement_within(Point::ZERO, Some(100.0), None);
        adapter.reload_arrangement(vec![Section::new([arrangement])]);
        let _ = release.send(());

        assert!(adapter.is_idle());
        adapter.pump_until_idle(WAIT).unwrap();
        assert_eq!(count.get(), 0);
        assert_eq!(adapter.state(), PipelineState::Completed);
        assert_eq!(adapter.item_size(IndexPath::new(0, 0)), Some(Size::new(100.0, 7.0)));
        assert_eq!(calls_after_register(&mut adapter), vec![SurfaceCall::ReloadData]);
    }

    #[test]
    fn zero_size_reload_only_cancels() {
        let mut adapter = adapter();
        let (release, gate) = mpsc::channel::<()>();
        let (first, first_done) = counter();
        adapter.reload(
            options(),
            move || {
                let _ = gate.recv();
                sections(&[2])
            },
            first_done,
        );

        let (second, second_done) = counter();
        adapter.reload(
            ReloadOptions::default().width(0.0).height(0.0),
            || sections(&[1]),
            second_done,
        );
        let _ = release.send(());

        assert_eq!(adapter.state(), PipelineState::Cancelled);
        assert!(adapter.is_idle());
        adapter.pump_until_idle(WAIT).unwrap();
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 0);
        assert_eq!(adapter.number_of_sections(), 0);
    }

    #[test]
    fn headers_and_footers_are_arranged() {
        let mut adapter = adapter();
        adapter.reload(
            options().synchronous(true),
            || vec![Section::new([row(10.0)]).header(row(20.0)).footer(row(5.0))],
            || {},
        );
        assert_eq!(adapter.header_size(0), Some(Size::new(320.0, 20.0)));
        assert_eq!(adapter.footer_size(0), Some(Size::new(320.0, 5.0)));
        assert_eq!(adapter.header_size(1), None);
    }

    #[test]
    fn horizontal_surface_constrains_height() {
        let surface =
            RecordingSurface::new(Rect::new(0.0, 0.0, 320.0, 200.0)).scroll_axis(Axis::Horizontal);
        let mut adapter = ReloadAdapter::new(surface, AdapterConfig::default()).unwrap();
        adapter.reload(
            ReloadOptions::default().height(200.0).synchronous(true),
            || vec![Section::new([LayoutNode::new(SizeLayout::new().width(60.0))])],
            || {},
        );
        assert_eq!(adapter.item_size(IndexPath::new(0, 0)), Some(Size::new(60.0, 200.0)));
    }

    #[test]
    fn pump_until_idle_times_out_while_provider_blocks() {
        let mut adapter = adapter();
        let (release, gate) = mpsc::channel::<()>();
        adapter.reload(
            options(),
            move || {
                let _ = gate.recv();
                sections(&[1])
            },
            || {},
        );

        let err = adapter.pump_until_idle(Duration::from_millis(20)).unwrap_err();
        assert!(matches!(err, PipelineError::Timeout { generation: 1, .. }));

        release.send(()).unwrap();
        adapter.pump_until_idle(WAIT).unwrap();
        assert_eq!(adapter.number_of_items(0), 1);
    }

    #[test]
    fn panicking_provider_disconnects_worker() {
        let mut adapter = adapter();
        let (count, done) = counter();
        adapter.reload(options(), failing_provider, done);

        let err = adapter.pump_until_idle(WAIT).unwrap_err();
        assert!(matches!(err, PipelineError::WorkerDisconnected));
        assert_eq!(adapter.state(), PipelineState::Failed);
        assert!(adapter.is_idle());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn reload_after_worker_death_respawns_worker() {
        let mut adapter = adapter();
        adapter.reload(options(), failing_provider, || {});
        adapter.pump_until_idle(WAIT).unwrap_err();

        let (count, done) = counter();
        adapter.reload(options(), || sections(&[2]), done);
        assert_eq!(adapter.state(), PipelineState::Computing);
        adapter.pump_until_idle(WAIT).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(adapter.state(), PipelineState::Completed);
        assert_eq!(adapter.number_of_items(0), 2);
    }

    #[test]
    fn reload_without_pumping_after_worker_death_recovers() {
        let mut adapter = adapter();
        adapter.reload(options(), failing_provider, || {});
        let deadline = Instant::now() + WAIT;
        while adapter.worker.is_alive() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!adapter.worker.is_alive());

        let (count, done) = counter();
        adapter.reload(options(), || sections(&[1]), done);
        adapter.pump_until_idle(WAIT).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(adapter.number_of_items(0), 1);
    }

    #[test]
    fn pump_fails_reload_of_dead_worker() {
        let mut adapter = adapter();
        adapter.reload(options(), failing_provider, || {});
        let deadline = Instant::now() + WAIT;
        while adapter.worker.is_alive() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(adapter.pump(), 0);
        assert_eq!(adapter.state(), PipelineState::Failed);
        assert!(adapter.is_idle());
    }

    #[test]
    fn pump_without_work_handles_nothing() {
        let mut adapter = adapter();
        assert_eq!(adapter.pump(), 0);
        assert!(!adapter.pump_one(Duration::from_millis(1)));
        adapter.pump_until_idle(Duration::ZERO).unwrap();
    }
}

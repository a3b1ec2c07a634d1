//! 演示编排模块：脚本演示与实时生成两种模式。
//!
//! # Session Module
//!
//! Drives the playground in one of two mutually exclusive modes:
//!
//! - **Scripted**: type [`script::DEMO_PROMPT`] character by character, then
//!   reveal the recorded patch lines on a timer.
//! - **Live**: post a user prompt to the generation endpoint and apply the
//!   streamed patches as they arrive.
//!
//! All state lives in one event loop ([`Playground::run`]). Timer and stream
//! tasks only send events, tagged with the generation they belong to; events
//! from a run that is no longer current are dropped, so two streams never
//! write to the same tree.
//!
//! ```text
//!  PlaygroundHandle ──commands──┐
//!  script task ──Typed/Revealed─┼──► mpsc ──► Playground::run ──► ArcSwap<Snapshot>
//!  live task ──LivePatch/Finish─┘                                    │
//!                                                                 watch (revision)
//! ```

pub mod cancel;
mod live;
pub mod script;

pub use cancel::CancelHandle;

use crate::config::PlaygroundConfig;
use crate::pipeline::apply_patch;
use crate::transport::{truncate_prompt, GenerationClient};
use crate::types::{Patch, UiTree};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Scripted,
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Scripted prompt is being typed.
    Typing,
    /// Patches are arriving.
    Streaming,
    Done,
}

/// Immutable view of the playground published after every state change.
#[derive(Debug, Clone)]
pub struct PlaygroundSnapshot {
    pub mode: Mode,
    pub phase: Phase,
    /// Prompt text (typed so far, for the scripted demo).
    pub prompt: String,
    pub tree: Arc<UiTree>,
    pub loading: bool,
    /// Last genuine failure. Cancellation never shows up here.
    pub error: Option<String>,
    /// Id of the current run; bumps on every demo start or submit.
    pub generation: u64,
    pub patches_applied: usize,
}

impl PlaygroundSnapshot {
    fn initial() -> Self {
        Self {
            mode: Mode::Scripted,
            phase: Phase::Idle,
            prompt: String::new(),
            tree: Arc::new(UiTree::empty()),
            loading: false,
            error: None,
            generation: 0,
            patches_applied: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }
}

#[derive(Debug)]
pub(crate) enum Event {
    StartDemo,
    Submit(String),
    Stop,
    Shutdown,
    Typed { generation: u64, ch: char },
    Revealed { generation: u64, patch: Patch },
    ScriptFinished { generation: u64 },
    LivePatch { generation: u64, patch: Patch },
    /// `Err` carries the failure message; cancelled runs never send this.
    LiveFinished {
        generation: u64,
        result: std::result::Result<(), String>,
    },
}

pub(crate) type EventSender = mpsc::UnboundedSender<Event>;

struct Shared {
    snapshot: ArcSwap<PlaygroundSnapshot>,
    revision: watch::Sender<u64>,
}

/// The single-threaded owner of playground state.
pub struct Playground {
    config: PlaygroundConfig,
    client: Arc<GenerationClient>,
    events_tx: EventSender,
    events_rx: mpsc::UnboundedReceiver<Event>,
    shared: Arc<Shared>,
    state: PlaygroundSnapshot,
    current: Option<CancelHandle>,
}

impl Playground {
    pub fn new(config: PlaygroundConfig, client: GenerationClient) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (revision, _) = watch::channel(0u64);
        let state = PlaygroundSnapshot::initial();
        let shared = Arc::new(Shared {
            snapshot: ArcSwap::from_pointee(state.clone()),
            revision,
        });
        Self {
            config,
            client: Arc::new(client),
            events_tx,
            events_rx,
            shared,
            state,
            current: None,
        }
    }

    pub fn handle(&self) -> PlaygroundHandle {
        PlaygroundHandle {
            events: self.events_tx.clone(),
            shared: self.shared.clone(),
            revision: self.shared.revision.subscribe(),
        }
    }

    /// Process events until [`PlaygroundHandle::shutdown`].
    pub async fn run(mut self) {
        while let Some(event) = self.events_rx.recv().await {
            if matches!(event, Event::Shutdown) {
                self.cancel_current();
                break;
            }
            if self.handle_event(event) {
                self.publish();
            }
        }
        debug!("playground event loop stopped");
    }

    /// Returns whether the state changed.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::StartDemo => {
                self.start_demo();
                true
            }
            Event::Submit(prompt) => self.submit(prompt),
            Event::Stop => self.stop(),
            Event::Shutdown => false,
            Event::Typed { generation, ch } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.state.prompt.push(ch);
                true
            }
            Event::Revealed { generation, patch } | Event::LivePatch { generation, patch } => {
                if !self.is_current(generation) {
                    debug!(generation, path = %patch.path, "dropping patch from stale run");
                    return false;
                }
                self.apply(&patch);
                true
            }
            Event::ScriptFinished { generation } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.finish();
                info!(generation, patches = self.state.patches_applied, "scripted demo finished");
                true
            }
            Event::LiveFinished { generation, result } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.finish();
                if let Err(message) = result {
                    self.state.error = Some(message);
                }
                true
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.current
            .as_ref()
            .map(|c| c.generation() == generation)
            .unwrap_or(false)
    }

    fn cancel_current(&mut self) {
        if let Some(run) = self.current.take() {
            debug!(generation = run.generation(), "cancelling run");
            run.cancel();
        }
    }

    /// Cancel whatever runs, then reset to an empty tree for a new run.
    fn begin_run(&mut self, mode: Mode, phase: Phase, prompt: String, loading: bool) -> CancelHandle {
        self.cancel_current();
        let generation = self.state.generation + 1;
        self.state = PlaygroundSnapshot {
            mode,
            phase,
            prompt,
            tree: Arc::new(UiTree::empty()),
            loading,
            error: None,
            generation,
            patches_applied: 0,
        };
        let run = CancelHandle::new(generation);
        self.current = Some(run.clone());
        run
    }

    fn start_demo(&mut self) {
        let run = self.begin_run(Mode::Scripted, Phase::Typing, String::new(), false);
        info!(generation = run.generation(), "starting scripted demo");
        tokio::spawn(script::run_script(
            run.generation(),
            self.config.typing_delay(),
            self.config.step_delay(),
            run,
            self.events_tx.clone(),
        ));
    }

    fn submit(&mut self, prompt: String) -> bool {
        let prompt = truncate_prompt(prompt.trim(), self.config.max_prompt_chars).to_string();
        if prompt.is_empty() {
            debug!("ignoring empty prompt");
            return false;
        }
        let run = self.begin_run(Mode::Live, Phase::Streaming, prompt.clone(), true);
        tokio::spawn(live::run_live(
            self.client.clone(),
            prompt,
            run.generation(),
            run,
            self.events_tx.clone(),
        ));
        true
    }

    /// Abandon the current run. The tree built so far stays visible.
    fn stop(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.cancel_current();
        self.finish();
        info!(generation = self.state.generation, "run stopped");
        true
    }

    fn apply(&mut self, patch: &Patch) {
        let next = apply_patch(&self.state.tree, patch);
        debug!(
            path = %patch.path,
            changed = ?next.changed_keys(&self.state.tree),
            "applied patch"
        );
        self.state.tree = Arc::new(next);
        self.state.patches_applied += 1;
        if self.state.phase == Phase::Typing {
            self.state.phase = Phase::Streaming;
        }
    }

    fn finish(&mut self) {
        self.current = None;
        self.state.loading = false;
        self.state.phase = Phase::Done;
    }

    fn publish(&self) {
        self.shared.snapshot.store(Arc::new(self.state.clone()));
        self.shared.revision.send_modify(|rev| *rev += 1);
    }
}

/// Cloneable front door to a running [`Playground`].
#[derive(Clone)]
pub struct PlaygroundHandle {
    events: EventSender,
    shared: Arc<Shared>,
    revision: watch::Receiver<u64>,
}

impl PlaygroundHandle {
    pub fn start_demo(&self) {
        let _ = self.events.send(Event::StartDemo);
    }

    /// Start a live run. Any in-flight run is cancelled first.
    pub fn submit(&self, prompt: impl Into<String>) {
        let _ = self.events.send(Event::Submit(prompt.into()));
    }

    pub fn stop(&self) {
        let _ = self.events.send(Event::Stop);
    }

    pub fn shutdown(&self) {
        let _ = self.events.send(Event::Shutdown);
    }

    pub fn snapshot(&self) -> Arc<PlaygroundSnapshot> {
        self.shared.snapshot.load_full()
    }

    /// Wait for the next published snapshot. `None` once the loop has stopped.
    pub async fn changed(&mut self) -> Option<Arc<PlaygroundSnapshot>> {
        self.revision.changed().await.ok()?;
        Some(self.snapshot())
    }

    /// Wait until a snapshot satisfies `pred`, or the loop stops.
    pub async fn wait_for<F>(&mut self, pred: F) -> Arc<PlaygroundSnapshot>
    where
        F: Fn(&PlaygroundSnapshot) -> bool,
    {
        loop {
            let snap = self.snapshot();
            if pred(&snap) {
                return snap;
            }
            if self.changed().await.is_none() {
                return self.snapshot();
            }
        }
    }
}

//! Animation sequencer
//!
//! The orchestration layer behind the builders: a chain of animation
//! groups stored in a node arena, each node owning its compiled playback
//! and at most one predecessor and successor link. Starting any node walks
//! to the head of the chain so playback order is always left to right;
//! completing a node severs the successor's back-link and starts it.
//!
//! Node lifecycle:
//!
//! ```text
//! Configuring -> Compiled -> Playing -> Completed
//!                   |           |
//!                   +-----------+--> Cancelled
//! ```
//!
//! Transitions are checked against the state tag, never inferred from
//! link nullability. All link mutation happens on completion callbacks or
//! explicit `cancel()`, on the UI-bound thread that drives the scheduler.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, Mutex};

use crate::easing::Easing;
use crate::error::{Result, SequenceError};
use crate::playback::{GroupTiming, Playback, RepeatMode, DEFAULT_DURATION_MS};
use crate::scheduler::{PlaybackId, SchedulerHandle, SubscriptionId};
use crate::target::SharedTarget;
use crate::track::PropertyTrack;

new_key_type! {
    /// Handle to a node in a sequencer chain
    pub struct NodeId;
}

/// Group lifecycle callback (start / stop)
pub type LifecycleFn = Box<dyn FnMut() + Send>;

/// State tag of a sequencer node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// Accepting builder calls
    Configuring,
    /// Playback handle built; begin deferred (layout gate or predecessor)
    Compiled,
    Playing,
    Completed,
    Cancelled,
}

/// One target set's accumulated tracks within a node
pub(crate) struct TargetGroup {
    pub targets: SmallVec<[SharedTarget; 4]>,
    pub tracks: Vec<PropertyTrack>,
    /// Applied per track at compile time, overriding the group easing
    /// for this builder's tracks only
    pub single_easing: Option<Easing>,
    /// Defer begin until one render pass has happened after start()
    pub wait_for_layout: bool,
}

impl TargetGroup {
    pub(crate) fn new(targets: SmallVec<[SharedTarget; 4]>) -> Self {
        Self {
            targets,
            tracks: Vec::new(),
            single_easing: None,
            wait_for_layout: false,
        }
    }
}

/// A sequencer node: one animation group plus its chain links
pub(crate) struct Node {
    pub groups: Vec<TargetGroup>,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub repeat_count: i32,
    pub repeat_mode: RepeatMode,
    pub easing: Option<Easing>,
    pub on_start: Option<LifecycleFn>,
    pub on_stop: Option<LifecycleFn>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub state: NodeState,
    pub playback: Option<PlaybackId>,
    pub pending_gate: Option<SubscriptionId>,
}

impl Node {
    fn new(first_group: TargetGroup) -> Self {
        Self {
            groups: vec![first_group],
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0,
            repeat_count: 0,
            repeat_mode: RepeatMode::Restart,
            easing: None,
            on_start: None,
            on_stop: None,
            prev: None,
            next: None,
            state: NodeState::Configuring,
            playback: None,
            pending_gate: None,
        }
    }
}

pub(crate) struct ChainInner {
    pub nodes: SlotMap<NodeId, Node>,
    pub scheduler: SchedulerHandle,
}

/// Shared chain arena
///
/// Builders, sequence handles, and scheduler callbacks all hold clones.
#[derive(Clone)]
pub(crate) struct Chain {
    inner: Arc<Mutex<ChainInner>>,
}

impl Chain {
    pub(crate) fn new(scheduler: SchedulerHandle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChainInner {
                nodes: SlotMap::with_key(),
                scheduler,
            })),
        }
    }

    /// Create the chain's first node, or a detached node
    pub(crate) fn add_node(&self, first_group: TargetGroup) -> NodeId {
        self.inner.lock().unwrap().nodes.insert(Node::new(first_group))
    }

    /// Append a brand-new successor node after `prev`
    pub(crate) fn add_linked_node(&self, prev: NodeId, first_group: TargetGroup) -> NodeId {
        let mut inner = self.inner.lock().unwrap();
        let mut node = Node::new(first_group);
        node.prev = Some(prev);
        let id = inner.nodes.insert(node);
        inner.nodes[prev].next = Some(id);
        id
    }

    /// Add another target set's group to an existing node
    pub(crate) fn add_group(&self, node: NodeId, group: TargetGroup) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let groups = &mut inner.nodes[node].groups;
        groups.push(group);
        groups.len() - 1
    }

    /// Mutate node configuration or a group under the chain lock
    pub(crate) fn with_node<F, R>(&self, node: NodeId, f: F) -> R
    where
        F: FnOnce(&mut Node) -> R,
    {
        f(&mut self.inner.lock().unwrap().nodes[node])
    }

    pub(crate) fn scheduler(&self) -> SchedulerHandle {
        self.inner.lock().unwrap().scheduler.clone()
    }

    /// Current state tag of a node
    pub(crate) fn node_state(&self, node: NodeId) -> NodeState {
        self.inner.lock().unwrap().nodes[node].state
    }

    pub(crate) fn node_playback(&self, node: NodeId) -> Option<PlaybackId> {
        self.inner.lock().unwrap().nodes[node].playback
    }

    /// Start the chain containing `node`
    ///
    /// Walks to the head first: whichever node's `start()` the caller
    /// invokes, playback begins at the head so ordering stays strictly
    /// left to right. Returns the head's id.
    pub(crate) fn start_from(&self, node: NodeId) -> Result<NodeId> {
        let head = {
            let inner = self.inner.lock().unwrap();
            let mut cur = node;
            while let Some(prev) = inner.nodes[cur].prev {
                cur = prev;
            }
            cur
        };
        self.compile_and_start(head)?;
        Ok(head)
    }

    /// Compile a node's groups into one playback handle and begin it,
    /// deferring behind the layout gate if the node asked for one
    fn compile_and_start(&self, id: NodeId) -> Result<()> {
        let (scheduler, gated) = {
            let mut inner = self.inner.lock().unwrap();
            let scheduler = inner.scheduler.clone();
            let node = &mut inner.nodes[id];

            match node.state {
                NodeState::Configuring | NodeState::Completed => {}
                NodeState::Compiled | NodeState::Playing => {
                    tracing::warn!(?id, "start() rejected: node already in flight");
                    return Err(SequenceError::AlreadyPlaying);
                }
                NodeState::Cancelled => {
                    tracing::warn!(?id, "start() rejected: node was cancelled");
                    return Err(SequenceError::Cancelled);
                }
            }

            let mut tracks = Vec::new();
            let mut gate_target: Option<SharedTarget> = None;
            for group in &node.groups {
                if group.wait_for_layout && gate_target.is_none() {
                    gate_target = group.targets.first().cloned();
                }
                for track in &group.tracks {
                    let mut track = track.clone();
                    if track.easing.is_none() {
                        track.easing = group.single_easing;
                    }
                    tracks.push(track);
                }
            }

            let timing = GroupTiming {
                duration_ms: node.duration_ms,
                delay_ms: node.delay_ms,
                repeat_count: node.repeat_count,
                repeat_mode: node.repeat_mode,
                easing: node.easing.unwrap_or_default(),
            };
            tracing::debug!(
                ?id,
                tracks = tracks.len(),
                duration_ms = timing.duration_ms,
                gated = gate_target.is_some(),
                "compiling node"
            );

            let chain = self.clone();
            let playback = Playback::new(tracks, timing);
            let playback_id = scheduler
                .register_playback(playback, Some(Box::new(move || chain.on_node_complete(id))))
                .ok_or(SequenceError::SchedulerGone)?;

            node.playback = Some(playback_id);
            node.state = NodeState::Compiled;
            (scheduler, gate_target.is_some())
        };

        if gated {
            let chain = self.clone();
            let sub = scheduler
                .subscribe_predraw(Box::new(move || chain.begin_node(id)))
                .ok_or(SequenceError::SchedulerGone)?;
            self.inner.lock().unwrap().nodes[id].pending_gate = Some(sub);
        } else {
            self.begin_node(id);
        }
        Ok(())
    }

    /// Transition a compiled node to Playing and fire its start callback
    fn begin_node(&self, id: NodeId) {
        let (scheduler, playback, on_start) = {
            let mut inner = self.inner.lock().unwrap();
            let scheduler = inner.scheduler.clone();
            let node = &mut inner.nodes[id];
            if node.state != NodeState::Compiled {
                // Cancelled while waiting on the layout gate
                return;
            }
            node.pending_gate = None;
            node.state = NodeState::Playing;
            (scheduler, node.playback, node.on_start.take())
        };

        if let Some(playback) = playback {
            scheduler.begin_playback(playback);
        }
        tracing::debug!(?id, "node playing");

        // Callback runs with the chain lock released; it may configure or
        // start other sequences
        if let Some(mut on_start) = on_start {
            on_start();
            self.inner.lock().unwrap().nodes[id].on_start = Some(on_start);
        }
    }

    /// Completion protocol: stop callback first, then unconditionally
    /// sever the successor's back-link and start it
    fn on_node_complete(&self, id: NodeId) {
        let (scheduler, playback, on_stop, next) = {
            let mut inner = self.inner.lock().unwrap();
            let scheduler = inner.scheduler.clone();
            let node = &mut inner.nodes[id];
            node.state = NodeState::Completed;
            let playback = node.playback.take();
            let next = node.next;
            let on_stop = node.on_stop.take();
            if let Some(next) = next {
                inner.nodes[next].prev = None;
            }
            (scheduler, playback, on_stop, next)
        };

        if let Some(playback) = playback {
            scheduler.remove_playback(playback);
        }
        tracing::debug!(?id, chained = next.is_some(), "node completed");

        if let Some(mut on_stop) = on_stop {
            on_stop();
            self.inner.lock().unwrap().nodes[id].on_stop = Some(on_stop);
        }

        if let Some(next) = next {
            // A cancelled successor refuses to start; that ends the chain
            if let Err(err) = self.compile_and_start(next) {
                tracing::warn!(?next, %err, "successor did not start");
            }
        }
    }

    /// Cancel `node` and everything after it
    ///
    /// Predecessors and already-completed nodes are untouched. Cancelled
    /// in-flight handles are discarded before their completion callback
    /// can fire, so nothing queued after them continues.
    pub(crate) fn cancel_from(&self, node: NodeId) {
        let (scheduler, playbacks, gates) = {
            let mut inner = self.inner.lock().unwrap();
            let scheduler = inner.scheduler.clone();
            let mut playbacks = Vec::new();
            let mut gates = Vec::new();

            let mut cur = Some(node);
            while let Some(id) = cur {
                let node = &mut inner.nodes[id];
                cur = node.next.take();
                if node.state == NodeState::Completed {
                    // Terminal already; only its forward links are severed
                    continue;
                }
                node.state = NodeState::Cancelled;
                if let Some(playback) = node.playback.take() {
                    playbacks.push(playback);
                }
                if let Some(gate) = node.pending_gate.take() {
                    gates.push(gate);
                }
            }
            (scheduler, playbacks, gates)
        };

        for playback in playbacks {
            scheduler.cancel_playback(playback);
        }
        for gate in gates {
            scheduler.unsubscribe_predraw(gate);
        }
        tracing::debug!(?node, "cancelled from node");
    }
}

/// Handle to a started sequence
///
/// Returned by `start()`, referring to the chain's head node; the only
/// way to interact with a sequence once it is in flight. Dropping the
/// handle does not stop playback.
pub struct SequenceHandle {
    chain: Chain,
    node: NodeId,
}

impl SequenceHandle {
    pub(crate) fn new(chain: Chain, node: NodeId) -> Self {
        Self { chain, node }
    }

    /// State of the node this handle refers to
    pub fn state(&self) -> NodeState {
        self.chain.node_state(self.node)
    }

    /// True while this node is gated, delayed, or mid-playback
    pub fn is_active(&self) -> bool {
        matches!(self.state(), NodeState::Compiled | NodeState::Playing)
    }

    /// Stop this node and prevent every successor from starting
    pub fn cancel(&self) {
        self.chain.cancel_from(self.node);
    }

    /// Replay the chain from this node
    ///
    /// Completion severed each successor's back-link, so every node
    /// stands alone and compiles a fresh playback handle on replay.
    /// Rejected with [`SequenceError::AlreadyPlaying`] while in flight
    /// and with [`SequenceError::Cancelled`] after a cancel.
    pub fn restart(&self) -> Result<()> {
        self.chain.start_from(self.node).map(|_| ())
    }

    /// The compiled playback behind this node, while one exists
    pub fn playback(&self) -> Option<PlaybackId> {
        self.chain.node_playback(self.node)
    }
}

#![forbid(unsafe_code)]

//! Per-branch expand/collapse state machine.
//!
//! Each branch node's collapsible region moves through four states:
//!
//! ```text
//! Collapsed ──toggle──▶ Expanding ──duration──▶ Expanded
//!     ▲                                            │
//!     └────duration──── Collapsing ◀──toggle───────┘
//! ```
//!
//! `Collapsed` and `Expanded` are rest states (extent zero / natural).
//! `Expanding` glides the extent from zero to the measured content size over
//! the transition duration, then settles at the natural (`Auto`) extent so
//! layout may reflow. `Collapsing` first pins the extent at the last
//! measured size for exactly one tick — the reference implementation's
//! zero-delay defer, which gives the transition a concrete start value —
//! then glides to zero.
//!
//! All state lives in one arena keyed by [`NodePath`], and a toggle
//! *replaces* the node's single entry, restarting from the currently
//! rendered extent. There is never more than one pending transition per
//! node, so rapid re-toggles coalesce and [`CollapseController::clear`]
//! cancels everything at once (menu close, tree replacement).
//!
//! Collapsing an ancestor does not touch descendant states: descendants keep
//! their own entries and are visually clipped by the ancestor's shrinking
//! extent, which is the renderer's concern.

use std::collections::HashMap;
use std::time::Duration;

use menukit_core::motion::Glide;

use crate::action::NodePath;

/// Reference transition duration for expand/collapse.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Rendered extent of a collapsible region, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// A concrete extent; zero while collapsed, interpolated mid-transition.
    Fixed(u16),
    /// Natural content size; the region follows layout.
    Auto,
}

/// Observable lifecycle phase of a branch node's region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsePhase {
    /// At rest, zero extent.
    Collapsed,
    /// Growing toward the measured size.
    Expanding,
    /// At rest, natural extent.
    Expanded,
    /// Pinned, then shrinking toward zero.
    Collapsing,
}

#[derive(Debug, Clone)]
enum NodeState {
    Expanding(Glide),
    Expanded,
    Collapsing { glide: Glide, started: bool },
}

/// Arena of per-branch collapse state machines.
///
/// Absent entries are `Collapsed`; an entry is created on first expand and
/// removed when its collapse completes, so the arena only ever holds nodes
/// that are open or in flight.
#[derive(Debug, Clone)]
pub struct CollapseController {
    states: HashMap<NodePath, NodeState>,
    duration: Duration,
}

impl Default for CollapseController {
    fn default() -> Self {
        Self::new()
    }
}

impl CollapseController {
    /// Create a controller with the reference transition duration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            duration: DEFAULT_TRANSITION,
        }
    }

    /// Set the transition duration (builder).
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The configured transition duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Toggle the region at `path`, restarting from its current rendered
    /// extent. `measured` is the natural content size in rows, freshly
    /// measured by the caller.
    ///
    /// Returns the new target openness (the disclosure-indicator state).
    pub fn toggle(&mut self, path: &NodePath, measured: u16) -> bool {
        let next = match self.states.get(path) {
            None => NodeState::Expanding(Glide::new(0, measured, self.duration)),
            Some(NodeState::Expanding(glide)) => NodeState::Collapsing {
                glide: Glide::new(glide.position(), 0, self.duration),
                started: false,
            },
            Some(NodeState::Expanded) => NodeState::Collapsing {
                glide: Glide::new(measured, 0, self.duration),
                started: false,
            },
            Some(NodeState::Collapsing { glide, .. }) => {
                NodeState::Expanding(Glide::new(glide.position(), measured, self.duration))
            }
        };
        let opened = matches!(next, NodeState::Expanding(_));
        #[cfg(feature = "tracing")]
        tracing::trace!(?path, opened, measured, "collapse toggle");
        self.states.insert(path.clone(), next);
        opened
    }

    /// Advance every in-flight transition by `dt`.
    ///
    /// The first tick after a collapse starts only consumes the pin (the
    /// deferred step); the shrink itself runs over the following ticks.
    pub fn tick(&mut self, dt: Duration) {
        let mut settled: Vec<NodePath> = Vec::new();
        for (path, state) in &mut self.states {
            match state {
                NodeState::Expanding(glide) => {
                    glide.tick(dt);
                    if glide.is_complete() {
                        *state = NodeState::Expanded;
                    }
                }
                NodeState::Expanded => {}
                NodeState::Collapsing { glide, started } => {
                    if !*started {
                        *started = true;
                    } else {
                        glide.tick(dt);
                        if glide.is_complete() {
                            settled.push(path.clone());
                        }
                    }
                }
            }
        }
        for path in settled {
            self.states.remove(&path);
        }
    }

    /// Current rendered extent of the region at `path`.
    #[must_use]
    pub fn extent(&self, path: &NodePath) -> Extent {
        match self.states.get(path) {
            None => Extent::Fixed(0),
            Some(NodeState::Expanding(glide)) => Extent::Fixed(glide.position()),
            Some(NodeState::Expanded) => Extent::Auto,
            Some(NodeState::Collapsing { glide, .. }) => Extent::Fixed(glide.position()),
        }
    }

    /// Observable phase of the region at `path`.
    #[must_use]
    pub fn phase(&self, path: &NodePath) -> CollapsePhase {
        match self.states.get(path) {
            None => CollapsePhase::Collapsed,
            Some(NodeState::Expanding(_)) => CollapsePhase::Expanding,
            Some(NodeState::Expanded) => CollapsePhase::Expanded,
            Some(NodeState::Collapsing { .. }) => CollapsePhase::Collapsing,
        }
    }

    /// Target openness of `path` — what the disclosure icon shows.
    #[must_use]
    pub fn is_open(&self, path: &NodePath) -> bool {
        matches!(
            self.states.get(path),
            Some(NodeState::Expanding(_) | NodeState::Expanded)
        )
    }

    /// Whether the region at `path` currently occupies any rows, so its
    /// children still render (open, or mid-transition either way).
    #[must_use]
    pub fn reveals_children(&self, path: &NodePath) -> bool {
        self.extent(path) != Extent::Fixed(0)
    }

    /// Whether any region is mid-transition.
    #[must_use]
    pub fn transitioning(&self) -> bool {
        self.states.values().any(|s| {
            matches!(
                s,
                NodeState::Expanding(_) | NodeState::Collapsing { .. }
            )
        })
    }

    /// Cancel every pending transition and forget all open state.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

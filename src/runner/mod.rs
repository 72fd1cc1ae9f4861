//! Renderer adapters: one common contract, two concrete backends.
//!
//! Each adapter wraps one external rendering stack behind the same
//! mount / replace / cleanup interface so the orchestrator can drive
//! either one without knowing how it paints:
//!
//! - [`diffed`]: ratatui's terminal with an in-memory backend. Every
//!   update rebuilds the whole widget tree and `draw` diffs it against
//!   the previous frame, the virtual-DOM analog.
//! - [`reactive`]: futures-signals. State changes emit fine-grained
//!   `VecDiff` patches which the adapter sinks into a retained row
//!   store, the fine-grained-reactive analog.
//!
//! Mount returns an explicit handle exposing the state-replace
//! capability; there is no callback that assigns an external reference
//! after the fact. Both mount and replace return only once a full paint
//! has been applied (the backend flush for the diffed adapter, a drained
//! patch queue for the reactive one), so the caller's timing windows
//! capture real paint cost rather than state assignment.

pub mod diffed;
pub mod reactive;

use crate::data::Item;
use smartstring::alias::String as SmartString;

pub use diffed::DiffedRunner;
pub use reactive::ReactiveRunner;

/// Errors surfaced by a renderer adapter.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The renderer failed to expose a live state handle after mount.
    /// Fatal to the run.
    #[error("renderer failed to expose a live state handle after mount: {0}")]
    InitFailure(String),
    /// The rendering backend reported an I/O error.
    #[error("renderer backend error: {0}")]
    Backend(#[from] std::io::Error),
    /// The render root was already torn down. Benign: a second cleanup,
    /// or a cleanup after the root was detached, is expected during
    /// teardown races and is suppressed without a log line.
    #[error("render root already torn down")]
    AlreadyTornDown,
}

impl RunnerError {
    /// Whether the error is a known-benign teardown condition that the
    /// orchestrator suppresses silently.
    pub fn is_benign(&self) -> bool {
        matches!(self, RunnerError::AlreadyTornDown)
    }
}

/// Factory side of an adapter: mounts a fresh render root.
pub trait Runner {
    /// Create a fresh render root, render `items`, and wait for the
    /// first full paint. Returns the handle exposing state replacement.
    fn mount(&self, items: &[Item]) -> Result<Box<dyn RunnerHandle>, RunnerError>;
}

/// A mounted render root.
///
/// The handle never retains the collections it is handed; every call
/// passes a fresh reference and the handle only keeps its own rendered
/// output.
pub trait RunnerHandle: Send {
    /// Replace the mounted state wholesale with `items` and wait for the
    /// resulting paint to be applied.
    fn replace(&mut self, items: &[Item]) -> Result<(), RunnerError>;

    /// Destroy the render root. A second call reports
    /// [`RunnerError::AlreadyTornDown`] instead of panicking.
    fn cleanup(&mut self) -> Result<(), RunnerError>;

    /// Number of rows currently rendered.
    fn rendered_rows(&self) -> usize;
}

/// Selects one of the two concrete adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum RunnerKey {
    /// Fine-grained reactive backend (futures-signals).
    Reactive,
    /// Buffer-diffing backend (ratatui).
    Diffed,
}

impl RunnerKey {
    /// Both runners, in the default batch order.
    pub const ALL: [RunnerKey; 2] = [RunnerKey::Reactive, RunnerKey::Diffed];

    /// Short label used in status lines and spans.
    pub fn label(self) -> &'static str {
        match self {
            RunnerKey::Reactive => "reactive",
            RunnerKey::Diffed => "diffed",
        }
    }

    /// Instantiate the concrete adapter for this key.
    pub fn runner(self) -> Box<dyn Runner> {
        match self {
            RunnerKey::Reactive => Box::new(ReactiveRunner),
            RunnerKey::Diffed => Box::new(DiffedRunner),
        }
    }
}

impl std::fmt::Display for RunnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Render one item as its display row.
///
/// Both adapters go through this formatter so their paint work is
/// comparable row for row.
pub fn format_row(item: &Item) -> SmartString {
    format!("#{:>5}  {}  {}", item.id + 1, item.label, item.value).into()
}

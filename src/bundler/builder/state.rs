//! Observable pipeline state.

use std::fmt;

/// Where the pipeline is in its lifecycle.
///
/// ```text
/// Idle ──load_app──▶ AppLoaded ──generate──▶ Processing ──▶ Generated
///   ▲                    ▲                        │              │
///   └──(load fails)      └────(step fails)────────┘    update_url┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// No bundle loaded.
    #[default]
    Idle,
    /// Bundle metadata has been read.
    AppLoaded,
    /// Archiving and signing are running.
    Processing,
    /// The appcast has been written.
    Generated,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::AppLoaded => "app loaded",
            Self::Processing => "processing",
            Self::Generated => "generated",
        })
    }
}

/// Snapshot published to observers on every transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineStatus {
    /// Current state.
    pub state: PipelineState,
    /// Human-readable status line. Failures are rendered here as `Error: …`.
    pub message: String,
}

impl PipelineStatus {
    /// Whether the message reports a failure.
    pub fn is_error(&self) -> bool {
        self.message.starts_with("Error:")
    }
}

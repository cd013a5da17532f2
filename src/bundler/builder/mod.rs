//! Release orchestration and coordination.
//!
//! This module provides the [`Pipeline`] state machine that turns an
//! application bundle into a signed archive and an appcast.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Reads bundle metadata from `Info.plist`
//! 2. Resolves `ditto`, `sign_update` and the signing key
//! 3. Archives the bundle next to itself
//! 4. Signs the archive and parses the signature
//! 5. Writes `appcast.xml` next to the bundle
//!
//! # Module Organization
//!
//! - [`checksum`] - Archive size and SHA-256
//! - [`orchestrator`] - Main [`Pipeline`] struct
//! - [`state`] - Observable state and status snapshots
//! - [`tool_detection`] - External tool lookup

mod checksum;
mod orchestrator;
mod state;
mod tool_detection;

pub use checksum::{ArchiveDigest, calculate_digest};
pub use orchestrator::{GeneratedRelease, Pipeline};
pub use state::{PipelineState, PipelineStatus};
pub use tool_detection::{GENERATE_KEYS, SIGN_UPDATE, find_archiver, find_tool};

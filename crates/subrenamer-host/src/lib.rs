//! `SubRenamer` host plugin shell.
//!
//! Glue between the media server and the naming policy in `subrenamer-core`:
//! - Move-event shapes of each supported plugin ABI revision
//! - Conversion of those events into one stable rename request
//! - Plugin entry points, including a JSON boundary
//! - Logging setup for standalone use

pub mod abi;
pub mod logging;
pub mod plugin;

pub use abi::{AniDbFileInfo, HostEvent, ReleaseGroup};
pub use logging::{
    LOG_FILE_PREFIX, LogFile, LogRotation, LoggingConfig, LoggingError, LoggingGuard, init,
    init_auto,
};
pub use plugin::{PLUGIN_NAME, Renamer, RenamerPlugin};

//! `SubRenamer` Core Library
//!
//! This crate provides the naming policy for the `SubRenamer` media server plugin:
//! - Episode filenames built from identified series and episode metadata
//! - Destination folder selection among the host's import folders
//! - Destination subpaths of the form `{type}/{title} [year]`
//! - Configuration of the year and release group behavior
//!
//! The host performs the actual move; nothing in this crate touches the
//! files being renamed.
//!
//! # Error Handling
//!
//! Policy failures are [`NamingError`] values carrying a cancel flag for the
//! host. Configuration and IO failures use the crate-level [`Error`].
//!
//! ```rust,ignore
//! use subrenamer_core::{NamingResult, RenameRequest, SubRenamer};
//!
//! let result = SubRenamer::default().get_new_path(&request);
//! if let NamingResult::Failure { reason, cancel } = result {
//!     // hand back to the host
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod plan;
pub mod policy;
pub mod sanitize;

pub use config::{
    DEFAULT_MOVIE_TITLE, DEFAULT_PLACEHOLDER_YEAR, RenamerConfig, YearPolicy, config_file_path,
    default_config_directory,
};
pub use error::{Error, NamingError, Result, Subject};
pub use model::{
    DropFolderRole, EpisodeCounts, EpisodeInfo, EpisodeKind, FileInfo, ImportFolder,
    LocalizedTitle, ReleaseInfo, RenameRequest, SeriesInfo, SeriesRef, SeriesType, TitleLanguage,
};
pub use plan::{Degradation, Destination, FolderSelection, NamingResult, RenamePlan};
pub use policy::{SubRenamer, is_placeholder_title};
pub use sanitize::{pad_zeroes, remove_invalid_path_characters};

//! The naming policy.
//!
//! Files are laid out as
//!
//! ```text
//! <import folder>/<series type>/<preferred title> [year]/<number> - <title> [group].ext
//! ```
//!
//! Single-episode series drop the number and use the episode title alone.
//! Specials get the first letter of their kind in front of the number
//! (`S01`, `O02`, `T01`, ...).
//!
//! # Example
//!
//! ```rust
//! use subrenamer_core::{
//!     DropFolderRole, EpisodeInfo, EpisodeKind, ImportFolder, RenameRequest, RenamerConfig,
//!     SeriesInfo, SeriesType, SubRenamer, TitleLanguage,
//! };
//!
//! let request = RenameRequest::new("[SubsPlease] Show - 03 (1080p).mkv")
//!     .with_series(SeriesInfo::new(SeriesType::TvSeries, "Show"))
//!     .with_episode(
//!         EpisodeInfo::new(EpisodeKind::Normal, 3)
//!             .with_title(TitleLanguage::English, "Third")
//!             .with_series_episode_count(25),
//!     )
//!     .with_release_group("SubsPlease")
//!     .with_folder(ImportFolder::new(1, "Anime", "/anime", DropFolderRole::Destination));
//!
//! let renamer = SubRenamer::new(RenamerConfig::default());
//! let filename = renamer.compute_filename(&request).unwrap();
//! assert_eq!(filename, "03 - Third [SubsPlease].mkv");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{Span, debug, error, info, warn};

use crate::config::RenamerConfig;
use crate::error::{NamingError, Subject};
use crate::model::{ImportFolder, RenameRequest, SeriesInfo, SeriesType};
use crate::plan::{Degradation, Destination, FolderSelection, NamingResult, RenamePlan};
use crate::sanitize::{pad_zeroes, remove_invalid_path_characters};

/// Episode titles such as "Episode 1" that carry no information.
static PLACEHOLDER_TITLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Episode \d+").ok());

/// Whether an episode title is a generic "Episode N" placeholder.
pub fn is_placeholder_title(title: &str) -> bool {
    PLACEHOLDER_TITLE
        .as_ref()
        .is_some_and(|re| re.is_match(title))
}

/// Stateless renamer computing filenames and destinations for the host.
///
/// Holds only immutable configuration, so one instance may serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct SubRenamer {
    config: RenamerConfig,
    span: Span,
}

impl Default for SubRenamer {
    fn default() -> Self {
        Self::new(RenamerConfig::default())
    }
}

impl SubRenamer {
    /// Create a renamer with the given configuration.
    #[must_use]
    pub fn new(config: RenamerConfig) -> Self {
        Self {
            config,
            span: Span::none(),
        }
    }

    /// Emit all diagnostics inside the given span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The active configuration.
    pub const fn config(&self) -> &RenamerConfig {
        &self.config
    }

    /// Compute the new filename for the request's file.
    ///
    ///
    /// The name is sanitized after assembly, so a single-episode file whose
    /// titles are all missing or invalid and that has no extension comes
    /// back as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::NotIdentified`] when no series or no episode
    /// was matched.
    pub fn compute_filename(&self, request: &RenameRequest) -> Result<String, NamingError> {
        let _guard = self.span.enter();
        info!("GetFilename");

        let result = self.build_filename(request);
        match &result {
            Ok(filename) => info!(filename = %filename, "FinalName"),
            Err(e) => debug!(error = %e, "GetFilename error"),
        }
        result
    }

    /// Pick the import folder the file moves into.
    ///
    /// Prefers the first folder that accepts moves. Falls back to the first
    /// folder with a warning when none does.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::NoImportFolders`] when `folders` is empty.
    pub fn select_folder<'a>(
        &self,
        folders: &'a [ImportFolder],
    ) -> Result<FolderSelection<'a>, NamingError> {
        let _guard = self.span.enter();

        if let Some(folder) = folders.iter().find(|f| f.role.accepts_moves()) {
            debug!(folder_id = folder.id, "Selected destination folder");
            return Ok(FolderSelection {
                folder,
                fallback: false,
            });
        }

        let folder = folders.first().ok_or(NamingError::NoImportFolders)?;
        warn!(
            folder_id = folder.id,
            "No import folders configured as drop destination, picking first import folder as destination"
        );
        Ok(FolderSelection {
            folder,
            fallback: true,
        })
    }

    /// Compute the destination folder and subpath for the request's file.
    ///
    /// The series folder is the sanitized preferred title. A title made only
    /// of invalid characters leaves that segment empty, and with the year
    /// omitted the subpath is just the series type directory.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::NotIdentified`] when no series was matched and
    /// [`NamingError::NoImportFolders`] when the host offered no folders.
    pub fn compute_destination(
        &self,
        request: &RenameRequest,
    ) -> Result<Destination, NamingError> {
        let series = first_series(request)?;
        let selection = self.select_folder(&request.available_folders)?;
        Ok(self.destination_for(series, &selection))
    }

    /// Compute the full plan for one file.
    ///
    /// Runs folder selection, then the filename, then the destination, and
    /// stops at the first error. Panics are caught and reported as
    /// [`NamingError::Unexpected`] so no fault reaches the host.
    pub fn get_new_path(&self, request: &RenameRequest) -> NamingResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.plan(request)));

        let result = outcome
            .unwrap_or_else(|payload| Err(NamingError::unexpected(panic_cause(&*payload))));

        if let Err(e) = &result {
            let _guard = self.span.enter();
            error!(error = %e, cancel = e.should_cancel(), "GetNewPath failed");
        }

        result.into()
    }

    fn plan(&self, request: &RenameRequest) -> Result<RenamePlan, NamingError> {
        let selection = self.select_folder(&request.available_folders)?;
        let filename = self.compute_filename(request)?;
        let series = first_series(request)?;
        let destination = self.destination_for(series, &selection);

        let mut degradations = destination.degradations;
        if self.config.release_group_suffix && request.release.short_name.is_none() {
            degradations.push(Degradation::ReleaseGroupUnknown);
        }

        Ok(RenamePlan {
            folder: destination.folder,
            subpath: destination.subpath,
            filename,
            degradations,
        })
    }

    fn build_filename(&self, request: &RenameRequest) -> Result<String, NamingError> {
        let extension = request.file.extension();
        let series = first_series(request)?;
        let episode = request
            .episodes
            .first()
            .ok_or(NamingError::NotIdentified(Subject::Episode))?;

        let episode_count = episode.series_episode_count();
        let is_special = episode.kind.is_special();
        let title = episode.display_title();

        let mut name = if episode_count == 1 && !is_special {
            if is_placeholder_title(title) {
                if series.kind == SeriesType::Movie {
                    self.config.movie_title.clone()
                } else {
                    series.preferred_title.clone()
                }
            } else {
                title.to_string()
            }
        } else {
            let mut name = String::new();
            if let Some(prefix) = episode.kind.prefix() {
                name.push(prefix);
            }
            name.push_str(&pad_zeroes(episode.number, episode_count));
            name.push_str(" - ");
            name.push_str(title);
            name
        };

        match request.release.short_name.as_deref() {
            Some(group) if self.config.release_group_suffix => {
                name.push_str(&format!(" [{group}]"));
            }
            Some(_) => {}
            None => info!("Release group unknown"),
        }

        name.push_str(&extension);
        Ok(remove_invalid_path_characters(&name))
    }

    fn destination_for(&self, series: &SeriesInfo, selection: &FolderSelection<'_>) -> Destination {
        let _guard = self.span.enter();
        info!("GetDestination");

        let title = remove_invalid_path_characters(&series.preferred_title);
        let folder_name = match self.config.year_policy.resolve(series.year()) {
            Some(year) => format!("{title} [{year}]"),
            None => title,
        };
        let subpath = PathBuf::from(series.kind.name()).join(folder_name);
        info!(dest = %subpath.display(), "FinalDest");

        let degradations = if selection.fallback {
            vec![Degradation::NoDestinationFolderConfigured]
        } else {
            Vec::new()
        };

        Destination {
            folder: selection.folder.clone(),
            subpath,
            degradations,
        }
    }
}

/// Message carried by a panic payload.
fn panic_cause(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn first_series(request: &RenameRequest) -> Result<&SeriesInfo, NamingError> {
    request
        .series
        .first()
        .ok_or(NamingError::NotIdentified(Subject::Series))
}

//! Results handed back to the host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::NamingError;
use crate::model::ImportFolder;

/// A non-fatal condition absorbed with a fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// No folder accepts moves; the first available folder was used.
    NoDestinationFolderConfigured,
    /// The release group could not be resolved; the suffix was omitted.
    ReleaseGroupUnknown,
}

/// The import folder chosen for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSelection<'a> {
    /// Selected folder.
    pub folder: &'a ImportFolder,
    /// Set when no folder accepts moves and the first one was used instead.
    pub fallback: bool,
}

/// Destination folder plus the subpath below it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destination {
    /// Import folder the file moves into.
    pub folder: ImportFolder,
    /// Path relative to the folder root, `{type}/{title} [year]`.
    pub subpath: PathBuf,
    /// Conditions absorbed while choosing the destination.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

/// Complete answer for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenamePlan {
    /// Import folder the file moves into.
    pub folder: ImportFolder,
    /// Path relative to the folder root.
    pub subpath: PathBuf,
    /// New filename including extension.
    pub filename: String,
    /// Conditions absorbed while computing the plan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl RenamePlan {
    /// Full target path of the file.
    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.folder.path.join(&self.subpath).join(&self.filename)
    }
}

/// Outcome of a naming request as seen by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NamingResult {
    /// The file should be moved according to the plan.
    Success(RenamePlan),
    /// No plan could be produced.
    Failure {
        /// Human-readable reason.
        reason: String,
        /// Whether the host should abort processing of this file.
        cancel: bool,
    },
}

impl NamingResult {
    /// Whether a plan was produced.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The plan, if any.
    #[must_use]
    pub const fn plan(&self) -> Option<&RenamePlan> {
        match self {
            Self::Success(plan) => Some(plan),
            Self::Failure { .. } => None,
        }
    }
}

impl From<NamingError> for NamingResult {
    fn from(err: NamingError) -> Self {
        Self::Failure {
            cancel: err.should_cancel(),
            reason: err.to_string(),
        }
    }
}

impl From<Result<RenamePlan, NamingError>> for NamingResult {
    fn from(result: Result<RenamePlan, NamingError>) -> Self {
        match result {
            Ok(plan) => Self::Success(plan),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Subject;
    use crate::model::DropFolderRole;

    fn plan() -> RenamePlan {
        RenamePlan {
            folder: ImportFolder::new(1, "Anime", "/media/anime", DropFolderRole::Destination),
            subpath: PathBuf::from("TVSeries").join("Show [2020]"),
            filename: "01 - Pilot.mkv".to_string(),
            degradations: Vec::new(),
        }
    }

    #[test]
    fn test_target_path() {
        assert_eq!(
            plan().target_path(),
            PathBuf::from("/media/anime/TVSeries/Show [2020]/01 - Pilot.mkv")
        );
    }

    #[test]
    fn test_error_to_result_carries_cancel_flag() {
        let result = NamingResult::from(NamingError::NotIdentified(Subject::Episode));
        assert_eq!(
            result,
            NamingResult::Failure {
                reason: "Episode not identified".to_string(),
                cancel: true,
            }
        );

        let result = NamingResult::from(NamingError::unexpected("boom"));
        assert!(matches!(result, NamingResult::Failure { cancel: false, .. }));
        assert!(result.plan().is_none());
    }

    #[test]
    fn test_result_serialization_shape() {
        let json = serde_json::to_value(NamingResult::Success(plan())).expect("serializable");
        assert_eq!(json["status"], "success");
        assert_eq!(json["filename"], "01 - Pilot.mkv");
        assert!(json.get("degradations").is_none());

        let failure = NamingResult::Failure {
            reason: "Anime not identified".to_string(),
            cancel: true,
        };
        let json = serde_json::to_value(&failure).expect("serializable");
        assert_eq!(json["status"], "failure");
        assert_eq!(json["cancel"], true);
    }
}

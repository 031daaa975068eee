//! Move-event shapes of the host plugin ABI.
//!
//! The media server changed the event passed to renamers several times. Each
//! supported revision lives in its own module and converts into the one
//! [`RenameRequest`] the naming policy understands.

use serde::{Deserialize, Serialize};
use subrenamer_core::{ReleaseInfo, RenameRequest};

/// Release group attached to a file's AniDB record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseGroup {
    /// AniDB group id.
    #[serde(default)]
    pub id: Option<i32>,
    /// Full group name.
    #[serde(default)]
    pub name: Option<String>,
    /// Abbreviated group name used in filenames.
    #[serde(default)]
    pub short_name: Option<String>,
}

/// AniDB record of a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AniDbFileInfo {
    /// Group that released the file.
    #[serde(default)]
    pub release_group: Option<ReleaseGroup>,
}

fn release_info(anidb: Option<&AniDbFileInfo>) -> ReleaseInfo {
    let short_name = anidb
        .and_then(|info| info.release_group.as_ref())
        .and_then(|group| group.short_name.clone())
        .filter(|name| !name.is_empty());
    ReleaseInfo { short_name }
}

/// Earliest event revision.
///
/// Episodes carry no series back-reference; the first anime's episode counts
/// stand in for it.
pub mod legacy {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use subrenamer_core::{
        DropFolderRole, EpisodeCounts, EpisodeInfo, EpisodeKind, FileInfo, ImportFolder,
        LocalizedTitle, RenameRequest, SeriesInfo, SeriesRef, SeriesType,
    };

    use super::{AniDbFileInfo, release_info};

    /// Anime record.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AnimeInfo {
        /// Broadcast type.
        #[serde(rename = "type")]
        pub kind: SeriesType,
        /// Preferred title.
        pub preferred_title: String,
        /// First air date.
        #[serde(default)]
        pub air_date: Option<NaiveDate>,
        /// Episode-count summary.
        #[serde(default)]
        pub episode_counts: EpisodeCounts,
    }

    /// Episode record.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct EpisodeRecord {
        /// Episode kind.
        #[serde(rename = "type")]
        pub kind: EpisodeKind,
        /// Episode number.
        pub number: u32,
        /// Localized titles.
        #[serde(default)]
        pub titles: Vec<LocalizedTitle>,
    }

    /// File record.
    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
    pub struct FileRecord {
        /// Filename including extension.
        pub filename: String,
        /// AniDB record, when the file was hashed and matched.
        #[serde(default)]
        pub anidb: Option<AniDbFileInfo>,
    }

    /// Import folder record.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct FolderRecord {
        /// Folder id.
        pub id: i32,
        /// Display name.
        #[serde(default)]
        pub name: String,
        /// Root path.
        pub location: PathBuf,
        /// Drop-folder role.
        #[serde(default)]
        pub drop_folder_type: DropFolderRole,
    }

    /// Move event of the earliest revision.
    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MoveEventArgs {
        /// Matched anime.
        #[serde(default)]
        pub anime_info: Vec<AnimeInfo>,
        /// Matched episodes.
        #[serde(default)]
        pub episode_info: Vec<EpisodeRecord>,
        /// The file being moved.
        pub file_info: FileRecord,
        /// Import folders.
        #[serde(default)]
        pub available_folders: Vec<FolderRecord>,
    }

    impl From<MoveEventArgs> for RenameRequest {
        fn from(args: MoveEventArgs) -> Self {
            let series_ref = args.anime_info.first().map(|anime| SeriesRef {
                episode_counts: anime.episode_counts,
            });

            let episodes = args
                .episode_info
                .into_iter()
                .map(|episode| EpisodeInfo {
                    kind: episode.kind,
                    number: episode.number,
                    titles: episode.titles,
                    series: series_ref,
                })
                .collect();

            let series = args
                .anime_info
                .into_iter()
                .map(|anime| SeriesInfo {
                    kind: anime.kind,
                    preferred_title: anime.preferred_title,
                    air_date: anime.air_date,
                    episode_counts: anime.episode_counts,
                })
                .collect();

            let available_folders = args
                .available_folders
                .into_iter()
                .map(|f| ImportFolder::new(f.id, f.name, f.location, f.drop_folder_type))
                .collect();

            Self {
                series,
                episodes,
                release: release_info(args.file_info.anidb.as_ref()),
                file: FileInfo::new(args.file_info.filename),
                available_folders,
            }
        }
    }
}

/// Latest event revision, whose records already match the stable model.
pub mod current {
    use serde::{Deserialize, Serialize};
    use subrenamer_core::{EpisodeInfo, FileInfo, ImportFolder, RenameRequest, SeriesInfo};

    use super::{AniDbFileInfo, release_info};

    /// Video record the file belongs to.
    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
    pub struct VideoRecord {
        /// AniDB record, when the video was matched.
        #[serde(default)]
        pub anidb: Option<AniDbFileInfo>,
    }

    /// Move event of the latest revision.
    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MoveEventArgs {
        /// Matched series.
        #[serde(default)]
        pub series: Vec<SeriesInfo>,
        /// Matched episodes.
        #[serde(default)]
        pub episodes: Vec<EpisodeInfo>,
        /// The file being moved.
        pub file: FileInfo,
        /// Video the file belongs to.
        #[serde(default)]
        pub video: Option<VideoRecord>,
        /// Import folders.
        #[serde(default)]
        pub available_folders: Vec<ImportFolder>,
    }

    impl From<MoveEventArgs> for RenameRequest {
        fn from(args: MoveEventArgs) -> Self {
            let anidb = args.video.as_ref().and_then(|video| video.anidb.as_ref());
            Self {
                release: release_info(anidb),
                series: args.series,
                episodes: args.episodes,
                file: args.file,
                available_folders: args.available_folders,
            }
        }
    }
}

/// A move event of any supported revision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "abi", rename_all = "lowercase")]
pub enum HostEvent {
    /// Earliest revision.
    Legacy(legacy::MoveEventArgs),
    /// Latest revision.
    Current(current::MoveEventArgs),
}

impl From<HostEvent> for RenameRequest {
    fn from(event: HostEvent) -> Self {
        match event {
            HostEvent::Legacy(args) => args.into(),
            HostEvent::Current(args) => args.into(),
        }
    }
}

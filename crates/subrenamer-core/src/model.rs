//! Read model supplied by the host for a single move request.
//!
//! Everything here is constructed per request and discarded afterwards. The
//! naming policy only reads these values.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Broadcast type of a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SeriesType {
    /// Theatrical release.
    Movie,
    /// Original video animation.
    #[serde(rename = "OVA")]
    Ova,
    /// Regular television series.
    #[default]
    #[serde(rename = "TVSeries")]
    TvSeries,
    /// One-off television special.
    #[serde(rename = "TVSpecial")]
    TvSpecial,
    /// Web release.
    Web,
    /// Anything the metadata provider could not classify.
    Other,
}

impl SeriesType {
    /// Name used as the top-level destination folder.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Ova => "OVA",
            Self::TvSeries => "TVSeries",
            Self::TvSpecial => "TVSpecial",
            Self::Web => "Web",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of an episode within its series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EpisodeKind {
    /// A regular numbered episode.
    #[default]
    Normal,
    /// Special episode.
    Special,
    /// Credits sequence.
    Credits,
    /// Opening sequence.
    Opening,
    /// Ending sequence.
    Ending,
    /// Trailer or promotional video.
    Trailer,
    /// Parody episode.
    Parody,
    /// Any other extra.
    Other,
}

impl EpisodeKind {
    /// Human-readable kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Special => "Special",
            Self::Credits => "Credits",
            Self::Opening => "Opening",
            Self::Ending => "Ending",
            Self::Trailer => "Trailer",
            Self::Parody => "Parody",
            Self::Other => "Other",
        }
    }

    /// Whether this is anything other than a regular episode.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Filename prefix for specials: the first letter of the kind name.
    #[must_use]
    pub fn prefix(self) -> Option<char> {
        if self.is_special() {
            self.name().chars().next()
        } else {
            None
        }
    }
}

impl fmt::Display for EpisodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Language tag of a localized title.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TitleLanguage {
    /// English.
    English,
    /// Romanized Japanese.
    Romaji,
    /// Japanese in native script.
    Japanese,
    /// Any language the policy does not distinguish.
    #[serde(other)]
    Unknown,
}

/// One localized title of an episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedTitle {
    /// Language of the title.
    pub language: TitleLanguage,
    /// Title text as provided by the metadata source.
    pub title: String,
}

impl LocalizedTitle {
    /// Create a new localized title.
    pub fn new(language: TitleLanguage, title: impl Into<String>) -> Self {
        Self {
            language,
            title: title.into(),
        }
    }
}

/// Episode-count summary of a series.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpisodeCounts {
    /// Number of normal episodes.
    #[serde(default)]
    pub episodes: u32,
    /// Number of special episodes.
    #[serde(default)]
    pub specials: u32,
}

/// Back-reference from an episode to its owning series.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesRef {
    /// Episode counts of the owning series.
    pub episode_counts: EpisodeCounts,
}

/// An identified series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesInfo {
    /// Broadcast type.
    #[serde(rename = "type")]
    pub kind: SeriesType,
    /// Title chosen by the host according to the user's language preference.
    pub preferred_title: String,
    /// First air date, if known.
    #[serde(default)]
    pub air_date: Option<NaiveDate>,
    /// Episode-count summary.
    #[serde(default)]
    pub episode_counts: EpisodeCounts,
}

impl SeriesInfo {
    /// Create a series with no air date and no episodes.
    pub fn new(kind: SeriesType, preferred_title: impl Into<String>) -> Self {
        Self {
            kind,
            preferred_title: preferred_title.into(),
            air_date: None,
            episode_counts: EpisodeCounts::default(),
        }
    }

    /// Set the air date.
    #[must_use]
    pub const fn with_air_date(mut self, air_date: NaiveDate) -> Self {
        self.air_date = Some(air_date);
        self
    }

    /// Set the number of normal episodes.
    #[must_use]
    pub const fn with_episode_count(mut self, episodes: u32) -> Self {
        self.episode_counts.episodes = episodes;
        self
    }

    /// Year of the first air date.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.air_date.map(|date| date.year())
    }
}

/// An identified episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpisodeInfo {
    /// Episode kind.
    #[serde(rename = "type")]
    pub kind: EpisodeKind,
    /// Episode number within its kind.
    pub number: u32,
    /// Localized titles in provider order.
    #[serde(default)]
    pub titles: Vec<LocalizedTitle>,
    /// Owning series, when the host resolved it.
    #[serde(default)]
    pub series: Option<SeriesRef>,
}

impl EpisodeInfo {
    /// Create an episode without titles or series reference.
    pub const fn new(kind: EpisodeKind, number: u32) -> Self {
        Self {
            kind,
            number,
            titles: Vec::new(),
            series: None,
        }
    }

    /// Append a localized title.
    #[must_use]
    pub fn with_title(mut self, language: TitleLanguage, title: impl Into<String>) -> Self {
        self.titles.push(LocalizedTitle::new(language, title));
        self
    }

    /// Attach a series back-reference with the given normal episode count.
    #[must_use]
    pub const fn with_series_episode_count(mut self, episodes: u32) -> Self {
        self.series = Some(SeriesRef {
            episode_counts: EpisodeCounts {
                episodes,
                specials: 0,
            },
        });
        self
    }

    /// First title in the given language.
    pub fn title_in(&self, language: TitleLanguage) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.language == language)
            .map(|t| t.title.as_str())
    }

    /// English title, else Romaji title, else empty.
    pub fn display_title(&self) -> &str {
        self.title_in(TitleLanguage::English)
            .or_else(|| self.title_in(TitleLanguage::Romaji))
            .unwrap_or("")
    }

    /// Normal episode count of the owning series, 0 when unknown.
    #[must_use]
    pub fn series_episode_count(&self) -> u32 {
        self.series.map_or(0, |s| s.episode_counts.episodes)
    }
}

/// Release information of the file's source record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Short name of the release group, if resolvable.
    #[serde(default)]
    pub short_name: Option<String>,
}

impl ReleaseInfo {
    /// Release info for a known group.
    pub fn group(short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
        }
    }

    /// Release info with no resolvable group.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { short_name: None }
    }
}

/// The file being moved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    /// Original filename, including extension.
    pub file_name: String,
}

impl FileInfo {
    /// Create file info from a filename.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Extension including its leading dot, or empty when there is none.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }
}

/// Role of an import folder in the host's drop-folder workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DropFolderRole {
    /// Not part of the drop workflow.
    #[default]
    Excluded,
    /// Files are picked up from here.
    Source,
    /// Files are moved here.
    Destination,
    /// Both source and destination.
    Both,
}

impl DropFolderRole {
    /// Whether files may be moved into a folder with this role.
    #[must_use]
    pub const fn accepts_moves(self) -> bool {
        matches!(self, Self::Destination | Self::Both)
    }
}

/// Import folder managed by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportFolder {
    /// Host identifier of the folder.
    pub id: i32,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Root path on disk.
    pub path: PathBuf,
    /// Drop-folder role.
    #[serde(default)]
    pub role: DropFolderRole,
}

impl ImportFolder {
    /// Create an import folder.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        role: DropFolderRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            role,
        }
    }
}

/// Everything the policy needs to name one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameRequest {
    /// Identified series, most relevant first.
    #[serde(default)]
    pub series: Vec<SeriesInfo>,
    /// Identified episodes, most relevant first.
    #[serde(default)]
    pub episodes: Vec<EpisodeInfo>,
    /// Release information of the file's source record.
    #[serde(default)]
    pub release: ReleaseInfo,
    /// The file being moved.
    pub file: FileInfo,
    /// Folders the host allows as destinations, in host order.
    #[serde(default)]
    pub available_folders: Vec<ImportFolder>,
}

impl RenameRequest {
    /// Create a request for the given file with no metadata attached.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file: FileInfo::new(file_name),
            ..Self::default()
        }
    }

    /// Add an identified series.
    #[must_use]
    pub fn with_series(mut self, series: SeriesInfo) -> Self {
        self.series.push(series);
        self
    }

    /// Add an identified episode.
    #[must_use]
    pub fn with_episode(mut self, episode: EpisodeInfo) -> Self {
        self.episodes.push(episode);
        self
    }

    /// Set the release group short name.
    #[must_use]
    pub fn with_release_group(mut self, short_name: impl Into<String>) -> Self {
        self.release = ReleaseInfo::group(short_name);
        self
    }

    /// Add an available import folder.
    #[must_use]
    pub fn with_folder(mut self, folder: ImportFolder) -> Self {
        self.available_folders.push(folder);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_type_names() {
        assert_eq!(SeriesType::Movie.name(), "Movie");
        assert_eq!(SeriesType::Ova.name(), "OVA");
        assert_eq!(SeriesType::TvSeries.to_string(), "TVSeries");
        assert_eq!(SeriesType::TvSpecial.to_string(), "TVSpecial");
    }

    #[test]
    fn test_episode_kind_prefix() {
        assert_eq!(EpisodeKind::Normal.prefix(), None);
        assert_eq!(EpisodeKind::Special.prefix(), Some('S'));
        assert_eq!(EpisodeKind::Opening.prefix(), Some('O'));
        assert_eq!(EpisodeKind::Credits.prefix(), Some('C'));
        assert_eq!(EpisodeKind::Trailer.prefix(), Some('T'));
    }

    #[test]
    fn test_display_title_prefers_english_then_romaji() {
        let episode = EpisodeInfo::new(EpisodeKind::Normal, 1)
            .with_title(TitleLanguage::Japanese, "始まり")
            .with_title(TitleLanguage::Romaji, "Hajimari")
            .with_title(TitleLanguage::English, "The Beginning")
            .with_title(TitleLanguage::English, "Beginning (alt)");
        assert_eq!(episode.display_title(), "The Beginning");

        let romaji_only = EpisodeInfo::new(EpisodeKind::Normal, 1)
            .with_title(TitleLanguage::Japanese, "始まり")
            .with_title(TitleLanguage::Romaji, "Hajimari");
        assert_eq!(romaji_only.display_title(), "Hajimari");

        let japanese_only =
            EpisodeInfo::new(EpisodeKind::Normal, 1).with_title(TitleLanguage::Japanese, "始まり");
        assert_eq!(japanese_only.display_title(), "");
    }

    #[test]
    fn test_series_episode_count_defaults_to_zero() {
        let orphan = EpisodeInfo::new(EpisodeKind::Normal, 4);
        assert_eq!(orphan.series_episode_count(), 0);

        let attached = orphan.with_series_episode_count(26);
        assert_eq!(attached.series_episode_count(), 26);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(FileInfo::new("[Group] Show - 01.mkv").extension(), ".mkv");
        assert_eq!(FileInfo::new("archive.tar.gz").extension(), ".gz");
        assert_eq!(FileInfo::new("no_extension").extension(), "");
        assert_eq!(FileInfo::new("trailing.").extension(), "");
    }

    #[test]
    fn test_series_year() {
        let series = SeriesInfo::new(SeriesType::TvSeries, "Show");
        assert_eq!(series.year(), None);

        let date = NaiveDate::from_ymd_opt(2013, 4, 7).expect("valid date");
        assert_eq!(series.with_air_date(date).year(), Some(2013));
    }

    #[test]
    fn test_drop_folder_roles() {
        assert!(!DropFolderRole::Excluded.accepts_moves());
        assert!(!DropFolderRole::Source.accepts_moves());
        assert!(DropFolderRole::Destination.accepts_moves());
        assert!(DropFolderRole::Both.accepts_moves());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{
            "series": [{"type": "TVSeries", "preferred_title": "Show", "air_date": "2020-01-05"}],
            "episodes": [{"type": "Opening", "number": 2, "titles": [{"language": "klingon", "title": "x"}]}],
            "file": {"file_name": "op.mkv"}
        }"#;

        let request: RenameRequest = serde_json::from_str(json).expect("valid request");
        assert_eq!(request.series[0].kind, SeriesType::TvSeries);
        assert_eq!(request.series[0].year(), Some(2020));
        assert_eq!(request.episodes[0].kind, EpisodeKind::Opening);
        assert_eq!(request.episodes[0].titles[0].language, TitleLanguage::Unknown);
        assert_eq!(request.release, ReleaseInfo::unknown());
        assert!(request.available_folders.is_empty());
    }
}

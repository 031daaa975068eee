//! Plugin entry points called by the media server.

use std::path::Path;

use subrenamer_core::{NamingError, NamingResult, RenameRequest, RenamerConfig, SubRenamer};
use tracing::{debug, info_span, warn};

use crate::abi::HostEvent;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "SubRenamer";

/// Naming policy seam, mockable in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Renamer: Send + Sync {
    /// Compute the plan for one file.
    fn get_new_path(&self, request: &RenameRequest) -> NamingResult;
}

impl Renamer for SubRenamer {
    fn get_new_path(&self, request: &RenameRequest) -> NamingResult {
        Self::get_new_path(self, request)
    }
}

/// The renamer plugin as registered with the host.
#[derive(Debug)]
pub struct RenamerPlugin<R = SubRenamer> {
    renamer: R,
}

impl RenamerPlugin<SubRenamer> {
    /// Create a plugin using the naming policy with the given configuration.
    #[must_use]
    pub fn new(config: RenamerConfig) -> Self {
        let span = info_span!("renamer", plugin = PLUGIN_NAME);
        Self {
            renamer: SubRenamer::new(config).with_span(span),
        }
    }

    /// Create a plugin from a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_config_file(path: &Path) -> subrenamer_core::Result<Self> {
        Ok(Self::new(RenamerConfig::load_from(path)?))
    }

    /// Create a plugin from the default configuration location.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> subrenamer_core::Result<Self> {
        Ok(Self::new(RenamerConfig::load()?))
    }
}

impl Default for RenamerPlugin<SubRenamer> {
    fn default() -> Self {
        Self::new(RenamerConfig::default())
    }
}

impl<R: Renamer> RenamerPlugin<R> {
    /// Create a plugin around any renamer.
    pub const fn with_renamer(renamer: R) -> Self {
        Self { renamer }
    }

    /// Handle one move event of any supported revision.
    pub fn handle(&self, event: HostEvent) -> NamingResult {
        let request = RenameRequest::from(event);
        let span = info_span!("move", file = %request.file.file_name);
        let _guard = span.enter();

        debug!(
            series = request.series.len(),
            episodes = request.episodes.len(),
            folders = request.available_folders.len(),
            "Handling move event"
        );
        self.renamer.get_new_path(&request)
    }

    /// Handle a JSON-encoded move event and return a JSON-encoded result.
    ///
    /// Malformed payloads are answered with a failure, never a fault.
    pub fn handle_json(&self, payload: &str) -> String {
        let result = match serde_json::from_str::<HostEvent>(payload) {
            Ok(event) => self.handle(event),
            Err(e) => {
                warn!(error = %e, "Malformed move event");
                NamingError::unexpected(format!("Malformed move event: {e}")).into()
            }
        };

        serde_json::to_string(&result).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to encode naming result");
            r#"{"status":"failure","reason":"Failed to encode naming result","cancel":false}"#
                .to_string()
        })
    }
}

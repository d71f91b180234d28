use std::path::Path;

use tracing::instrument;

use crate::errors::FlagError;
use crate::flags::flag_models::{FeatureFlagList, FlagDefinition};
use crate::flags::flag_registry::FlagRegistry;

impl FeatureFlagList {
    pub fn new(flags: Vec<FlagDefinition>) -> Self {
        Self { flags }
    }

    /// Parses the static definitions source: a JSON array of flag definitions.
    pub fn from_json_str(data: &str) -> Result<FeatureFlagList, FlagError> {
        let flags_list = serde_json::from_str(data).map_err(|e| {
            tracing::error!("failed to parse data to flags list: {}", e);
            FlagError::DataParsingError(e)
        })?;

        Ok(FeatureFlagList { flags: flags_list })
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<FeatureFlagList, FlagError> {
        let path = path.as_ref();
        let data =
            std::fs::read_to_string(path).map_err(|source| FlagError::DefinitionsUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let list = Self::from_json_str(&data)?;
        tracing::debug!("Parsed {} flag definitions", list.flags.len());
        Ok(list)
    }

    pub fn into_registry(self) -> Result<FlagRegistry, FlagError> {
        FlagRegistry::from_definitions(self.flags)
    }
}

use crate::error::{CliError, Result};
use perfshield::engine::config::{SelectionRule, ValueRange};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePhysicsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagation_speed: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSearchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<SelectionRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_heights: Option<ValueRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_spacings: Option<ValueRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_spacings: Option<ValueRange>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSweepConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

/// Partial configuration as written in a TOML file. Every field is optional.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physics: Option<FilePhysicsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<FilePlateConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<FileSearchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<FileSweepConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Other(e.into()))
    }

    pub fn physics_mut(&mut self) -> &mut FilePhysicsConfig {
        self.physics.get_or_insert_with(Default::default)
    }

    pub fn plate_mut(&mut self) -> &mut FilePlateConfig {
        self.plate.get_or_insert_with(Default::default)
    }

    pub fn search_mut(&mut self) -> &mut FileSearchConfig {
        self.search.get_or_insert_with(Default::default)
    }

    pub fn sweep_mut(&mut self) -> &mut FileSweepConfig {
        self.sweep.get_or_insert_with(Default::default)
    }
}

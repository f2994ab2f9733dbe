use std::path::PathBuf;

use serde::Deserialize;

use super::{Config, DEFAULT_BLACKLIST, blacklist_classnames};
use crate::error::Error;
use crate::heuristics::default_heuristics;
use crate::project::Project;
use crate::theme::ThemeName;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub theme: ThemeName,
    /// Extra classnames to veto, on top of the defaults.
    pub blacklist: Vec<String>,
    pub project_root: Option<PathBuf>,
    pub loaded_files: Vec<PathBuf>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Config {
    pub fn from_settings(settings: Settings) -> Self {
        let classnames = DEFAULT_BLACKLIST
            .iter()
            .map(|c| (*c).to_string())
            .chain(settings.blacklist);
        Self {
            heuristics: default_heuristics(),
            blacklist: blacklist_classnames(classnames),
            theme: settings.theme.build(),
            format_with: crate::format::format_terminal,
            project: Project {
                root: settings.project_root,
                loaded_files: settings.loaded_files.into_iter().collect(),
            },
        }
    }
}

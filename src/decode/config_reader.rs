use crate::decode::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";
pub const CONFIG_PATH_VAR: &str = "RANKINGS_CONFIG";
pub const DUPLICATE_POLICY_VAR: &str = "RANKINGS_DUPLICATE_POLICY";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingObject {
    pub folder: Option<String>,
    pub images: Vec<String>,
    #[serde(rename = "gridColumns")]
    pub grid_columns: Option<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub objects: BTreeMap<String, RankingObject>,
}

impl RankingConfig {
    pub fn to_manifest(&self) -> Manifest {
        Manifest {
            objects: self
                .objects
                .iter()
                .map(|(name, obj)| {
                    (
                        name.clone(),
                        ObjectEntry {
                            folder: obj.folder.clone(),
                            images: obj.images.clone(),
                            grid_columns: obj.grid_columns,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Settings of a run, taken from the environment.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub config_path: String,
    pub duplicate_policy: DuplicateNumberPolicy,
}

impl Settings {
    pub fn from_env() -> DecodeResult<Settings> {
        Settings::from_values(
            env::var(CONFIG_PATH_VAR).ok(),
            env::var(DUPLICATE_POLICY_VAR).ok(),
        )
    }

    pub fn from_values(
        config_path: Option<String>,
        duplicate_policy: Option<String>,
    ) -> DecodeResult<Settings> {
        let duplicate_policy = match duplicate_policy {
            Some(s) if !s.trim().is_empty() => parse_duplicate_policy(&s)?,
            _ => DuplicateNumberPolicy::default(),
        };
        Ok(Settings {
            config_path: config_path
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()),
            duplicate_policy,
        })
    }
}

pub fn parse_duplicate_policy(value: &str) -> DecodeResult<DuplicateNumberPolicy> {
    match value.trim() {
        "reject" => Ok(DuplicateNumberPolicy::Reject),
        "last-wins" => Ok(DuplicateNumberPolicy::LastWins),
        "first-wins" => Ok(DuplicateNumberPolicy::FirstWins),
        x => InvalidPolicySnafu { value: x }.fail(),
    }
}

pub fn read_manifest(path: &str) -> DecodeResult<Manifest> {
    ensure!(Path::new(path).exists(), ManifestMissingSnafu { path });
    let contents = fs::read_to_string(path).context(ReadingManifestSnafu { path })?;
    let config: RankingConfig =
        serde_json::from_str(contents.as_str()).context(ParsingManifestSnafu { path })?;
    debug!(
        "read_manifest: {}: objects {:?}",
        path,
        config.objects.keys().collect::<Vec<_>>()
    );
    Ok(config.to_manifest())
}

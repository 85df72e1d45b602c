use std::collections::BTreeMap;

use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Result, TrainerError};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

const POOLS_FILE: &str = "pools.json";
const ARCADE_FILE: &str = "arcade.json";

/// Named groups of words that practice texts are assembled from
#[derive(Deserialize, Clone, Debug)]
pub struct WordPool {
    pub name: String,
    pub pools: BTreeMap<String, Vec<String>>,
}

impl WordPool {
    pub fn load() -> Result<Self> {
        read_asset(POOLS_FILE)
    }

    /// Every word across all groups, in group order
    pub fn words(&self) -> Vec<&str> {
        self.pools
            .values()
            .flatten()
            .map(String::as_str)
            .filter(|w| !w.is_empty())
            .collect()
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ArcadeLevel {
    pub name: String,
    pub time_secs: u32,
    pub words: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct ArcadeLevels {
    levels: Vec<ArcadeLevel>,
}

pub fn load_arcade_levels() -> Result<Vec<ArcadeLevel>> {
    read_asset::<ArcadeLevels>(ARCADE_FILE).map(|l| l.levels)
}

fn read_asset<T: DeserializeOwned>(file_name: &str) -> Result<T> {
    let file = WORDS_DIR
        .get_file(file_name)
        .ok_or_else(|| TrainerError::MissingAsset(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| TrainerError::InvalidAsset(file_name.to_string()))?;

    from_str(contents).map_err(|source| TrainerError::Parse {
        name: file_name.to_string(),
        source,
    })
}

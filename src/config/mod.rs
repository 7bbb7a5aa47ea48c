//! Configuration loading and merging
//!
//! Values come from the command line, an optional defaults file at the
//! repository root, and built-in defaults, in that order of precedence.

pub mod loader;
pub mod merge;

pub use loader::{discover_config, load_config};
pub use merge::{merge_cli_with_config, CliOverrides};

use serde::{Deserialize, Deserializer, Serialize};

/// Keys accepted in `repo2md.toml` / `repo2md.yml`.
///
/// List keys take either an array or one comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,
    pub no_meta: Option<bool>,
    #[serde(deserialize_with = "string_or_list")]
    pub include_meta: Vec<String>,
    pub max_file_size: Option<u64>,
    #[serde(deserialize_with = "string_or_list")]
    pub include: Vec<String>,
    pub recent: Option<usize>,
    pub uncommitted: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => s.split(',').map(str::to_string).collect(),
        StringOrList::Many(v) => v,
    };
    Ok(items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
}

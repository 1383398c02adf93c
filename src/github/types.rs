use serde::{Deserialize, Deserializer, Serialize};

/// Repository information.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RepoInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homepage: String,
}

/// Represents a GitHub release asset
///
/// `url` is the API URL of the asset, not the browser download URL. Fetching it
/// with `Accept: application/octet-stream` yields the binary content.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Asset {
    pub name: String,
    pub url: String,
}

/// Represents a GitHub release
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct Release {
    pub tag_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Finds an asset by its exact name.
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

// GitHub sends `null` for unset optional fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Profile settings read from the JSON config file.
///
/// Every optional string treats `""` the same as a missing key, so a config
/// template with blank fields renders without those rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    pub username: String,
    pub header: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub kernel: Option<String>,
    #[serde(default, deserialize_with = "birthday")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_empty")]
    pub location: Option<String>,
    #[serde(default)]
    pub languages: Languages,
    #[serde(default)]
    pub stack: Stack,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Languages {
    #[serde(default, deserialize_with = "non_empty")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub markup: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub human: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stack {
    #[serde(default, deserialize_with = "non_empty")]
    pub backend: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub frontend: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub database: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub infra: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub website: Option<Link>,
    #[serde(default)]
    pub email: Option<Link>,
    #[serde(default)]
    pub linkedin: Option<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub label: String,
}

impl Link {
    /// A link is only rendered when both halves are present.
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.label.is_empty()
    }
}

impl ProfileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: ProfileConfig =
            serde_json::from_str(content).context("Failed to deserialize profile config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            bail!("`username` must not be empty");
        }
        Ok(())
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn birthday<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(deserializer)? {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("birthday `{raw}`: {e}"))),
        None => Ok(None),
    }
}

use crate::errors::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_URL: &str =
    "https://repo.nordvpn.com/deb/nordvpn/debian/dists/stable/main/binary-amd64/Packages";
// the default reqwest user agent gets blocked by the repository
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_REPO_URL: &str = "ssh://aur@aur.archlinux.org/nordvpn-bin.git";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_CHECKOUT: &str = "nordvpn-bin";

pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<ConfigFile> {
    let mut config = ConfigFile::default();

    if let Some(c) = load_from("/etc/aurbump.conf")? {
        config.update(c);
    }

    if let Ok(path) = config_path() {
        if let Some(c) = load_from(path)? {
            config.update(c);
        }
    }

    if let Some(path) = path {
        let c = load_from(path)?.ok_or_else(|| format_err!("Failed to read config file"))?;
        config.update(c);
    }

    Ok(config)
}

fn config_path() -> Result<PathBuf> {
    let config_dir =
        dirs_next::config_dir().ok_or_else(|| format_err!("Failed to find config dir"))?;
    Ok(config_dir.join("aurbump.conf"))
}

fn load_from<P: AsRef<Path>>(path: P) -> Result<Option<ConfigFile>> {
    if let Ok(buf) = fs::read_to_string(path.as_ref()) {
        debug!("loading config file {:?}", path.as_ref());
        let config = toml::from_str(&buf).context("Failed to load config")?;
        Ok(Some(config))
    } else {
        Ok(None)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub repo: RepoConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl ConfigFile {
    pub fn update(&mut self, c: ConfigFile) {
        self.index.update(c.index);
        self.repo.update(c.repo);
        self.policy.update(c.policy);
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub url: Option<String>,
    pub user_agent: Option<String>,
    /// Only consider index entries with this `Package` name
    pub package: Option<String>,
}

impl IndexConfig {
    pub fn update(&mut self, c: IndexConfig) {
        if c.url.is_some() {
            self.url = c.url;
        }
        if c.user_agent.is_some() {
            self.user_agent = c.user_agent;
        }
        if c.package.is_some() {
            self.package = c.package;
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_INDEX_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    pub url: Option<String>,
    pub branch: Option<String>,
    pub checkout: Option<PathBuf>,
    pub push: Option<bool>,
}

impl RepoConfig {
    pub fn update(&mut self, c: RepoConfig) {
        if c.url.is_some() {
            self.url = c.url;
        }
        if c.branch.is_some() {
            self.branch = c.branch;
        }
        if c.checkout.is_some() {
            self.checkout = c.checkout;
        }
        if c.push.is_some() {
            self.push = c.push;
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_REPO_URL)
    }

    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    pub fn checkout(&self) -> &Path {
        self.checkout
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CHECKOUT))
    }

    pub fn push(&self) -> bool {
        self.push.unwrap_or(true)
    }
}

/// Largest kind of version change that is published without review.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    Patch,
    #[default]
    Minor,
    Major,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Bump::Patch => "patch",
            Bump::Minor => "minor",
            Bump::Major => "major",
        })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub allow: Option<Bump>,
}

impl PolicyConfig {
    pub fn update(&mut self, c: PolicyConfig) {
        if c.allow.is_some() {
            self.allow = c.allow;
        }
    }

    pub fn allow(&self) -> Bump {
        self.allow.unwrap_or_default()
    }
}

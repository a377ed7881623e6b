//! # Scan Target Model
//!
//! A target is whatever the user wants the backend to look at: a domain name
//! or an IP address. The client never interprets it; it only guarantees the
//! string is trimmed and not empty.
//!
//! Batches come from plain text, one target per line:
//!
//! ```text
//! example.com
//! testsite.io
//! 192.168.1.1
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Serialize;

use crate::error::TargetError;
use crate::success;

/// A single domain or IP address, trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TargetError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TargetError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered batch of targets.
///
/// Order follows the source text and duplicates are kept: the same domain
/// listed twice is submitted twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    /// Splits `text` into lines, trims them and drops the blank ones.
    ///
    /// Works for both `\n` and `\r\n` line endings.
    pub fn parse(text: &str) -> Self {
        text.lines().filter_map(|line| Target::new(line).ok()).collect()
    }

    /// Reads and parses a target file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read target file: {}", path.display()))?;

        let list = Self::parse(&content);

        let len: usize = list.len();
        let unit: &str = if len == 1 { "target has been" } else { "targets have been" };
        success!("{len} {unit} loaded from {}", path.display());

        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }
}

impl FromIterator<Target> for TargetList {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

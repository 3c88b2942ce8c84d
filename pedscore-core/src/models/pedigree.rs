use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde_json::Value;

use crate::errors::{PedigreeError, Result};
use crate::models::PedigreeNode;
use crate::normalize::normalize;
use crate::utils::read_json_value;

///
/// Pedigree struct, the canonical node list of one pedigree file.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pedigree {
    pub nodes: Vec<PedigreeNode>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for Pedigree {
    type Error = PedigreeError;

    ///
    /// Create a new [Pedigree] from a JSON file.
    ///
    /// # Arguments:
    /// - value: path to a `.json` or `.json.gz` file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        let document = read_json_value(value)?;
        let nodes = normalize(&document)?;
        debug!("Loaded {} pedigree nodes from {:?}", nodes.len(), value);

        Ok(Pedigree {
            nodes,
            path: Some(value.to_path_buf()),
        })
    }
}

impl TryFrom<&str> for Pedigree {
    type Error = PedigreeError;

    fn try_from(value: &str) -> Result<Self> {
        Pedigree::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for Pedigree {
    type Error = PedigreeError;

    fn try_from(value: PathBuf) -> Result<Self> {
        Pedigree::try_from(value.as_path())
    }
}

impl TryFrom<&Value> for Pedigree {
    type Error = PedigreeError;

    fn try_from(value: &Value) -> Result<Self> {
        Ok(Pedigree {
            nodes: normalize(value)?,
            path: None,
        })
    }
}

impl FromStr for Pedigree {
    type Err = PedigreeError;

    ///
    /// Parse a pedigree from JSON text.
    ///
    fn from_str(s: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(s)?;
        Pedigree::try_from(&document)
    }
}

impl From<Vec<PedigreeNode>> for Pedigree {
    fn from(nodes: Vec<PedigreeNode>) -> Self {
        Pedigree { nodes, path: None }
    }
}

impl Pedigree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PedigreeNode> {
        self.nodes.iter()
    }

    ///
    /// File name of the source file, or an empty string for in-memory pedigrees.
    ///
    pub fn identifier(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Display for Pedigree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pedigree with {} nodes.", self.len())
    }
}

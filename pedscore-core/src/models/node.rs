use std::collections::BTreeSet;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::models::{DiseasePattern, StatusSymbol};

///
/// Sex category of a pedigree node. Miscarriages are drawn with their own
/// marker and are kept apart from the other categories.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Miscarriage,
    #[default]
    Unknown,
}

impl Sex {
    pub const ALL: [Sex; 4] = [Sex::Male, Sex::Female, Sex::Miscarriage, Sex::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Miscarriage => "miscarriage",
            Sex::Unknown => "unknown",
        }
    }

    ///
    /// Parse the raw `sex` field. Anything that is not recognizably male or
    /// female is [Sex::Unknown].
    ///
    pub fn from_code(code: &str) -> Sex {
        match code.trim().to_lowercase().as_str() {
            "m" | "male" => Sex::Male,
            "f" | "female" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TwinType {
    #[serde(rename = "MZ")]
    Mz,
    #[serde(rename = "DZ")]
    Dz,
}

impl TwinType {
    pub const ALL: [TwinType; 2] = [TwinType::Mz, TwinType::Dz];

    pub fn as_str(&self) -> &'static str {
        match self {
            TwinType::Mz => "MZ",
            TwinType::Dz => "DZ",
        }
    }
}

impl Display for TwinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Twin relationship of a node, with the co-twin when the input names it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Twin {
    pub kind: TwinType,
    pub partner: Option<String>,
}

/// One partner reference of a node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub divorced: bool,
}

impl Partner {
    pub fn new(name: &str) -> Self {
        Partner {
            name: name.to_string(),
            divorced: false,
        }
    }

    pub fn divorced(name: &str) -> Self {
        Partner {
            name: name.to_string(),
            divorced: true,
        }
    }
}

///
/// Canonical pedigree node, the output of the normalizer. Every field is
/// already defaulted: a missing attribute in the raw input shows up as an
/// empty list, `false` or `None` here.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PedigreeNode {
    pub name: String,
    pub sex: Sex,
    /// Generation level, `None` when the input has no usable level.
    pub level: Option<u32>,
    /// Parent references, father first.
    pub parents: Vec<String>,
    pub partners: Vec<Partner>,
    /// Sibling references given explicitly by the input.
    pub siblings: Vec<String>,
    pub top_level: bool,
    pub no_parents: bool,
    pub diseases: BTreeSet<DiseasePattern>,
    pub symbols: BTreeSet<StatusSymbol>,
    pub twin: Option<Twin>,
}

impl PedigreeNode {
    pub fn new(name: &str, sex: Sex, level: u32) -> Self {
        PedigreeNode {
            name: name.to_string(),
            sex,
            level: Some(level),
            ..Default::default()
        }
    }

    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parents = parents.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_partner(mut self, partner: Partner) -> Self {
        self.partners.push(partner);
        self
    }

    pub fn with_symbol(mut self, symbol: StatusSymbol) -> Self {
        self.symbols.insert(symbol);
        self
    }

    pub fn with_disease(mut self, pattern: DiseasePattern) -> Self {
        self.diseases.insert(pattern);
        self
    }

    pub fn with_twin(mut self, kind: TwinType, partner: Option<&str>) -> Self {
        self.twin = Some(Twin {
            kind,
            partner: partner.map(|p| p.to_string()),
        });
        self
    }

    pub fn with_no_parents(mut self) -> Self {
        self.no_parents = true;
        self
    }

    ///
    /// Distinct partner names, excluding a self reference.
    ///
    pub fn partner_names(&self) -> BTreeSet<&str> {
        self.partners
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty() && *name != self.name)
            .collect()
    }

    pub fn has_parent(&self) -> bool {
        !self.parents.is_empty()
    }
}

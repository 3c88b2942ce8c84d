//! Normalization of raw pedigree JSON into canonical nodes.
//!
//! Structural problems (no recognizable node array) are errors. Problems
//! inside a single node record never are: a field that is missing or has
//! the wrong type is simply treated as absent.

use std::collections::BTreeSet;
use std::str::FromStr;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::errors::{PedigreeError, Result};
use crate::models::{DiseasePattern, Partner, PedigreeNode, Sex, StatusSymbol, Twin, TwinType};
use crate::utils::{is_truthy, value_as_level, value_as_name, value_as_names};

/// Wrapper objects that may hold the `{ "json": [...] }` payload.
const WRAPPER_KEYS: [&str; 2] = ["original_json", "updated_json"];
const NODES_KEY: &str = "json";

///
/// Locate the node array inside one of the accepted layouts.
///
/// The wrapped layouts are tried first, then a top-level `json` key, then a
/// bare array.
///
pub fn extract_nodes(value: &Value) -> Result<&Vec<Value>> {
    for wrapper in WRAPPER_KEYS {
        if let Some(Value::Array(nodes)) = value.get(wrapper).and_then(|w| w.get(NODES_KEY)) {
            debug!("Found pedigree nodes under `{}.{}`", wrapper, NODES_KEY);
            return Ok(nodes);
        }
    }

    match value {
        Value::Object(map) => match map.get(NODES_KEY) {
            Some(Value::Array(nodes)) => Ok(nodes),
            Some(_) => Err(PedigreeError::Format(format!(
                "`{}` is present but is not an array",
                NODES_KEY
            ))),
            None => Err(PedigreeError::Format(format!(
                "expected one of `original_json.json`, `updated_json.json` or `json`, found keys [{}]",
                map.keys().cloned().collect::<Vec<_>>().join(", ")
            ))),
        },
        Value::Array(nodes) => Ok(nodes),
        other => Err(PedigreeError::Format(format!(
            "expected a JSON object or array, found {}",
            json_type_name(other)
        ))),
    }
}

///
/// Normalize a whole document into canonical nodes, in input order.
///
pub fn normalize(value: &Value) -> Result<Vec<PedigreeNode>> {
    let raw_nodes = extract_nodes(value)?;

    let nodes = raw_nodes
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match raw {
            Value::Object(record) => Some(normalize_node(index, record)),
            other => {
                warn!(
                    "Skipping pedigree entry {}: expected an object, found {}",
                    index,
                    json_type_name(other)
                );
                None
            }
        })
        .collect();

    Ok(nodes)
}

///
/// Build one canonical node from a raw record.
///
/// # Arguments
/// - index: position in the input array, used to name nodes that have no identifier
/// - record: the raw JSON object
///
pub fn normalize_node(index: usize, record: &Map<String, Value>) -> PedigreeNode {
    let name = record
        .get("name")
        .and_then(value_as_name)
        .or_else(|| record.get("id").and_then(value_as_name))
        .unwrap_or_else(|| format!("#{}", index));

    let sex = if flag(record, "miscarriage") {
        Sex::Miscarriage
    } else {
        record
            .get("sex")
            .and_then(Value::as_str)
            .map(Sex::from_code)
            .unwrap_or(Sex::Unknown)
    };

    let partners = parse_partners(record);
    let divorced_any = flag(record, "divorced") || partners.iter().any(|p| p.divorced);

    let mut symbols = BTreeSet::new();
    if is_deceased(record) {
        symbols.insert(StatusSymbol::Deceased);
    }
    if flag(record, "adopted_in") {
        symbols.insert(StatusSymbol::AdoptedIn);
    }
    if flag(record, "adopted_out") {
        symbols.insert(StatusSymbol::AdoptedOut);
    }
    if flag(record, "carrier") {
        symbols.insert(StatusSymbol::Carrier);
    }
    if flag(record, "proband") || flag(record, "patient") {
        symbols.insert(StatusSymbol::Patient);
    }
    if flag(record, "pregnancy") {
        symbols.insert(StatusSymbol::Pregnancy);
    }
    if divorced_any {
        symbols.insert(StatusSymbol::Divorce);
    }

    PedigreeNode {
        level: record.get("level").and_then(value_as_level),
        parents: parse_parents(record),
        siblings: record.get("siblings").map(value_as_names).unwrap_or_default(),
        top_level: flag(record, "top_level"),
        no_parents: flag(record, "noparents"),
        diseases: parse_diseases(sex, record.get("shading")),
        twin: parse_twin(record),
        partners,
        symbols,
        name,
        sex,
    }
}

///
/// Map a shading annotation onto one of the fixed disease patterns.
///
/// The symbol shape follows the sex (square for males, circle for females);
/// nodes of any other sex category never carry a pattern. A fully qualified
/// pattern name is accepted only when its shape matches the sex.
///
pub fn disease_from_shading(sex: Sex, shading: &str) -> Option<DiseasePattern> {
    let shape = match sex {
        Sex::Male => "SQUARE",
        Sex::Female => "CIRCLE",
        Sex::Miscarriage | Sex::Unknown => return None,
    };

    if let Ok(pattern) = DiseasePattern::from_str(shading) {
        if pattern.as_str().starts_with(shape) {
            return Some(pattern);
        }
        warn!("Ignoring shading {} on a {} node", shading, sex);
        return None;
    }

    let fill = shading
        .replace(" female", "")
        .trim()
        .to_uppercase()
        .replace(['-', ' '], "_");

    DiseasePattern::from_str(&format!("{}_{}", shape, fill)).ok()
}

fn flag(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).is_some_and(is_truthy)
}

fn is_deceased(record: &Map<String, Value>) -> bool {
    let status = match record.get("status") {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "1" | "deceased"),
        _ => false,
    };
    status || flag(record, "deceased")
}

fn parse_parents(record: &Map<String, Value>) -> Vec<String> {
    let mut parents: Vec<String> = Vec::new();

    let listed = ["father", "mother"]
        .iter()
        .filter_map(|key| record.get(*key).and_then(value_as_name))
        .chain(record.get("parents").map(value_as_names).unwrap_or_default());

    for parent in listed {
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }
    parents
}

fn parse_partners(record: &Map<String, Value>) -> Vec<Partner> {
    let mut partners: Vec<Partner> = match record.get("partners") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => obj.get("name").and_then(value_as_name).map(|name| Partner {
                    name,
                    divorced: obj.get("divorced").is_some_and(is_truthy),
                }),
                other => value_as_name(other).map(|name| Partner {
                    name,
                    divorced: false,
                }),
            })
            .collect(),
        Some(other) => value_as_name(other)
            .map(|name| vec![Partner { name, divorced: false }])
            .unwrap_or_default(),
        None => Vec::new(),
    };

    // a divorce names a former partner; make sure the edge exists and is flagged
    if let Some(divorced) = record.get("divorced") {
        for name in value_as_names(divorced) {
            match partners.iter_mut().find(|p| p.name == name) {
                Some(partner) => partner.divorced = true,
                None => partners.push(Partner {
                    name,
                    divorced: true,
                }),
            }
        }
    }

    partners
}

fn parse_diseases(sex: Sex, shading: Option<&Value>) -> BTreeSet<DiseasePattern> {
    let patterns: Vec<&str> = match shading {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    patterns
        .into_iter()
        .filter_map(|pattern| disease_from_shading(sex, pattern))
        .collect()
}

fn parse_twin(record: &Map<String, Value>) -> Option<Twin> {
    [("mztwin", TwinType::Mz), ("dztwin", TwinType::Dz)]
        .into_iter()
        .find_map(|(key, kind)| match record.get(key) {
            Some(Value::String(s)) if s.trim().parse::<f64>().is_err() && !s.trim().is_empty() => {
                Some(Twin {
                    kind,
                    partner: Some(s.trim().to_string()),
                })
            }
            Some(value) if is_truthy(value) => Some(Twin {
                kind,
                partner: None,
            }),
            _ => None,
        })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

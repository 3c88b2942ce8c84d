use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde_json::Value;

use crate::errors::Result;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Read a (possibly gzip'd) JSON document into an untyped value.
///
pub fn read_json_value(path: &Path) -> Result<Value> {
    let reader = get_dynamic_reader(path)?;
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

///
/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false,
/// everything else is true.
///
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

///
/// Interpret a value as a node reference. Strings are used as-is, integers
/// are stringified, anything else is not a reference.
///
pub fn value_as_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

/// Exclusive upper bound on generation levels, so `level + 1` always fits.
pub const MAX_LEVEL: u32 = u32::MAX;

///
/// Interpret a value as a generation level. Negative, fractional or
/// non-numeric values are not levels, and neither is anything at or above
/// [MAX_LEVEL].
///
pub fn value_as_level(value: &Value) -> Option<u32> {
    let level = match value {
        Value::Number(n) => {
            if let Some(level) = n.as_u64() {
                u32::try_from(level).ok()
            } else {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < MAX_LEVEL as f64)
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    level.filter(|level| *level < MAX_LEVEL)
}

///
/// Collect a list of references from a value that is either a single
/// reference or an array of them.
///
pub fn value_as_names(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_as_name).collect(),
        other => value_as_name(other).into_iter().collect(),
    }
}

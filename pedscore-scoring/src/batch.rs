//! Pairing golden and candidate files on disk and scoring them in parallel.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use pedscore_core::{Pedigree, PedigreeError};

use crate::config::ScoringPolicy;
use crate::consts::{CANDIDATE_SUFFIX, GOLDEN_SUFFIX, GZ_EXT, JSON_EXT};
use crate::report::{ScoreReport, compare_pedigrees};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Template(#[from] indicatif::style::TemplateError),
}

pub type BatchResult<T> = std::result::Result<T, BatchError>;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Golden,
    Candidate,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Golden => write!(f, "golden"),
            Side::Candidate => write!(f, "candidate"),
        }
    }
}

/// One pair id found in either directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairEntry {
    Complete {
        id: String,
        golden: PathBuf,
        test: PathBuf,
    },
    /// Only one side exists; `which` names the side that is absent.
    Missing {
        id: String,
        which: Side,
        present: PathBuf,
    },
}

impl PairEntry {
    pub fn id(&self) -> &str {
        match self {
            PairEntry::Complete { id, .. } | PairEntry::Missing { id, .. } => id,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum PairOutcome {
    Scored(Box<ScoreReport>),
    Failed(String),
    Skipped(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub id: String,
    pub golden_file: String,
    pub test_file: String,
    pub outcome: PairOutcome,
}

impl BatchRecord {
    pub fn report(&self) -> Option<&ScoreReport> {
        match &self.outcome {
            PairOutcome::Scored(report) => Some(report.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Size of the worker pool; rayon's default when unset.
    pub threads: Option<usize>,
    pub show_progress: bool,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

///
/// Pull the pair id out of a file name like `12_golden.json.gz`.
///
fn pair_id(path: &Path, suffix: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let name = name.strip_suffix(GZ_EXT).unwrap_or(name);
    let stem = name.strip_suffix(JSON_EXT)?.strip_suffix(suffix)?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Numeric ids first in numeric order, anything else after in text order.
fn sort_key(id: &str) -> (u64, String) {
    (id.parse::<u64>().unwrap_or(u64::MAX), id.to_string())
}

fn collect_side(dir: &Path, suffix: &str) -> BatchResult<BTreeMap<String, PathBuf>> {
    if !dir.is_dir() {
        return Err(BatchError::NotADirectory(dir.to_path_buf()));
    }

    let pattern = format!(
        "{}/*{}{}*",
        Pattern::escape(&dir.to_string_lossy()),
        suffix,
        JSON_EXT
    );

    let mut files = BTreeMap::new();
    for entry in glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };
        let Some(id) = pair_id(&path, suffix) else {
            continue;
        };
        if let Some(previous) = files.get(&id) {
            warn!("Duplicate pair id {}: keeping {:?}, ignoring {:?}", id, previous, path);
            continue;
        }
        files.insert(id, path);
    }

    Ok(files)
}

///
/// Find every `{n}_golden.json` / `{n}_detectron.json` pair across the two
/// directories. A `.gz` suffix is accepted on either side.
///
/// # Arguments
/// - golden_dir: directory with the reference files
/// - test_dir: directory with the candidate files
///
/// # Returns
/// One entry per id, sorted by numeric id.
///
pub fn discover_pairs(golden_dir: &Path, test_dir: &Path) -> BatchResult<Vec<PairEntry>> {
    let mut golden = collect_side(golden_dir, GOLDEN_SUFFIX)?;
    let mut test = collect_side(test_dir, CANDIDATE_SUFFIX)?;

    let mut ids: Vec<String> = golden.keys().chain(test.keys()).cloned().collect();
    ids.sort_by_key(|id| sort_key(id));
    ids.dedup();

    let pairs = ids
        .into_iter()
        .filter_map(|id| match (golden.remove(&id), test.remove(&id)) {
            (Some(golden), Some(test)) => Some(PairEntry::Complete { id, golden, test }),
            (Some(present), None) => Some(PairEntry::Missing {
                id,
                which: Side::Candidate,
                present,
            }),
            (None, Some(present)) => Some(PairEntry::Missing {
                id,
                which: Side::Golden,
                present,
            }),
            (None, None) => None,
        })
        .collect();

    Ok(pairs)
}

///
/// Load and score one golden/candidate pair.
///
pub fn compare_files(
    golden: &Path,
    test: &Path,
    policy: &ScoringPolicy,
) -> Result<ScoreReport, PedigreeError> {
    let golden = Pedigree::try_from(golden)?;
    let test = Pedigree::try_from(test)?;
    Ok(compare_pedigrees(&golden, &test, policy))
}

fn score_entry(entry: &PairEntry, policy: &ScoringPolicy) -> BatchRecord {
    match entry {
        PairEntry::Complete { id, golden, test } => {
            let outcome = match compare_files(golden, test, policy) {
                Ok(report) => PairOutcome::Scored(Box::new(report)),
                Err(e) => {
                    warn!("Pair {} failed: {}", id, e);
                    PairOutcome::Failed(e.to_string())
                }
            };
            BatchRecord {
                id: id.clone(),
                golden_file: file_label(golden),
                test_file: file_label(test),
                outcome,
            }
        }
        PairEntry::Missing { id, which, present } => {
            warn!("Pair {} has no {} file, skipping {:?}", id, which, present);
            let (golden_file, test_file) = match which {
                Side::Golden => (String::new(), file_label(present)),
                Side::Candidate => (file_label(present), String::new()),
            };
            BatchRecord {
                id: id.clone(),
                golden_file,
                test_file,
                outcome: PairOutcome::Skipped(format!("missing {} file", which)),
            }
        }
    }
}

///
/// Score every pair on a rayon pool. Records come back in the order of
/// `pairs` whatever order the workers finish in; a failing pair only marks
/// its own record.
///
/// # Arguments
/// - pairs: output of [discover_pairs] or any hand-built list
/// - policy: shared scoring policy
/// - options: pool size and progress display
///
pub fn run_batch(
    pairs: &[PairEntry],
    policy: &ScoringPolicy,
    options: &BatchOptions,
) -> BatchResult<Vec<BatchRecord>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let pb = if options.show_progress {
        let pb = ProgressBar::new(pairs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )?
            .progress_chars("##-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    info!(
        "Scoring {} pairs on {} threads",
        pairs.len(),
        pool.current_num_threads()
    );

    let records: Vec<BatchRecord> = pool.install(|| {
        pairs
            .par_iter()
            .map(|entry| {
                let record = score_entry(entry, policy);
                pb.inc(1);
                record
            })
            .collect()
    });

    pb.finish_with_message("done");

    let scored = records.iter().filter(|r| r.report().is_some()).count();
    info!("Scored {}/{} pairs", scored, records.len());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("1_golden.json", GOLDEN_SUFFIX, Some("1"))]
    #[case("12_golden.json.gz", GOLDEN_SUFFIX, Some("12"))]
    #[case("7_detectron.json", CANDIDATE_SUFFIX, Some("7"))]
    #[case("7_detectron.json", GOLDEN_SUFFIX, None)]
    #[case("_golden.json", GOLDEN_SUFFIX, None)]
    #[case("1_golden.txt", GOLDEN_SUFFIX, None)]
    fn test_pair_id(#[case] name: &str, #[case] suffix: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            pair_id(Path::new(name), suffix),
            expected.map(str::to_string)
        );
    }

    #[rstest]
    fn test_ids_sort_numerically() {
        let mut ids = vec!["10", "2", "abc", "1"];
        ids.sort_by_key(|id| sort_key(id));
        assert_eq!(ids, vec!["1", "2", "10", "abc"]);
    }

    #[rstest]
    fn test_missing_entry_is_skipped() {
        let entry = PairEntry::Missing {
            id: "4".to_string(),
            which: Side::Golden,
            present: PathBuf::from("4_detectron.json"),
        };
        let record = score_entry(&entry, &ScoringPolicy::default());
        assert_eq!(record.golden_file, "");
        assert_eq!(record.test_file, "4_detectron.json");
        assert_eq!(
            record.outcome,
            PairOutcome::Skipped("missing golden file".to_string())
        );
    }

    #[rstest]
    fn test_unreadable_pair_fails_alone() {
        let entry = PairEntry::Complete {
            id: "9".to_string(),
            golden: PathBuf::from("does/not/exist_golden.json"),
            test: PathBuf::from("does/not/exist_detectron.json"),
        };
        let record = score_entry(&entry, &ScoringPolicy::default());
        assert!(matches!(record.outcome, PairOutcome::Failed(_)));
    }

    #[rstest]
    fn test_discover_rejects_missing_dir() {
        let result = discover_pairs(Path::new("no/such/dir"), Path::new("no/such/dir"));
        assert!(matches!(result, Err(BatchError::NotADirectory(_))));
    }
}

pub const BASE_SCORE: f64 = 100.0;
pub const DEFAULT_OUT: &str = "pedscore_results.csv";
pub const GOLDEN_SUFFIX: &str = "_golden";
pub const CANDIDATE_SUFFIX: &str = "_detectron";
pub const JSON_EXT: &str = ".json";
pub const GZ_EXT: &str = ".gz";

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// Disease shading pattern drawn on a pedigree symbol. The shape is the
/// symbol shape (square for males, circle for females), the rest is the
/// fill pattern.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiseasePattern {
    CircleBottomHalfFilled,
    CircleCheckered,
    CircleCrossFilled,
    CircleDiagonalCheckered,
    CircleDiagonalStrokes,
    CircleFilled,
    CircleHorizontalStrokes,
    CircleLeftHalfFilled,
    CircleRightHalfFilled,
    CircleTopHalfFilled,
    CircleTopHalfStrokes,
    CircleTopLeftQuarterFilled,
    CircleTopRightQuarterFilled,
    CircleVerticalStrokes,
    SquareBottomHalfFilled,
    SquareCheckered,
    SquareCrossFilled,
    SquareDiagonalCheckered,
    SquareDiagonalStrokes,
    SquareFilled,
    SquareHorizontalStrokes,
    SquareLeftFilled,
    SquareRightFilled,
    SquareTopHalfFilled,
    SquareTopHalfStrokes,
    SquareTopLeftQuarterFilled,
    SquareTopRightQuarterFilled,
    SquareVerticalStrokes,
}

impl DiseasePattern {
    pub const ALL: [DiseasePattern; 28] = [
        DiseasePattern::CircleBottomHalfFilled,
        DiseasePattern::CircleCheckered,
        DiseasePattern::CircleCrossFilled,
        DiseasePattern::CircleDiagonalCheckered,
        DiseasePattern::CircleDiagonalStrokes,
        DiseasePattern::CircleFilled,
        DiseasePattern::CircleHorizontalStrokes,
        DiseasePattern::CircleLeftHalfFilled,
        DiseasePattern::CircleRightHalfFilled,
        DiseasePattern::CircleTopHalfFilled,
        DiseasePattern::CircleTopHalfStrokes,
        DiseasePattern::CircleTopLeftQuarterFilled,
        DiseasePattern::CircleTopRightQuarterFilled,
        DiseasePattern::CircleVerticalStrokes,
        DiseasePattern::SquareBottomHalfFilled,
        DiseasePattern::SquareCheckered,
        DiseasePattern::SquareCrossFilled,
        DiseasePattern::SquareDiagonalCheckered,
        DiseasePattern::SquareDiagonalStrokes,
        DiseasePattern::SquareFilled,
        DiseasePattern::SquareHorizontalStrokes,
        DiseasePattern::SquareLeftFilled,
        DiseasePattern::SquareRightFilled,
        DiseasePattern::SquareTopHalfFilled,
        DiseasePattern::SquareTopHalfStrokes,
        DiseasePattern::SquareTopLeftQuarterFilled,
        DiseasePattern::SquareTopRightQuarterFilled,
        DiseasePattern::SquareVerticalStrokes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiseasePattern::CircleBottomHalfFilled => "CIRCLE_BOTTOM_HALF_FILLED",
            DiseasePattern::CircleCheckered => "CIRCLE_CHECKERED",
            DiseasePattern::CircleCrossFilled => "CIRCLE_CROSS_FILLED",
            DiseasePattern::CircleDiagonalCheckered => "CIRCLE_DIAGONAL_CHECKERED",
            DiseasePattern::CircleDiagonalStrokes => "CIRCLE_DIAGONAL_STROKES",
            DiseasePattern::CircleFilled => "CIRCLE_FILLED",
            DiseasePattern::CircleHorizontalStrokes => "CIRCLE_HORIZONTAL_STROKES",
            DiseasePattern::CircleLeftHalfFilled => "CIRCLE_LEFT_HALF_FILLED",
            DiseasePattern::CircleRightHalfFilled => "CIRCLE_RIGHT_HALF_FILLED",
            DiseasePattern::CircleTopHalfFilled => "CIRCLE_TOP_HALF_FILLED",
            DiseasePattern::CircleTopHalfStrokes => "CIRCLE_TOP_HALF_STROKES",
            DiseasePattern::CircleTopLeftQuarterFilled => "CIRCLE_TOP_LEFT_QUARTER_FILLED",
            DiseasePattern::CircleTopRightQuarterFilled => "CIRCLE_TOP_RIGHT_QUARTER_FILLED",
            DiseasePattern::CircleVerticalStrokes => "CIRCLE_VERTICAL_STROKES",
            DiseasePattern::SquareBottomHalfFilled => "SQUARE_BOTTOM_HALF_FILLED",
            DiseasePattern::SquareCheckered => "SQUARE_CHECKERED",
            DiseasePattern::SquareCrossFilled => "SQUARE_CROSS_FILLED",
            DiseasePattern::SquareDiagonalCheckered => "SQUARE_DIAGONAL_CHECKERED",
            DiseasePattern::SquareDiagonalStrokes => "SQUARE_DIAGONAL_STROKES",
            DiseasePattern::SquareFilled => "SQUARE_FILLED",
            DiseasePattern::SquareHorizontalStrokes => "SQUARE_HORIZONTAL_STROKES",
            DiseasePattern::SquareLeftFilled => "SQUARE_LEFT_FILLED",
            DiseasePattern::SquareRightFilled => "SQUARE_RIGHT_FILLED",
            DiseasePattern::SquareTopHalfFilled => "SQUARE_TOP_HALF_FILLED",
            DiseasePattern::SquareTopHalfStrokes => "SQUARE_TOP_HALF_STROKES",
            DiseasePattern::SquareTopLeftQuarterFilled => "SQUARE_TOP_LEFT_QUARTER_FILLED",
            DiseasePattern::SquareTopRightQuarterFilled => "SQUARE_TOP_RIGHT_QUARTER_FILLED",
            DiseasePattern::SquareVerticalStrokes => "SQUARE_VERTICAL_STROKES",
        }
    }
}

impl FromStr for DiseasePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        DiseasePattern::ALL
            .iter()
            .find(|pattern| pattern.as_str() == wanted)
            .copied()
            .ok_or_else(|| format!("Unknown disease pattern: {}", s))
    }
}

impl Display for DiseasePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Status symbols that can decorate a pedigree node.
///
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusSymbol {
    AdoptedIn,
    AdoptedOut,
    Carrier,
    Deceased,
    Divorce,
    Patient,
    Pregnancy,
}

impl StatusSymbol {
    pub const ALL: [StatusSymbol; 7] = [
        StatusSymbol::AdoptedIn,
        StatusSymbol::AdoptedOut,
        StatusSymbol::Carrier,
        StatusSymbol::Deceased,
        StatusSymbol::Divorce,
        StatusSymbol::Patient,
        StatusSymbol::Pregnancy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusSymbol::AdoptedIn => "adopted_in",
            StatusSymbol::AdoptedOut => "adopted_out",
            StatusSymbol::Carrier => "carrier",
            StatusSymbol::Deceased => "deceased",
            StatusSymbol::Divorce => "divorce",
            StatusSymbol::Patient => "patient",
            StatusSymbol::Pregnancy => "pregnancy",
        }
    }
}

impl FromStr for StatusSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        StatusSymbol::ALL
            .iter()
            .find(|symbol| symbol.as_str() == wanted)
            .copied()
            .ok_or_else(|| format!("Unknown status symbol: {}", s))
    }
}

impl Display for StatusSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_disease_patterns_are_sorted_and_unique() {
        let names: Vec<&str> = DiseasePattern::ALL.iter().map(|p| p.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 28);
    }

    #[rstest]
    #[case("SQUARE_FILLED", DiseasePattern::SquareFilled)]
    #[case("circle_top_half_strokes", DiseasePattern::CircleTopHalfStrokes)]
    #[case(" CIRCLE_CHECKERED ", DiseasePattern::CircleCheckered)]
    fn test_disease_pattern_from_str(#[case] input: &str, #[case] expected: DiseasePattern) {
        assert_eq!(DiseasePattern::from_str(input), Ok(expected));
    }

    #[rstest]
    fn test_disease_pattern_serializes_like_its_name() {
        for pattern in DiseasePattern::ALL {
            let json = serde_json::to_string(&pattern).unwrap();
            assert_eq!(json, format!("\"{}\"", pattern.as_str()));
        }
    }

    #[rstest]
    fn test_unknown_symbol_is_rejected() {
        assert!(StatusSymbol::from_str("haunted").is_err());
        assert_eq!(StatusSymbol::from_str("Adopted_In"), Ok(StatusSymbol::AdoptedIn));
    }
}

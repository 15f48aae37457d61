use crate::error::LoadError;

/// Square matrix of precomputed pairwise similarity scores
///
/// Entry `(i, j)` scores catalog position `i` against position `j`. Scores are
/// opaque and only compared against each other.
#[derive(Debug, Clone)]
pub struct SimilarityTable {
    dimension: usize,
    /// Row-major scores, `dimension * dimension` entries
    scores: Vec<f64>,
}

impl SimilarityTable {
    /// Builds a table from its rows, rejecting ragged rows and non-finite scores
    ///
    /// Symmetry is assumed, not verified.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(LoadError::NotSquare {
                    row: row_index,
                    expected: dimension,
                    found: row.len(),
                });
            }
            if let Some(col) = row.iter().position(|score| !score.is_finite()) {
                return Err(LoadError::NonFiniteScore { row: row_index, col });
            }
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scores of `position` against every catalog position
    pub fn row(&self, position: usize) -> Option<&[f64]> {
        if position >= self.dimension {
            return None;
        }
        let start = position * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_addressable_by_position() {
        let table = SimilarityTable::from_rows(vec![vec![1.0, 0.2], vec![0.2, 1.0]]).unwrap();

        assert_eq!(table.dimension(), 2);
        assert_eq!(table.row(1), Some(&[0.2, 1.0][..]));
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let err = SimilarityTable::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();

        assert!(matches!(
            err,
            LoadError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_nan_score_is_rejected() {
        let err = SimilarityTable::from_rows(vec![vec![1.0, f64::NAN], vec![0.0, 1.0]]).unwrap_err();

        assert!(matches!(err, LoadError::NonFiniteScore { row: 0, col: 1 }));
    }

    #[test]
    fn test_empty_table_is_valid() {
        let table = SimilarityTable::from_rows(Vec::new()).unwrap();
        assert_eq!(table.dimension(), 0);
    }
}

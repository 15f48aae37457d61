use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::{
    error::LoadError,
    models::{MovieId, MovieRecord},
};

/// Ordered collection of movies, addressed by position
///
/// Positions are shared with the [`SimilarityTable`](super::SimilarityTable):
/// row `i` of the table describes `records[i]`.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<MovieRecord>,
    /// Lower-cased title → first position carrying that title
    title_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut title_index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            title_index
                .entry(record.title.to_lowercase())
                .or_insert(position);
        }

        Self {
            records,
            title_index,
        }
    }

    /// Resolves a title to its catalog position
    ///
    /// Matching is exact on the full title, ignoring case. When several
    /// movies share a title the first one wins.
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(&title.to_lowercase()).copied()
    }

    pub fn get(&self, position: usize) -> Option<&MovieRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }
}

/// Column layout written by the training pipeline, each column keyed by position
#[derive(Debug, Deserialize)]
struct CatalogColumns {
    movie_id: BTreeMap<usize, MovieId>,
    title: BTreeMap<usize, String>,
    #[serde(default)]
    tags: Option<BTreeMap<usize, String>>,
}

/// Decodes a JSON catalog document
///
/// Two layouts are accepted: an array of `{"movie_id", "title", "tags"}`
/// records, or the column layout `{"movie_id": {"0": ..}, "title": {..}, "tags": {..}}`.
pub(crate) fn records_from_json(path: &str, document: Value) -> Result<Vec<MovieRecord>, LoadError> {
    let json_error = |source| LoadError::Json {
        path: path.to_string(),
        source,
    };

    if document.is_array() {
        serde_json::from_value(document).map_err(json_error)
    } else {
        let columns: CatalogColumns = serde_json::from_value(document).map_err(json_error)?;
        columns.into_records()
    }
}

impl CatalogColumns {
    fn into_records(self) -> Result<Vec<MovieRecord>, LoadError> {
        let len = self.movie_id.len();
        let tags_len = self.tags.as_ref().map_or(len, BTreeMap::len);
        if self.title.len() != len || tags_len != len {
            return Err(LoadError::ColumnLengthMismatch {
                movie_id: len,
                title: self.title.len(),
                tags: tags_len,
            });
        }

        let ids = contiguous("movie_id", self.movie_id)?;
        let titles = contiguous("title", self.title)?;
        let tags = match self.tags {
            Some(tags) => contiguous("tags", tags)?,
            None => vec![String::new(); len],
        };

        Ok(ids
            .into_iter()
            .zip(titles)
            .zip(tags)
            .map(|((id, title), tag_text)| MovieRecord {
                id,
                title,
                tag_text,
            })
            .collect())
    }
}

/// Flattens a position-keyed column, requiring keys to be exactly `0..len`
fn contiguous<T>(column: &'static str, values: BTreeMap<usize, T>) -> Result<Vec<T>, LoadError> {
    let expected = values.len();
    values
        .into_iter()
        .enumerate()
        .map(|(expected_position, (position, value))| {
            if position == expected_position {
                Ok(value)
            } else {
                Err(LoadError::NonContiguousPositions { column, expected })
            }
        })
        .collect()
}

//! Catalog and similarity data loaded once at startup
//!
//! Both artifacts are produced offline by the training pipeline. They are
//! read in full before the server accepts requests and are never mutated
//! afterwards, so handlers share them through an `Arc` without locking.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    sync::Arc,
};

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use crate::{error::LoadError, models::MovieRecord};

pub mod catalog;
pub mod similarity;

pub use catalog::Catalog;
pub use similarity::SimilarityTable;

/// Compression wrapped around an artifact, chosen by the outer extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
    Gzip,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match extension(path) {
            Some("bz2") => Compression::Bzip2,
            Some("gz") => Compression::Gzip,
            _ => Compression::None,
        }
    }
}

/// Encoding of an artifact file, chosen by extension
///
/// For compressed files the inner extension decides, so
/// `similarity.bin.bz2` is bzip2-compressed bincode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Self {
        let inner = match Compression::from_path(path) {
            Compression::None => extension(path),
            Compression::Bzip2 | Compression::Gzip => path
                .file_stem()
                .and_then(|stem| Path::new(stem).extension())
                .and_then(|ext| ext.to_str()),
        };

        match inner {
            Some("bin") | Some("bincode") => ArtifactFormat::Bincode,
            _ => ArtifactFormat::Json,
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Catalog and similarity table, aligned by position
#[derive(Debug)]
pub struct Model {
    pub catalog: Catalog,
    pub similarity: SimilarityTable,
}

impl Model {
    /// Pairs a catalog with its similarity table
    ///
    /// The table must have exactly one row per catalog entry.
    pub fn new(catalog: Catalog, similarity: SimilarityTable) -> Result<Self, LoadError> {
        if catalog.len() != similarity.dimension() {
            return Err(LoadError::SizeMismatch {
                catalog: catalog.len(),
                table: similarity.dimension(),
            });
        }

        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Loads both artifacts from disk
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> Result<Self, LoadError> {
        let records = load_catalog_records(catalog_path)?;
        let rows: Vec<Vec<f64>> = read_artifact(similarity_path)?;

        Self::new(
            Catalog::from_records(records),
            SimilarityTable::from_rows(rows)?,
        )
    }
}

/// Process-wide model state, decided once at startup
#[derive(Debug, Clone)]
pub enum ModelState {
    Ready(Arc<Model>),
    /// Loading failed; every recommendation request is refused
    Unavailable { reason: String },
}

impl ModelState {
    /// Loads the model, degrading to [`ModelState::Unavailable`] instead of failing
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> Self {
        tracing::info!(
            catalog = %catalog_path.display(),
            similarity = %similarity_path.display(),
            "Loading model artifacts"
        );

        match Model::load(catalog_path, similarity_path) {
            Ok(model) => {
                tracing::info!(movies = model.catalog.len(), "Model loaded");
                ModelState::Ready(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(error = %e, "Model failed to load, recommendations disabled");
                ModelState::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn model(&self) -> Option<&Arc<Model>> {
        match self {
            ModelState::Ready(model) => Some(model),
            ModelState::Unavailable { .. } => None,
        }
    }
}

impl From<Model> for ModelState {
    fn from(model: Model) -> Self {
        ModelState::Ready(Arc::new(model))
    }
}

fn load_catalog_records(path: &Path) -> Result<Vec<MovieRecord>, LoadError> {
    match ArtifactFormat::from_path(path) {
        ArtifactFormat::Bincode => read_artifact(path),
        ArtifactFormat::Json => {
            let document: serde_json::Value = read_artifact(path)?;
            catalog::records_from_json(&path.display().to_string(), document)
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let file = BufReader::new(file);

    let reader: Box<dyn Read> = match Compression::from_path(path) {
        Compression::None => Box::new(file),
        Compression::Bzip2 => Box::new(BufReader::new(BzDecoder::new(file))),
        Compression::Gzip => Box::new(BufReader::new(GzDecoder::new(file))),
    };

    match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => {
            serde_json::from_reader(reader).map_err(|source| LoadError::Json {
                path: display,
                source,
            })
        }
        ArtifactFormat::Bincode => {
            bincode::deserialize_from(reader).map_err(|source| LoadError::Bincode {
                path: display,
                source,
            })
        }
    }
}

//! Load the survey and UI text documents
//!
//! `ContentLoader` fetches both documents from a `ContentSource` by their
//! well-known keys and parses them into one read-only `Content` value.
//! `ContentCache` keeps the parsed result for the rest of the process.

use crate::content::survey::{SurveyData, SurveyField};
use crate::content::ui_texts::UiTexts;
use ahash::AHashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Key of the survey document
pub const SURVEY_KEY: &str = "survey.json";
/// Key of the localized UI text bundle
pub const UI_TEXTS_KEY: &str = "ui-texts.json";

/// Errors that can occur when loading content
#[derive(Debug, Error)]
pub enum ContentError {
    /// JSON parsing failed
    #[error("Failed to parse {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Document could not be read
    #[error("Failed to read {key}: {source}")]
    Fetch {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// Source has no document under this key
    #[error("Content document not found: {0}")]
    Missing(String),
}

/// Anything that can hand out raw documents by key
pub trait ContentSource {
    fn fetch(&self, key: &str) -> Result<String, ContentError>;
}

/// Reads documents from files in a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for DirectorySource {
    fn fetch(&self, key: &str) -> Result<String, ContentError> {
        let path = self.root.join(key);
        if !path.exists() {
            return Err(ContentError::Missing(path.display().to_string()));
        }
        std::fs::read_to_string(&path).map_err(|source| ContentError::Fetch {
            key: key.to_string(),
            source,
        })
    }
}

/// Both documents, parsed and indexed
#[derive(Debug)]
pub struct Content {
    pub survey: SurveyData,
    pub ui_texts: UiTexts,
    index_by_id: AHashMap<String, usize>,
}

/// Shared read-only handle passed to the engine
pub type ContentHandle = Arc<Content>;

impl Content {
    pub fn new(survey: SurveyData, ui_texts: UiTexts) -> Self {
        let index_by_id = survey
            .gameboard
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self {
            survey,
            ui_texts,
            index_by_id,
        }
    }

    /// Parse both documents from JSON strings
    pub fn from_json(survey_json: &str, ui_texts_json: &str) -> Result<Self, ContentError> {
        let survey: SurveyData =
            serde_json::from_str(survey_json).map_err(|source| ContentError::Parse {
                key: SURVEY_KEY.to_string(),
                source,
            })?;
        let ui_texts: UiTexts =
            serde_json::from_str(ui_texts_json).map_err(|source| ContentError::Parse {
                key: UI_TEXTS_KEY.to_string(),
                source,
            })?;
        Ok(Self::new(survey, ui_texts))
    }

    pub fn fields(&self) -> &[SurveyField] {
        &self.survey.gameboard
    }

    pub fn field_count(&self) -> usize {
        self.survey.gameboard.len()
    }

    pub fn field(&self, index: usize) -> Option<&SurveyField> {
        self.survey.gameboard.get(index)
    }

    pub fn index_of(&self, field_id: &str) -> Option<usize> {
        self.index_by_id.get(field_id).copied()
    }

    pub fn contains_field(&self, field_id: &str) -> bool {
        self.index_by_id.contains_key(field_id)
    }
}

/// Loader that turns a source into parsed `Content`
pub struct ContentLoader<'a, S: ContentSource> {
    source: &'a S,
}

impl<'a, S: ContentSource> ContentLoader<'a, S> {
    /// Create a new loader over the given source
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch and parse both documents
    pub fn load(&self) -> Result<Content, ContentError> {
        let survey_json = self.source.fetch(SURVEY_KEY)?;
        let ui_texts_json = self.source.fetch(UI_TEXTS_KEY)?;
        let content = Content::from_json(&survey_json, &ui_texts_json)?;
        tracing::info!(
            "Loaded survey v{} ({}) with {} fields",
            content.survey.version,
            content.survey.language,
            content.field_count()
        );
        Ok(content)
    }
}

/// Process-scoped, lazily initialized content handle
#[derive(Debug, Default)]
pub struct ContentCache {
    cell: OnceLock<ContentHandle>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached handle, loading it from `source` on first use
    ///
    /// A failed load leaves the cache empty so a later call can retry.
    pub fn get_or_load<S: ContentSource>(&self, source: &S) -> Result<ContentHandle, ContentError> {
        if let Some(handle) = self.cell.get() {
            return Ok(Arc::clone(handle));
        }
        let content = Arc::new(ContentLoader::new(source).load()?);
        Ok(Arc::clone(self.cell.get_or_init(|| content)))
    }
}

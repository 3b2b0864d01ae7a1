//! Survey content and localized UI text
//!
//! Both documents are read-only for the lifetime of the process and are
//! shared with the engine through a single `ContentHandle`.

pub mod loader;
pub mod survey;
pub mod ui_texts;

pub use loader::{
    Content, ContentCache, ContentError, ContentHandle, ContentLoader, ContentSource,
    DirectorySource, SURVEY_KEY, UI_TEXTS_KEY,
};
pub use survey::{SurveyData, SurveyField, SurveyOption};
pub use ui_texts::UiTexts;

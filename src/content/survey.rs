//! Survey content document: the ordered field sequence and its prompt strings

use crate::core::types::{InterpretationGroup, OptionKey};
use serde::{Deserialize, Serialize};

/// Top-level survey document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyData {
    pub version: String,
    pub language: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fields: PromptStrings,
    #[serde(default)]
    pub levels_note: String,
    /// Fields in canonical order; position is the field index
    pub gameboard: Vec<SurveyField>,
}

/// Static prompt strings shared by every field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptStrings {
    pub selection_prompt: String,
    pub pledge_title: String,
}

/// One scenario unit of the survey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyField {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub situation: String,
    #[serde(default)]
    pub hallucination_example: Option<String>,
    pub prompt: String,
    pub options: Vec<SurveyOption>,
    pub interpretation: Interpretation,
    pub recommendation_title: String,
    pub recommendation: String,
    pub pledge: PledgeOffer,
    #[serde(default)]
    pub optional_end_screen: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyOption {
    pub key: OptionKey,
    pub text: String,
}

/// Observation text per interpretation group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    #[serde(rename = "A_B")]
    pub a_b: String,
    #[serde(rename = "C_D")]
    pub c_d: String,
}

impl Interpretation {
    pub fn for_group(&self, group: InterpretationGroup) -> &str {
        match group {
            InterpretationGroup::AB => &self.a_b,
            InterpretationGroup::CD => &self.c_d,
        }
    }
}

/// Follow-up commitments offered after answering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeOffer {
    pub timeframe: String,
    pub choices: Vec<String>,
}

impl SurveyField {
    /// Text of the given option, if this field offers it
    pub fn option_text(&self, key: OptionKey) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.text.as_str())
    }

    /// Observation shown after the given option is chosen
    pub fn observation(&self, key: OptionKey) -> &str {
        self.interpretation.for_group(key.interpretation_group())
    }
}

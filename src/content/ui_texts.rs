//! Localized UI text bundle, one section per view

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTexts {
    pub boot: BootTexts,
    pub help: HelpTexts,
    pub hub: HubTexts,
    pub field: FieldTexts,
    pub pledge: PledgeTexts,
    pub summary: SummaryTexts,
    pub export: ExportTexts,
    pub reset: ResetTexts,
    pub end_screen: EndScreenTexts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootTexts {
    pub title: String,
    #[serde(default)]
    pub ascii_logo: Option<Vec<String>>,
    pub lines: Vec<String>,
    pub buttons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpTexts {
    pub title: String,
    pub commands: Vec<HelpCommand>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpCommand {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubTexts {
    pub title: String,
    pub description: String,
    pub status: HubStatusTexts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubStatusTexts {
    pub completed: String,
    pub not_completed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTexts {
    pub selection_prompt: String,
    pub observation_title: String,
    pub recommendation_title: String,
    pub recommendation_subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeTexts {
    pub title: String,
    pub description: Vec<String>,
    pub buttons: PledgeButtons,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeButtons {
    pub save: String,
    pub skip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTexts {
    pub title: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportTexts {
    pub title: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTexts {
    pub title: String,
    pub description: Vec<String>,
    pub buttons: ResetButtons,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetButtons {
    pub confirm: String,
    pub cancel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndScreenTexts {
    pub lines: Vec<String>,
}

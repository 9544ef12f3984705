use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Ids are opaque strings; freshly created records get a UUID v4.
pub type Id = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Card {
    pub id: Id,
    pub title: String,
    pub content: String,
}

/// Request body for `POST /card`. Fields are optional so that a missing
/// field surfaces as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewCard {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Id,
    pub header: String,
    pub card_ids: Vec<Id>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewList {
    pub header: Option<String>,
    pub card_ids: Option<Vec<Id>>,
}

impl NewCard {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: Some(title.into()), content: Some(content.into()) }
    }
}

impl NewList {
    pub fn new(header: impl Into<String>, card_ids: Vec<Id>) -> Self {
        Self { header: Some(header.into()), card_ids: Some(card_ids) }
    }
}

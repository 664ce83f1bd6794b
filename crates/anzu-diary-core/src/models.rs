use serde::{Deserialize, Serialize};

/// A single diary entry as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub date: String,
    pub content: String,
}

/// Body of `GET /diary?year=..`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryPage {
    pub items: Vec<DiaryEntry>,
}

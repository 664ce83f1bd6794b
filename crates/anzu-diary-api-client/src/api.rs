//! Domain methods for the diary API.

use crate::ApiClient;
use anzu_diary_core::{DiaryEntry, DiaryError, DiaryPage};

pub const DIARY_PATH: &str = "/diary";

impl ApiClient {
    /// Append an entry: `POST /diary?date=..&content=..`.
    pub async fn add_entry(&self, date: &str, content: &str) -> Result<(), DiaryError> {
        self.post_query(
            DIARY_PATH,
            &[("date", date.to_string()), ("content", content.to_string())],
        )
        .await
    }

    /// All entries of a year, in backend order: `GET /diary?year=..`.
    pub async fn list_entries(&self, year: i32) -> Result<Vec<DiaryEntry>, DiaryError> {
        let page: DiaryPage = self.get(DIARY_PATH, &[("year", year.to_string())]).await?;
        Ok(page.items)
    }
}

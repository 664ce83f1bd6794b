//! Tool dispatcher
//!
//! Turns a tool name plus argument mapping into one diary API call and
//! renders the outcome as text.

use crate::tools::ToolRequest;
use anzu_diary_api_client::ApiClient;
use anzu_diary_core::{DiaryEntry, DiaryError};
use rmcp::model::JsonObject;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DiaryDispatcher {
    api_client: Arc<ApiClient>,
}

impl DiaryDispatcher {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            api_client: Arc::new(api_client),
        }
    }

    /// Validate and run one tool call. Malformed calls fail before any
    /// request is sent.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<String, DiaryError> {
        let request = ToolRequest::decode(name, arguments)?;
        self.execute(request).await
    }

    pub async fn execute(&self, request: ToolRequest) -> Result<String, DiaryError> {
        match request {
            ToolRequest::AddNote(req) => {
                self.api_client.add_entry(&req.date, &req.content).await?;
                Ok(format!("Added content: {}", req.content))
            }
            ToolRequest::GetNote(req) => {
                let entries = self.api_client.list_entries(req.year).await?;
                tracing::debug!(year = req.year, count = entries.len(), "Fetched diary entries");
                Ok(format_entries(&entries))
            }
        }
    }
}

/// One `date {date} \n内容: {content}` block per entry, newline separated.
pub fn format_entries(entries: &[DiaryEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("date {} \n内容: {}", entry.date, entry.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ADD_NOTE, GET_NOTE};
    use mockito::Matcher;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(object) => object,
            other => panic!("expected object, got {}", other),
        }
    }

    fn dispatcher_for(server: &mockito::ServerGuard) -> DiaryDispatcher {
        DiaryDispatcher::new(ApiClient::new(&server.url(), Duration::from_secs(5)).unwrap())
    }

    #[test]
    fn test_format_entries() {
        let entries = vec![
            DiaryEntry {
                date: "2024-02-01".into(),
                content: "A".into(),
            },
            DiaryEntry {
                date: "2024-03-01".into(),
                content: "B".into(),
            },
        ];
        assert_eq!(
            format_entries(&entries),
            "date 2024-02-01 \n内容: A\ndate 2024-03-01 \n内容: B"
        );
        assert_eq!(format_entries(&[]), "");
    }

    #[tokio::test]
    async fn test_add_note_posts_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/diary")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("date".into(), "2024-01-01".into()),
                Matcher::UrlEncoded("content".into(), "hello".into()),
            ]))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let text = dispatcher_for(&server)
            .invoke(
                ADD_NOTE,
                Some(&args(json!({"date": "2024-01-01", "content": "hello"}))),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(text.contains("hello"));
        assert_eq!(text, "Added content: hello");
    }

    #[tokio::test]
    async fn test_add_note_missing_content_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = dispatcher_for(&server)
            .invoke(ADD_NOTE, Some(&args(json!({"date": "2024-01-01"}))))
            .await
            .unwrap_err();

        assert!(matches!(err, DiaryError::MissingArgument(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_note_backend_failure_is_not_silent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/diary")
            .match_query(Matcher::Any)
            .with_status(422)
            .with_body("bad date")
            .create_async()
            .await;

        let err = dispatcher_for(&server)
            .invoke(
                ADD_NOTE,
                Some(&args(json!({"date": "yesterday", "content": "hello"}))),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DiaryError::BackendError {
                status: Some(422),
                ..
            }
        ));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_get_note_formats_lines() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/diary")
            .match_query(Matcher::UrlEncoded("year".into(), "2024".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items":[{"date":"2024-02-01","content":"A"},{"date":"2024-03-01","content":"B"}]}"#,
            )
            .create_async()
            .await;

        let text = dispatcher_for(&server)
            .invoke(GET_NOTE, Some(&args(json!({"year": 2024}))))
            .await
            .unwrap();

        mock.assert_async().await;
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(
            lines,
            vec!["date 2024-02-01 ", "内容: A", "date 2024-03-01 ", "内容: B"]
        );
    }

    #[tokio::test]
    async fn test_get_note_empty_year_is_empty_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/diary")
            .match_query(Matcher::UrlEncoded("year".into(), "1999".into()))
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let text = dispatcher_for(&server)
            .invoke(GET_NOTE, Some(&args(json!({"year": 1999}))))
            .await
            .unwrap();

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_get_note_is_idempotent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/diary")
            .match_query(Matcher::UrlEncoded("year".into(), "2024".into()))
            .with_status(200)
            .with_body(r#"{"items":[{"date":"2024-05-05","content":"こどもの日"}]}"#)
            .expect(2)
            .create_async()
            .await;

        let dispatcher = dispatcher_for(&server);
        let arguments = args(json!({"year": 2024}));
        let first = dispatcher.invoke(GET_NOTE, Some(&arguments)).await.unwrap();
        let second = dispatcher.invoke(GET_NOTE, Some(&arguments)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(first, "date 2024-05-05 \n内容: こどもの日");
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let get = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = dispatcher_for(&server)
            .invoke("unknown-tool", Some(&JsonObject::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, DiaryError::InvalidToolName(_)));
        post.assert_async().await;
        get.assert_async().await;
    }
}

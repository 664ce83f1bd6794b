//! MCP tool request types with JSON Schema for AI parameter generation
//!
//! The catalog descriptors are derived from the same types the dispatcher
//! decodes into, so the advertised contract is the enforced one.

use anzu_diary_core::DiaryError;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub const ADD_NOTE: &str = "add-note";
pub const GET_NOTE: &str = "get-note";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddNoteRequest {
    #[schemars(description = "Date of the entry, e.g. 2024-01-01")]
    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: String,
    #[schemars(description = "Text of the diary entry")]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct GetNoteRequest {
    #[schemars(description = "Year whose entries should be returned")]
    #[validate(range(min = 1, message = "year must be positive"))]
    pub year: i32,
}

/// The tools this server declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaryTool {
    AddNote,
    GetNote,
}

impl DiaryTool {
    pub const ALL: [DiaryTool; 2] = [DiaryTool::AddNote, DiaryTool::GetNote];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AddNote => ADD_NOTE,
            Self::GetNote => GET_NOTE,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AddNote => "日記を追加します",
            Self::GetNote => "指定された年の日記を取得します",
        }
    }

    pub fn input_schema(self) -> JsonObject {
        match self {
            Self::AddNote => schema_object::<AddNoteRequest>(),
            Self::GetNote => schema_object::<GetNoteRequest>(),
        }
    }

    pub fn descriptor(self) -> Tool {
        Tool::new(self.name(), self.description(), Arc::new(self.input_schema()))
    }
}

/// Tool Catalog: every declared tool, in a fixed order.
pub fn list_tools() -> Vec<Tool> {
    DiaryTool::ALL.iter().map(|tool| tool.descriptor()).collect()
}

fn schema_object<T: JsonSchema>() -> JsonObject {
    let mut object = match schemars::schema_for!(T).to_value() {
        Value::Object(object) => object,
        _ => JsonObject::new(),
    };
    object.remove("$schema");
    object
}

/// A tool call decoded from the generic argument mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    AddNote(AddNoteRequest),
    GetNote(GetNoteRequest),
}

impl ToolRequest {
    /// Resolve the tool, check the schema's required keys, then decode into
    /// the tool's request type. Nothing here touches the network.
    pub fn decode(name: &str, arguments: Option<&JsonObject>) -> Result<Self, DiaryError> {
        let tool = DiaryTool::from_name(name)
            .ok_or_else(|| DiaryError::InvalidToolName(name.to_string()))?;

        let empty = JsonObject::new();
        let arguments = arguments.unwrap_or(&empty);
        check_required(&tool.input_schema(), arguments)?;

        let value = Value::Object(arguments.clone());
        match tool {
            DiaryTool::AddNote => {
                let request: AddNoteRequest = parse_arguments(value)?;
                validate_fields(&request)?;
                Ok(Self::AddNote(request))
            }
            DiaryTool::GetNote => {
                let request: GetNoteRequest = parse_arguments(value)?;
                validate_fields(&request)?;
                Ok(Self::GetNote(request))
            }
        }
    }

    pub fn tool(&self) -> DiaryTool {
        match self {
            Self::AddNote(_) => DiaryTool::AddNote,
            Self::GetNote(_) => DiaryTool::GetNote,
        }
    }
}

fn check_required(schema: &JsonObject, arguments: &JsonObject) -> Result<(), DiaryError> {
    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    for key in required.iter().filter_map(Value::as_str) {
        if matches!(arguments.get(key), None | Some(Value::Null)) {
            return Err(DiaryError::MissingArgument(key.to_string()));
        }
    }
    Ok(())
}

fn parse_arguments<T: DeserializeOwned>(value: Value) -> Result<T, DiaryError> {
    serde_json::from_value(value).map_err(|e| DiaryError::InvalidArgument(e.to_string()))
}

// Rules only reject empty strings and non-positive years, so a failing field
// counts as missing.
fn validate_fields<T: Validate>(request: &T) -> Result<(), DiaryError> {
    request.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        DiaryError::MissingArgument(fields.join(", "))
    })
}

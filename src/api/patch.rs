//
//  spotctl
//  api/patch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Patch Operations
//!
//! Edits are expressed as RFC 6902 JSON Patch documents: a JSON array of
//! operations applied in order to the server-side object.
//!
//! ```json
//! [
//!   {"op": "replace", "path": "/spec/desired", "value": 3},
//!   {"op": "remove", "path": "/spec/customLabels/team"}
//! ]
//! ```
//!
//! This module loads such documents from disk, validates their shape and
//! renders them for review before they are sent.
//!
//! ## Notes
//!
//! - `value` is omitted from the wire form when absent, but an explicit
//!   `null` is preserved (`replace` with `null` is a legitimate operation).
//! - An empty array is a valid document; callers decide whether applying
//!   nothing is an error.

use std::fmt::{self, Write as _};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::common::ApiError;

/// Operation names defined by RFC 6902.
pub const PATCH_OPS: [&str; 6] = ["add", "remove", "replace", "move", "copy", "test"];

/// A single RFC 6902 operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: String,

    pub path: String,

    /// Source pointer for `move` and `copy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// `None` when absent, `Some(Value::Null)` for an explicit `null`.
    #[serde(
        default,
        deserialize_with = "explicit_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

fn explicit_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PatchOperation {
    pub fn new(op: impl Into<String>, path: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            op: op.into(),
            path: path.into(),
            from: None,
            value,
        }
    }

    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new("add", path, Some(value.into()))
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new("replace", path, Some(value.into()))
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::new("remove", path, None)
    }

    /// Checks the operation name and that `path` is a JSON pointer.
    pub fn validate(&self) -> Result<(), String> {
        if !PATCH_OPS.contains(&self.op.as_str()) {
            return Err(format!(
                "unsupported op '{}' (expected one of: {})",
                self.op,
                PATCH_OPS.join(", ")
            ));
        }
        if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(format!("path '{}' must start with '/'", self.path));
        }
        if matches!(self.op.as_str(), "move" | "copy") && self.from.is_none() {
            return Err(format!("'{}' requires a 'from' pointer", self.op));
        }
        if matches!(self.op.as_str(), "add" | "replace" | "test") && self.value.is_none() {
            return Err(format!("'{}' requires a 'value'", self.op));
        }
        Ok(())
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.path)?;
        if let Some(from) = &self.from {
            write!(f, " from {from}")?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {}", format_value(value))?;
        }
        Ok(())
    }
}

/// Renders a patch value for humans.
///
/// Strings are quoted, whole numbers print without a fractional part, and
/// everything else is compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => Value::String(s.clone()).to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                    _ => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

/// Parses a JSON Patch document.
///
/// # Errors
///
/// [`ApiError::Validation`] if `content` is not a JSON array of well-formed
/// operations.
pub fn parse_patch_operations(content: &str) -> Result<Vec<PatchOperation>, ApiError> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| ApiError::validation(format!("failed to parse JSON patch operations: {e}")))?;

    if !document.is_array() {
        return Err(ApiError::validation(
            "failed to parse JSON patch operations: expected a JSON array of operations",
        ));
    }

    let operations: Vec<PatchOperation> = serde_json::from_value(document)
        .map_err(|e| ApiError::validation(format!("failed to parse JSON patch operations: {e}")))?;

    for (index, operation) in operations.iter().enumerate() {
        operation.validate().map_err(|reason| {
            ApiError::validation(format!("invalid patch operation {}: {reason}", index + 1))
        })?;
    }

    Ok(operations)
}

/// Reads and parses a JSON Patch document from `path`.
///
/// # Errors
///
/// - [`ApiError::Internal`] if the file cannot be read
/// - [`ApiError::Validation`] if its content is not a valid patch document
pub fn load_patch_operations(path: impl AsRef<Path>) -> Result<Vec<PatchOperation>, ApiError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::internal(format!("failed to read file {}", path.display()), e))?;
    parse_patch_operations(&content)
}

/// Formats operations as the review block printed before an edit.
///
/// ```text
/// Applying 2 patch operation(s):
///   1. replace /spec/desired = 3
///   2. remove /spec/customLabels/team
///
/// ```
pub fn format_patch_operations(operations: &[PatchOperation]) -> String {
    let mut out = format!("Applying {} patch operation(s):\n", operations.len());
    for (index, operation) in operations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, operation);
    }
    out.push('\n');
    out
}

/// Prints [`format_patch_operations`] to stdout.
pub fn display_patch_operations(operations: &[PatchOperation]) {
    print!("{}", format_patch_operations(operations));
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;
    use crate::api::common::ErrorKind;

    fn patch_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_display() {
        let file = patch_file(r#"[{"op":"replace","path":"/spec/webhook","value":"https://x"}]"#);
        let ops = load_patch_operations(file.path()).unwrap();

        assert_eq!(ops.len(), 1);
        assert_eq!(
            format_patch_operations(&ops),
            "Applying 1 patch operation(s):\n  1. replace /spec/webhook = \"https://x\"\n\n"
        );
    }

    #[test]
    fn test_empty_document_is_valid() {
        let file = patch_file("[]");
        let ops = load_patch_operations(file.path()).unwrap();
        assert!(ops.is_empty());
        assert_eq!(format_patch_operations(&ops), "Applying 0 patch operation(s):\n\n");
    }

    #[test]
    fn test_object_document_is_rejected() {
        let err = parse_patch_operations(r#"{"op":"add"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = parse_patch_operations("[{").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_missing_file_is_internal() {
        let err = load_patch_operations("/definitely/not/here.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let err = parse_patch_operations(r#"[{"op":"merge","path":"/spec"}]"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid patch operation 1"));
    }

    #[test]
    fn test_explicit_null_is_preserved() {
        let ops = parse_patch_operations(
            r#"[{"op":"replace","path":"/spec/bidPrice","value":null},{"op":"remove","path":"/spec/x"}]"#,
        )
        .unwrap();

        assert_eq!(ops[0].value, Some(Value::Null));
        assert_eq!(ops[1].value, None);

        let wire = serde_json::to_value(&ops).unwrap();
        assert_eq!(
            wire,
            json!([
                {"op": "replace", "path": "/spec/bidPrice", "value": null},
                {"op": "remove", "path": "/spec/x"}
            ])
        );
    }

    #[test]
    fn test_value_formatting() {
        let ops = vec![
            PatchOperation::replace("/spec/desired", 3),
            PatchOperation::replace("/spec/bidPrice", 0.25),
            PatchOperation::replace("/spec/HAControlPlane", true),
            PatchOperation::add("/spec/customLabels", json!({"team": "infra"})),
            PatchOperation::remove("/spec/webhook"),
            PatchOperation::replace("/spec/desired", 4.0),
        ];

        assert_eq!(
            format_patch_operations(&ops),
            "Applying 6 patch operation(s):\n\
             \x20 1. replace /spec/desired = 3\n\
             \x20 2. replace /spec/bidPrice = 0.25\n\
             \x20 3. replace /spec/HAControlPlane = true\n\
             \x20 4. add /spec/customLabels = {\"team\":\"infra\"}\n\
             \x20 5. remove /spec/webhook\n\
             \x20 6. replace /spec/desired = 4\n\n"
        );
    }

    #[test]
    fn test_fractional_numbers_use_json_form() {
        assert_eq!(format_value(&json!(1e-7)), "1e-7");
        assert_eq!(format_value(&json!(1.5)), "1.5");
        assert_eq!(format_value(&json!(-2.0)), "-2");
    }
}

//! JSON:API document model and codec.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jsonapi::DocumentError;
use crate::rest::Resource;

/// How the `data` member of a document is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    /// `data` is a single resource object (or `null`).
    Single,
    /// `data` is an array of resource objects.
    List,
}

/// A single entity as transmitted: type, id and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRepresentation {
    /// The resource type (e.g., `resource-groups`).
    pub resource_type: String,
    /// The resource identifier.
    pub id: String,
    /// Attribute values, excluding the identifier.
    pub attributes: Map<String, Value>,
}

impl ResourceRepresentation {
    /// Builds the representation of a resource.
    ///
    /// The resource is serialized to a JSON object; the key named by
    /// [`Resource::ID_ATTRIBUTE`] is moved out of the attributes and into `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyIdentity`] if the type or id is empty, and
    /// [`DocumentError::Attributes`] / [`DocumentError::AttributesNotAnObject`]
    /// if the resource cannot be serialized to a JSON object.
    pub fn from_resource<R: Resource>(resource: &R) -> Result<Self, DocumentError> {
        let resource_type = resource.resource_type();
        let id = resource.id();
        if resource_type.is_empty() || id.is_empty() {
            return Err(DocumentError::EmptyIdentity {
                resource_type: resource_type.to_string(),
            });
        }

        let Value::Object(mut attributes) =
            serde_json::to_value(resource).map_err(DocumentError::Attributes)?
        else {
            return Err(DocumentError::AttributesNotAnObject {
                resource_type: resource_type.to_string(),
            });
        };
        attributes.remove(R::ID_ATTRIBUTE);

        Ok(Self {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
            attributes,
        })
    }

    /// Writes this representation onto a caller-owned resource.
    ///
    /// Attributes present in the representation overwrite the target's
    /// values; attributes the server omitted keep their current values.
    /// The identifier is written under [`Resource::ID_ATTRIBUTE`].
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::TypeMismatch`] if the representation is of
    /// another resource type, or [`DocumentError::Attributes`] if the merged
    /// values do not deserialize into `R`. The target is left unmodified on
    /// error.
    pub fn unmarshal_onto<R: Resource>(&self, target: &mut R) -> Result<(), DocumentError> {
        if self.resource_type != R::RESOURCE_TYPE {
            return Err(DocumentError::TypeMismatch {
                expected: R::RESOURCE_TYPE,
                found: self.resource_type.clone(),
            });
        }

        let Value::Object(mut merged) =
            serde_json::to_value(&*target).map_err(DocumentError::Attributes)?
        else {
            return Err(DocumentError::AttributesNotAnObject {
                resource_type: R::RESOURCE_TYPE.to_string(),
            });
        };
        for (key, value) in &self.attributes {
            merged.insert(key.clone(), value.clone());
        }
        merged.insert(R::ID_ATTRIBUTE.to_string(), Value::String(self.id.clone()));

        *target = serde_json::from_value(Value::Object(merged)).map_err(DocumentError::Attributes)?;
        Ok(())
    }

    fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.resource_type.clone()));
        object.insert("id".to_string(), Value::String(self.id.clone()));
        object.insert("attributes".to_string(), Value::Object(self.attributes.clone()));
        Value::Object(object)
    }

    fn from_value(value: Value, member: &'static str) -> Result<Self, DocumentError> {
        let Value::Object(mut object) = value else {
            return Err(DocumentError::InvalidMember {
                member,
                expected: "a resource object",
            });
        };

        let resource_type = take_identity(&mut object, "type")?;
        let id = take_identity(&mut object, "id")?;
        let attributes = match object.remove("attributes") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(attributes)) => attributes,
            Some(_) => {
                return Err(DocumentError::InvalidMember {
                    member: "attributes",
                    expected: "an object",
                })
            }
        };

        Ok(Self {
            resource_type,
            id,
            attributes,
        })
    }
}

fn take_identity(
    object: &mut Map<String, Value>,
    member: &'static str,
) -> Result<String, DocumentError> {
    match object.remove(member) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value),
        _ => Err(DocumentError::MissingMember { member }),
    }
}

/// A JSON:API error object.
///
/// Only `detail` is used for error reporting; the other members are kept
/// for callers that want to inspect them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable explanation of the problem.
    #[serde(default)]
    pub detail: String,
    /// Short summary of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP status code, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Application-specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// The wire-level JSON:API envelope.
///
/// A document is built per call and used once. The HTTP status of the
/// response that produced it is recorded during decoding and cannot be
/// changed afterwards.
///
/// # Example
///
/// ```rust
/// use kel_api::jsonapi::{Document, DocumentMode};
///
/// let body = br#"{"data":[{"type":"sites","id":"www","attributes":{}}]}"#;
/// let document = Document::decode(body, DocumentMode::List).unwrap();
///
/// assert_eq!(document.data.len(), 1);
/// assert_eq!(document.data[0].id, "www");
/// assert_eq!(document.status(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// How `data` is shaped on the wire.
    pub mode: DocumentMode,
    /// The primary resource representations.
    pub data: Vec<ResourceRepresentation>,
    /// Error objects, in the order the server reported them.
    pub errors: Vec<ErrorDetail>,
    /// Related resources requested with `include`.
    pub included: Vec<ResourceRepresentation>,
    status: Option<u16>,
}

impl Document {
    /// Creates an empty document in the given mode.
    #[must_use]
    pub const fn new(mode: DocumentMode) -> Self {
        Self {
            mode,
            data: Vec::new(),
            errors: Vec::new(),
            included: Vec::new(),
            status: None,
        }
    }

    /// Wraps a resource into a single-object document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the resource cannot be represented
    /// (see [`ResourceRepresentation::from_resource`]).
    pub fn encode<R: Resource>(resource: &R) -> Result<Self, DocumentError> {
        let mut document = Self::new(DocumentMode::Single);
        document.data.push(ResourceRepresentation::from_resource(resource)?);
        Ok(document)
    }

    /// Parses a response body.
    ///
    /// In [`DocumentMode::Single`] `data` must be an object, `null` or
    /// absent; in [`DocumentMode::List`] it must be an array, `null` or
    /// absent. An empty body decodes to an empty document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the body is not valid JSON, is not a
    /// JSON object, has a `data` member of the wrong shape, or contains a
    /// resource object without `type` or `id`.
    pub fn decode(body: &[u8], mode: DocumentMode) -> Result<Self, DocumentError> {
        let mut document = Self::new(mode);
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(document);
        }

        let value: Value = serde_json::from_slice(body).map_err(DocumentError::InvalidJson)?;
        let Value::Object(mut top) = value else {
            return Err(DocumentError::NotAnObject);
        };

        document.data = match (mode, top.remove("data")) {
            (_, None | Some(Value::Null)) => Vec::new(),
            (DocumentMode::Single, Some(object @ Value::Object(_))) => {
                vec![ResourceRepresentation::from_value(object, "data")?]
            }
            (DocumentMode::List, Some(Value::Array(items))) => items
                .into_iter()
                .map(|item| ResourceRepresentation::from_value(item, "data"))
                .collect::<Result<_, _>>()?,
            (DocumentMode::Single, Some(other)) => {
                return Err(DocumentError::UnexpectedData {
                    expected: "a resource object or null",
                    found: json_kind(&other),
                })
            }
            (DocumentMode::List, Some(other)) => {
                return Err(DocumentError::UnexpectedData {
                    expected: "an array or null",
                    found: json_kind(&other),
                })
            }
        };

        document.included = match top.remove("included") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| ResourceRepresentation::from_value(item, "included"))
                .collect::<Result<_, _>>()?,
            Some(_) => {
                return Err(DocumentError::InvalidMember {
                    member: "included",
                    expected: "an array",
                })
            }
        };

        document.errors = match top.remove("errors") {
            None | Some(Value::Null) => Vec::new(),
            Some(errors @ Value::Array(_)) => {
                serde_json::from_value(errors).map_err(|_| DocumentError::InvalidMember {
                    member: "errors",
                    expected: "an array of error objects",
                })?
            }
            Some(_) => {
                return Err(DocumentError::InvalidMember {
                    member: "errors",
                    expected: "an array",
                })
            }
        };

        Ok(document)
    }

    /// Serializes the document to wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Attributes`] if serialization fails.
    pub fn to_vec(&self) -> Result<Vec<u8>, DocumentError> {
        let value = self.to_value().map_err(DocumentError::Attributes)?;
        serde_json::to_vec(&value).map_err(DocumentError::Attributes)
    }

    /// Returns the HTTP status of the response this document came from.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the first error's `detail`, the authoritative message for a
    /// failed request.
    #[must_use]
    pub fn first_error_detail(&self) -> Option<&str> {
        self.errors
            .first()
            .map(|error| error.detail.as_str())
            .filter(|detail| !detail.is_empty())
    }

    /// Unmarshals the single resource of this document onto `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::MissingData`] if `data` is empty, or any error
    /// from [`ResourceRepresentation::unmarshal_onto`].
    pub fn unmarshal_one<R: Resource>(&self, target: &mut R) -> Result<(), DocumentError> {
        self.data
            .first()
            .ok_or(DocumentError::MissingData)?
            .unmarshal_onto(target)
    }

    /// Appends every resource of this document to `out`, in server order.
    ///
    /// # Errors
    ///
    /// Stops at the first representation that fails to unmarshal; the
    /// elements decoded before it stay appended.
    pub fn unmarshal_all<R: Resource>(&self, out: &mut Vec<R>) -> Result<(), DocumentError> {
        for representation in &self.data {
            let mut resource = R::default();
            representation.unmarshal_onto(&mut resource)?;
            out.push(resource);
        }
        Ok(())
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        debug_assert!(self.status.is_none(), "document status is set once");
        self.status = Some(status);
        self
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut top = Map::new();

        let data = match self.mode {
            DocumentMode::Single => self
                .data
                .first()
                .map_or(Value::Null, ResourceRepresentation::to_value),
            DocumentMode::List => Value::Array(
                self.data
                    .iter()
                    .map(ResourceRepresentation::to_value)
                    .collect(),
            ),
        };
        top.insert("data".to_string(), data);

        if !self.errors.is_empty() {
            top.insert("errors".to_string(), serde_json::to_value(&self.errors)?);
        }
        if !self.included.is_empty() {
            top.insert(
                "included".to_string(),
                Value::Array(
                    self.included
                        .iter()
                        .map(ResourceRepresentation::to_value)
                        .collect(),
                ),
            );
        }

        Ok(Value::Object(top))
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Widget {
        name: String,
        size: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    }

    impl Resource for Widget {
        const RESOURCE_TYPE: &'static str = "widgets";
        const NAME: &'static str = "Widget";
        const ID_ATTRIBUTE: &'static str = "name";

        fn id(&self) -> &str {
            &self.name
        }
    }

    fn widget(name: &str, size: u32) -> Widget {
        Widget {
            name: name.to_string(),
            size,
            color: None,
        }
    }

    #[test]
    fn test_encode_moves_identity_out_of_attributes() {
        let document = Document::encode(&widget("gear", 3)).unwrap();
        let bytes = document.to_vec().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            value,
            json!({"data": {"type": "widgets", "id": "gear", "attributes": {"size": 3}}})
        );
    }

    #[test]
    fn test_encode_rejects_empty_id() {
        let result = Document::encode(&widget("", 3));
        assert!(matches!(
            result,
            Err(DocumentError::EmptyIdentity { resource_type }) if resource_type == "widgets"
        ));
    }

    #[test]
    fn test_encode_then_decode_preserves_type_id_and_attributes() {
        let mut original = widget("gear", 7);
        original.color = Some("red".to_string());

        let bytes = Document::encode(&original).unwrap().to_vec().unwrap();
        let decoded = Document::decode(&bytes, DocumentMode::Single).unwrap();

        assert_eq!(decoded.data.len(), 1);
        let representation = &decoded.data[0];
        assert_eq!(representation.resource_type, "widgets");
        assert_eq!(representation.id, "gear");
        assert_eq!(representation.attributes.get("size"), Some(&json!(7)));
        assert_eq!(representation.attributes.get("color"), Some(&json!("red")));

        let mut restored = Widget::default();
        decoded.unmarshal_one(&mut restored).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_decode_single_accepts_null_and_absent_data() {
        let document = Document::decode(br#"{"data": null}"#, DocumentMode::Single).unwrap();
        assert!(document.data.is_empty());

        let document =
            Document::decode(br#"{"errors": [{"detail": "bad"}]}"#, DocumentMode::Single)
                .unwrap();
        assert!(document.data.is_empty());
        assert_eq!(document.first_error_detail(), Some("bad"));
    }

    #[test]
    fn test_decode_single_rejects_array_data() {
        let result = Document::decode(br#"{"data": []}"#, DocumentMode::Single);
        assert!(matches!(
            result,
            Err(DocumentError::UnexpectedData { found: "an array", .. })
        ));
    }

    #[test]
    fn test_decode_list_rejects_object_data() {
        let body = br#"{"data": {"type": "widgets", "id": "gear"}}"#;
        let result = Document::decode(body, DocumentMode::List);
        assert!(matches!(
            result,
            Err(DocumentError::UnexpectedData { found: "an object", .. })
        ));
    }

    #[test]
    fn test_decode_list_with_empty_data_yields_no_elements() {
        let document = Document::decode(br#"{"data": []}"#, DocumentMode::List).unwrap();
        assert!(document.data.is_empty());

        let mut out: Vec<Widget> = Vec::new();
        document.unmarshal_all(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_decode_empty_body_is_empty_document() {
        let document = Document::decode(b"", DocumentMode::Single).unwrap();
        assert!(document.data.is_empty());
        assert!(document.errors.is_empty());

        let document = Document::decode(b"  \n", DocumentMode::List).unwrap();
        assert!(document.data.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(matches!(
            Document::decode(b"<html>", DocumentMode::Single),
            Err(DocumentError::InvalidJson(_))
        ));
        assert!(matches!(
            Document::decode(b"[1, 2]", DocumentMode::List),
            Err(DocumentError::NotAnObject)
        ));
    }

    #[test]
    fn test_decode_rejects_resource_without_type_or_id() {
        let result = Document::decode(br#"{"data": {"id": "gear"}}"#, DocumentMode::Single);
        assert!(matches!(
            result,
            Err(DocumentError::MissingMember { member: "type" })
        ));

        let result = Document::decode(
            br#"{"data": [{"type": "widgets", "id": "a"}, {"type": "widgets"}]}"#,
            DocumentMode::List,
        );
        assert!(matches!(
            result,
            Err(DocumentError::MissingMember { member: "id" })
        ));
    }

    #[test]
    fn test_decode_parses_included_and_error_members() {
        let body = br#"{
            "data": {"type": "widgets", "id": "gear", "attributes": {"size": 1}},
            "included": [{"type": "parts", "id": "bolt"}],
            "errors": [{"detail": "first", "code": "E1"}, {"detail": "second"}]
        }"#;
        let document = Document::decode(body, DocumentMode::Single).unwrap();

        assert_eq!(document.included.len(), 1);
        assert_eq!(document.included[0].resource_type, "parts");
        assert_eq!(document.errors.len(), 2);
        assert_eq!(document.errors[0].code.as_deref(), Some("E1"));
        assert_eq!(document.first_error_detail(), Some("first"));
    }

    #[test]
    fn test_unmarshal_overlays_onto_existing_values() {
        let body = br#"{"data": {"type": "widgets", "id": "gear", "attributes": {"size": 9}}}"#;
        let document = Document::decode(body, DocumentMode::Single).unwrap();

        let mut target = Widget {
            name: "old".to_string(),
            size: 1,
            color: Some("blue".to_string()),
        };
        document.unmarshal_one(&mut target).unwrap();

        assert_eq!(target.name, "gear");
        assert_eq!(target.size, 9);
        assert_eq!(target.color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_unmarshal_rejects_other_resource_type() {
        let body = br#"{"data": {"type": "parts", "id": "bolt"}}"#;
        let document = Document::decode(body, DocumentMode::Single).unwrap();

        let mut target = widget("gear", 1);
        let result = document.unmarshal_one(&mut target);

        assert!(matches!(result, Err(DocumentError::TypeMismatch { .. })));
        assert_eq!(target, widget("gear", 1));
    }

    #[test]
    fn test_unmarshal_one_requires_data() {
        let document = Document::new(DocumentMode::Single);
        let mut target = Widget::default();
        assert!(matches!(
            document.unmarshal_one(&mut target),
            Err(DocumentError::MissingData)
        ));
    }

    #[test]
    fn test_unmarshal_all_preserves_server_order_and_keeps_partial_output() {
        let body = br#"{"data": [
            {"type": "widgets", "id": "a", "attributes": {"size": 1}},
            {"type": "widgets", "id": "b", "attributes": {"size": 2}},
            {"type": "widgets", "id": "c", "attributes": {"size": "huge"}}
        ]}"#;
        let document = Document::decode(body, DocumentMode::List).unwrap();

        let mut out: Vec<Widget> = Vec::new();
        let result = document.unmarshal_all(&mut out);

        assert!(matches!(result, Err(DocumentError::Attributes(_))));
        let names: Vec<&str> = out.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_status_is_recorded_once() {
        let document = Document::new(DocumentMode::Single).with_status(201);
        assert_eq!(document.status(), Some(201));
    }

    #[test]
    fn test_first_error_detail_ignores_blank_detail() {
        let mut document = Document::new(DocumentMode::Single);
        document.errors.push(ErrorDetail::default());
        assert_eq!(document.first_error_detail(), None);
    }

    #[test]
    fn test_to_vec_writes_error_members() {
        let mut document = Document::new(DocumentMode::Single);
        document.errors.push(ErrorDetail {
            detail: "name too long".to_string(),
            code: Some("too_long".to_string()),
            ..ErrorDetail::default()
        });

        let value: Value = serde_json::from_slice(&document.to_vec().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"data": null, "errors": [{"detail": "name too long", "code": "too_long"}]})
        );
    }
}

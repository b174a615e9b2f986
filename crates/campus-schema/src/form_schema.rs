//! Compiled form validation schema.
//!
//! A `FormSchema` wraps a JSON Schema document together with its compiled
//! `jsonschema` validator. Validation fills declared `default` values for
//! missing object properties before checking constraints, so the validated
//! value is what a form hands to its submit handler.

use std::sync::Arc;

use jsonschema::error::ValidationErrorKind;
use schemars::JsonSchema;
use serde_json::{Map, Value, json};

use crate::error::{FieldError, SchemaError, ValidationFailure};

/// Upper bound on chained `$ref` hops followed during resolution.
const MAX_REF_DEPTH: usize = 8;

#[derive(Clone)]
pub struct FormSchema {
    document: Arc<Value>,
    validator: Arc<jsonschema::Validator>,
}

impl std::fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSchema")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl FormSchema {
    /// Compile a JSON Schema document. Format assertions (`email`, ...) are
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if the document is not a valid schema.
    pub fn new(document: Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&document)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self {
            document: Arc::new(document),
            validator: Arc::new(validator),
        })
    }

    /// Build the schema of a `JsonSchema` type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if generation or compilation fails.
    pub fn from_type<T: JsonSchema>() -> Result<Self, SchemaError> {
        let document = serde_json::to_value(schemars::schema_for!(T))
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        Self::new(document)
    }

    /// The underlying JSON Schema document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Whether the root object schema declares `key` as a property.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.root()
            .get("properties")
            .and_then(|p| p.get(key))
            .is_some()
    }

    /// Validate `data`, returning the value with defaults applied.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailure` listing every field error.
    pub fn validate(&self, data: &Value) -> Result<Value, ValidationFailure> {
        let mut value = data.clone();
        apply_defaults(&self.document, &self.document, &mut value);

        let field_errors: Vec<FieldError> = self
            .validator
            .iter_errors(&value)
            .map(|error| field_error(&error))
            .collect();

        if field_errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationFailure { field_errors })
        }
    }

    /// Whether `data` passes validation.
    #[must_use]
    pub fn is_valid(&self, data: &Value) -> bool {
        self.validate(data).is_ok()
    }

    /// The schema of the `key` property, as a standalone schema.
    ///
    /// Definitions (`$defs`) of the parent document are carried over so
    /// references keep resolving. An array-typed property is wrapped in an
    /// object schema `{ key: [...] }`, which is the shape a form editing that
    /// list submits.
    ///
    /// Returns `Ok(None)` if the root schema has no such property.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if the extracted schema does not compile.
    pub fn scoped(&self, key: &str) -> Result<Option<Self>, SchemaError> {
        let Some(property) = self.root().get("properties").and_then(|p| p.get(key)) else {
            return Ok(None);
        };
        let property = resolve(&self.document, property);

        let is_array = property.get("type").and_then(Value::as_str) == Some("array");
        let mut scoped = if is_array {
            json!({
                "type": "object",
                "properties": { key: property.clone() },
                "required": [key],
            })
        } else {
            property.clone()
        };

        if let Value::Object(map) = &mut scoped {
            for carried in ["$schema", "$defs", "definitions"] {
                if let Some(value) = self.document.get(carried) {
                    map.entry(carried).or_insert_with(|| value.clone());
                }
            }
        }

        Self::new(scoped).map(Some)
    }

    fn root(&self) -> &Value {
        resolve(&self.document, &self.document)
    }
}

/// Follow local `$ref` pointers (`#/$defs/Name`) until a concrete schema.
fn resolve<'a>(document: &'a Value, node: &'a Value) -> &'a Value {
    let mut current = node;
    for _ in 0..MAX_REF_DEPTH {
        let target = current
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|reference| reference.strip_prefix('#'))
            .and_then(|pointer| document.pointer(pointer));
        match target {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

/// Insert declared `default`s for missing properties, recursing into nested
/// objects and array items.
fn apply_defaults(document: &Value, schema: &Value, value: &mut Value) {
    let schema = resolve(document, schema);
    match value {
        Value::Object(object) => {
            let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                return;
            };
            for (name, property) in properties {
                if !object.contains_key(name) {
                    let default = property
                        .get("default")
                        .or_else(|| resolve(document, property).get("default"));
                    if let Some(default) = default {
                        object.insert(name.clone(), default.clone());
                    }
                }
                if let Some(child) = object.get_mut(name) {
                    apply_defaults(document, property, child);
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items").filter(|s| s.is_object()) {
                for item in items {
                    apply_defaults(document, item_schema, item);
                }
            }
        }
        _ => {}
    }
}

fn field_error(error: &jsonschema::ValidationError<'_>) -> FieldError {
    let mut segments = pointer_segments(&error.instance_path.to_string());
    if let ValidationErrorKind::Required { property } = &error.kind {
        if let Some(name) = property.as_str() {
            segments.push(name.to_string());
        }
    }
    FieldError::new(segments.join("."), error.to_string())
}

/// Split a JSON pointer (`/parents/0/phone`) into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Read the value at a dotted path (`parents.0.phone`).
#[must_use]
pub fn value_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Write `new_value` at a dotted path, creating intermediate objects.
/// Numeric segments index into existing arrays; out-of-range indexes are
/// ignored.
pub fn set_value_at(value: &mut Value, path: &str, new_value: Value) {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    set_segments(value, &segments, new_value);
}

fn set_segments(value: &mut Value, segments: &[&str], new_value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *value = new_value;
        return;
    };
    let slot = match value {
        Value::Array(items) => match head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            Some(slot) => slot,
            None => return,
        },
        other => {
            if !other.is_object() {
                *other = Value::Object(Map::new());
            }
            match other {
                Value::Object(map) => map.entry((*head).to_string()).or_insert(Value::Null),
                _ => return,
            }
        }
    };
    set_segments(slot, rest, new_value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::entities::{Class, FullStudent, Section};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn class_schema() -> FormSchema {
        FormSchema::from_type::<Class>().unwrap()
    }

    #[test]
    fn valid_class_passes() {
        let data = json!({ "name": "Grade 1", "academicYear": "2024-2025", "level": "primary" });
        assert_eq!(class_schema().validate(&data).unwrap(), data);
    }

    #[test]
    fn missing_required_field_points_at_the_field() {
        let data = json!({ "academicYear": "2024-2025", "level": "primary" });
        let failure = class_schema().validate(&data).unwrap_err();
        assert_eq!(failure.field_errors.len(), 1);
        assert_eq!(failure.field_errors[0].path, "name");
    }

    #[rstest]
    #[case::bad_pattern(json!({ "name": "G1", "academicYear": "2024", "level": "p" }), "academicYear")]
    #[case::too_short(json!({ "name": "", "academicYear": "2024-2025", "level": "p" }), "name")]
    #[case::wrong_type(json!({ "name": 7, "academicYear": "2024-2025", "level": "p" }), "name")]
    fn constraint_violations_are_reported_per_field(#[case] data: Value, #[case] path: &str) {
        let failure = class_schema().validate(&data).unwrap_err();
        assert!(failure.for_path(path).is_some(), "{failure:?}");
    }

    #[test]
    fn defaults_are_filled_before_validation() {
        let schema = FormSchema::from_type::<Section>().unwrap();
        let value = schema
            .validate(&json!({ "classId": "cls-1", "name": "3A" }))
            .unwrap();
        assert_eq!(value["maxStudents"], 30);
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn numeric_range_is_enforced() {
        let schema = FormSchema::from_type::<Section>().unwrap();
        let failure = schema
            .validate(&json!({ "classId": "cls-1", "name": "3A", "maxStudents": 500 }))
            .unwrap_err();
        assert!(failure.for_path("maxStudents").is_some());
    }

    #[test]
    fn nested_errors_use_dotted_paths() {
        let schema = FormSchema::from_type::<FullStudent>().unwrap();
        let data = json!({
            "student": {
                "studentCode": "S1",
                "name": "Yanis",
                "gender": "M",
                "enrollmentDate": "2024-09-01"
            },
            "parents": [{
                "name": "Amina",
                "phone": "not-a-phone",
                "cin": "AB123456",
                "relationshipType": "mother"
            }]
        });
        let failure = schema.validate(&data).unwrap_err();
        assert_eq!(failure.root_fields(), vec!["parents"]);
        assert!(failure.for_path("parents.0.phone").is_some());
    }

    #[test]
    fn scoped_object_property_carries_definitions() {
        let schema = FormSchema::from_type::<FullStudent>().unwrap();
        let student = schema.scoped("student").unwrap().unwrap();
        assert!(student.has_property("enrollmentDate"));
        assert!(student.is_valid(&json!({
            "studentCode": "S1",
            "name": "Yanis",
            "gender": "F",
            "enrollmentDate": "2024-09-01"
        })));
        assert!(!student.is_valid(&json!({ "name": "Yanis" })));
    }

    #[test]
    fn scoped_array_property_is_wrapped() {
        let schema = FormSchema::from_type::<FullStudent>().unwrap();
        let parents = schema.scoped("parents").unwrap().unwrap();
        assert!(parents.has_property("parents"));
        let failure = parents.validate(&json!({ "parents": [] })).unwrap_err();
        assert_eq!(failure.field_errors[0].path, "parents");
    }

    #[test]
    fn scoped_unknown_property_is_none() {
        assert!(class_schema().scoped("nope").unwrap().is_none());
    }

    #[test]
    fn hand_written_schema_with_format() {
        let schema = FormSchema::new(json!({
            "type": "object",
            "properties": { "email": { "type": "string", "format": "email" } },
            "required": ["email"]
        }))
        .unwrap();
        assert!(schema.is_valid(&json!({ "email": "office@school.ma" })));
        let failure = schema.validate(&json!({ "email": "nope" })).unwrap_err();
        assert_eq!(failure.field_errors[0].path, "email");
    }

    #[test]
    fn invalid_schema_fails_to_compile() {
        let err = FormSchema::new(json!({ "type": 12 })).unwrap_err();
        assert!(matches!(err, SchemaError::Compile(_)));
    }

    #[test]
    fn dotted_paths_read_and_write() {
        let mut value = json!({ "parents": [{ "name": "A" }] });
        set_value_at(&mut value, "parents.0.name", json!("B"));
        set_value_at(&mut value, "student.name", json!("C"));
        assert_eq!(value_at(&value, "parents.0.name"), Some(&json!("B")));
        assert_eq!(value_at(&value, "student.name"), Some(&json!("C")));
        assert_eq!(value_at(&value, "parents.3.name"), None);
    }
}

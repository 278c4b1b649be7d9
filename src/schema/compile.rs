use super::reflect::{Reflect, Shape};
use super::types::{Schema, SchemaFormat, SchemaKind};
use std::collections::BTreeMap;

/// Property name used for the synthetic value entry of a map schema.
///
/// A map documents as an open object (`additionalProperties: true`) with a
/// single placeholder property describing the value type.
pub const MAP_VALUE_PLACEHOLDER: &str = "example";

/// First comma-separated segment of a name tag, or `None` when the tag is
/// empty. An unnamed field is excluded from documentation entirely.
fn wire_name(tag: &str) -> Option<&str> {
    tag.split(',').next().filter(|name| !name.is_empty())
}

/// Whether a validation tag's first segment is the literal `required`.
fn is_required(tag: &str) -> bool {
    tag.split(',').next() == Some("required")
}

/// Compile a shape into a schema.
///
/// Pure and total over supported shapes; returns `None` for [`Shape::Opaque`]
/// and for nothing else. Each call builds a fresh `Schema` value, so nested
/// results never alias.
pub fn compile(shape: &Shape) -> Option<Schema> {
    let schema = match shape {
        Shape::Str => Schema::of(SchemaKind::String),
        Shape::Bool => Schema::of(SchemaKind::Boolean),
        Shape::Int => Schema::of(SchemaKind::Integer),
        Shape::Int32 => Schema::with_format(SchemaKind::Integer, SchemaFormat::Int32),
        Shape::Int64 => Schema::with_format(SchemaKind::Integer, SchemaFormat::Int64),
        Shape::Float => Schema::with_format(SchemaKind::Number, SchemaFormat::Float),
        Shape::DateTime => Schema::with_format(SchemaKind::String, SchemaFormat::DateTime),
        Shape::Struct(fields) => {
            let mut object = Schema::of(SchemaKind::Object);
            for field in fields {
                let Some(name) = wire_name(field.name_tag) else {
                    continue;
                };
                if let Some(mut child) = compile(&field.shape) {
                    if let Some(text) = field.description {
                        child.description = Some(text.to_string());
                    }
                    object.properties.insert(name.to_string(), child);
                }
                // Required-ness is declared by tag, independent of whether the
                // field's shape is representable.
                if is_required(field.validate_tag) {
                    object.required.push(name.to_string());
                }
            }
            object
        }
        Shape::List(element) => {
            let mut array = Schema::of(SchemaKind::Array);
            array.items = compile(element).map(Box::new);
            array
        }
        Shape::Map(value) => {
            let mut object = Schema::of(SchemaKind::Object);
            object.additional_properties = Some(true);
            if let Some(child) = compile(value) {
                object
                    .properties
                    .insert(MAP_VALUE_PLACEHOLDER.to_string(), child);
            }
            object
        }
        Shape::Opaque => return None,
    };
    Some(schema)
}

/// Generate the documentation mapping for a type.
///
/// Returns a mapping containing one entry under `name` describing `T`, or an
/// empty mapping when `T`'s shape is not representable. Absence is not a
/// failure signal; callers treat it as "no documentation for this type".
pub fn generate<T: Reflect>(name: &str) -> BTreeMap<String, Schema> {
    let mut out = BTreeMap::new();
    if let Some(schema) = compile(&T::shape()) {
        out.insert(name.to_string(), schema);
    }
    out
}

/// [`generate`] with the type inferred from a value in hand.
pub fn generate_for<T: Reflect>(_value: &T, name: &str) -> BTreeMap<String, Schema> {
    generate::<T>(name)
}

#[cfg(test)]
mod tests {
    use super::{is_required, wire_name};

    #[test]
    fn test_wire_name_first_segment() {
        assert_eq!(wire_name("id,omitempty"), Some("id"));
        assert_eq!(wire_name("name"), Some("name"));
    }

    #[test]
    fn test_wire_name_empty() {
        assert_eq!(wire_name(""), None);
        assert_eq!(wire_name(",omitempty"), None);
    }

    #[test]
    fn test_is_required_first_segment_only() {
        assert!(is_required("required"));
        assert!(is_required("required,min=3"));
        assert!(!is_required("min=3,required"));
        assert!(!is_required(""));
    }
}

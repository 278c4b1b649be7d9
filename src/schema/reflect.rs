use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Structural description of a Rust type, as seen by the schema compiler.
///
/// A `Shape` is the compile-time stand-in for runtime reflection: a type
/// reports its own structure through [`Reflect::shape`] and the compiler walks
/// the resulting tree. Shapes carry no live values; a `Vec<T>` reports the
/// shape of `T` itself where the original walk would have synthesized a
/// zero-valued element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Str,
    Bool,
    /// Signed integer of 16 bits or narrower. Documents as `integer` with no
    /// format refinement.
    Int,
    Int32,
    Int64,
    /// Any floating-point width. Documents as `number`/`float`.
    Float,
    /// The standard timestamp type. Documents as `string`/`date-time`
    /// (RFC3339), never expanded field-by-field.
    DateTime,
    /// A struct with tagged fields, in declaration order.
    Struct(Vec<FieldShape>),
    /// Slice or array; the element shape.
    List(Box<Shape>),
    /// String-keyed map; the value shape.
    Map(Box<Shape>),
    /// A shape the compiler cannot represent. Compiles to nothing.
    Opaque,
}

/// One struct field: its raw tags plus the shape of its value.
///
/// Tags keep the serde-style comma-separated wire form; the compiler reads the
/// first segment of `name_tag` as the wire name (empty means the field is
/// skipped entirely) and treats a `validate_tag` whose first segment is
/// `required` as a presence requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    pub name_tag: &'static str,
    pub description: Option<&'static str>,
    pub validate_tag: &'static str,
    pub shape: Shape,
}

impl FieldShape {
    pub fn new(name_tag: &'static str, shape: Shape) -> Self {
        FieldShape {
            name_tag,
            description: None,
            validate_tag: "",
            shape,
        }
    }

    /// Attach a human-readable description to this field.
    pub fn describe(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }

    /// Attach a validation tag, e.g. `"required"` or `"required,min=3"`.
    pub fn validate(mut self, tag: &'static str) -> Self {
        self.validate_tag = tag;
        self
    }
}

/// Types that can describe their own structure for documentation purposes.
///
/// Implementations exist for the primitives, `String`, timestamps, `Option`,
/// `Vec`, fixed-size arrays, and string-keyed maps. Application types
/// implement it by hand, listing their fields in declaration order.
pub trait Reflect {
    fn shape() -> Shape;
}

macro_rules! reflect_primitive {
    ($($ty:ty => $shape:expr),* $(,)?) => {
        $(impl Reflect for $ty {
            fn shape() -> Shape {
                $shape
            }
        })*
    };
}

reflect_primitive! {
    String => Shape::Str,
    bool => Shape::Bool,
    i8 => Shape::Int,
    i16 => Shape::Int,
    i32 => Shape::Int32,
    i64 => Shape::Int64,
    f32 => Shape::Float,
    f64 => Shape::Float,
}

impl Reflect for &str {
    fn shape() -> Shape {
        Shape::Str
    }
}

impl Reflect for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::DateTime
    }
}

/// An optional value documents as its pointee: the indirection is stripped and
/// an absent value stands in for the pointee's zero value, which shares the
/// same shape.
impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: Reflect> Reflect for [T] {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<V: Reflect, S> Reflect for HashMap<String, V, S> {
    fn shape() -> Shape {
        Shape::Map(Box::new(V::shape()))
    }
}

impl<V: Reflect> Reflect for BTreeMap<String, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(V::shape()))
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

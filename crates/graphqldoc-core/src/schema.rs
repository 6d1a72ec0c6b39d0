//! Canonical schema model decoded from a GraphQL introspection result.
//!
//! Every record composes a [`Description`] (and, where GraphQL allows it, a
//! [`Deprecation`]) instead of inheriting from a base type. The shared shape
//! is reachable through the [`Described`] trait.
//!
//! Introspection payloads use `null` for lists that do not apply to a kind
//! (e.g. `fields` on an enum). Those decode as empty vectors, so callers can
//! iterate without unwrapping but must not assume any list is non-empty.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::type_ref::TypeRef;

/// Decodes `null` or a missing value as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Kinds ────────────────────────────────────────────────────────────────────

/// The `__TypeKind` enumeration of GraphQL introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Returns the introspection spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }

    /// `true` for kinds that wrap another type (`LIST`, `NON_NULL`).
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::List | Self::NonNull)
    }

    /// `true` for kinds that can terminate a type-wrapping chain.
    pub fn is_named(&self) -> bool {
        !self.is_wrapper()
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Shared shapes ────────────────────────────────────────────────────────────

/// The named/described/kind-tagged base shape shared by every schema record.
///
/// `name` is empty for wrapper nodes of a [`TypeRef`] chain, which carry
/// `"name": null` in introspection output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeKind>,
}

impl Description {
    /// Creates a description with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Deprecation state composed into [`Field`] and [`EnumValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deprecation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// Access to the [`Description`] a record is composed from.
pub trait Described {
    /// The composed base shape.
    fn base(&self) -> &Description;

    /// The record's name.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// The record's description text, if any.
    fn description(&self) -> Option<&str> {
        self.base().description.as_deref()
    }

    /// The record's kind tag, if any.
    fn kind(&self) -> Option<TypeKind> {
        self.base().kind
    }
}

macro_rules! impl_described {
    ($($ty:ty),+ $(,)?) => {
        $(impl Described for $ty {
            fn base(&self) -> &Description {
                &self.base
            }
        })+
    };
}

// ─── Records ──────────────────────────────────────────────────────────────────

/// `InputValue.defaultValue`: a string, a number, or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    String(String),
    Number(serde_json::Number),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// An argument or input-object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    #[serde(flatten)]
    pub base: Description,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(flatten)]
    pub base: Description,
    #[serde(flatten)]
    pub deprecation: Deprecation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    #[serde(flatten)]
    pub base: Description,
    #[serde(flatten)]
    pub deprecation: Deprecation,
}

/// A directive definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    #[serde(flatten)]
    pub base: Description,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValue>,
}

/// A named type of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaType {
    #[serde(flatten)]
    pub base: Description,
    /// Populated for `OBJECT` and `INTERFACE` only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    /// Populated for `INPUT_OBJECT` only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_fields: Vec<InputValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interfaces: Vec<TypeRef>,
    /// Populated for `ENUM` only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enum_values: Vec<EnumValue>,
    /// Populated for `UNION` and `INTERFACE` only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_types: Vec<TypeRef>,
}

impl SchemaType {
    /// `true` for the built-in introspection types (`__Schema`, `__Type`, …).
    pub fn is_introspection(&self) -> bool {
        self.base.name.starts_with("__")
    }

    /// Every type reference reachable from this type: field types and their
    /// arguments, input fields, interfaces, and possible types.
    pub fn type_refs(&self) -> Vec<&TypeRef> {
        let mut refs = Vec::new();
        for field in &self.fields {
            refs.push(&field.ty);
            refs.extend(field.args.iter().map(|arg| &arg.ty));
        }
        refs.extend(self.input_fields.iter().map(|input| &input.ty));
        refs.extend(self.interfaces.iter());
        refs.extend(self.possible_types.iter());
        refs
    }
}

impl_described!(InputValue, Field, EnumValue, Directive, SchemaType);

// ─── Schema ───────────────────────────────────────────────────────────────────

/// The canonical schema a build operates on.
///
/// Built once by [`normalize`](crate::normalize) and shared read-only for the
/// rest of the build pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub query_type: Description,
    #[serde(default)]
    pub mutation_type: Option<Description>,
    #[serde(default)]
    pub subscription_type: Option<Description>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<SchemaType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub directives: Vec<Directive>,
}

impl Schema {
    /// Looks up a type by exact name.
    pub fn find_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.iter().find(|ty| ty.base.name == name)
    }

    /// Looks up a directive by exact name.
    pub fn find_directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.base.name == name)
    }

    /// The type named by `queryType`, if the schema defines it.
    pub fn query_type(&self) -> Option<&SchemaType> {
        self.find_type(&self.query_type.name)
    }

    /// The type named by `mutationType`, if any.
    pub fn mutation_type(&self) -> Option<&SchemaType> {
        self.mutation_type
            .as_ref()
            .and_then(|d| self.find_type(&d.name))
    }

    /// The type named by `subscriptionType`, if any.
    pub fn subscription_type(&self) -> Option<&SchemaType> {
        self.subscription_type
            .as_ref()
            .and_then(|d| self.find_type(&d.name))
    }

    /// Types of the given kind, in schema order.
    pub fn types_of_kind(&self, kind: TypeKind) -> impl Iterator<Item = &SchemaType> {
        self.types
            .iter()
            .filter(move |ty| ty.base.kind == Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_type() -> serde_json::Value {
        json!({
            "kind": "OBJECT",
            "name": "User",
            "description": "A registered user",
            "fields": [{
                "name": "id",
                "description": null,
                "args": [],
                "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } },
                "isDeprecated": false,
                "deprecationReason": null
            }],
            "inputFields": null,
            "interfaces": [],
            "enumValues": null,
            "possibleTypes": null
        })
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let ty: SchemaType = serde_json::from_value(user_type()).unwrap();
        assert_eq!(ty.name(), "User");
        assert_eq!(ty.kind(), Some(TypeKind::Object));
        assert_eq!(ty.fields.len(), 1);
        assert!(ty.input_fields.is_empty());
        assert!(ty.enum_values.is_empty());
        assert!(ty.possible_types.is_empty());
    }

    #[test]
    fn test_field_composes_deprecation() {
        let field: Field = serde_json::from_value(json!({
            "name": "login",
            "args": null,
            "type": { "kind": "SCALAR", "name": "String" },
            "isDeprecated": true,
            "deprecationReason": "use `handle`"
        }))
        .unwrap();
        assert!(field.deprecation.is_deprecated);
        assert_eq!(
            field.deprecation.deprecation_reason.as_deref(),
            Some("use `handle`")
        );
        assert!(field.args.is_empty());
    }

    #[test]
    fn test_default_value_variants() {
        let arg: InputValue = serde_json::from_value(json!({
            "name": "first",
            "type": { "kind": "SCALAR", "name": "Int" },
            "defaultValue": 10
        }))
        .unwrap();
        assert!(matches!(arg.default_value, Some(DefaultValue::Number(_))));
        assert_eq!(arg.default_value.unwrap().to_string(), "10");

        let arg: InputValue = serde_json::from_value(json!({
            "name": "order",
            "type": { "kind": "ENUM", "name": "Order" },
            "defaultValue": "ASC"
        }))
        .unwrap();
        assert_eq!(arg.default_value, Some(DefaultValue::String("ASC".into())));

        let arg: InputValue = serde_json::from_value(json!({
            "name": "after",
            "type": { "kind": "SCALAR", "name": "String" },
            "defaultValue": null
        }))
        .unwrap();
        assert!(arg.default_value.is_none());
    }

    #[test]
    fn test_root_type_lookup() {
        let schema: Schema = serde_json::from_value(json!({
            "queryType": { "name": "Query" },
            "mutationType": null,
            "subscriptionType": { "name": "Missing" },
            "types": [
                { "kind": "OBJECT", "name": "Query", "fields": [] },
                user_type()
            ],
            "directives": []
        }))
        .unwrap();

        assert_eq!(schema.query_type().map(|t| t.name()), Some("Query"));
        assert!(schema.mutation_type().is_none());
        assert!(schema.subscription_type().is_none());
        assert_eq!(schema.types_of_kind(TypeKind::Object).count(), 2);
    }

    #[test]
    fn test_type_refs_cover_arguments_and_interfaces() {
        let ty: SchemaType = serde_json::from_value(json!({
            "kind": "OBJECT",
            "name": "Post",
            "fields": [{
                "name": "comments",
                "args": [{ "name": "first", "type": { "kind": "SCALAR", "name": "Int" } }],
                "type": { "kind": "LIST", "ofType": { "kind": "OBJECT", "name": "Comment" } }
            }],
            "interfaces": [{ "kind": "INTERFACE", "name": "Node" }]
        }))
        .unwrap();

        let names: Vec<_> = ty
            .type_refs()
            .into_iter()
            .filter_map(|r| r.terminal_name())
            .collect();
        assert_eq!(names, ["Comment", "Int", "Node"]);
    }
}

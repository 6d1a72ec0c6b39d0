//! Shared fixtures for unit tests.

use std::sync::Arc;

use graphqldoc_core::{Schema, TypeRefResolver, default_url_resolver, normalize};
use serde_json::{Value, json};

use crate::context::BuildContext;

fn scalar(name: &str) -> Value {
    json!({ "kind": "SCALAR", "name": name, "description": null })
}

fn non_null(inner: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

/// A small shop schema with one type of every kind.
pub(crate) fn introspection() -> Value {
    json!({
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": { "name": "Mutation" },
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": "Root query",
                        "fields": [{
                            "name": "user",
                            "description": null,
                            "args": [{
                                "name": "id",
                                "description": null,
                                "type": non_null(named("SCALAR", "ID")),
                                "defaultValue": null
                            }],
                            "type": named("OBJECT", "User"),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "inputFields": null,
                        "interfaces": [],
                        "enumValues": null,
                        "possibleTypes": null
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Mutation",
                        "description": null,
                        "fields": [{
                            "name": "createUser",
                            "description": null,
                            "args": [{
                                "name": "input",
                                "description": null,
                                "type": non_null(named("INPUT_OBJECT", "UserInput")),
                                "defaultValue": null
                            }],
                            "type": non_null(named("OBJECT", "User")),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "interfaces": []
                    },
                    {
                        "kind": "OBJECT",
                        "name": "User",
                        "description": "A registered user",
                        "fields": [{
                            "name": "id",
                            "description": null,
                            "args": [],
                            "type": non_null(named("SCALAR", "ID")),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "interfaces": [named("INTERFACE", "Node")]
                    },
                    {
                        "kind": "INTERFACE",
                        "name": "Node",
                        "description": null,
                        "fields": [{
                            "name": "id",
                            "description": null,
                            "args": [],
                            "type": non_null(named("SCALAR", "ID")),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }],
                        "possibleTypes": [named("OBJECT", "User")]
                    },
                    {
                        "kind": "ENUM",
                        "name": "Role",
                        "description": null,
                        "enumValues": [
                            { "name": "ADMIN", "description": null, "isDeprecated": false, "deprecationReason": null },
                            { "name": "GUEST", "description": null, "isDeprecated": false, "deprecationReason": null }
                        ]
                    },
                    {
                        "kind": "UNION",
                        "name": "SearchResult",
                        "description": null,
                        "possibleTypes": [named("OBJECT", "User")]
                    },
                    {
                        "kind": "INPUT_OBJECT",
                        "name": "UserInput",
                        "description": null,
                        "inputFields": [{
                            "name": "role",
                            "description": null,
                            "type": named("ENUM", "Role"),
                            "defaultValue": "GUEST"
                        }]
                    },
                    scalar("ID"),
                    scalar("String"),
                    {
                        "kind": "OBJECT",
                        "name": "__Schema",
                        "description": null,
                        "fields": []
                    }
                ],
                "directives": [{
                    "name": "deprecated",
                    "description": "Marks an element as deprecated",
                    "locations": ["FIELD_DEFINITION", "ENUM_VALUE"],
                    "args": []
                }]
            }
        }
    })
}

pub(crate) fn schema() -> Schema {
    normalize(introspection()).expect("fixture schema is well-formed")
}

/// A build context over [`schema`] with pages under `/docs/`.
pub(crate) fn build_context() -> Arc<BuildContext> {
    Arc::new(BuildContext::new(
        Arc::new(schema()),
        TypeRefResolver::new(default_url_resolver("/docs/")),
    ))
}

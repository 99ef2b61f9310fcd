//! Node-to-JSON mapping
//!
//! One [`Generate`] impl per node kind. Variant types match exhaustively, so a
//! new variant upstream does not compile until it has a JSON shape here.

use crate::builder::Position::{First, Subsequent};
use crate::emit::JsonWriter;
use crate::types::{
    CompoundIdentifier, Const, Constant, Enum, EnumMember, HandleSubtype, Identifier, Interface,
    Literal, Method, Name, Nullability, Ordinal, Parameter, PrimitiveSubtype, Struct,
    StructMember, Type, Union, UnionMember,
};

/// Writes a node as JSON at the writer's current position.
pub trait Generate {
    fn generate(&self, out: &mut JsonWriter);
}

impl<T: Generate + ?Sized> Generate for Box<T> {
    fn generate(&self, out: &mut JsonWriter) {
        (**self).generate(out);
    }
}

impl<T: Generate> Generate for [T] {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_array(self);
    }
}

impl<T: Generate> Generate for Vec<T> {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_array(self);
    }
}

impl Generate for bool {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_boolean(*self);
    }
}

impl Generate for u64 {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_uint(*self);
    }
}

impl Generate for str {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_string(self);
    }
}

impl Generate for String {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_string(self);
    }
}

impl Generate for Identifier {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_string(self.as_str());
    }
}

impl Generate for CompoundIdentifier {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_array(&self.components);
    }
}

impl Generate for Name {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_string(self.long_name());
    }
}

impl Generate for Ordinal {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_uint(u64::from(self.value()));
    }
}

impl Generate for Nullability {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_boolean(self.is_nullable());
    }
}

impl Generate for PrimitiveSubtype {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_string(self.as_str());
    }
}

impl Generate for HandleSubtype {
    fn generate(&self, out: &mut JsonWriter) {
        out.emit_string(self.as_str());
    }
}

impl Generate for Literal {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("kind", self.kind_name(), First);

            match self {
                Literal::String { value } => {
                    out.object_member("value", value.as_str(), Subsequent);
                }
                Literal::Numeric { value } => {
                    out.object_key("value", Subsequent);
                    out.emit_raw(value);
                }
                Literal::True | Literal::False | Literal::Default => {}
            }
        });
    }
}

impl Generate for Type {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("kind", self.kind_name(), First);

            match self {
                Type::Array {
                    element_type,
                    element_count,
                } => {
                    out.object_member("element_type", element_type, Subsequent);
                    out.object_member("element_count", element_count, Subsequent);
                }
                Type::Vector {
                    element_type,
                    maybe_element_count,
                    nullability,
                } => {
                    out.object_member("element_type", element_type, Subsequent);
                    if let Some(count) = maybe_element_count {
                        out.object_member("maybe_element_count", count, Subsequent);
                    }
                    out.object_member("nullable", nullability, Subsequent);
                }
                Type::String {
                    maybe_element_count,
                    nullability,
                } => {
                    if let Some(count) = maybe_element_count {
                        out.object_member("maybe_element_count", count, Subsequent);
                    }
                    out.object_member("nullable", nullability, Subsequent);
                }
                Type::Handle {
                    subtype,
                    nullability,
                } => {
                    out.object_member("subtype", subtype, Subsequent);
                    out.object_member("nullable", nullability, Subsequent);
                }
                Type::Request {
                    subtype,
                    nullability,
                } => {
                    out.object_member("subtype", subtype, Subsequent);
                    out.object_member("nullable", nullability, Subsequent);
                }
                Type::Primitive { subtype } => {
                    out.object_member("subtype", subtype, Subsequent);
                }
                Type::Identifier {
                    identifier,
                    nullability,
                } => {
                    out.object_member("identifier", identifier, Subsequent);
                    out.object_member("nullable", nullability, Subsequent);
                }
            }
        });
    }
}

impl Generate for Constant {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("kind", self.kind_name(), First);

            match self {
                Constant::Identifier { identifier } => {
                    out.object_member("identifier", identifier, Subsequent);
                }
                Constant::Literal { literal } => {
                    out.object_member("literal", literal, Subsequent);
                }
            }
        });
    }
}

impl Generate for Const {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("name", &self.name, First);
            out.object_member("type", &self.type_, Subsequent);
            out.object_member("value", &self.value, Subsequent);
        });
    }
}

impl Generate for Enum {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("name", &self.name, First);
            if let Type::Primitive { subtype } = &self.type_ {
                out.object_member("type", subtype, Subsequent);
            }
            out.object_member("members", &self.members, Subsequent);
        });
    }
}

impl Generate for EnumMember {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("name", &self.name, First);
            out.object_member("value", &self.value, Subsequent);
        });
    }
}

impl Generate for Interface {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("name", &self.name, First);
            out.object_member("methods", &self.methods, Subsequent);
        });
    }
}

impl Generate for Method {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("ordinal", &self.ordinal, First);
            out.object_member("name", &self.name, Subsequent);
            out.object_member("has_request", &self.has_request(), Subsequent);
            if let Some(request) = &self.maybe_request {
                out.object_member("maybe_request", &request.parameters, Subsequent);
                out.object_member("maybe_request_size", &request.size, Subsequent);
            }
            out.object_member("has_response", &self.has_response(), Subsequent);
            if let Some(response) = &self.maybe_response {
                out.object_member("maybe_response", &response.parameters, Subsequent);
                out.object_member("maybe_response_size", &response.size, Subsequent);
            }
        });
    }
}

impl Generate for Parameter {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("type", &self.type_, First);
            out.object_member("name", &self.name, Subsequent);
            out.object_member("offset", &self.offset, Subsequent);
        });
    }
}

impl Generate for Struct {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("name", &self.name, First);
            out.object_member("members", &self.members, Subsequent);
            out.object_member("size", &self.size, Subsequent);
        });
    }
}

impl Generate for StructMember {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("type", &self.type_, First);
            out.object_member("name", &self.name, Subsequent);
            if let Some(default_value) = &self.maybe_default_value {
                out.object_member("maybe_default_value", default_value, Subsequent);
            }
            out.object_member("offset", &self.offset, Subsequent);
        });
    }
}

impl Generate for Union {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("name", &self.name, First);
            out.object_member("members", &self.members, Subsequent);
            out.object_member("size", &self.size, Subsequent);
        });
    }
}

impl Generate for UnionMember {
    fn generate(&self, out: &mut JsonWriter) {
        out.generate_object(|out| {
            out.object_member("type", &self.type_, First);
            out.object_member("name", &self.name, Subsequent);
            out.object_member("offset", &self.offset, Subsequent);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    fn render<T: Generate + ?Sized>(value: &T) -> String {
        let mut writer = JsonWriter::new();
        value.generate(&mut writer);
        assert_eq!(writer.indent_level(), 0, "indent must be balanced");
        writer.into_string()
    }

    fn uint32() -> Type {
        Type::primitive(PrimitiveSubtype::Uint32)
    }

    fn numeric(value: &str) -> Constant {
        Constant::Literal {
            literal: Literal::Numeric {
                value: value.to_string(),
            },
        }
    }

    fn keys(json: &str) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(json).expect("valid JSON");
        let mut keys: Vec<String> = value
            .as_object()
            .expect("object")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_nullable_vector_without_bound() {
        let vector = Type::Vector {
            element_type: Box::new(Type::primitive(PrimitiveSubtype::Uint8)),
            maybe_element_count: None,
            nullability: Nullability::Nullable,
        };

        assert_eq!(
            render(&vector),
            r#"{
  "kind": "vector",
  "element_type": {
    "kind": "primitive",
    "subtype": "uint8"
  },
  "nullable": true
}"#
        );
    }

    #[test]
    fn test_bounded_string() {
        let string = Type::String {
            maybe_element_count: Some(Box::new(numeric("32"))),
            nullability: Nullability::Nonnullable,
        };

        assert_eq!(
            render(&string),
            r#"{
  "kind": "string",
  "maybe_element_count": {
    "kind": "literal",
    "literal": {
      "kind": "numeric",
      "value": 32
    }
  },
  "nullable": false
}"#
        );
    }

    #[test]
    fn test_array_with_identifier_count() {
        let array = Type::Array {
            element_type: Box::new(Type::Handle {
                subtype: HandleSubtype::Vmo,
                nullability: Nullability::Nonnullable,
            }),
            element_count: Box::new(Constant::Identifier {
                identifier: CompoundIdentifier::new(["MAX_VMOS"]),
            }),
        };

        assert_eq!(
            render(&array),
            r#"{
  "kind": "array",
  "element_type": {
    "kind": "handle",
    "subtype": "vmo",
    "nullable": false
  },
  "element_count": {
    "kind": "identifier",
    "identifier": [
      "MAX_VMOS"
    ]
  }
}"#
        );
    }

    #[test]
    fn test_request_and_identifier_types() {
        let request = Type::Request {
            subtype: CompoundIdentifier::new(["fuchsia", "io", "Node"]),
            nullability: Nullability::Nullable,
        };
        assert_eq!(
            render(&request),
            r#"{
  "kind": "request",
  "subtype": [
    "fuchsia",
    "io",
    "Node"
  ],
  "nullable": true
}"#
        );

        let identifier = Type::Identifier {
            identifier: CompoundIdentifier::new(["Point"]),
            nullability: Nullability::Nonnullable,
        };
        assert_eq!(
            render(&identifier),
            r#"{
  "kind": "identifier",
  "identifier": [
    "Point"
  ],
  "nullable": false
}"#
        );
    }

    #[test]
    fn test_string_literal_is_escaped() {
        let literal = Literal::String {
            value: r#""a\"b""#.to_string(),
        };

        assert_eq!(
            render(&literal),
            "{\n  \"kind\": \"string\",\n  \"value\": \"\\\"a\\\\\\\"b\\\"\"\n}"
        );
    }

    #[test]
    fn test_string_literal_keeps_tab_byte() {
        let literal = Literal::String {
            value: "\"a\tb\"".to_string(),
        };

        assert!(render(&literal).contains("\"\\\"a\tb\\\"\""));
    }

    #[test]
    fn test_numeric_literal_is_verbatim() {
        let literal = Literal::Numeric {
            value: "-1.5e3".to_string(),
        };

        assert_eq!(
            render(&literal),
            "{\n  \"kind\": \"numeric\",\n  \"value\": -1.5e3\n}"
        );
    }

    #[test]
    fn test_payloadless_literals() {
        assert_eq!(render(&Literal::True), "{\n  \"kind\": \"true\"\n}");
        assert_eq!(render(&Literal::False), "{\n  \"kind\": \"false\"\n}");
        assert_eq!(render(&Literal::Default), "{\n  \"kind\": \"default\"\n}");
    }

    #[test]
    fn test_struct_member_default_value_is_optional() {
        let plain = StructMember {
            type_: uint32(),
            name: Identifier::new("x"),
            maybe_default_value: None,
            offset: 0,
        };
        let rendered = render(&plain);
        assert_eq!(keys(&rendered), vec!["name", "offset", "type"]);
        assert!(!rendered.contains("null"));

        let defaulted = StructMember {
            maybe_default_value: Some(numeric("7")),
            offset: 4,
            ..plain
        };
        let rendered = render(&defaulted);
        assert_eq!(
            keys(&rendered),
            vec!["maybe_default_value", "name", "offset", "type"]
        );

        let name_at = rendered.find("\"name\"").expect("name");
        let default_at = rendered.find("\"maybe_default_value\"").expect("default");
        let offset_at = rendered.find("\"offset\"").expect("offset");
        assert!(name_at < default_at && default_at < offset_at);
    }

    #[test]
    fn test_enum_type_only_for_primitive() {
        let member = EnumMember {
            name: Identifier::new("RED"),
            value: numeric("1"),
        };
        let primitive = Enum {
            name: Name::new("Color"),
            type_: uint32(),
            members: vec![member.clone()],
        };
        assert!(render(&primitive).contains("\"type\": \"uint32\""));

        let aliased = Enum {
            name: Name::new("Color"),
            type_: Type::Identifier {
                identifier: CompoundIdentifier::new(["ColorBase"]),
                nullability: Nullability::Nonnullable,
            },
            members: vec![member],
        };
        let rendered = render(&aliased);
        assert_eq!(keys(&rendered), vec!["members", "name"]);
    }

    #[test]
    fn test_method_without_response() {
        let method = Method {
            ordinal: Ordinal(3),
            name: Identifier::new("Close"),
            maybe_request: Some(Message {
                parameters: vec![],
                size: 16,
            }),
            maybe_response: None,
        };

        assert_eq!(
            render(&method),
            r#"{
  "ordinal": 3,
  "name": "Close",
  "has_request": true,
  "maybe_request": [],
  "maybe_request_size": 16,
  "has_response": false
}"#
        );
    }

    #[test]
    fn test_method_with_parameters() {
        let method = Method {
            ordinal: Ordinal(1),
            name: Identifier::new("Read"),
            maybe_request: Some(Message {
                parameters: vec![Parameter {
                    type_: Type::primitive(PrimitiveSubtype::Uint64),
                    name: Identifier::new("count"),
                    offset: 16,
                }],
                size: 24,
            }),
            maybe_response: Some(Message {
                parameters: vec![Parameter {
                    type_: Type::primitive(PrimitiveSubtype::Status),
                    name: Identifier::new("s"),
                    offset: 16,
                }],
                size: 24,
            }),
        };

        let rendered = render(&method);
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(value["has_response"], serde_json::json!(true));
        assert_eq!(value["maybe_request"][0]["name"], serde_json::json!("count"));
        assert_eq!(
            value["maybe_response"][0]["type"]["subtype"],
            serde_json::json!("status")
        );
        assert_eq!(value["maybe_response_size"], serde_json::json!(24));
    }

    #[test]
    fn test_union_members() {
        let union = Union {
            name: Name::new("Value"),
            members: vec![UnionMember {
                type_: Type::String {
                    maybe_element_count: None,
                    nullability: Nullability::Nonnullable,
                },
                name: Identifier::new("text"),
                offset: 8,
            }],
            size: 24,
        };

        let value: serde_json::Value =
            serde_json::from_str(&render(&union)).expect("valid JSON");
        assert_eq!(value["name"], serde_json::json!("Value"));
        assert_eq!(value["members"][0]["offset"], serde_json::json!(8));
        assert_eq!(value["size"], serde_json::json!(24));
    }

    #[test]
    fn test_every_handle_subtype_is_a_string() {
        for subtype in [
            HandleSubtype::Handle,
            HandleSubtype::Process,
            HandleSubtype::Thread,
            HandleSubtype::Vmo,
            HandleSubtype::Channel,
            HandleSubtype::Event,
            HandleSubtype::Port,
            HandleSubtype::Interrupt,
            HandleSubtype::Iomap,
            HandleSubtype::Pci,
            HandleSubtype::Log,
            HandleSubtype::Socket,
            HandleSubtype::Resource,
            HandleSubtype::Eventpair,
            HandleSubtype::Job,
            HandleSubtype::Vmar,
            HandleSubtype::Fifo,
            HandleSubtype::Hypervisor,
            HandleSubtype::Guest,
            HandleSubtype::Timer,
        ] {
            assert_eq!(render(&subtype), format!("\"{}\"", subtype.as_str()));
            let parsed: HandleSubtype =
                serde_json::from_str(&render(&subtype)).expect("same spelling as serde");
            assert_eq!(parsed, subtype);
        }
    }
}

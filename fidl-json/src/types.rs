//! Resolved library model
//!
//! These types are the input to the JSON generator. They are produced by the
//! resolution phase and are never mutated while serializing. The serde derives
//! describe the interchange form used to hand a resolved library across a
//! process boundary; the IR itself is written by [`crate::produce_json`].

use serde::{Deserialize, Serialize};

/// A single identifier token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Identifier(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A dotted reference such as `fuchsia.io.Node`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CompoundIdentifier {
    pub components: Vec<Identifier>,
}

impl CompoundIdentifier {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CompoundIdentifier {
            components: components.into_iter().map(Identifier::new).collect(),
        }
    }
}

/// Name of a top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Name {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub library: Vec<String>,
    pub name: String,
}

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Name {
            library: Vec::new(),
            name: name.into(),
        }
    }

    pub fn with_library<I, S>(mut self, library: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.library = library.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical long form used in the IR.
    ///
    /// Library qualification is not applied yet; consumers depend on the bare
    /// identifier.
    pub fn long_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Literal {
    /// `value` is the source text, quotes included.
    String { value: String },
    /// `value` is the lexed number token, already valid JSON number syntax.
    Numeric { value: String },
    True,
    False,
    Default,
}

impl Literal {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::String { .. } => "string",
            Literal::Numeric { .. } => "numeric",
            Literal::True => "true",
            Literal::False => "false",
            Literal::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Constant {
    Identifier { identifier: CompoundIdentifier },
    Literal { literal: Literal },
}

impl Constant {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::Identifier { .. } => "identifier",
            Constant::Literal { .. } => "literal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nullability {
    Nullable,
    #[default]
    Nonnullable,
}

impl Nullability {
    pub fn is_nullable(self) -> bool {
        matches!(self, Nullability::Nullable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveSubtype {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Bool,
    Status,
    Float32,
    Float64,
}

impl PrimitiveSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveSubtype::Int8 => "int8",
            PrimitiveSubtype::Int16 => "int16",
            PrimitiveSubtype::Int32 => "int32",
            PrimitiveSubtype::Int64 => "int64",
            PrimitiveSubtype::Uint8 => "uint8",
            PrimitiveSubtype::Uint16 => "uint16",
            PrimitiveSubtype::Uint32 => "uint32",
            PrimitiveSubtype::Uint64 => "uint64",
            PrimitiveSubtype::Bool => "bool",
            PrimitiveSubtype::Status => "status",
            PrimitiveSubtype::Float32 => "float32",
            PrimitiveSubtype::Float64 => "float64",
        }
    }
}

/// Kernel object kind carried by a handle type. `Handle` is the untyped handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSubtype {
    Handle,
    Process,
    Thread,
    Vmo,
    Channel,
    Event,
    Port,
    Interrupt,
    Iomap,
    Pci,
    Log,
    Socket,
    Resource,
    Eventpair,
    Job,
    Vmar,
    Fifo,
    Hypervisor,
    Guest,
    Timer,
}

impl HandleSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleSubtype::Handle => "handle",
            HandleSubtype::Process => "process",
            HandleSubtype::Thread => "thread",
            HandleSubtype::Vmo => "vmo",
            HandleSubtype::Channel => "channel",
            HandleSubtype::Event => "event",
            HandleSubtype::Port => "port",
            HandleSubtype::Interrupt => "interrupt",
            HandleSubtype::Iomap => "iomap",
            HandleSubtype::Pci => "pci",
            HandleSubtype::Log => "log",
            HandleSubtype::Socket => "socket",
            HandleSubtype::Resource => "resource",
            HandleSubtype::Eventpair => "eventpair",
            HandleSubtype::Job => "job",
            HandleSubtype::Vmar => "vmar",
            HandleSubtype::Fifo => "fifo",
            HandleSubtype::Hypervisor => "hypervisor",
            HandleSubtype::Guest => "guest",
            HandleSubtype::Timer => "timer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Type {
    Array {
        element_type: Box<Type>,
        element_count: Box<Constant>,
    },
    Vector {
        element_type: Box<Type>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maybe_element_count: Option<Box<Constant>>,
        #[serde(default)]
        nullability: Nullability,
    },
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maybe_element_count: Option<Box<Constant>>,
        #[serde(default)]
        nullability: Nullability,
    },
    Handle {
        subtype: HandleSubtype,
        #[serde(default)]
        nullability: Nullability,
    },
    /// Server end of a channel speaking the interface named by `subtype`.
    Request {
        subtype: CompoundIdentifier,
        #[serde(default)]
        nullability: Nullability,
    },
    Primitive {
        subtype: PrimitiveSubtype,
    },
    Identifier {
        identifier: CompoundIdentifier,
        #[serde(default)]
        nullability: Nullability,
    },
}

impl Type {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Array { .. } => "array",
            Type::Vector { .. } => "vector",
            Type::String { .. } => "string",
            Type::Handle { .. } => "handle",
            Type::Request { .. } => "request",
            Type::Primitive { .. } => "primitive",
            Type::Identifier { .. } => "identifier",
        }
    }

    pub fn primitive(subtype: PrimitiveSubtype) -> Self {
        Type::Primitive { subtype }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Ordinal(pub u32);

impl Ordinal {
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Const {
    pub name: Name,
    #[serde(rename = "type")]
    pub type_: Type,
    pub value: Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumMember {
    pub name: Identifier,
    pub value: Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Enum {
    pub name: Name,
    /// Declared underlying type; only a primitive one reaches the IR.
    #[serde(rename = "type")]
    pub type_: Type,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub type_: Type,
    pub name: Identifier,
    pub offset: u64,
}

/// Laid-out request or response payload of a method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub parameters: Vec<Parameter>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Method {
    pub ordinal: Ordinal,
    pub name: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maybe_request: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maybe_response: Option<Message>,
}

impl Method {
    pub fn has_request(&self) -> bool {
        self.maybe_request.is_some()
    }

    pub fn has_response(&self) -> bool {
        self.maybe_response.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Interface {
    pub name: Name,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StructMember {
    #[serde(rename = "type")]
    pub type_: Type,
    pub name: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maybe_default_value: Option<Constant>,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Struct {
    pub name: Name,
    pub members: Vec<StructMember>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnionMember {
    #[serde(rename = "type")]
    pub type_: Type,
    pub name: Identifier,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Union {
    pub name: Name,
    pub members: Vec<UnionMember>,
    pub size: u64,
}

/// Which collection of a [`Library`] a declaration lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Const,
    Enum,
    Interface,
    Struct,
    Union,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Union => "union",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Library {
    pub name: String,
    #[serde(default)]
    pub const_declarations: Vec<Const>,
    #[serde(default)]
    pub enum_declarations: Vec<Enum>,
    #[serde(default)]
    pub interface_declarations: Vec<Interface>,
    #[serde(default)]
    pub struct_declarations: Vec<Struct>,
    #[serde(default)]
    pub union_declarations: Vec<Union>,
    /// Order in which backends must process declarations.
    #[serde(default)]
    pub declaration_order: Vec<Name>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Library {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Every declared name with its kind, consts first and unions last.
    pub fn declarations(&self) -> impl Iterator<Item = (&Name, DeclarationKind)> + '_ {
        let consts = self
            .const_declarations
            .iter()
            .map(|decl| (&decl.name, DeclarationKind::Const));
        let enums = self
            .enum_declarations
            .iter()
            .map(|decl| (&decl.name, DeclarationKind::Enum));
        let interfaces = self
            .interface_declarations
            .iter()
            .map(|decl| (&decl.name, DeclarationKind::Interface));
        let structs = self
            .struct_declarations
            .iter()
            .map(|decl| (&decl.name, DeclarationKind::Struct));
        let unions = self
            .union_declarations
            .iter()
            .map(|decl| (&decl.name, DeclarationKind::Union));

        consts.chain(enums).chain(interfaces).chain(structs).chain(unions)
    }

    pub fn declaration_count(&self) -> usize {
        self.const_declarations.len()
            + self.enum_declarations.len()
            + self.interface_declarations.len()
            + self.struct_declarations.len()
            + self.union_declarations.len()
    }
}

//! Library-level IR envelope

use std::collections::HashMap;
use std::io::Write;

use crate::builder::Position::{self, First, Subsequent};
use crate::emit::JsonWriter;
use crate::error::{Error, Result};
use crate::types::{DeclarationKind, Library};

/// Produces the JSON IR for one resolved library.
///
/// Each generator owns its own [`JsonWriter`], so independent libraries can be
/// serialized on separate threads.
pub struct JsonGenerator<'a> {
    library: &'a Library,
}

impl<'a> JsonGenerator<'a> {
    pub fn new(library: &'a Library) -> Self {
        Self { library }
    }

    /// Renders the whole document, trailing newline included.
    pub fn produce_json(&self) -> String {
        let library = self.library;
        tracing::debug!(
            library = %library.name,
            consts = library.const_declarations.len(),
            enums = library.enum_declarations.len(),
            interfaces = library.interface_declarations.len(),
            structs = library.struct_declarations.len(),
            unions = library.union_declarations.len(),
            "producing JSON IR"
        );

        let mut out = JsonWriter::new();
        out.generate_object(|out| {
            out.object_member("name", library.name.as_str(), First);
            // Dependencies are not modeled yet.
            out.object_key("library_dependencies", Subsequent);
            out.generate_array::<bool>(&[]);
            out.object_member("const_declarations", &library.const_declarations, Subsequent);
            out.object_member("enum_declarations", &library.enum_declarations, Subsequent);
            out.object_member(
                "interface_declarations",
                &library.interface_declarations,
                Subsequent,
            );
            out.object_member("struct_declarations", &library.struct_declarations, Subsequent);
            out.object_member("union_declarations", &library.union_declarations, Subsequent);
            out.object_member("declaration_order", &library.declaration_order, Subsequent);

            out.object_key("declarations", Subsequent);
            self.generate_declaration_map(out);
        });
        out.emit_newline();

        let json = out.into_string();
        tracing::debug!(library = %library.name, bytes = json.len(), "produced JSON IR");
        json
    }

    /// Renders the document and hands it to `sink` in a single write.
    pub fn write_json<W: Write>(&self, mut sink: W) -> Result<()> {
        let json = self.produce_json();
        sink.write_all(json.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Name to kind map. A name declared twice is written twice, in order, so
    /// JSON readers keep the later kind.
    fn generate_declaration_map(&self, out: &mut JsonWriter) {
        let mut seen: HashMap<&str, DeclarationKind> = HashMap::new();

        out.generate_object(|out| {
            for (index, (name, kind)) in self.library.declarations().enumerate() {
                let long_name = name.long_name();
                if let Some(previous) = seen.insert(long_name, kind) {
                    tracing::warn!(
                        library = %self.library.name,
                        declaration = long_name,
                        previous = %previous,
                        kind = %kind,
                        "declaration name collides across kinds; later entry wins"
                    );
                }

                out.object_key(long_name, Position::from_index(index));
                out.emit_string(kind.as_str());
            }
        });
    }
}

/// Renders `library` as JSON IR.
pub fn produce_json(library: &Library) -> String {
    JsonGenerator::new(library).produce_json()
}

/// Renders `library` as JSON IR into `sink`.
pub fn write_json<W: Write>(library: &Library, sink: W) -> Result<()> {
    JsonGenerator::new(library).write_json(sink)
}

/// Fails on the first long name shared by two declarations.
pub fn check_unique_names(library: &Library) -> Result<()> {
    let mut seen: HashMap<&str, DeclarationKind> = HashMap::new();

    for (name, kind) in library.declarations() {
        if let Some(first) = seen.insert(name.long_name(), kind) {
            return Err(Error::DuplicateDeclaration {
                name: name.long_name().to_string(),
                first,
                second: kind,
            });
        }
    }

    Ok(())
}

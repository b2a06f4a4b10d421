//! The generation engine: one linear pass over the schema tree.
//!
//! Each entity emitter is a pure function from its subtree to a
//! `Fragments` value; the assembler only concatenates, so the output
//! is a deterministic function of the model and rerunning on an
//! unchanged schema is byte-identical.

pub mod command;
pub mod enums;
pub mod script_fn;
pub mod structs;
pub mod types;

use crate::model::{ParamDef, PluginSpec};

/// What one schema entity contributes to the two artifacts and to the
/// side-accumulated registration block.
#[derive(Debug)]
pub struct Fragments {
    pub decls: String,
    pub defs: String,
    pub registration: String,
}

/// The two finished output modules.
#[derive(Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub header: String,
    pub source: String,
}

const AUTOGEN_NOTICE: &str = "// This file is generated automatically!\n// Do NOT edit!\n";

const HEADER_PRELUDE: &str = "\n#include \"luaFunctionData.h\"\n#include \"v_repLib.h\"\n#include <boost/assign/list_of.hpp>\n\nvoid registerLuaStuff();\n";

const SOURCE_PRELUDE: &str = "\n#include \"stubs.h\"\n#include <boost/assign/list_of.hpp>\n#include <boost/lexical_cast.hpp>\n";

/// Compile-time shape table the host uses to validate an argument
/// array before dispatch: element count first, then one (tag, minsize)
/// pair per parameter in declaration order.
pub(crate) fn shape_table(sym: &str, params: &[ParamDef]) -> String {
    let mut out = format!("const int {sym}[] = {{\n    {}", params.len());
    for p in params {
        out.push_str(&format!(
            ",\n    {}, {}",
            types::carrier_tag(p.ty),
            p.min_size.unwrap_or(0)
        ));
    }
    out.push_str("\n};\n");
    out
}

/// Project the whole schema into the declarations and definitions
/// modules: enums, then commands, then script-functions, each in
/// schema order, with the registration entry point closing the
/// definitions module.
pub fn generate(spec: &PluginSpec) -> Artifacts {
    let prefix = spec.command_prefix();

    let mut header = String::from(AUTOGEN_NOTICE);
    header.push_str(HEADER_PRELUDE);
    let mut source = String::from(AUTOGEN_NOTICE);
    source.push_str(SOURCE_PRELUDE);
    let mut registration =
        String::from("void registerLuaStuff()\n{\n    std::vector<int> inArgs;\n");

    let fragments = spec
        .enums
        .iter()
        .map(enums::fragments)
        .chain(spec.commands.iter().map(|c| command::fragments(c, &prefix)))
        .chain(spec.script_functions.iter().map(script_fn::fragments));

    for f in fragments {
        if !f.decls.is_empty() {
            header.push('\n');
            header.push_str(&f.decls);
        }
        if !f.defs.is_empty() {
            source.push('\n');
            source.push_str(&f.defs);
        }
        registration.push_str(&f.registration);
    }

    registration.push_str("}\n");
    source.push('\n');
    source.push_str(&registration);

    Artifacts { header, source }
}

//! Typed schema tree as it comes out of the XML loader.
//!
//! Everything here is a read-only view for the generator: the loader
//! builds it once, `generator::generate` projects it into text, nothing
//! mutates it in between.

/// Leaf value kinds the host runtime can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Bool,
}

/// A parameter's declared kind.
///
/// Tables hold scalars only; a table-of-table cannot be represented,
/// so one level of nesting is the whole type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Scalar(ScalarType),
    Table(ScalarType),
}

/// One named, typed value slot of a command or script-function.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    pub name: String,
    pub ty: ParamType,
    /// Minimum element count for tables; only feeds the carrier tag
    /// table (as 0 when absent) and the help label suffix.
    pub min_size: Option<u32>,
    /// Literal default as written in the schema. A param without one
    /// is mandatory.
    pub default: Option<String>,
}

impl ParamDef {
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// An integer constant set exposed to the script side.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: String,
    /// Prepended to every member's literal name ("" when absent).
    pub item_prefix: String,
    /// Explicit value for the first member; the target language's
    /// auto-increment numbers the rest.
    pub base: Option<i64>,
    pub items: Vec<String>,
}

/// A host-exposed operation callable from script code.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDef {
    pub name: String,
    pub params: Vec<ParamDef>,
    pub returns: Vec<ParamDef>,
}

impl CommandDef {
    /// Params without a default; the schema lists them first and the
    /// positional split in the generated callback relies on that.
    pub fn mandatory_params(&self) -> impl Iterator<Item = &ParamDef> {
        self.params.iter().filter(|p| !p.is_optional())
    }

    pub fn optional_params(&self) -> impl Iterator<Item = &ParamDef> {
        self.params.iter().filter(|p| p.is_optional())
    }
}

/// The reverse call direction: native code calling into a script.
/// No optionality on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFunctionDef {
    pub name: String,
    pub params: Vec<ParamDef>,
    pub returns: Vec<ParamDef>,
}

/// Whole plugin description, in schema order within each category.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSpec {
    pub name: String,
    /// Documentation only; codegen never reads it.
    pub author: String,
    pub enums: Vec<EnumDef>,
    pub commands: Vec<CommandDef>,
    pub script_functions: Vec<ScriptFunctionDef>,
}

impl PluginSpec {
    /// Namespacing prefix for every host-visible command symbol.
    pub fn command_prefix(&self) -> String {
        format!("simExt{}_", self.name)
    }
}

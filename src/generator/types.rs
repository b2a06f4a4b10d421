//! Type Mapper and default-literal translation.
//!
//! Four parallel projections of a parameter's declared kind: the C++
//! storage type, the host carrier tag, the help-string label and the
//! carrier accessor. All of them are pure functions of the `ParamType`
//! (the help label also reads `min_size`), so every table/scalar
//! distinction lives here and nowhere else in the emitters.

use crate::model::{ParamDef, ParamType, ScalarType};

fn scalar_storage(s: ScalarType) -> &'static str {
    match s {
        ScalarType::Int => "int",
        ScalarType::Float => "float",
        ScalarType::String => "std::string",
        ScalarType::Bool => "bool",
    }
}

/// C++ storage type used for struct fields and wrapper arguments.
pub fn storage_type(ty: ParamType) -> String {
    match ty {
        ParamType::Scalar(s) => scalar_storage(s).to_string(),
        ParamType::Table(s) => format!("std::vector<{}>", scalar_storage(s)),
    }
}

/// `<storage type> <name>` — one struct field or argument declaration.
pub fn field_decl(p: &ParamDef) -> String {
    format!("{} {}", storage_type(p.ty), p.name)
}

fn scalar_tag(s: ScalarType) -> &'static str {
    match s {
        ScalarType::Int => "sim_lua_arg_int",
        ScalarType::Float => "sim_lua_arg_float",
        ScalarType::String => "sim_lua_arg_string",
        ScalarType::Bool => "sim_lua_arg_bool",
    }
}

/// Host-runtime tag expression for the in/out shape tables. Tables
/// compose the table bit with their item's leaf tag.
pub fn carrier_tag(ty: ParamType) -> String {
    match ty {
        ParamType::Scalar(s) => scalar_tag(s).to_string(),
        ParamType::Table(s) => format!("sim_lua_arg_table|{}", scalar_tag(s)),
    }
}

/// Type label shown in the registered help string. Lua does not
/// distinguish int from float, so both render as "number"; tables
/// advertise their minimum size when one is declared.
pub fn help_label(p: &ParamDef) -> String {
    match p.ty {
        ParamType::Scalar(ScalarType::Int) | ParamType::Scalar(ScalarType::Float) => {
            "number".to_string()
        }
        ParamType::Scalar(ScalarType::String) => "string".to_string(),
        ParamType::Scalar(ScalarType::Bool) => "bool".to_string(),
        ParamType::Table(_) => match p.min_size {
            Some(n) => format!("table_{n}"),
            None => "table".to_string(),
        },
    }
}

fn scalar_field(s: ScalarType) -> &'static str {
    match s {
        ScalarType::Int => "intData",
        ScalarType::Float => "floatData",
        ScalarType::String => "stringData",
        ScalarType::Bool => "boolData",
    }
}

/// Accessor into the carrier's parallel storage arrays. Scalars take
/// element 0 of their array; a table takes the whole backing array,
/// hence no index.
pub fn accessor(ty: ParamType) -> String {
    match ty {
        ParamType::Scalar(s) => format!("{}[0]", scalar_field(s)),
        ParamType::Table(s) => scalar_field(s).to_string(),
    }
}

/// Translate a schema default into a C++ initializer expression.
///
/// Scalars pass through verbatim (the schema author owes us a valid
/// C++ literal). Table defaults are a bracketed list: each element
/// becomes one `list_of` link, and an empty pair of brackets becomes
/// an empty vector construction.
pub fn default_literal(p: &ParamDef, default: &str) -> String {
    match p.ty {
        ParamType::Scalar(_) => default.to_string(),
        ParamType::Table(_) => {
            let inner = default.trim();
            let inner = inner
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .unwrap_or(inner);
            if inner.trim().is_empty() {
                return format!("{}()", storage_type(p.ty));
            }
            let links: String = inner
                .split(',')
                .map(|e| format!("({})", e.trim()))
                .collect();
            format!("boost::assign::list_of{links}")
        }
    }
}

//! Aggregate-type emission: the `_in` / `_out` records that carry a
//! call's typed arguments and results.

use crate::generator::types::{default_literal, field_decl};
use crate::model::ParamDef;

/// `struct <name> { <field per param, in order>; [ctor decl] };`
pub fn struct_decl(name: &str, params: &[ParamDef], constructor: bool) -> String {
    let mut out = format!("struct {name}\n{{\n");
    for p in params {
        out.push_str(&format!("    {};\n", field_decl(p)));
    }
    if constructor {
        out.push_str(&format!("    {name}();\n"));
    }
    out.push_str("};\n");
    out
}

/// Out-of-line constructor body assigning every declared default.
/// Fields without one keep their implicit C++ default construction.
pub fn constructor_def(name: &str, params: &[ParamDef]) -> String {
    let mut out = format!("{name}::{name}()\n{{\n");
    for p in params {
        if let Some(default) = &p.default {
            out.push_str(&format!(
                "    {} = {};\n",
                p.name,
                default_literal(p, default)
            ));
        }
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParamType, ScalarType};

    fn param(name: &str, ty: ParamType, default: Option<&str>) -> ParamDef {
        ParamDef {
            name: name.into(),
            ty,
            min_size: None,
            default: default.map(Into::into),
        }
    }

    #[test]
    fn fields_follow_param_order() {
        let decl = struct_decl(
            "Move_in",
            &[
                param("target", ParamType::Scalar(ScalarType::Int), None),
                param("speed", ParamType::Scalar(ScalarType::Float), Some("1.0")),
            ],
            true,
        );
        let target = decl.find("int target;").expect("target field");
        let speed = decl.find("float speed;").expect("speed field");
        assert!(target < speed);
        assert!(decl.contains("Move_in();"));
    }

    #[test]
    fn zero_params_still_emit_the_skeleton() {
        let decl = struct_decl("Ping_in", &[], true);
        assert_eq!(decl, "struct Ping_in\n{\n    Ping_in();\n};\n");
        let ctor = constructor_def("Ping_in", &[]);
        assert_eq!(ctor, "Ping_in::Ping_in()\n{\n}\n");
    }

    #[test]
    fn constructor_sets_only_defaulted_fields() {
        let ctor = constructor_def(
            "Move_in",
            &[
                param("target", ParamType::Scalar(ScalarType::Int), None),
                param("speed", ParamType::Scalar(ScalarType::Float), Some("1.0")),
                param("path", ParamType::Table(ScalarType::Int), Some("[1,2]")),
            ],
        );
        assert!(!ctor.contains("target ="));
        assert!(ctor.contains("speed = 1.0;"));
        assert!(ctor.contains("path = boost::assign::list_of(1)(2);"));
    }
}

//! Script-function emission: the native-invokes-script direction.
//!
//! The generated wrapper marshals the typed in-record into the
//! carrier, calls into the script by id, unmarshals the reply against
//! a return-shape table, and reports failures through the host's
//! error primitive instead of raising. Carrier buffers are released
//! on every exit path.

use crate::generator::structs::struct_decl;
use crate::generator::types::accessor;
use crate::generator::{Fragments, shape_table};
use crate::model::ScriptFunctionDef;

pub fn fragments(f: &ScriptFunctionDef) -> Fragments {
    let name = &f.name;

    // No constructors here: script-function parameters carry no
    // defaults, the caller fills every field.
    let mut decls = struct_decl(&format!("{name}_in"), &f.params, false);
    decls.push('\n');
    decls.push_str(&struct_decl(&format!("{name}_out"), &f.returns, false));
    decls.push_str(&format!(
        "\nbool {name}(simInt scriptId, const char *func, {name}_in *in, {name}_out *out);\n"
    ));

    let mut defs = shape_table(&format!("outArgs_{name}"), &f.returns);

    let pushes: String = f
        .params
        .iter()
        .map(|p| {
            format!(
                "    D.pushOutData_luaFunctionCall(CLuaFunctionDataItem(in->{}));\n",
                p.name
            )
        })
        .collect();
    let reads: String = f
        .returns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "            out->{} = outData->at({i}).{};\n",
                p.name,
                accessor(p.ty)
            )
        })
        .collect();

    defs.push_str(&format!(
        r#"
bool {name}(simInt scriptId, const char *func, {name}_in *in, {name}_out *out)
{{
    SLuaCallBack c;
    CLuaFunctionData D;
    bool ret = false;

{pushes}    D.writeDataToLua_luaFunctionCall(&c, outArgs_{name});

    if(simCallScriptFunction(scriptId, func, &c, NULL) != -1)
    {{
        if(D.readDataFromLua_luaFunctionCall(&c, outArgs_{name}, outArgs_{name}[0], func))
        {{
            std::vector<CLuaFunctionDataItem> *outData = D.getOutDataPtr_luaFunctionCall();
{reads}            ret = true;
        }}
        else
        {{
            simSetLastError(func, "return value size and/or type is incorrect");
        }}
    }}
    else
    {{
        simSetLastError(func, "callback returned an error");
    }}

    D.releaseBuffers_luaFunctionCall(&c);
    return ret;
}}
"#
    ));

    Fragments {
        decls,
        defs,
        registration: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParamDef, ParamType, ScalarType};

    fn param(name: &str, ty: ParamType) -> ParamDef {
        ParamDef {
            name: name.into(),
            ty,
            min_size: None,
            default: None,
        }
    }

    fn notify() -> ScriptFunctionDef {
        ScriptFunctionDef {
            name: "Notify".into(),
            params: vec![param("msg", ParamType::Scalar(ScalarType::String))],
            returns: vec![
                param("ack", ParamType::Scalar(ScalarType::Bool)),
                param("codes", ParamType::Table(ScalarType::Int)),
            ],
        }
    }

    #[test]
    fn records_have_no_constructors() {
        let f = fragments(&notify());
        assert!(f.decls.contains("struct Notify_in\n{\n    std::string msg;\n};"));
        assert!(!f.decls.contains("Notify_in();"));
    }

    #[test]
    fn shape_table_describes_the_return_list() {
        let f = fragments(&notify());
        assert!(f.defs.contains(
            "const int outArgs_Notify[] = {\n    2,\n    sim_lua_arg_bool, 0,\n    sim_lua_arg_table|sim_lua_arg_int, 0\n};"
        ));
    }

    #[test]
    fn wrapper_marshals_in_fields_and_unmarshals_reply_positionally() {
        let f = fragments(&notify());
        assert!(f.defs.contains("D.pushOutData_luaFunctionCall(CLuaFunctionDataItem(in->msg));"));
        assert!(f.defs.contains("out->ack = outData->at(0).boolData[0];"));
        assert!(f.defs.contains("out->codes = outData->at(1).intData;"));
    }

    #[test]
    fn both_failure_paths_report_distinct_errors() {
        let f = fragments(&notify());
        assert!(f.defs.contains("simSetLastError(func, \"return value size and/or type is incorrect\");"));
        assert!(f.defs.contains("simSetLastError(func, \"callback returned an error\");"));
    }

    #[test]
    fn buffers_are_released_after_every_path() {
        let f = fragments(&notify());
        let release = f.defs.find("D.releaseBuffers_luaFunctionCall(&c);").expect("release");
        let shape_err = f.defs.find("size and/or type").expect("shape error");
        let call_err = f.defs.find("callback returned an error").expect("call error");
        assert!(release > shape_err && release > call_err);
        assert!(f.defs.trim_end().ends_with("return ret;\n}"));
    }

    #[test]
    fn script_functions_register_nothing() {
        assert!(fragments(&notify()).registration.is_empty());
    }
}

//! Command emission: the host-invokes-native direction.
//!
//! Per command this produces the typed in/out records, the wrapper
//! entry points, the argument-shape table, the runtime callback that
//! unmarshals the generic argument array, and the registration
//! statement with its assembled help signature.

use crate::generator::structs::{constructor_def, struct_decl};
use crate::generator::types::{accessor, default_literal, field_decl, help_label, storage_type};
use crate::generator::{Fragments, shape_table};
use crate::model::{CommandDef, ParamDef};

/// `", type a, type b"` — trailing argument list after the fixed
/// leading parameters. With defaults only in declarations.
fn arg_list(params: &[ParamDef], with_defaults: bool) -> String {
    let mut out = String::new();
    for p in params {
        out.push_str(&format!(", {}", field_decl(p)));
        if with_defaults {
            if let Some(d) = &p.default {
                out.push_str(&format!(" = {}", default_literal(p, d)));
            }
        }
    }
    out
}

fn fill_in_record(params: &[ParamDef]) -> String {
    params
        .iter()
        .map(|p| format!("    in_args.{} = {};\n", p.name, p.name))
        .collect()
}

/// `out1,out2=<symbol>(in1,in2=default,...)` as shown by the host's
/// function browser; optional inputs advertise their raw schema
/// default, not the translated C++ literal.
fn help_string(cmd: &CommandDef, full: &str) -> String {
    let outs: Vec<String> = cmd
        .returns
        .iter()
        .map(|p| format!("{} {}", help_label(p), p.name))
        .collect();
    let ins: Vec<String> = cmd
        .params
        .iter()
        .map(|p| match &p.default {
            Some(d) => format!("{} {}={}", help_label(p), p.name, d),
            None => format!("{} {}", help_label(p), p.name),
        })
        .collect();
    format!("{}={}({})", outs.join(","), full, ins.join(","))
}

pub fn fragments(cmd: &CommandDef, prefix: &str) -> Fragments {
    let name = &cmd.name;
    let full = format!("{prefix}{name}");
    let mandatory_count = cmd.mandatory_params().count();

    let args = arg_list(&cmd.params, false);
    let args_def = arg_list(&cmd.params, true);
    let fill = fill_in_record(&cmd.params);

    // Declarations: records, the generated trampoline, the externally
    // supplied business-logic prototype, then the convenience wrappers.
    let mut decls = struct_decl(&format!("{name}_in"), &cmd.params, true);
    decls.push('\n');
    decls.push_str(&struct_decl(&format!("{name}_out"), &cmd.returns, true));
    decls.push_str(&format!(
        "\nvoid {name}(SLuaCallBack *p, {name}_in *in, {name}_out *out);\n\nvoid {name}(SLuaCallBack *p, const char *cmd, {name}_in *in, {name}_out *out);\n"
    ));
    if let [ret] = cmd.returns.as_slice() {
        decls.push_str(&format!(
            "\n{} {name}(SLuaCallBack *p{args_def});\n",
            storage_type(ret.ty)
        ));
    }
    decls.push_str(&format!(
        "\nvoid {name}(SLuaCallBack *p, {name}_out *out{args_def});\n"
    ));

    // Definitions.
    let mut defs = constructor_def(&format!("{name}_in"), &cmd.params);
    defs.push('\n');
    defs.push_str(&constructor_def(&format!("{name}_out"), &cmd.returns));
    defs.push('\n');
    defs.push_str(&shape_table(&format!("inArgs_{name}"), &cmd.params));

    if let [ret] = cmd.returns.as_slice() {
        defs.push_str(&format!(
            r#"
{rt} {name}(SLuaCallBack *p{args})
{{
    {name}_in in_args;
{fill}    {name}_out out_args;
    {name}(p, &in_args, &out_args);
    return out_args.{rn};
}}
"#,
            rt = storage_type(ret.ty),
            rn = ret.name,
        ));
    }

    defs.push_str(&format!(
        r#"
void {name}(SLuaCallBack *p, {name}_out *out{args})
{{
    {name}_in in_args;
{fill}    {name}(p, &in_args, out);
}}

void {name}(SLuaCallBack *p, {name}_in *in, {name}_out *out)
{{
    {name}(p, "{full}", in, out);
}}
"#
    ));

    // Runtime callback. Mandatory params are read unconditionally by
    // position; optional ones only when the incoming array reaches
    // their index, otherwise the record keeps its constructor default.
    // Shape-validation failure returns cleanly with zero outputs.
    let mut reads = String::new();
    for (i, p) in cmd.mandatory_params().enumerate() {
        reads.push_str(&format!(
            "        in_args.{} = inData->at({i}).{};\n",
            p.name,
            accessor(p.ty)
        ));
    }
    for (i, p) in cmd.optional_params().enumerate() {
        let j = mandatory_count + i;
        reads.push_str(&format!(
            "        if(inData->size()>{j}) in_args.{} = inData->at({j}).{};\n",
            p.name,
            accessor(p.ty)
        ));
    }
    let pushes: String = cmd
        .returns
        .iter()
        .map(|p| format!("        D.pushOutData(CLuaFunctionDataItem(out_args.{}));\n", p.name))
        .collect();

    defs.push_str(&format!(
        r#"
void LUA_{name}_CALLBACK(SLuaCallBack *p)
{{
    p->outputArgCount = 0;
    CLuaFunctionData D;
    if(D.readDataFromLua(p, inArgs_{name}, {mandatory_count}, "{full}"))
    {{
        std::vector<CLuaFunctionDataItem>* inData = D.getInDataPtr();
        {name}_in in_args;
        {name}_out out_args;
{reads}        {name}(p, "{full}", &in_args, &out_args);
{pushes}    }}
    D.writeDataToLua(p);
}}
"#
    ));

    let registration = format!(
        "    CLuaFunctionData::getInputDataForFunctionRegistration(inArgs_{name}, inArgs);\n    simRegisterCustomLuaFunction(\"{full}\", \"{help}\", &inArgs[0], LUA_{name}_CALLBACK);\n",
        help = help_string(cmd, &full),
    );

    Fragments {
        decls,
        defs,
        registration,
    }
}

//! Enum emission: the constant set, the value-to-name lookup and the
//! per-member variable registrations.

use crate::generator::Fragments;
use crate::model::EnumDef;

/// Only the first member carries the explicit base; C++'s enumerator
/// auto-increment numbers the rest, which keeps the emitted values
/// contiguous from `base`. A base of 0 is still a supplied base.
pub fn fragments(e: &EnumDef) -> Fragments {
    let mut decls = format!("enum {}\n{{\n", e.name);
    let mut cases = String::new();
    let mut registration = String::new();

    for (i, item) in e.items.iter().enumerate() {
        let member = format!("{}{}", e.item_prefix, item);
        match e.base {
            Some(base) if i == 0 => decls.push_str(&format!("    {member} = {base},\n")),
            _ => decls.push_str(&format!("    {member},\n")),
        }
        cases.push_str(&format!("        case {member}: return \"{member}\";\n"));
        registration.push_str(&format!(
            "    simRegisterCustomLuaVariable(\"{member}\", (boost::lexical_cast<std::string>({member})).c_str());\n"
        ));
    }
    decls.push_str("};\n");

    let lookup = format!("{}_string", e.name.to_lowercase());
    decls.push_str(&format!("\nconst char * {lookup}({} x);\n", e.name));

    let defs = format!(
        "const char * {lookup}({} x)\n{{\n    switch(x)\n    {{\n{cases}        default: return \"???\";\n    }}\n}}\n",
        e.name
    );

    Fragments {
        decls,
        defs,
        registration,
    }
}

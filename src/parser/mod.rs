//! XML schema loader.
//!
//! Two stages: the quick-xml event stream is first folded into a
//! generic element tree (tag, attributes, children), then a
//! conformance-checking conversion produces the typed model. The
//! generator only ever sees the typed tree.

use std::collections::HashMap;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::model::{
    CommandDef, EnumDef, ParamDef, ParamType, PluginSpec, ScalarType, ScriptFunctionDef,
};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("xml parse: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("malformed plugin description: root element is `{0}`, expected `plugin`")]
    RootTag(String),
    #[error("document ended before the root element closed")]
    NoRoot,
    #[error("unbalanced closing tag")]
    UnbalancedTag,
    #[error("element `{element}` is missing its `{attr}` attribute")]
    MissingAttr {
        element: String,
        attr: &'static str,
    },
    #[error("param `{param}`: unknown type `{ty}`")]
    UnknownType { param: String, ty: String },
    #[error("param `{param}`: tables hold scalars only, `item-type=\"table\"` is not supported")]
    NestedTable { param: String },
    #[error("element `{element}`: attribute `{attr}` value `{value}` is not an integer")]
    BadInt {
        element: String,
        attr: &'static str,
        value: String,
    },
}

/// One node of the raw attribute tree. Text content is irrelevant to
/// the schema format and gets dropped while folding.
#[derive(Debug)]
struct Element {
    tag: String,
    attrs: HashMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn require_attr(&self, attr: &'static str) -> Result<&str, SchemaError> {
        self.attr(attr).ok_or_else(|| SchemaError::MissingAttr {
            element: self.tag.clone(),
            attr,
        })
    }

    fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

fn element_from(start: &BytesStart) -> Result<Element, SchemaError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = HashMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        attrs.insert(key, attr.unescape_value()?.into_owned());
    }
    Ok(Element {
        tag,
        attrs,
        children: Vec::new(),
    })
}

/// Fold the event stream into the root element. Returns as soon as
/// the root closes; anything after it is ignored.
fn parse_tree(xml: &str) -> Result<Element, SchemaError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let el = element_from(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(el),
                    None => return Ok(el),
                }
            }
            Event::End(_) => {
                let el = stack.pop().ok_or(SchemaError::UnbalancedTag)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(el),
                    None => return Ok(el),
                }
            }
            Event::Eof => return Err(SchemaError::NoRoot),
            _ => {}
        }
    }
}

fn int_attr<T: FromStr>(el: &Element, attr: &'static str) -> Result<Option<T>, SchemaError> {
    match el.attr(attr) {
        None => Ok(None),
        Some(v) => v.trim().parse().map(Some).map_err(|_| SchemaError::BadInt {
            element: el.tag.clone(),
            attr,
            value: v.to_string(),
        }),
    }
}

fn scalar_type(s: &str) -> Option<ScalarType> {
    match s {
        "int" => Some(ScalarType::Int),
        "float" => Some(ScalarType::Float),
        "string" => Some(ScalarType::String),
        "bool" => Some(ScalarType::Bool),
        _ => None,
    }
}

fn param_def(el: &Element) -> Result<ParamDef, SchemaError> {
    let name = el.require_attr("name")?.to_string();
    let ty_str = el.require_attr("type")?;
    let ty = if ty_str == "table" {
        let item = el.require_attr("item-type")?;
        if item == "table" {
            return Err(SchemaError::NestedTable { param: name });
        }
        ParamType::Table(scalar_type(item).ok_or_else(|| SchemaError::UnknownType {
            param: name.clone(),
            ty: item.to_string(),
        })?)
    } else {
        ParamType::Scalar(scalar_type(ty_str).ok_or_else(|| SchemaError::UnknownType {
            param: name.clone(),
            ty: ty_str.to_string(),
        })?)
    };
    Ok(ParamDef {
        name,
        ty,
        min_size: int_attr(el, "minsize")?,
        default: el.attr("default").map(str::to_string),
    })
}

/// `<params>`/`<return>` wrapper lists, flattened in document order.
fn param_list(el: &Element, list_tag: &str) -> Result<Vec<ParamDef>, SchemaError> {
    let mut out = Vec::new();
    for list in el.children_named(list_tag) {
        for p in list.children_named("param") {
            out.push(param_def(p)?);
        }
    }
    Ok(out)
}

fn enum_def(el: &Element) -> Result<EnumDef, SchemaError> {
    let mut items = Vec::new();
    for item in el.children_named("item") {
        items.push(item.require_attr("name")?.to_string());
    }
    Ok(EnumDef {
        name: el.require_attr("name")?.to_string(),
        item_prefix: el.attr("item-prefix").unwrap_or_default().to_string(),
        base: int_attr(el, "base")?,
        items,
    })
}

fn command_def(el: &Element) -> Result<CommandDef, SchemaError> {
    Ok(CommandDef {
        name: el.require_attr("name")?.to_string(),
        params: param_list(el, "params")?,
        returns: param_list(el, "return")?,
    })
}

fn script_function_def(el: &Element) -> Result<ScriptFunctionDef, SchemaError> {
    Ok(ScriptFunctionDef {
        name: el.require_attr("name")?.to_string(),
        params: param_list(el, "params")?,
        returns: param_list(el, "return")?,
    })
}

/// Parse a whole plugin description. Unknown child elements and
/// attributes are ignored; order is preserved within each category.
pub fn load(xml: &str) -> Result<PluginSpec, SchemaError> {
    let root = parse_tree(xml)?;
    if root.tag != "plugin" {
        return Err(SchemaError::RootTag(root.tag));
    }

    let name = root.require_attr("name")?.to_string();
    let author = root.require_attr("author")?.to_string();

    let mut enums = Vec::new();
    let mut commands = Vec::new();
    let mut script_functions = Vec::new();
    for child in &root.children {
        match child.tag.as_str() {
            "enum" => enums.push(enum_def(child)?),
            "command" => commands.push(command_def(child)?),
            "script-function" => script_functions.push(script_function_def(child)?),
            _ => {}
        }
    }

    Ok(PluginSpec {
        name,
        author,
        enums,
        commands,
        script_functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<plugin name="Nav" author="someone@example.com">
    <enum name="Mode" item-prefix="sim_nav_" base="100">
        <item name="idle"/>
        <item name="active"/>
    </enum>
    <command name="Move">
        <params>
            <param name="target" type="int"/>
            <param name="speed" type="float" default="1.0"/>
            <param name="via" type="table" item-type="float" minsize="3" default="[0,0,0]"/>
        </params>
        <return>
            <param name="ok" type="bool"/>
        </return>
    </command>
    <script-function name="onArrived">
        <params>
            <param name="target" type="int"/>
        </params>
        <return>
            <param name="handled" type="bool"/>
        </return>
    </script-function>
</plugin>
"#;

    #[test]
    fn loads_the_whole_schema_in_order() {
        let spec = load(SAMPLE).expect("valid schema");
        assert_eq!(spec.name, "Nav");
        assert_eq!(spec.author, "someone@example.com");
        assert_eq!(spec.command_prefix(), "simExtNav_");

        assert_eq!(spec.enums.len(), 1);
        assert_eq!(spec.enums[0].base, Some(100));
        assert_eq!(spec.enums[0].items, vec!["idle", "active"]);

        let cmd = &spec.commands[0];
        assert_eq!(cmd.name, "Move");
        assert_eq!(cmd.params.len(), 3);
        assert_eq!(cmd.params[0].ty, ParamType::Scalar(ScalarType::Int));
        assert!(cmd.params[0].default.is_none());
        assert_eq!(cmd.params[1].default.as_deref(), Some("1.0"));
        assert_eq!(cmd.params[2].ty, ParamType::Table(ScalarType::Float));
        assert_eq!(cmd.params[2].min_size, Some(3));
        assert_eq!(cmd.returns.len(), 1);

        assert_eq!(spec.script_functions[0].name, "onArrived");
    }

    #[test]
    fn mandatory_optional_split_follows_defaults() {
        let spec = load(SAMPLE).expect("valid schema");
        let cmd = &spec.commands[0];
        let mandatory: Vec<_> = cmd.mandatory_params().map(|p| p.name.as_str()).collect();
        let optional: Vec<_> = cmd.optional_params().map(|p| p.name.as_str()).collect();
        assert_eq!(mandatory, vec!["target"]);
        assert_eq!(optional, vec!["speed", "via"]);
    }

    #[test]
    fn wrong_root_tag_is_a_malformed_schema() {
        let err = load(r#"<notplugin name="X" author="y"/>"#).expect_err("must fail");
        assert!(matches!(err, SchemaError::RootTag(tag) if tag == "notplugin"));
    }

    #[test]
    fn table_of_table_is_rejected() {
        let xml = r#"
<plugin name="X" author="y">
    <command name="Bad">
        <params>
            <param name="m" type="table" item-type="table"/>
        </params>
    </command>
</plugin>
"#;
        let err = load(xml).expect_err("must fail");
        assert!(matches!(err, SchemaError::NestedTable { param } if param == "m"));
    }

    #[test]
    fn unknown_param_type_is_a_hard_error() {
        let xml = r#"
<plugin name="X" author="y">
    <command name="Bad">
        <params>
            <param name="p" type="quaternion"/>
        </params>
    </command>
</plugin>
"#;
        let err = load(xml).expect_err("must fail");
        assert!(matches!(err, SchemaError::UnknownType { ty, .. } if ty == "quaternion"));
    }

    #[test]
    fn missing_name_attribute_is_reported() {
        let err = load(r#"<plugin author="y"/>"#).expect_err("must fail");
        assert!(matches!(
            err,
            SchemaError::MissingAttr { attr: "name", .. }
        ));
    }

    #[test]
    fn unparsable_base_is_reported() {
        let xml = r#"
<plugin name="X" author="y">
    <enum name="E" base="ten"><item name="a"/></enum>
</plugin>
"#;
        let err = load(xml).expect_err("must fail");
        assert!(matches!(err, SchemaError::BadInt { attr: "base", .. }));
    }

    #[test]
    fn truncated_document_is_rejected() {
        let err = load(r#"<plugin name="X" author="y"><command name="Move">"#)
            .expect_err("must fail");
        assert!(matches!(err, SchemaError::NoRoot | SchemaError::Xml(_)));
    }
}

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ClientError;

// Structural model of a vendor XSD, restricted to the subset the
// Cardskipper documents use: nested element declarations, named complex
// types, sequences, occurrence bounds and attribute declarations with the
// simple types int/boolean/date/dateTime.

const MAX_TYPE_DEPTH: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Text,
    Int,
    Bool,
    Date,
    DateTime,
}

impl AttrKind {
    fn from_type(type_name: &str) -> Self {
        let local = type_name.rsplit(':').next().unwrap_or(type_name);
        match local {
            "int" | "integer" | "long" | "short" | "positiveInteger" | "nonNegativeInteger"
            | "unsignedInt" => AttrKind::Int,
            "boolean" => AttrKind::Bool,
            "date" => AttrKind::Date,
            "dateTime" => AttrKind::DateTime,
            _ => AttrKind::Text,
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            AttrKind::Text => true,
            AttrKind::Int => value.parse::<i64>().is_ok(),
            AttrKind::Bool => matches!(value, "true" | "false" | "1" | "0"),
            AttrKind::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            AttrKind::DateTime => {
                chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
                    || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttributeDecl {
    pub name: String,
    pub kind: AttrKind,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct ElementDecl {
    pub name: String,
    pub attributes: Vec<AttributeDecl>,
    pub children: Vec<ChildDecl>,
    type_ref: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChildDecl {
    pub element: ElementDecl,
    pub min_occurs: u32,
    /// `None` means unbounded.
    pub max_occurs: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Schema {
    root: ElementDecl,
}

enum Frame {
    Element {
        name: String,
        type_ref: Option<String>,
        min_occurs: u32,
        max_occurs: Option<u32>,
        attrs: Vec<AttributeDecl>,
        children: Vec<ChildDecl>,
    },
    NamedType {
        name: String,
        attrs: Vec<AttributeDecl>,
        children: Vec<ChildDecl>,
    },
}

type NamedTypes = HashMap<String, (Vec<AttributeDecl>, Vec<ChildDecl>)>;

impl Schema {
    /// Parses an XSD document fetched from the vendor into a structural
    /// model usable for validation.
    pub fn parse(source: &[u8]) -> Result<Self, ClientError> {
        let text =
            std::str::from_utf8(source).map_err(|e| ClientError::InvalidSchema(e.to_string()))?;
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Frame> = Vec::new();
        // Anonymous complexType declarations push no frame; this tracks
        // which End events should pop one.
        let mut named_complex_types: Vec<bool> = Vec::new();
        let mut types: NamedTypes = HashMap::new();
        let mut roots: Vec<ElementDecl> = Vec::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ClientError::InvalidSchema(e.to_string()))?;
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"element" => {
                        let (name, type_ref, min_occurs, max_occurs) =
                            element_decl_parts(&e).map_err(ClientError::InvalidSchema)?;
                        stack.push(Frame::Element {
                            name,
                            type_ref,
                            min_occurs,
                            max_occurs,
                            attrs: Vec::new(),
                            children: Vec::new(),
                        });
                    }
                    b"complexType" => {
                        match attr_value(&e, "name").map_err(ClientError::InvalidSchema)? {
                            Some(name) => {
                                named_complex_types.push(true);
                                stack.push(Frame::NamedType {
                                    name,
                                    attrs: Vec::new(),
                                    children: Vec::new(),
                                });
                            }
                            None => named_complex_types.push(false),
                        }
                    }
                    b"attribute" => {
                        push_attribute(&e, &mut stack).map_err(ClientError::InvalidSchema)?;
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"element" => {
                        let (name, type_ref, min_occurs, max_occurs) =
                            element_decl_parts(&e).map_err(ClientError::InvalidSchema)?;
                        let element = ElementDecl {
                            name,
                            attributes: Vec::new(),
                            children: Vec::new(),
                            type_ref,
                        };
                        attach_child(
                            ChildDecl {
                                element,
                                min_occurs,
                                max_occurs,
                            },
                            &mut stack,
                            &mut roots,
                        );
                    }
                    b"attribute" => {
                        push_attribute(&e, &mut stack).map_err(ClientError::InvalidSchema)?;
                    }
                    _ => {}
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"element" => match stack.pop() {
                        Some(Frame::Element {
                            name,
                            type_ref,
                            min_occurs,
                            max_occurs,
                            attrs,
                            children,
                        }) => {
                            let element = ElementDecl {
                                name,
                                attributes: attrs,
                                children,
                                type_ref,
                            };
                            attach_child(
                                ChildDecl {
                                    element,
                                    min_occurs,
                                    max_occurs,
                                },
                                &mut stack,
                                &mut roots,
                            );
                        }
                        _ => {
                            return Err(ClientError::InvalidSchema(
                                "unbalanced element declaration".to_string(),
                            ))
                        }
                    },
                    b"complexType" => {
                        if named_complex_types.pop() == Some(true) {
                            match stack.pop() {
                                Some(Frame::NamedType {
                                    name,
                                    attrs,
                                    children,
                                }) => {
                                    types.insert(name, (attrs, children));
                                }
                                _ => {
                                    return Err(ClientError::InvalidSchema(
                                        "unbalanced complexType declaration".to_string(),
                                    ))
                                }
                            }
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        let root = roots.into_iter().next().ok_or_else(|| {
            ClientError::InvalidSchema("schema declares no global element".to_string())
        })?;
        let root = resolve(root, &types, 0)?;
        Ok(Schema { root })
    }

    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Validates an XML document against the schema. Undeclared elements
    /// and attributes, missing required attributes, occurrence violations
    /// and lexically invalid attribute values all fail.
    pub fn validate(&self, xml: &str) -> Result<(), ClientError> {
        let root = parse_instance(xml)?;
        if root.name != self.root.name {
            return Err(ClientError::SchemaViolation(format!(
                "unexpected root element {}, expected {}",
                root.name, self.root.name
            )));
        }
        let path = root.name.clone();
        validate_element(&root, &self.root, &path)
    }
}

fn element_decl_parts(
    e: &BytesStart,
) -> Result<(String, Option<String>, u32, Option<u32>), String> {
    let name =
        attr_value(e, "name")?.ok_or_else(|| "element declaration without a name".to_string())?;
    let type_ref = attr_value(e, "type")?;
    let min_occurs = match attr_value(e, "minOccurs")? {
        Some(value) => value.parse::<u32>().map_err(|err| err.to_string())?,
        None => 1,
    };
    let max_occurs = match attr_value(e, "maxOccurs")? {
        Some(value) if value == "unbounded" => None,
        Some(value) => Some(value.parse::<u32>().map_err(|err| err.to_string())?),
        None => Some(1),
    };
    Ok((name, type_ref, min_occurs, max_occurs))
}

fn attr_value(e: &BytesStart, key: &str) -> Result<Option<String>, String> {
    match e.try_get_attribute(key) {
        Ok(Some(attr)) => attr
            .unescape_value()
            .map(|value| Some(value.into_owned()))
            .map_err(|err| err.to_string()),
        Ok(None) => Ok(None),
        Err(err) => Err(err.to_string()),
    }
}

fn push_attribute(e: &BytesStart, stack: &mut [Frame]) -> Result<(), String> {
    let name =
        attr_value(e, "name")?.ok_or_else(|| "attribute declaration without a name".to_string())?;
    let kind = attr_value(e, "type")?
        .map(|t| AttrKind::from_type(&t))
        .unwrap_or(AttrKind::Text);
    let required = attr_value(e, "use")?.as_deref() == Some("required");
    let decl = AttributeDecl {
        name,
        kind,
        required,
    };

    match stack.last_mut() {
        Some(Frame::Element { attrs, .. }) | Some(Frame::NamedType { attrs, .. }) => {
            attrs.push(decl)
        }
        // Global attribute declarations are not used by the vendor schemas
        None => {}
    }
    Ok(())
}

fn attach_child(child: ChildDecl, stack: &mut Vec<Frame>, roots: &mut Vec<ElementDecl>) {
    match stack.last_mut() {
        Some(Frame::Element { children, .. }) | Some(Frame::NamedType { children, .. }) => {
            children.push(child)
        }
        None => roots.push(child.element),
    }
}

fn resolve(
    mut element: ElementDecl,
    types: &NamedTypes,
    depth: u8,
) -> Result<ElementDecl, ClientError> {
    if depth > MAX_TYPE_DEPTH {
        return Err(ClientError::InvalidSchema(format!(
            "type nesting exceeds {MAX_TYPE_DEPTH} levels"
        )));
    }

    if let Some(type_ref) = element.type_ref.take() {
        let local = type_ref.rsplit(':').next().unwrap_or(type_ref.as_str());
        if let Some((attrs, children)) = types.get(local) {
            element.attributes = attrs.clone();
            element.children = children.clone();
        }
        // Builtin simple types leave the element as a leaf
    }

    element.children = element
        .children
        .into_iter()
        .map(|child| {
            let ChildDecl {
                element,
                min_occurs,
                max_occurs,
            } = child;
            Ok(ChildDecl {
                element: resolve(element, types, depth + 1)?,
                min_occurs,
                max_occurs,
            })
        })
        .collect::<Result<Vec<_>, ClientError>>()?;

    Ok(element)
}

#[derive(Debug)]
struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

fn node_from(e: &BytesStart) -> Result<XmlNode, ClientError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ClientError::MalformedXml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ClientError::MalformedXml(err.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlNode {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn place(node: XmlNode, stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>) -> Result<(), ClientError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(ClientError::MalformedXml(
            "multiple document roots".to_string(),
        )),
    }
}

fn parse_instance(xml: &str) -> Result<XmlNode, ClientError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ClientError::MalformedXml(e.to_string()))?;
        match event {
            Event::Start(e) => stack.push(node_from(&e)?),
            Event::Empty(e) => {
                let node = node_from(&e)?;
                place(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ClientError::MalformedXml("unbalanced closing tag".to_string())
                })?;
                place(node, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ClientError::MalformedXml(
            "document ends inside an open element".to_string(),
        ));
    }
    root.ok_or_else(|| ClientError::MalformedXml("empty document".to_string()))
}

fn validate_element(node: &XmlNode, decl: &ElementDecl, path: &str) -> Result<(), ClientError> {
    for attr in &decl.attributes {
        match node.attributes.iter().find(|(key, _)| key == &attr.name) {
            Some((_, value)) => {
                if !attr.kind.accepts(value) {
                    return Err(ClientError::SchemaViolation(format!(
                        "{path}/@{}: value {value:?} is not a valid {:?}",
                        attr.name, attr.kind
                    )));
                }
            }
            None if attr.required => {
                return Err(ClientError::SchemaViolation(format!(
                    "{path}/@{}: required attribute missing",
                    attr.name
                )));
            }
            None => {}
        }
    }

    for (key, _) in &node.attributes {
        if key.starts_with("xmlns") || key.starts_with("xsi:") {
            continue;
        }
        if !decl.attributes.iter().any(|attr| &attr.name == key) {
            return Err(ClientError::SchemaViolation(format!(
                "{path}/@{key}: attribute not declared by the schema"
            )));
        }
    }

    for child in &node.children {
        let child_decl = decl
            .children
            .iter()
            .find(|c| c.element.name == child.name)
            .ok_or_else(|| {
                ClientError::SchemaViolation(format!(
                    "{path}/{}: element not declared by the schema",
                    child.name
                ))
            })?;
        let child_path = format!("{path}/{}", child.name);
        validate_element(child, &child_decl.element, &child_path)?;
    }

    for child_decl in &decl.children {
        let count = node
            .children
            .iter()
            .filter(|c| c.name == child_decl.element.name)
            .count() as u32;
        if count < child_decl.min_occurs {
            return Err(ClientError::SchemaViolation(format!(
                "{path}/{}: expected at least {} occurrence(s), found {count}",
                child_decl.element.name, child_decl.min_occurs
            )));
        }
        if let Some(max) = child_decl.max_occurs {
            if count > max {
                return Err(ClientError::SchemaViolation(format!(
                    "{path}/{}: expected at most {max} occurrence(s), found {count}",
                    child_decl.element.name
                )));
            }
        }
    }

    Ok(())
}

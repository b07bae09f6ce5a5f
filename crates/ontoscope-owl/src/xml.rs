//! Ontology Loader: OWL/XML text → generic element tree.
//!
//! The analyzer walks a forest of axiom elements with open-ended nesting and
//! optional attributes, so the tree is deliberately generic (tag + attributes
//! + children) rather than one typed struct per axiom kind. Namespace
//! prefixes on element names are dropped; attribute keys are kept verbatim so
//! the `IRI` / `abbreviatedIRI` fallback chain works unchanged.
//!
//! Well-formedness only: no schema validation against the OWL vocabulary, no
//! external entity resolution, no network access.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Loader failure. Malformed markup is the only failure kind; everything
/// irregular but well-formed is the analyzer's problem and degrades to a
/// silent skip there.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("malformed OWL/XML document: {0}")]
    Malformed(String),
}

/// One element of the parsed document: tag, attributes in document order,
/// child elements in document order. Text nodes are irrelevant to axiom
/// structure and are not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Ordered accessor fallback chain: the first attribute in `names` that
    /// is present wins.
    pub fn first_attr(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.attr(name))
    }

    /// Direct child elements with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// All descendant elements (self excluded) with the given tag, in
    /// document order.
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        collect_descendants(self, tag, &mut out);
        out
    }

    /// Number of descendant elements (self excluded) whose tag is one of
    /// `tags`. Nested matches all count individually.
    pub fn count_descendants(&self, tags: &[&str]) -> usize {
        self.children
            .iter()
            .map(|child| {
                usize::from(tags.contains(&child.tag.as_str())) + child.count_descendants(tags)
            })
            .sum()
    }
}

fn collect_descendants<'a>(element: &'a Element, tag: &str, out: &mut Vec<&'a Element>) {
    for child in &element.children {
        if child.tag == tag {
            out.push(child);
        }
        collect_descendants(child, tag, out);
    }
}

/// Parse raw document text into its root element.
///
/// Returns `LoadError::Malformed` for anything the event reader rejects, and
/// additionally for truncated documents (unclosed elements at EOF), stray
/// closing tags, and more than one root element. Never panics on caller
/// input.
pub fn parse_document(text: &str) -> Result<Element, LoadError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(element_from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                place(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| LoadError::Malformed("stray closing tag".to_string()))?;
                place(element, &mut stack, &mut root)?;
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, text and processing instructions carry
            // no axiom structure.
            Ok(_) => {}
            Err(err) => return Err(LoadError::Malformed(err.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(LoadError::Malformed(
            "unclosed element at end of document".to_string(),
        ));
    }
    root.ok_or_else(|| LoadError::Malformed("document has no root element".to_string()))
}

fn place(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(LoadError::Malformed(
            "multiple root elements".to_string(),
        )),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, LoadError> {
    let tag = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|err| LoadError::Malformed(format!("non-UTF-8 element name: {err}")))?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| LoadError::Malformed(format!("bad attribute: {err}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| LoadError::Malformed(format!("non-UTF-8 attribute name: {err}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| LoadError::Malformed(format!("bad attribute value: {err}")))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_in_document_order() {
        let root = parse_document(
            r##"<Ontology><Declaration><Class IRI="#A"/></Declaration><SubClassOf><Class IRI="#A"/><Class IRI="#B"/></SubClassOf></Ontology>"##,
        )
        .expect("well-formed document");

        assert_eq!(root.tag, "Ontology");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].tag, "Declaration");
        assert_eq!(root.children[1].tag, "SubClassOf");

        let subclass = &root.children[1];
        let classes: Vec<_> = subclass.children_named("Class").collect();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].attr("IRI"), Some("#A"));
        assert_eq!(classes[1].attr("IRI"), Some("#B"));
    }

    #[test]
    fn strips_namespace_prefix_from_element_names() {
        let root = parse_document(r##"<owl:Ontology xmlns:owl="urn:o"><owl:Declaration/></owl:Ontology>"##)
            .expect("well-formed document");
        assert_eq!(root.tag, "Ontology");
        assert_eq!(root.children[0].tag, "Declaration");
    }

    #[test]
    fn first_attr_prefers_earlier_names_in_the_chain() {
        let root =
            parse_document(r##"<Class IRI="#Abs" abbreviatedIRI="p:Abbr"/>"##).expect("parse");
        assert_eq!(root.first_attr(&["IRI", "abbreviatedIRI"]), Some("#Abs"));

        let root = parse_document(r##"<Class abbreviatedIRI="p:Abbr"/>"##).expect("parse");
        assert_eq!(root.first_attr(&["IRI", "abbreviatedIRI"]), Some("p:Abbr"));
        assert_eq!(root.first_attr(&["IRI"]), None);
    }

    #[test]
    fn counts_nested_descendants_individually() {
        let root = parse_document(
            r##"<SubClassOf>
                 <Class IRI="#A"/>
                 <ObjectSomeValuesFrom>
                   <ObjectProperty IRI="#p"/>
                   <ObjectAllValuesFrom><ObjectProperty IRI="#q"/><Class IRI="#B"/></ObjectAllValuesFrom>
                 </ObjectSomeValuesFrom>
               </SubClassOf>"##,
        )
        .expect("parse");

        assert_eq!(
            root.count_descendants(&["ObjectSomeValuesFrom", "ObjectAllValuesFrom"]),
            2
        );
        assert_eq!(root.descendants_named("Class").len(), 2);
    }

    #[test]
    fn rejects_truncated_document() {
        let err = parse_document(r##"<Ontology><Declaration><Class IRI="#A"/>"##).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn rejects_mismatched_closing_tag() {
        assert!(parse_document(r##"<Ontology><Declaration></Ontology></Declaration>"##).is_err());
    }

    #[test]
    fn rejects_empty_input_and_multiple_roots() {
        assert!(parse_document("").is_err());
        assert!(parse_document("   ").is_err());
        assert!(parse_document(r##"<A/><B/>"##).is_err());
    }

    #[test]
    fn unescapes_attribute_values() {
        let root = parse_document(r##"<Class IRI="#A&amp;B"/>"##).expect("parse");
        assert_eq!(root.attr("IRI"), Some("#A&B"));
    }
}

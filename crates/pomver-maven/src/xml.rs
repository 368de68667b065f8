//! Minimal owned XML element tree with namespace-qualified lookups.
//!
//! Only what descriptor extraction needs is kept: element names resolved to
//! `(namespace, local name)`, trimmed text content, and children. Attributes,
//! comments and processing instructions are dropped.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use pomver_util::errors::{PomverError, PomverResult};

/// A namespace-qualified tag name used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName<'a> {
    pub namespace: Option<&'a str>,
    pub local: &'a str,
}

impl<'a> QName<'a> {
    pub fn new(namespace: Option<&'a str>, local: &'a str) -> Self {
        Self { namespace, local }
    }
}

/// An XML element with its resolved name, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    local_name: String,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Text content directly inside this element, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn elements(&self) -> &[Element] {
        &self.children
    }

    /// `true` if this element has the given qualified name.
    pub fn is(&self, name: QName<'_>) -> bool {
        self.local_name == name.local && self.namespace.as_deref() == name.namespace
    }

    /// First direct child named `name`.
    pub fn child(&self, name: QName<'_>) -> Option<&Element> {
        self.children.iter().find(|c| c.is(name))
    }

    /// Text of the first direct child named `name`.
    pub fn child_text(&self, name: QName<'_>) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Every element below this one in document order. The element itself is
    /// not included.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First match for the path `.//p0/p1/...`: a descendant named `p0` at any
    /// depth, followed by direct children for the remaining segments.
    pub fn find(&self, path: &[QName<'_>]) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// All matches for the path `.//p0/p1/...`, in document order.
    pub fn find_all(&self, path: &[QName<'_>]) -> Vec<&Element> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut matches: Vec<&Element> = self.descendants().filter(|e| e.is(*first)).collect();
        for segment in rest {
            matches = matches
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.is(*segment)))
                .collect();
        }
        matches
    }
}

/// Pre-order iterator over descendants. See [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Parse an XML document into its root [`Element`].
pub fn parse_document(xml: &str) -> PomverResult<Element> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(descriptor_error)?;
        match event {
            Event::Start(e) => {
                stack.push(Element {
                    namespace: namespace_of(&ns),
                    local_name: String::from_utf8_lossy(e.local_name().as_ref()).to_string(),
                    ..Element::default()
                });
            }
            Event::Empty(e) => {
                let element = Element {
                    namespace: namespace_of(&ns),
                    local_name: String::from_utf8_lossy(e.local_name().as_ref()).to_string(),
                    ..Element::default()
                };
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(malformed("unbalanced end tag"));
                };
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(descriptor_error)?;
                push_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                push_text(&mut stack, text.trim());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unexpected end of document"));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}

fn namespace_of(result: &ResolveResult<'_>) -> Option<String> {
    match result {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).to_string()),
        _ => None,
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> PomverResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("multiple root elements")),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

fn descriptor_error(err: impl std::fmt::Display) -> miette::Report {
    PomverError::Descriptor {
        message: format!("Failed to parse XML: {err}"),
    }
    .into()
}

fn malformed(message: &str) -> miette::Report {
    PomverError::Descriptor {
        message: message.to_string(),
    }
    .into()
}

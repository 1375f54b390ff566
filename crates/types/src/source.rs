//! The source tree the compiler reads.
//!
//! A `SourceNode` is either an element or a run of character data. Tags and attribute
//! names are stored namespace-resolved (`fo:block` becomes `block`). The tree is
//! treated as read-only by every pass; the cascade preprocessor produces a new tree
//! instead of mutating its input.

/// An ordered attribute map.
///
/// Document order of attributes is preserved so that serializing or debugging a tree
/// shows attributes as written, with cascaded attributes appended after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    /// Sets `name` only if the map does not already carry it. Returns whether it was added.
    pub fn insert_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push((name.to_string(), value.to_string()));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// An element of the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<SourceNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<SourceNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Iterates over the element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(SourceNode::as_element)
    }

    /// Concatenates all descendant character data in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.children.iter().for_each(|c| c.collect_text(&mut out));
        out
    }
}

/// A node of the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    Element(Element),
    Text(String),
}

impl SourceNode {
    pub fn text(s: impl Into<String>) -> Self {
        SourceNode::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            SourceNode::Element(e) => Some(e),
            SourceNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SourceNode::Text(t) => Some(t),
            SourceNode::Element(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.attr(name))
    }

    pub fn children(&self) -> &[SourceNode] {
        match self {
            SourceNode::Element(e) => &e.children,
            SourceNode::Text(_) => &[],
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            SourceNode::Text(t) => out.push_str(t),
            SourceNode::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

impl From<Element> for SourceNode {
    fn from(e: Element) -> Self {
        SourceNode::Element(e)
    }
}

impl From<&str> for SourceNode {
    fn from(s: &str) -> Self {
        SourceNode::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_order_and_replace_in_place() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        attrs.insert("a", "3");
        attrs.insert("c", "4");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2"), ("c", "4")]);
    }

    #[test]
    fn test_insert_if_absent_never_overwrites() {
        let mut attrs: Attributes = [("color", "red")].into_iter().collect();
        assert!(!attrs.insert_if_absent("color", "blue"));
        assert!(attrs.insert_if_absent("font-size", "10pt"));
        assert_eq!(attrs.get("color"), Some("red"));
        assert_eq!(attrs.get("font-size"), Some("10pt"));
    }

    #[test]
    fn test_text_content() {
        let node: SourceNode = Element::new("block")
            .with_child("Hello ")
            .with_child(Element::new("inline").with_child("world"))
            .into();
        assert_eq!(node.text_content(), "Hello world");
        assert_eq!(node.tag(), Some("block"));
        assert_eq!(node.children().len(), 2);
    }
}

pub const FO_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Format";

/// Wrap flow content in a complete single-sequence FO document
pub fn fo_document(flow: &str) -> String {
    fo_document_with_sequences(&[("A4", flow)])
}

/// Create a document with one page sequence per `(master-reference, flow content)` pair
pub fn fo_document_with_sequences(sequences: &[(&str, &str)]) -> String {
    let body: String = sequences
        .iter()
        .map(|(master, flow)| page_sequence(master, flow))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<fo:root xmlns:fo="{FO_NAMESPACE}">
  <fo:layout-master-set>
    <fo:simple-page-master master-name="A4" page-height="297mm" page-width="210mm">
      <fo:region-body margin="2cm"/>
    </fo:simple-page-master>
  </fo:layout-master-set>
{body}</fo:root>"#
    )
}

/// A page sequence with a running header and the given flow content
pub fn page_sequence(master: &str, flow: &str) -> String {
    format!(
        r#"  <fo:page-sequence master-reference="{master}">
    <fo:static-content flow-name="xsl-region-before">
      <fo:block>Running header</fo:block>
    </fo:static-content>
    <fo:flow flow-name="xsl-region-body">{flow}</fo:flow>
  </fo:page-sequence>
"#
    )
}

/// `<fo:tag attr="value" ...>content</fo:tag>`
pub fn element(tag: &str, attrs: &[(&str, &str)], content: &str) -> String {
    let attrs: String = attrs
        .iter()
        .map(|(name, value)| format!(r#" {name}="{value}""#))
        .collect();
    format!("<fo:{tag}{attrs}>{content}</fo:{tag}>")
}

pub fn block(attrs: &[(&str, &str)], content: &str) -> String {
    element("block", attrs, content)
}

pub fn inline(attrs: &[(&str, &str)], content: &str) -> String {
    element("inline", attrs, content)
}

pub fn link(destination: &str, content: &str) -> String {
    element("basic-link", &[("external-destination", destination)], content)
}

/// A table cell holding one block of text
pub fn table_cell(attrs: &[(&str, &str)], text: &str) -> String {
    element("table-cell", attrs, &block(&[], text))
}

pub fn table_row(cells: &[String]) -> String {
    element("table-row", &[], &cells.concat())
}

/// A table with one `table-column` per width and all rows in the body
pub fn table(attrs: &[(&str, &str)], column_widths: &[&str], rows: &[String]) -> String {
    let columns: String = column_widths
        .iter()
        .map(|w| format!(r#"<fo:table-column column-width="{w}"/>"#))
        .collect();
    let body = element("table-body", &[], &rows.concat());
    element("table", attrs, &format!("{columns}{body}"))
}

/// A list with one item per `(label, body text)` pair
pub fn list(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(label, body)| {
            let label = element("list-item-label", &[], &block(&[], label));
            let body = element("list-item-body", &[], &block(&[], body));
            element("list-item", &[], &format!("{label}{body}"))
        })
        .collect();
    element("list-block", &[], &items)
}

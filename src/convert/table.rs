// src/convert/table.rs
//! Table conversion.
//!
//! The converter walks its own subtree. The first pass converts every cell and records
//! an optional border/padding spec per cell. The second pass decides whether one shared
//! layout describes every cell and builds the edge callbacks from the collected specs.
//! Outer edges use the table's own border when it declares one and the cell value
//! otherwise; interior edges always use the cell value.

use super::{block_props, container_content};
use crate::error::ConvertError;
use crate::traverse::{Converted, ElementConverter, Traversal};
use folio_idf::{Cell, ContentNode, PaddingCallbacks, Table, TableLayout, TableModel};
use folio_style::parsers::{parse_length, parse_proportional_column_width, run_parser};
use folio_style::{BorderSide, Borders, BoxStyle, ColumnWidth, Margins, TextStyle, Unit};
use folio_types::{Color, Element};
use log::{debug, warn};

/// Converts `table` elements with their columns, row groups, rows and cells.
pub struct TableConverter;

impl ElementConverter for TableConverter {
    fn descends(&self, _element: &Element) -> bool {
        false
    }

    fn convert(
        &self,
        element: &Element,
        _children: Vec<Converted>,
        traversal: &Traversal<'_>,
    ) -> Result<Option<Converted>, ConvertError> {
        let attrs = &element.attributes;
        let ctx = traversal.context();
        let box_style = BoxStyle::resolve(attrs, ctx.descend(attrs).em_basis());
        let inner = traversal.descend(element);

        let mut columns = Vec::new();
        let mut header = Vec::new();
        let mut body = Vec::new();
        let mut footer = Vec::new();
        for child in element.child_elements() {
            match child.tag.as_str() {
                "table-column" => columns.push(child),
                "table-header" => header.extend(collect_group(child, &inner)?),
                "table-body" => body.extend(collect_group(child, &inner)?),
                "table-footer" => footer.extend(collect_group(child, &inner)?),
                "table-row" => body.push(collect_row(child, &inner)?),
                other => debug!("Ignoring <{}> inside <table>", other),
            }
        }

        let header_rows = header.len();
        let rows: Vec<Vec<CollectedCell>> = header.into_iter().chain(body).chain(footer).collect();
        if rows.is_empty() {
            warn!("Skipping <table> without rows");
            return Ok(None);
        }

        let mut widths = column_widths(&columns, table_width(element, traversal));
        let row_width = rows
            .iter()
            .map(|row| row.iter().map(|c| c.col_span).sum::<usize>())
            .max()
            .unwrap_or(0);
        let column_count = widths.len().max(row_width);
        widths.resize(column_count, ColumnWidth::Star);

        let table_borders = &box_style.borders;
        let shared = shared_spec(&rows);
        let layout = match &shared {
            Some(spec) => Some(homogeneous_layout(spec, table_borders, rows.len(), column_count)),
            None if table_borders.is_declared() => {
                Some(outline_layout(table_borders, rows.len(), column_count))
            }
            None => None,
        };
        let shared_padding = shared.as_ref().is_some_and(|s| s.padding.is_some());

        let body = rows
            .into_iter()
            .map(|row| build_row(row, column_count, shared_padding))
            .collect();

        let mut style = TextStyle::resolve(attrs, ctx);
        style.background = None;
        let node = ContentNode::Table(Box::new(Table {
            table: TableModel {
                widths,
                body,
                header_rows,
            },
            layout,
            style,
            props: block_props(element, &box_style),
        }));
        Ok(Some(Converted::new(node).with_keeps(
            box_style.keep.with_previous,
            box_style.keep.with_next,
        )))
    }
}

/// The border and padding a cell declares, compared across cells to find a shared layout.
#[derive(Debug, Clone, PartialEq)]
struct CellSpec {
    /// `[left, top, right, bottom]`
    widths: [f32; 4],
    colors: [Option<Color>; 4],
    padding: Option<Margins>,
}

impl CellSpec {
    fn from_box(box_style: &BoxStyle) -> Option<Self> {
        if !box_style.has_decoration() {
            return None;
        }
        let b = &box_style.borders;
        Some(Self {
            widths: b.widths(),
            colors: [
                b.left.color.clone(),
                b.top.color.clone(),
                b.right.color.clone(),
                b.bottom.color.clone(),
            ],
            padding: box_style.padding,
        })
    }
}

/// A converted cell before placeholders and layout are decided.
struct CollectedCell {
    content: ContentNode,
    col_span: usize,
    border: Option<[bool; 4]>,
    fill_color: Option<Color>,
    padding: Option<Margins>,
    style: TextStyle,
    spec: Option<CellSpec>,
}

fn collect_group(
    group: &Element,
    traversal: &Traversal<'_>,
) -> Result<Vec<Vec<CollectedCell>>, ConvertError> {
    let inner = traversal.descend(group);
    let mut rows = Vec::new();
    let mut loose_cells = Vec::new();
    for child in group.child_elements() {
        match child.tag.as_str() {
            "table-row" => {
                if !loose_cells.is_empty() {
                    rows.push(std::mem::take(&mut loose_cells));
                }
                rows.push(collect_row(child, &inner)?);
            }
            // Cells placed directly in a row group form one row.
            "table-cell" => loose_cells.push(collect_cell(child, &inner)?),
            other => debug!("Ignoring <{}> inside <{}>", other, group.tag),
        }
    }
    if !loose_cells.is_empty() {
        rows.push(loose_cells);
    }
    Ok(rows)
}

fn collect_row(row: &Element, traversal: &Traversal<'_>) -> Result<Vec<CollectedCell>, ConvertError> {
    let inner = traversal.descend(row);
    row.child_elements()
        .filter(|c| c.tag == "table-cell")
        .map(|cell| collect_cell(cell, &inner))
        .collect()
}

/// Converts one cell. Its children go through the dispatcher as they are, without
/// whitespace normalization, so sibling blocks never get a space between them.
fn collect_cell(cell: &Element, traversal: &Traversal<'_>) -> Result<CollectedCell, ConvertError> {
    let attrs = &cell.attributes;
    let ctx = traversal.context();
    let inner = traversal.descend(cell);

    let mut items = Vec::new();
    for child in &cell.children {
        if let Some(converted) = inner.traverse(child)? {
            items.push(converted);
        }
    }
    let content = container_content(items).unwrap_or_else(|| ContentNode::text(""));

    let box_style = BoxStyle::resolve(attrs, ctx.descend(attrs).em_basis());
    let mut style = TextStyle::resolve(attrs, ctx);
    let fill_color = style.background.take();
    let col_span = attrs
        .get("number-columns-spanned")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1);

    Ok(CollectedCell {
        content,
        col_span,
        border: box_style
            .borders
            .is_declared()
            .then(|| box_style.borders.flags()),
        fill_color,
        padding: box_style.padding,
        style,
        spec: CellSpec::from_box(&box_style),
    })
}

/// The spec every cell shares, if every cell declared one and all are equal.
fn shared_spec(rows: &[Vec<CollectedCell>]) -> Option<CellSpec> {
    let mut cells = rows.iter().flatten();
    let first = cells.next()?.spec.clone()?;
    cells
        .all(|c| c.spec.as_ref() == Some(&first))
        .then_some(first)
}

fn build_row(row: Vec<CollectedCell>, column_count: usize, shared_padding: bool) -> Vec<ContentNode> {
    let mut out = Vec::with_capacity(column_count);
    for cell in row {
        let span = cell.col_span;
        out.push(build_cell(cell, shared_padding));
        out.extend((1..span).map(|_| ContentNode::Cell(Cell::placeholder())));
    }
    while out.len() < column_count {
        out.push(ContentNode::Cell(Cell::placeholder()));
    }
    out
}

/// A cell stays bare content unless it spans, declares borders or carries properties.
fn build_cell(cell: CollectedCell, shared_padding: bool) -> ContentNode {
    let margin = if shared_padding { None } else { cell.padding };
    let structured = cell.col_span > 1
        || cell.border.is_some()
        || cell.fill_color.is_some()
        || margin.is_some()
        || !cell.style.is_empty();
    if !structured {
        return cell.content;
    }
    ContentNode::Cell(Cell {
        content: Some(Box::new(cell.content)),
        col_span: cell.col_span,
        border: cell.border,
        fill_color: cell.fill_color,
        margin,
        style: cell.style,
    })
}

type Edge = (f32, Option<Color>);

fn outer_edge(table_side: &BorderSide, cell: Edge) -> Edge {
    if table_side.is_declared() {
        (table_side.resolved_width(), table_side.color.clone())
    } else {
        cell
    }
}

/// An interior line takes whichever of the two facing cell sides is drawn wider.
fn interior_edge(before: Edge, after: Edge) -> Edge {
    if after.0 > before.0 { after } else { before }
}

fn homogeneous_layout(spec: &CellSpec, table: &Borders, rows: usize, cols: usize) -> TableLayout {
    let side = |i: usize| (spec.widths[i], spec.colors[i].clone());
    let (left, top, right, bottom) = (side(0), side(1), side(2), side(3));

    let horizontal: Vec<Edge> = (0..=rows)
        .map(|i| match i {
            0 => outer_edge(&table.top, top.clone()),
            i if i == rows => outer_edge(&table.bottom, bottom.clone()),
            _ => interior_edge(bottom.clone(), top.clone()),
        })
        .collect();
    let vertical: Vec<Edge> = (0..=cols)
        .map(|i| match i {
            0 => outer_edge(&table.left, left.clone()),
            i if i == cols => outer_edge(&table.right, right.clone()),
            _ => interior_edge(right.clone(), left.clone()),
        })
        .collect();

    let (h_widths, h_colors) = horizontal.into_iter().unzip();
    let (v_widths, v_colors) = vertical.into_iter().unzip();
    let layout = TableLayout::from_edges(rows, cols, h_widths, v_widths, h_colors, v_colors);
    match spec.padding {
        Some(padding) => layout.with_padding(PaddingCallbacks::uniform(padding)),
        None => layout,
    }
}

/// Draws only the table's own outline when the cells disagree.
fn outline_layout(table: &Borders, rows: usize, cols: usize) -> TableLayout {
    let none: Edge = (0.0, None);
    let edges = |count: usize, first: &BorderSide, last: &BorderSide| -> (Vec<f32>, Vec<Option<Color>>) {
        (0..=count)
            .map(|i| match i {
                0 => outer_edge(first, none.clone()),
                i if i == count => outer_edge(last, none.clone()),
                _ => none.clone(),
            })
            .unzip()
    };
    let (h_widths, h_colors) = edges(rows, &table.top, &table.bottom);
    let (v_widths, v_colors) = edges(cols, &table.left, &table.right);
    TableLayout::from_edges(rows, cols, h_widths, v_widths, h_colors, v_colors)
}

/// Percent width the proportional columns share: the table's own percentage width, or
/// the configured default.
fn table_width(element: &Element, traversal: &Traversal<'_>) -> f32 {
    element
        .attr("width")
        .and_then(|v| run_parser(parse_length, v).ok())
        .filter(|l| l.unit == Some(Unit::Percent))
        .map(|l| l.value)
        .unwrap_or(traversal.options().default_table_width)
}

/// Resolves column widths. Proportional widths become percentages of `table_width` only
/// when every column is proportional; otherwise each declaration passes through.
fn column_widths(columns: &[&Element], table_width: f32) -> Vec<ColumnWidth> {
    let declared: Vec<Option<&str>> = columns
        .iter()
        .flat_map(|col| {
            let repeat = col
                .attr("number-columns-repeated")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(1);
            std::iter::repeat_n(col.attr("column-width"), repeat)
        })
        .collect();

    let proportions: Option<Vec<f32>> = declared
        .iter()
        .map(|d| d.and_then(|v| run_parser(parse_proportional_column_width, v).ok()))
        .collect();
    if let Some(proportions) = proportions {
        let total: f32 = proportions.iter().sum();
        if total > 0.0 {
            return proportions
                .into_iter()
                .map(|p| ColumnWidth::Percent(p / total * table_width))
                .collect();
        }
    }

    declared
        .into_iter()
        .map(|d| match d.map(str::trim) {
            None | Some("*") | Some("") => ColumnWidth::Star,
            Some(value) => ColumnWidth::Raw(value.to_string()),
        })
        .collect()
}

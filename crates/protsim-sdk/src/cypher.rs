//! Cypher rendering for [`RemoteClient`](crate::RemoteClient)
//!
//! Every value is inlined as an escaped literal; identifiers that are not
//! plain words are backtick-quoted.

use crate::models::{NeighborQuery, NodeMode, WriteTx};
use protsim::graph::schema::NAME;
use protsim::graph::PropertyValue;
use std::fmt::Write;

/// Column holding the number of rows a write statement produced
pub const APPLIED: &str = "applied";

/// Render a transaction as a single statement.
///
/// Must-match nodes come first so that a missing endpoint yields zero rows
/// and nothing after the MATCH is executed.
pub fn render_write(tx: &WriteTx) -> String {
    let mut out = String::new();

    let matched: Vec<String> = tx
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.mode == NodeMode::Match)
        .map(|(i, node)| node_pattern(i, &node.label, &node.name))
        .collect();
    if !matched.is_empty() {
        let _ = writeln!(out, "MATCH {}", matched.join(", "));
    }

    for (i, node) in tx.nodes().iter().enumerate() {
        if node.mode == NodeMode::Merge {
            let _ = writeln!(out, "MERGE {}", node_pattern(i, &node.label, &node.name));
        }
        render_set(&mut out, &format!("n{}", i), &node.properties);
    }

    for (i, edge) in tx.edges().iter().enumerate() {
        let _ = writeln!(
            out,
            "MERGE (n{})-[e{}:{}]-(n{})",
            edge.from.index(),
            i,
            identifier(&edge.edge_type),
            edge.to.index()
        );
        render_set(&mut out, &format!("e{}", i), &edge.properties);
    }

    let _ = write!(out, "RETURN count(*) AS {}", APPLIED);
    out
}

/// Render a bounded neighbour query.
///
/// Result columns are `name`, `rank`, then one column per requested
/// property, named after the property.
pub fn render_neighbors(query: &NeighborQuery) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "MATCH (p:{} {{{}: {}}})-[r:{}]-(a:{})",
        identifier(&query.label),
        NAME,
        string_literal(&query.name),
        identifier(&query.edge_type),
        identifier(&query.neighbor_label)
    );
    let rank = format!("r.{}", identifier(&query.rank_by));
    let _ = writeln!(out, "WHERE {} IS NOT NULL", rank);

    let mut columns = vec![format!("a.{} AS name", NAME), format!("{} AS rank", rank)];
    for key in &query.properties {
        let key = identifier(key);
        columns.push(format!("a.{} AS {}", key, key));
    }
    let _ = writeln!(out, "RETURN {}", columns.join(", "));
    let _ = writeln!(out, "ORDER BY rank DESC, name ASC");
    let _ = write!(out, "LIMIT {}", query.limit);
    out
}

fn node_pattern(index: usize, label: &str, name: &str) -> String {
    format!("(n{}:{} {{{}: {}}})", index, identifier(label), NAME, string_literal(name))
}

fn render_set(out: &mut String, variable: &str, properties: &[(String, PropertyValue)]) {
    if properties.is_empty() {
        return;
    }
    let assignments: Vec<String> = properties
        .iter()
        .map(|(key, value)| format!("{}.{} = {}", variable, identifier(key), literal(value)))
        .collect();
    let _ = writeln!(out, "SET {}", assignments.join(", "));
}

/// Double-quoted string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Literal for a property value; non-finite floats become `null`
pub fn literal(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(s) => string_literal(s),
        PropertyValue::Float(f) if f.is_finite() => format!("{:?}", f),
        PropertyValue::Float(_) => "null".to_string(),
        PropertyValue::Null => "null".to_string(),
    }
}

/// Label, relationship type or property key
pub fn identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

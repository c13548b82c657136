//! The textual FBP notation
//!
//! Only node declarations matter for dependency resolution:
//!
//! ```text
//! # @runtime noflo-nodejs
//! 'hello' -> IN Greet(strings/SendString) OUT -> IN Show(core/Output:console=true)
//! Show OUT -> IN Drop()
//! ```
//!
//! `Greet(strings/SendString)` declares node `Greet` running `strings/SendString`. Metadata
//! after `:` is ignored and an empty declaration such as `Drop()` is a placeholder node.
//! Initial information packets in single quotes and `#` comments are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::annotations::{self, compiled, Pattern};
use crate::{Graph, GraphError, GraphProperties, Node};

static NODE_DECLARATION: Pattern =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_.\-]+)\(([^()]*)\)"));

/// Parse a graph written in the FBP notation
pub fn parse_fbp(source: &str, path: &Path) -> Result<Graph, GraphError> {
    let declaration = compiled(&NODE_DECLARATION)?;

    let mut nodes: Vec<Node> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (line_idx, raw_line) in source.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = strip_strings_and_comments(raw_line).map_err(|message| GraphError::Syntax {
            path: path.to_path_buf(),
            line: line_no,
            message,
        })?;

        check_parentheses(&line).map_err(|message| GraphError::Syntax {
            path: path.to_path_buf(),
            line: line_no,
            message,
        })?;

        for captures in declaration.captures_iter(&line) {
            let (Some(id), Some(body)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let component = body
                .as_str()
                .split(':')
                .next()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);

            match index.get(id.as_str()) {
                Some(&existing) => {
                    if nodes[existing].component.is_none() {
                        nodes[existing].component = component;
                    }
                }
                None => {
                    index.insert(id.as_str().to_string(), nodes.len());
                    nodes.push(Node {
                        id: id.as_str().to_string(),
                        component,
                    });
                }
            }
        }
    }

    let properties = GraphProperties {
        id: annotations::name_annotation(source)?.map(str::to_string),
        environment: annotations::runtime_annotation(source)?.map(|r| Value::String(r.into())),
        ..GraphProperties::default()
    };

    Ok(Graph { properties, nodes })
}

/// Blank out quoted packets and drop trailing comments, keeping column positions
fn strip_strings_and_comments(line: &str) -> Result<String, String> {
    let mut cleaned = String::with_capacity(line.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in line.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '\'' {
                in_string = false;
            }
            cleaned.push(' ');
            continue;
        }
        match ch {
            '\'' => {
                in_string = true;
                cleaned.push(' ');
            }
            '#' => break,
            _ => cleaned.push(ch),
        }
    }

    if in_string {
        return Err("unterminated string".to_string());
    }
    Ok(cleaned)
}

fn check_parentheses(line: &str) -> Result<(), String> {
    let mut depth = 0usize;
    for ch in line.chars() {
        match ch {
            '(' => {
                if depth > 0 {
                    return Err("nested parentheses in node declaration".to_string());
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err("unexpected ')'".to_string());
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err("unclosed node declaration".to_string());
    }
    Ok(())
}

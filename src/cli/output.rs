//! Output formatting for CLI commands

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::tree::Node;

/// Requested output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Output context for consistent formatting across commands
#[derive(Debug, Clone)]
pub struct OutputContext {
    root: PathBuf,
}

impl OutputContext {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Print a successful response as a JSON envelope.
    pub fn print_success<T: Serialize>(&self, data: T) {
        let response = serde_json::json!({
            "success": true,
            "data": data
        });
        print_json(&response);
    }

    /// Print an error response.
    pub fn print_error(&self, message: &str) {
        let response = serde_json::json!({
            "success": false,
            "error": message
        });
        print_json(&response);
    }

    /// Print a display tree, honoring the requested format.
    pub fn print_tree(&self, tree: &Node, format: OutputFormat) {
        match format {
            OutputFormat::Json => self.print_success(tree),
            OutputFormat::Text => print!("{}", render_text(tree)),
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

/// Render the tree as an indented text outline, matching exhaustively on
/// the node variant.
fn render_text(node: &Node) -> String {
    let mut out = String::new();
    render_into(node, 0, &mut out);
    out
}

fn render_into(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Root { label, children, .. } => {
            out.push_str(&format!("{indent}{label}\n"));
            for child in children {
                render_into(child, depth + 1, out);
            }
        }
        Node::Folder { label, children, .. } | Node::File { label, children, .. } => {
            out.push_str(&format!("{indent}{label}\n"));
            for child in children {
                render_into(child, depth + 1, out);
            }
        }
        Node::Reference { label, .. } => {
            out.push_str(&format!("{indent}{label}\n"));
        }
    }
}

//! Grouping and path shortening
//!
//! Turns the flat multiset of (symbol, reference) pairs into the
//! presentation-ready tree: references grouped by containing file, files
//! sorted by their string identity, and labels shortened to minimal
//! workspace-relative paths with the shared leading segment elided.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{RefscopeError, RefscopeResult};
use crate::models::symbol::{Range, Symbol, SymbolReferences};
use crate::models::tree::Node;
use crate::providers::Workspace;

/// Marker prepended to a label when a common prefix was elided.
const ELLIPSIS: &str = "...";

/// Build the display tree for a completed query.
pub fn present(
    scope: &Path,
    sets: &[SymbolReferences],
    workspace: &dyn Workspace,
) -> RefscopeResult<Node> {
    let grouped = group_references_by_file(sets);
    tracing::info!(
        "Found external references for {} symbols in {} files for {}",
        sets.len(),
        grouped.len(),
        scope.display()
    );

    let mut short_paths = Vec::with_capacity(grouped.len() + 1);
    for file in grouped.keys() {
        short_paths.push(short_path(workspace, Path::new(file))?);
    }
    short_paths.push(short_path(workspace, scope)?);

    let prefix = common_path_prefix(&short_paths);
    let mut labels: Vec<String> = short_paths
        .iter()
        .map(|short| shorten(short, &prefix))
        .collect();
    let scope_label = labels.pop().unwrap_or_default();

    let children = grouped
        .iter()
        .zip(labels)
        .map(|((file, rows), label)| {
            let path = PathBuf::from(file);
            let leaves = rows
                .iter()
                .map(|(symbol, range)| Node::Reference {
                    label: format!("Line {}: {}", range.start.line + 1, symbol.name),
                    path: path.clone(),
                    range: *range,
                    kind: symbol.kind,
                })
                .collect();
            Node::File {
                label,
                path,
                children: leaves,
            }
        })
        .collect();

    Ok(Node::Root {
        label: scope_label,
        path: scope.to_path_buf(),
        children,
    })
}

/// Group every reference of every set by its containing file's string
/// identity. The BTreeMap gives the deterministic ascending key order the
/// presentation contract requires, independent of fetch completion order.
fn group_references_by_file(sets: &[SymbolReferences]) -> BTreeMap<String, Vec<(Symbol, Range)>> {
    let mut grouped: BTreeMap<String, Vec<(Symbol, Range)>> = BTreeMap::new();
    for set in sets {
        for reference in &set.references {
            grouped
                .entry(reference.file.to_string_lossy().into_owned())
                .or_default()
                .push((set.symbol.clone(), reference.range));
        }
    }
    grouped
}

/// Workspace-relative display path: strip the owning root's base path and
/// normalize separators; prefix the root name when several roots are open.
fn short_path(workspace: &dyn Workspace, path: &Path) -> RefscopeResult<String> {
    let root = workspace
        .owning_root(path)
        .ok_or_else(|| RefscopeError::PathResolution(path.to_path_buf()))?;

    let relative = path
        .strip_prefix(&root.path)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");

    // The root itself strips to nothing; label it by its name instead
    if relative.is_empty() {
        Ok(root.name)
    } else if workspace.multi_root() {
        Ok(format!("{}/{}", root.name, relative))
    } else {
        Ok(relative)
    }
}

/// Longest common `/`-delimited component prefix, without a trailing
/// delimiter. A single path has no meaningful prefix to elide.
fn common_path_prefix(paths: &[String]) -> String {
    if paths.len() < 2 {
        return String::new();
    }

    let mut common: Vec<&str> = paths[0].split('/').collect();
    for path in &paths[1..] {
        let components: Vec<&str> = path.split('/').collect();
        let matching = common
            .iter()
            .zip(&components)
            .take_while(|(a, b)| a == b)
            .count();
        common.truncate(matching);
        if common.is_empty() {
            return String::new();
        }
    }
    common.join("/")
}

/// Strip the common prefix and mark the elision. When the prefix consumes a
/// path entirely (the scope itself), keep its final component so the label
/// never degenerates to a bare ellipsis.
fn shorten(path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    let rest = &path[prefix.len()..];
    if rest.is_empty() {
        let last = path.rsplit('/').next().unwrap_or(path);
        format!("{ELLIPSIS}{last}")
    } else {
        format!("{ELLIPSIS}{rest}")
    }
}

//! Symbol model definitions
//!
//! Core types for representing code symbols and reference sites as reported
//! by a symbol provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Position within a document (0-indexed, LSP standard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Convert 0-indexed position to 1-indexed display coordinates
    pub fn to_display(&self) -> (u32, u32) {
        (self.line + 1, self.column + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.to_display();
        write!(f, "{}:{}", line, column)
    }
}

/// Range within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Convert a single position to an empty range
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A place in the workspace: a file plus a range inside it.
///
/// Used both for symbol definitions and for reference sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub range: Range,
}

impl Location {
    pub fn new(file: PathBuf, range: Range) -> Self {
        Self { file, range }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.range.start)
    }
}

/// Symbol classification (aligned with LSP SymbolKind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    Struct,
    EnumMember,
    TypeParameter,
}

impl SymbolKind {
    /// Convert from LSP SymbolKind number
    pub fn from_lsp(kind: u32) -> Self {
        match kind {
            1 => Self::File,
            2 => Self::Module,
            3 => Self::Namespace,
            4 => Self::Package,
            5 => Self::Class,
            6 => Self::Method,
            7 => Self::Property,
            8 => Self::Field,
            9 => Self::Constructor,
            10 => Self::Enum,
            11 => Self::Interface,
            12 => Self::Function,
            14 => Self::Constant,
            22 => Self::EnumMember,
            23 => Self::Struct,
            26 => Self::TypeParameter,
            _ => Self::Variable, // Default fallback
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Package => "package",
            Self::Class => "class",
            Self::Method => "method",
            Self::Property => "property",
            Self::Field => "field",
            Self::Constructor => "constructor",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::Struct => "struct",
            Self::EnumMember => "enum_member",
            Self::TypeParameter => "type_parameter",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SymbolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "module" => Ok(Self::Module),
            "namespace" => Ok(Self::Namespace),
            "package" => Ok(Self::Package),
            "class" => Ok(Self::Class),
            "method" => Ok(Self::Method),
            "property" => Ok(Self::Property),
            "field" => Ok(Self::Field),
            "constructor" => Ok(Self::Constructor),
            "enum" => Ok(Self::Enum),
            // "trait" is aliased to Interface (rust-analyzer reports traits as Interface)
            "interface" | "trait" => Ok(Self::Interface),
            "function" => Ok(Self::Function),
            "variable" => Ok(Self::Variable),
            "constant" => Ok(Self::Constant),
            "struct" => Ok(Self::Struct),
            "enum_member" | "enummember" => Ok(Self::EnumMember),
            "type_parameter" | "typeparameter" => Ok(Self::TypeParameter),
            _ => Err(format!("Unknown symbol kind: {}", s)),
        }
    }
}

/// A named, kinded code entity with a definition location.
///
/// Identity for caching purposes is the definition location; providers must
/// not mutate a symbol after returning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, location: Location) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
        }
    }
}

/// One symbol together with the reference sites reported for it.
///
/// Narrowing via [`SymbolReferences::retain_files`] produces a new set; the
/// original is never mutated after construction.
#[derive(Debug, Clone)]
pub struct SymbolReferences {
    pub symbol: Symbol,
    pub references: Vec<Location>,
}

impl SymbolReferences {
    pub fn new(symbol: Symbol, references: Vec<Location>) -> Self {
        Self { symbol, references }
    }

    /// Keep only references whose file passes the predicate.
    pub fn retain_files(&self, keep: impl Fn(&Path) -> bool) -> Self {
        Self {
            symbol: self.symbol.clone(),
            references: self
                .references
                .iter()
                .filter(|reference| keep(&reference.file))
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(file: &str, line: u32) -> Location {
        Location::new(PathBuf::from(file), Range::point(Position::new(line, 0)))
    }

    #[test]
    fn test_position_display_is_one_indexed() {
        let pos = Position::new(0, 4);
        assert_eq!(pos.to_display(), (1, 5));
        assert_eq!(pos.to_string(), "1:5");
    }

    #[test]
    fn test_symbol_kind_from_lsp() {
        assert_eq!(SymbolKind::from_lsp(5), SymbolKind::Class);
        assert_eq!(SymbolKind::from_lsp(11), SymbolKind::Interface);
        assert_eq!(SymbolKind::from_lsp(12), SymbolKind::Function);
        assert_eq!(SymbolKind::from_lsp(99), SymbolKind::Variable);
    }

    #[test]
    fn test_symbol_kind_round_trip() {
        for kind in [
            SymbolKind::Class,
            SymbolKind::Interface,
            SymbolKind::Enum,
            SymbolKind::Function,
            SymbolKind::Method,
        ] {
            assert_eq!(kind.to_string().parse::<SymbolKind>(), Ok(kind));
        }
        assert_eq!("trait".parse::<SymbolKind>(), Ok(SymbolKind::Interface));
    }

    #[test]
    fn test_retain_files_leaves_original_untouched() {
        let symbol = Symbol::new("Widget", SymbolKind::Class, loc("/src/widget.rs", 3));
        let set = SymbolReferences::new(
            symbol,
            vec![loc("/src/widget.rs", 10), loc("/src/other.rs", 2)],
        );

        let narrowed = set.retain_files(|file| file != Path::new("/src/widget.rs"));

        assert_eq!(narrowed.references.len(), 1);
        assert_eq!(narrowed.references[0].file, PathBuf::from("/src/other.rs"));
        assert_eq!(set.references.len(), 2);
    }
}

//! Symbol anchor resolution
//!
//! Providers report a declaration range, but reference lookups need a
//! precise position on the symbol's name. The resolver normalizes the
//! reported name to the literal identifier expected in source text, then
//! locates that identifier inside the declared range.

use crate::error::FetchError;
use crate::models::document::Document;
use crate::models::symbol::{Position, Symbol};

/// Reduce a provider-reported symbol name to the simple identifier.
///
/// C#-style providers return the full canonical name (`Foo.Bar.Baz`) and
/// C++-style providers append part of the signature (`doWork(int, int)`);
/// the source text nearly always contains only the simple name.
pub fn simple_symbol_name(name: &str) -> &str {
    let name = name.rsplit('.').next().unwrap_or(name);
    name.split('(').next().unwrap_or(name)
}

/// Resolve the position to query references at: the first occurrence of the
/// symbol's simple name inside its declaration range.
pub fn resolve_anchor(document: &Document, symbol: &Symbol) -> Result<Position, FetchError> {
    let range = symbol.location.range;
    let declared = document.slice(range);
    let simple = simple_symbol_name(&symbol.name);

    let offset_in_range = declared.find(simple).ok_or_else(|| FetchError::NameMismatch {
        name: symbol.name.clone(),
        simple: simple.to_string(),
        range,
        file: symbol.location.file.clone(),
    })?;

    let range_offset = document.offset_at(range.start);
    Ok(document.position_at(range_offset + offset_in_range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::{Location, Range, SymbolKind};
    use std::path::PathBuf;

    #[test]
    fn test_simple_name_strips_qualification() {
        assert_eq!(simple_symbol_name("Foo.Bar.Baz"), "Baz");
        assert_eq!(simple_symbol_name("Baz"), "Baz");
    }

    #[test]
    fn test_simple_name_strips_signature() {
        assert_eq!(simple_symbol_name("doWork(int, int)"), "doWork");
        assert_eq!(simple_symbol_name("Foo.bar(x)"), "bar");
    }

    fn symbol_in(doc: &str, name: &str, range: Range) -> (Document, Symbol) {
        let document = Document::new(doc);
        let symbol = Symbol::new(
            name,
            SymbolKind::Function,
            Location::new(PathBuf::from("/w/src/a.rs"), range),
        );
        (document, symbol)
    }

    #[test]
    fn test_resolve_anchor_on_name() {
        let (document, symbol) = symbol_in(
            "mod outer {}\npub fn do_work(x: u32) -> u32 { x }\n",
            "do_work",
            Range::new(Position::new(1, 0), Position::new(1, 35)),
        );

        let anchor = resolve_anchor(&document, &symbol).unwrap();
        assert_eq!(anchor, Position::new(1, 7));
    }

    #[test]
    fn test_resolve_anchor_with_qualified_signature_name() {
        let (document, symbol) = symbol_in(
            "class Widget {\n    public int doWork(int a, int b) { return a + b; }\n}\n",
            "Widget.doWork(int, int)",
            Range::new(Position::new(1, 4), Position::new(1, 53)),
        );

        let anchor = resolve_anchor(&document, &symbol).unwrap();
        // "doWork" starts at column 15 of line 1
        assert_eq!(anchor, Position::new(1, 15));
    }

    #[test]
    fn test_resolve_anchor_with_multibyte_range_columns() {
        // Declaration preceded by multi-byte text; a range column landing
        // inside a character must not abort resolution
        let (document, symbol) = symbol_in(
            "// 集約エンジン\nfn gather() {}\n",
            "gather",
            Range::new(Position::new(0, 4), Position::new(1, 14)),
        );

        let anchor = resolve_anchor(&document, &symbol).unwrap();
        assert_eq!(anchor, Position::new(1, 3));
    }

    #[test]
    fn test_resolve_anchor_name_mismatch() {
        let (document, symbol) = symbol_in(
            "fn something_else() {}\n",
            "missing",
            Range::new(Position::new(0, 0), Position::new(0, 22)),
        );

        let err = resolve_anchor(&document, &symbol).unwrap_err();
        match err {
            FetchError::NameMismatch { name, simple, .. } => {
                assert_eq!(name, "missing");
                assert_eq!(simple, "missing");
            }
            other => panic!("expected NameMismatch, got {other:?}"),
        }
    }
}

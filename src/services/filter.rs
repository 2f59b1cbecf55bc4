//! Importance filter
//!
//! Restricts the symbol set to kinds meaningful for cross-file navigation.
//! Method is not included as it often is an inherited or interface method
//! which would yield unrelated references of the superclass/interface; the
//! same goes for fields and properties. This trades recall for precision.

use crate::models::symbol::{Symbol, SymbolKind};

const IMPORTANT_KINDS: [SymbolKind; 4] = [
    SymbolKind::Class,
    SymbolKind::Interface,
    SymbolKind::Enum,
    SymbolKind::Function,
];

pub fn is_important(kind: SymbolKind) -> bool {
    IMPORTANT_KINDS.contains(&kind)
}

/// Keep only symbols worth querying references for.
pub fn important_symbols(symbols: &[Symbol]) -> Vec<Symbol> {
    symbols
        .iter()
        .filter(|symbol| is_important(symbol.kind))
        .cloned()
        .collect()
}

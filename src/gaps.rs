//! Gap marker lookup.

/// Gap characters used by default (`-` for alignment gaps, `.` for
/// unaligned padding).
pub const DEFAULT_GAP_SYMBOLS: &str = "-.";

/// Total byte → "is a gap marker" table.
#[derive(Clone, PartialEq, Eq)]
pub struct GapSymbols {
    table: [bool; 256],
}

impl GapSymbols {
    /// Build a table from the bytes of `symbols`.
    pub fn new(symbols: &[u8]) -> Self {
        let mut table = [false; 256];
        for &symbol in symbols {
            table[usize::from(symbol)] = true;
        }
        Self { table }
    }

    /// Whether `symbol` marks a gap.
    #[inline]
    pub fn is_gap(&self, symbol: u8) -> bool {
        self.table[usize::from(symbol)]
    }

    /// The gap bytes in ascending order.
    pub fn symbols(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&b| self.is_gap(b)).collect()
    }
}

impl Default for GapSymbols {
    fn default() -> Self {
        Self::new(DEFAULT_GAP_SYMBOLS.as_bytes())
    }
}

impl std::fmt::Debug for GapSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GapSymbols")
            .field(&self.symbols().escape_ascii().to_string())
            .finish()
    }
}

/// The ordered strip of chord tiles shown in the pad window. Pure state; the
/// pad widget owns rendering and input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileStrip {
    symbols: Vec<String>,
}

impl TileStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a strip, applying the same trimming rules as `add`.
    pub fn with_symbols<'a>(
        symbols: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut strip = Self::new();
        for symbol in symbols {
            strip.add(symbol);
        }
        strip
    }

    /// Appends a tile unless the trimmed symbol is empty. Returns whether a
    /// tile was added.
    pub fn add(&mut self, raw_symbol: &str) -> bool {
        let symbol = raw_symbol.trim();
        if symbol.is_empty() {
            return false;
        }
        self.symbols.push(symbol.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whitespace_only_symbols_are_not_added() {
        let mut strip = TileStrip::new();
        assert!(!strip.add(""));
        assert!(!strip.add("   "));
        assert!(!strip.add("\t\n"));
        assert!(strip.is_empty());
    }

    #[test]
    fn added_symbols_are_trimmed_and_ordered() {
        let mut strip = TileStrip::new();
        assert!(strip.add(" C "));
        assert!(strip.add("Am"));
        assert!(strip.add("G7"));
        let symbols: Vec<_> = strip.symbols().collect();
        assert_eq!(symbols, ["C", "Am", "G7"]);
    }

    #[test]
    fn duplicate_symbols_each_get_a_tile() {
        let mut strip = TileStrip::new();
        strip.add("C");
        strip.add("C");
        assert_eq!(strip.len(), 2);
    }

    #[test]
    fn add_then_clear_leaves_no_tiles() {
        let mut strip = TileStrip::new();
        strip.add("Dm");
        assert_eq!(strip.len(), 1);
        strip.clear();
        assert!(strip.is_empty());
    }

    #[test]
    fn seeding_applies_the_add_rules() {
        let strip = TileStrip::with_symbols(["C", " Am", ""]);
        let symbols: Vec<_> = strip.symbols().collect();
        assert_eq!(symbols, ["C", "Am"]);
    }
}

//! Sequence-numbered document names, e.g. `order-1.json`, `order-2.json`, ...
//!
//! The numbers are written in plain decimal without padding, so a lexicographic listing does not give numeric order.
//! Use [`DecimalFilePattern::last`] to find the highest number in a listing.

/// The file-name pattern for persisted orders: `order-<n>.json`.
pub const ORDER_FILE_PATTERN: DecimalFilePattern = DecimalFilePattern::new("order-", ".json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFilePattern {
    prefix: &'static str,
    suffix: &'static str,
}

impl DecimalFilePattern {
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn filename_for(&self, id: u64) -> String {
        format!("{}{id}{}", self.prefix, self.suffix)
    }

    /// Extracts the sequence number from a file name, or a full key ending in a file name. Names that do not match
    /// the pattern exactly return `None`.
    pub fn parse(&self, name: &str) -> Option<u64> {
        let name = name.rsplit('/').next().unwrap_or(name);
        let digits = name.strip_prefix(self.prefix)?.strip_suffix(self.suffix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// The highest sequence number among `names`, ignoring names that do not match the pattern.
    pub fn last<'a, I>(&self, names: I) -> Option<u64>
    where I: IntoIterator<Item = &'a str> {
        names.into_iter().filter_map(|n| self.parse(n)).max()
    }
}

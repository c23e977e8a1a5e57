use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Grid-cell labels are row letters followed by column digits, e.g. `A1` or `C12`.
const GRID_LABEL_PATTERN: &str = r"^([A-Za-z]+)([0-9]+)$";

static GRID_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(GRID_LABEL_PATTERN).expect("Failed to compile grid label pattern"));

/// Directed road segment between two grid intersections, written `"{src}-{dst}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Split a `"{src}-{dst}"` key. Keys with an empty side or more than one
    /// separator are rejected.
    ///
    /// # Examples
    /// ```
    /// use streetgrid::core::types::EdgeKey;
    ///
    /// let key = EdgeKey::parse("A1-B1").unwrap();
    /// assert_eq!(key.source, "A1");
    /// assert_eq!(key.target, "B1");
    /// assert!(EdgeKey::parse("A1B1").is_none());
    /// ```
    pub fn parse(key: &str) -> Option<Self> {
        let (source, target) = key.split_once('-')?;
        if source.is_empty() || target.is_empty() || target.contains('-') {
            return None;
        }
        Some(Self::new(source, target))
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Format the road-stats key of a directed edge without allocating an `EdgeKey`.
pub fn edge_key(source: &str, target: &str) -> String {
    format!("{source}-{target}")
}

/// A grid-cell label split into its row letters and column digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridLabel {
    pub row: String,
    pub column: String,
}

impl GridLabel {
    /// Labels whose row letters do not fit a `usize` index are rejected.
    pub fn parse(label: &str) -> Option<Self> {
        let captures = GRID_LABEL.captures(label)?;
        let row = captures[1].to_ascii_uppercase();
        checked_row_number(&row)?;
        Some(Self {
            row,
            column: captures[2].to_string(),
        })
    }

    /// Zero-based row index: `A` is 0, `Z` is 25, `AA` is 26.
    ///
    /// Saturates for hand-built labels that `parse` would reject.
    pub fn row_index(&self) -> usize {
        checked_row_number(&self.row)
            .unwrap_or(usize::MAX)
            .saturating_sub(1)
    }

    /// Zero-based column index; columns are numbered from 1 in labels.
    pub fn column_index(&self) -> usize {
        self.column
            .parse::<usize>()
            .map(|c| c.saturating_sub(1))
            .unwrap_or(0)
    }
}

/// Bijective base-26 value of uppercase row letters, `None` on overflow
fn checked_row_number(row: &str) -> Option<usize> {
    row.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?
            .checked_add(usize::from(b.checked_sub(b'A')?) + 1)
    })
}

//! One-tap re-order of the last submitted cart.

use crate::cart::CartLine;

/// What the "repeat last order" prompt shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatOrder {
    /// Distinct product names, with a `(+ N more)` tail when some names
    /// appear on several lines.
    pub summary: String,
    pub total: u32,
}

impl RepeatOrder {
    /// Describes a stored snapshot; `None` when it has no lines.
    #[must_use]
    pub fn summary(snapshot: &[CartLine]) -> Option<Self> {
        if snapshot.is_empty() {
            return None;
        }

        let mut names: Vec<&str> = Vec::new();
        for line in snapshot {
            if !names.contains(&line.name()) {
                names.push(line.name());
            }
        }

        let mut summary = names.join(", ");
        let extra = snapshot.len() - names.len();
        if extra > 0 {
            summary.push_str(&format!(" (+ {extra} more)"));
        }

        let total = snapshot
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.line_total()));

        Some(Self { summary, total })
    }
}

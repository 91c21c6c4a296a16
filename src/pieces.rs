//! Bookkeeping for the `<N>.png` piece members of a puzzle

use std::collections::BTreeMap;

use log::*;

/// Runs of missing pieces longer than this get one warning instead of one apiece.
const MAX_LISTED_GAP: u32 = 1000;

/// Counts how many times each piece index shows up in the archive.
///
/// Piece numbers come straight from member names, so they can be arbitrarily sparse.
#[derive(Debug, Default)]
pub struct PieceTally {
    /// Hits per piece index, for indices seen at least once
    counts: BTreeMap<u32, u32>,
    /// Highest index seen, if any
    max_index: Option<u32>,
}

impl PieceTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one member named `<index>.png`.
    pub fn record(&mut self, index: u32) {
        *self.counts.entry(index).or_insert(0) += 1;
        self.max_index = Some(self.max_index.map_or(index, |m| m.max(index)));
    }

    /// The number of piece files the archive claims to have:
    /// one more than the highest index seen, or zero if there were none.
    pub fn piece_files(&self) -> u64 {
        self.max_index.map_or(0, |m| u64::from(m) + 1)
    }

    /// Appends a warning for each missing or duplicated index below the highest one,
    /// in ascending order.
    ///
    /// The highest index is never reported missing: seeing it is what made it the highest.
    pub fn reconcile(&self, warnings: &mut Vec<String>) {
        let Some(max) = self.max_index else {
            return;
        };
        // First index we haven't accounted for yet
        let mut next = 0;
        for (&i, &hits) in self.counts.range(..max) {
            report_missing(next, i, warnings);
            if hits > 1 {
                push_warning(format!("{hits} members named \"{i}.png\""), warnings);
            }
            next = i + 1;
        }
        report_missing(next, max, warnings);
    }
}

/// Warns about the indices in `from..to`, none of which were seen.
fn report_missing(from: u32, to: u32, warnings: &mut Vec<String>) {
    if to - from > MAX_LISTED_GAP {
        let last = to - 1;
        push_warning(
            format!("missing \"{from}.png\" through \"{last}.png\""),
            warnings,
        );
    } else {
        for i in from..to {
            push_warning(format!("missing \"{i}.png\""), warnings);
        }
    }
}

fn push_warning(warning: String, warnings: &mut Vec<String>) {
    warn!("{warning}");
    warnings.push(warning);
}

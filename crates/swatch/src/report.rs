//! Run reports.
//!
//! Both phases return an explicit accumulator instead of mutating shared
//! counters: [`DefinitionReport`] for token definition and [`RebindReport`] for
//! the paint walk. [`SyncReport`] pairs them and renders the operator-facing
//! summary through its `Display` impl.

use std::{fmt, ops::AddAssign};

use crate::document::EditError;

/// What the definition phase changed in the store.
///
/// A re-run with identical input on a complete graph reports all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefinitionReport {
    pub collections_created: usize,
    pub modes_created: usize,
    pub modes_renamed: usize,
    pub variables_created: usize,
    pub values_changed: usize,
    pub descriptions_changed: usize,
}

impl DefinitionReport {
    /// Returns `true` if the run left the store exactly as it found it.
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for DefinitionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unchanged() {
            return f.write_str("Tokens already up to date.");
        }
        write!(
            f,
            "{} collections, {} modes, {} variables created; {} modes renamed; {} values and {} descriptions updated.",
            self.collections_created,
            self.modes_created,
            self.variables_created,
            self.modes_renamed,
            self.values_changed,
            self.descriptions_changed,
        )
    }
}

/// Paint counts for one paint list, or a sum of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintTally {
    /// Solid paints that were unbound and now reference a token.
    pub newly_bound: usize,
    /// Solid paints that already referenced a token and were left alone.
    pub already_bound: usize,
}

impl AddAssign for PaintTally {
    fn add_assign(&mut self, other: Self) {
        self.newly_bound += other.newly_bound;
        self.already_bound += other.already_bound;
    }
}

/// A node whose paints could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub node_id: String,
    pub node_name: String,
    pub reason: EditError,
}

/// Outcome of walking a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebindReport {
    pub paints: PaintTally,
    pub nodes_visited: usize,
    pub skipped: Vec<SkippedNode>,
}

impl RebindReport {
    pub fn newly_bound(&self) -> usize {
        self.paints.newly_bound
    }

    pub fn already_bound(&self) -> usize {
        self.paints.already_bound
    }
}

impl fmt::Display for RebindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✓ {} paints bound to variables ({} already bound)",
            self.paints.newly_bound, self.paints.already_bound
        )?;
        if !self.skipped.is_empty() {
            write!(f, ", {} nodes skipped", self.skipped.len())?;
        }
        f.write_str(".")
    }
}

/// Combined result of a full define-then-rebind run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub definition: DefinitionReport,
    pub rebind: RebindReport,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.definition)?;
        write!(f, "{}", self.rebind)
    }
}

//! Report rendering.
//!
//! Emits one section per category in configured order, then an optional
//! per-category count table with a grand total. Rendering is pure
//! formatting over a stable sort, so re-rendering the same input is
//! byte-identical.

use std::io::Write;

use crate::categorize::Category;
use crate::error::Result;

/// Sort a category's issues by closing time, ascending.
///
/// The sort is stable: issues with the same timestamp keep their arrival
/// order. Issues without a closing time sort first (reachable only when
/// the only-closed filter is disabled).
pub fn sort_by_closed_at(category: &mut Category) {
    category.issues.sort_by_key(|issue| issue.closed_at);
}

/// Render all sections and, when `summary` is set, the count table.
///
/// The grand total is the sum of per-category counts, never the number
/// of issues fetched: dropped issues do not inflate it.
///
/// # Errors
///
/// Returns an error when writing to the sink fails.
pub fn render<W: Write>(out: &mut W, categories: &mut [Category], summary: bool) -> Result<()> {
    for category in categories.iter_mut() {
        sort_by_closed_at(category);
    }

    for category in categories.iter() {
        writeln!(out, "### {}", category.text)?;
        for issue in &category.issues {
            writeln!(out, "* #{}: {};", issue.number, issue.title)?;
        }
        writeln!(out)?;
    }

    if summary {
        writeln!(out)?;
        let mut total = 0;
        for category in categories.iter() {
            writeln!(out, "{}: {}", category.text, category.issues.len())?;
            total += category.issues.len();
        }
        writeln!(out, "Total: {total}")?;
    }

    Ok(())
}

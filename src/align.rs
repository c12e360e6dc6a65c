//! Collapsing n-gram hits into aligned matches.
//!
//! A hit pairs a query window with an index window holding the same n-gram.
//! Hits that continue each other in both streams form a run. For template
//! documents, runs on either side of a wildcard are chained even though the
//! query has extra (or no) tokens where the wildcard sits.

use crate::error::Result;
use crate::merge::merge_aligned_positions;
use crate::position::Position;
use crate::token::WildcardBoundaries;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A query span aligned with the span of an indexed document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignedMatch {
    pub query: Position,
    pub index: Position,
}

impl AlignedMatch {
    /// Collapse aligned pieces into one match
    fn merge<'a, I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a Position, &'a Position)>,
    {
        let (query, index) = merge_aligned_positions(parts)?;
        Ok(Self { query, index })
    }
}

/// One n-gram occurrence shared by the query and an indexed document
#[derive(Debug, Clone)]
pub(crate) struct Hit {
    pub(crate) query: Position,
    pub(crate) index: Position,
}

impl Hit {
    #[inline]
    fn diagonal(&self) -> i64 {
        self.query.start as i64 - self.index.start as i64
    }
}

/// Group hits into runs of exact alignment.
///
/// Hits on the same diagonal whose query spans overlap or touch share a run.
/// A run is not extended by adjacency over an index-side wildcard.
pub(crate) fn cluster_hits(
    mut hits: Vec<Hit>,
    wildcards: &WildcardBoundaries,
) -> Result<Vec<AlignedMatch>> {
    hits.sort_by_key(|h| (h.diagonal(), h.query.start, h.query.end));

    let mut runs = Vec::new();
    let mut group: Vec<&Hit> = Vec::new();
    let mut group_end = 0;

    for hit in &hits {
        let joins = group.last().is_some_and(|last| {
            last.diagonal() == hit.diagonal()
                && hit.query.start <= group_end + 1
                && !(hit.query.start == group_end + 1 && wildcards.contains(hit.index.start))
        });

        if !joins && !group.is_empty() {
            runs.push(AlignedMatch::merge(group.iter().map(|h| (&h.query, &h.index)))?);
            group.clear();
        }

        if group.is_empty() {
            group_end = hit.query.end;
        } else {
            group_end = group_end.max(hit.query.end);
        }
        group.push(hit);
    }

    if !group.is_empty() {
        runs.push(AlignedMatch::merge(group.iter().map(|h| (&h.query, &h.index)))?);
    }

    Ok(runs)
}

/// Chain runs that continue each other across index-side wildcards.
///
/// Run `b` may follow run `a` when `b` starts right after a wildcard that
/// `a` ends before, and `b` starts later in the query than `a` ends. Each
/// run picks its best predecessor independently, so one run can lead
/// several chains. The best predecessor heads the chain reaching furthest
/// back into the index; ties go to the smallest query gap.
///
/// Only maximal chains are returned, ordered by query start.
pub(crate) fn chain_across_wildcards(
    mut runs: Vec<AlignedMatch>,
    wildcards: &WildcardBoundaries,
) -> Result<Vec<AlignedMatch>> {
    if wildcards.is_empty() || runs.len() < 2 {
        return Ok(runs);
    }

    // Predecessors end before a boundary, so they sort ahead of their successors
    runs.sort_by_key(|r| (r.index.start, r.query.start));

    let mut predecessor: Vec<Option<usize>> = vec![None; runs.len()];
    let mut head_start: Vec<usize> = runs.iter().map(|r| r.index.start).collect();
    let mut extended = vec![false; runs.len()];

    for (i, run) in runs.iter().enumerate() {
        if !wildcards.contains(run.index.start) {
            continue;
        }

        let mut best: Option<usize> = None;
        for (p, prev) in runs[..i].iter().enumerate() {
            if prev.index.end + 1 != run.index.start || prev.query.end >= run.query.start {
                continue;
            }

            let rank = (Reverse(head_start[p]), prev.query.end);
            if best.map_or(true, |b| rank > (Reverse(head_start[b]), runs[b].query.end)) {
                best = Some(p);
            }
        }

        if let Some(p) = best {
            predecessor[i] = Some(p);
            head_start[i] = head_start[p];
            extended[p] = true;
        }
    }

    let mut chained = (0..runs.len())
        .filter(|&i| !extended[i])
        .map(|last| {
            let mut members = vec![last];
            let mut current = last;
            while let Some(p) = predecessor[current] {
                members.push(p);
                current = p;
            }
            AlignedMatch::merge(members.iter().map(|&i| (&runs[i].query, &runs[i].index)))
        })
        .collect::<Result<Vec<_>>>()?;

    chained.sort_by_key(|m| (m.query.start, m.index.start));
    Ok(chained)
}

/// Drop matches whose query span lies within a longer match's query span.
///
/// Survivors are ordered by query start, then index start.
pub(crate) fn remove_subsumed(matches: Vec<AlignedMatch>) -> Vec<AlignedMatch> {
    let mut by_length: Vec<AlignedMatch> = matches;
    by_length.sort_by_key(|m| (Reverse(m.query.len()), m.query.start, m.index.start));

    let mut kept: Vec<AlignedMatch> = Vec::with_capacity(by_length.len());
    for candidate in by_length {
        let subsumed = kept.iter().any(|k| {
            k.query.len() > candidate.query.len() && k.query.contains(&candidate.query)
        });
        if !subsumed {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|m| (m.query.start, m.index.start));
    kept
}

// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared paging primitives for the in-memory query builders.

use crate::SortKey;

/// Rows strictly below `anchor`, presented descending. Mirrors a descending
/// index scan with a limit.
pub(crate) fn page_before<R>(
    rows: impl Iterator<Item = R>,
    key: impl Fn(&R) -> SortKey,
    anchor: &SortKey,
    count: usize,
) -> Vec<R> {
    let mut keyed: Vec<(SortKey, R)> = rows
        .map(|row| (key(&row), row))
        .filter(|(k, _)| k < anchor)
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(count);
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Rows strictly above `anchor`, presented descending.
///
/// The scan is ascending so the rows nearest the anchor survive the limit;
/// only the surviving page is flipped for presentation.
pub(crate) fn page_after<R>(
    rows: impl Iterator<Item = R>,
    key: impl Fn(&R) -> SortKey,
    anchor: &SortKey,
    count: usize,
) -> Vec<R> {
    let mut keyed: Vec<(SortKey, R)> = rows
        .map(|row| (key(&row), row))
        .filter(|(k, _)| k > anchor)
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.truncate(count);
    keyed.reverse();
    keyed.into_iter().map(|(_, row)| row).collect()
}

// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Account pages and lookups.
//!
//! The ranking attribute (importance, harvest counters, or a mosaic
//! balance) is recomputed for every row on every query and only lives in
//! the sort key; it is never stored back onto the record.

use timeline_types::{Address, PublicKey};

use crate::mem::page::{page_after, page_before};
use crate::{AccountInfo, AccountRanking, SortKey};

pub(crate) fn accounts_from(
    rows: &[AccountInfo],
    ranking: &AccountRanking,
    anchor: &SortKey,
    count: usize,
) -> Vec<AccountInfo> {
    page_before(
        rows.iter().cloned(),
        |account| ranking.sort_key(account),
        anchor,
        count,
    )
}

pub(crate) fn accounts_since(
    rows: &[AccountInfo],
    ranking: &AccountRanking,
    anchor: &SortKey,
    count: usize,
) -> Vec<AccountInfo> {
    page_after(
        rows.iter().cloned(),
        |account| ranking.sort_key(account),
        anchor,
        count,
    )
}

pub(crate) fn by_address<'a>(rows: &'a [AccountInfo], address: &Address) -> Option<&'a AccountInfo> {
    rows.iter().find(|account| account.address == *address)
}

pub(crate) fn by_public_key<'a>(
    rows: &'a [AccountInfo],
    key: &PublicKey,
) -> Option<&'a AccountInfo> {
    rows.iter().find(|account| account.public_key == *key)
}

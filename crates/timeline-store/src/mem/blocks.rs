// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Block pages.
//!
//! The block sort key (height) is unique, so the range predicate plus one
//! descending scan suffices; no tie-breakers, no re-sort. Both windows are
//! clamped against the current tip: a `since` anchored above the tip stays
//! empty even as the chain grows, so pollers should re-anchor at `latest`.

use std::collections::BTreeMap;

use crate::BlockInfo;

pub(crate) fn blocks_from(
    blocks: &BTreeMap<u64, BlockInfo>,
    chain_height: u64,
    target: u64,
    count: usize,
) -> Vec<BlockInfo> {
    let start = std::cmp::max(1, target.saturating_sub(count as u64));
    let end = std::cmp::min(target, chain_height + 1);
    if start >= end {
        return Vec::new();
    }
    blocks.range(start..end).rev().map(|(_, b)| b.clone()).collect()
}

pub(crate) fn blocks_since(
    blocks: &BTreeMap<u64, BlockInfo>,
    chain_height: u64,
    target: u64,
    count: usize,
) -> Vec<BlockInfo> {
    let start = std::cmp::min(target, chain_height + 1);
    let end = start.saturating_add(count as u64);
    blocks
        .range(start + 1..=end)
        .rev()
        .map(|(_, b)| b.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_types::{Hash256, PublicKey};

    fn chain(height: u64) -> BTreeMap<u64, BlockInfo> {
        (1..=height)
            .map(|h| {
                (
                    h,
                    BlockInfo {
                        height: h,
                        hash: Hash256([h as u8; 32]),
                        signer_public_key: PublicKey::MIN,
                        timestamp: h * 15,
                        fee_multiplier: 0,
                        transaction_count: 0,
                    },
                )
            })
            .collect()
    }

    fn heights(blocks: &[BlockInfo]) -> Vec<u64> {
        blocks.iter().map(|b| b.height).collect()
    }

    #[test]
    fn test_from_returns_window_below_target_descending() {
        let blocks = chain(20);
        assert_eq!(heights(&blocks_from(&blocks, 20, 10, 3)), vec![9, 8, 7]);
    }

    #[test]
    fn test_from_clamps_at_genesis() {
        let blocks = chain(20);
        assert_eq!(heights(&blocks_from(&blocks, 20, 3, 10)), vec![2, 1]);
    }

    #[test]
    fn test_from_near_tip_serves_newest_blocks() {
        let blocks = chain(20);
        // Target above the tip but within `count` of it still lands on the
        // newest blocks.
        assert_eq!(heights(&blocks_from(&blocks, 20, 23, 5)), vec![20, 19, 18]);
    }

    #[test]
    fn test_from_far_above_tip_is_empty() {
        let blocks = chain(20);
        assert!(blocks_from(&blocks, 20, 100, 5).is_empty());
    }

    #[test]
    fn test_since_is_exclusive_and_descending() {
        let blocks = chain(20);
        assert_eq!(heights(&blocks_since(&blocks, 20, 10, 3)), vec![13, 12, 11]);
    }

    #[test]
    fn test_since_above_tip_is_empty() {
        let blocks = chain(20);
        assert!(blocks_since(&blocks, 20, 21, 5).is_empty());
        assert!(blocks_since(&blocks, 20, 500, 5).is_empty());
    }

    #[test]
    fn test_since_at_tip_is_empty_until_growth() {
        let mut blocks = chain(20);
        assert!(blocks_since(&blocks, 20, 20, 5).is_empty());
        blocks.extend(chain(22).split_off(&21));
        assert_eq!(heights(&blocks_since(&blocks, 22, 20, 5)), vec![22, 21]);
    }
}

// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Namespace pages and lookups.
//!
//! A namespace id may sit at any of the three path levels; the lookup
//! requires the id to be the row's own (deepest) level and the row to be
//! active, mirroring the level/depth disjunction of the source schema.

use timeline_types::{MosaicId, NamespaceId, ObjectId};

use crate::key::start_height_key;
use crate::mem::page::{page_after, page_before};
use crate::{NamespaceAlias, NamespaceInfo, SortKey};

fn key(namespace: &NamespaceInfo) -> SortKey {
    start_height_key(namespace.start_height, namespace.id)
}

pub(crate) fn namespaces_from(
    rows: &[NamespaceInfo],
    anchor: &SortKey,
    count: usize,
) -> Vec<NamespaceInfo> {
    page_before(rows.iter().cloned(), key, anchor, count)
}

pub(crate) fn namespaces_since(
    rows: &[NamespaceInfo],
    anchor: &SortKey,
    count: usize,
) -> Vec<NamespaceInfo> {
    page_after(rows.iter().cloned(), key, anchor, count)
}

pub(crate) fn by_namespace_id<'a>(
    rows: &'a [NamespaceInfo],
    id: &NamespaceId,
) -> Option<&'a NamespaceInfo> {
    // Equivalent to OR-ing (level0, depth 1), (level1, depth 2),
    // (level2, depth 3): the id must be the row's own level.
    rows.iter()
        .find(|namespace| namespace.active && namespace.own_id() == Some(*id))
}

pub(crate) fn by_object_id<'a>(
    rows: &'a [NamespaceInfo],
    id: &ObjectId,
) -> Option<&'a NamespaceInfo> {
    rows.iter().find(|namespace| namespace.id == *id)
}

pub(crate) fn mosaic_alias(rows: &[NamespaceInfo], id: &NamespaceId) -> Option<MosaicId> {
    match by_namespace_id(rows, id)?.alias {
        NamespaceAlias::Mosaic(mosaic) => Some(mosaic),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_types::Address;

    fn namespace(levels: Vec<NamespaceId>, active: bool, tag: u8) -> NamespaceInfo {
        NamespaceInfo {
            id: ObjectId([tag; 12]),
            levels,
            start_height: u64::from(tag),
            end_height: u64::from(tag) + 1000,
            active,
            owner_address: Address([0x68; 25]),
            alias: NamespaceAlias::None,
        }
    }

    fn ns_id(value: u64) -> NamespaceId {
        NamespaceId::from_u64(value)
    }

    #[test]
    fn test_lookup_matches_own_level_only() {
        let root = namespace(vec![ns_id(1)], true, 1);
        let child = namespace(vec![ns_id(1), ns_id(2)], true, 2);
        let grandchild = namespace(vec![ns_id(1), ns_id(2), ns_id(3)], true, 3);
        let rows = vec![root, child, grandchild];

        assert_eq!(by_namespace_id(&rows, &ns_id(1)).unwrap().depth(), 1);
        assert_eq!(by_namespace_id(&rows, &ns_id(2)).unwrap().depth(), 2);
        assert_eq!(by_namespace_id(&rows, &ns_id(3)).unwrap().depth(), 3);
    }

    #[test]
    fn test_lookup_requires_active_row() {
        let rows = vec![namespace(vec![ns_id(7)], false, 1)];
        assert!(by_namespace_id(&rows, &ns_id(7)).is_none());
    }

    #[test]
    fn test_alias_resolution() {
        let mut aliased = namespace(vec![ns_id(5)], true, 1);
        aliased.alias = NamespaceAlias::Mosaic(MosaicId::from_u64(42));
        let unaliased = namespace(vec![ns_id(6)], true, 2);
        let rows = vec![aliased, unaliased];

        assert_eq!(mosaic_alias(&rows, &ns_id(5)), Some(MosaicId::from_u64(42)));
        assert_eq!(mosaic_alias(&rows, &ns_id(6)), None);
        assert_eq!(mosaic_alias(&rows, &ns_id(9)), None);
    }

    #[test]
    fn test_pages_use_start_height_then_id() {
        let rows = vec![
            namespace(vec![ns_id(1)], true, 3),
            namespace(vec![ns_id(2)], true, 1),
            namespace(vec![ns_id(3)], true, 2),
        ];
        let anchor = key(&rows[0]); // highest start height
        let page = namespaces_from(&rows, &anchor, 10);
        let tags: Vec<u8> = page.iter().map(|n| n.id.0[0]).collect();
        assert_eq!(tags, vec![2, 1]);
    }
}

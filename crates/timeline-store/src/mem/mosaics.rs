// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use timeline_types::MosaicId;

use crate::key::start_height_key;
use crate::mem::page::{page_after, page_before};
use crate::{MosaicInfo, SortKey};

fn key(mosaic: &MosaicInfo) -> SortKey {
    start_height_key(mosaic.start_height, mosaic.id)
}

pub(crate) fn mosaics_from(rows: &[MosaicInfo], anchor: &SortKey, count: usize) -> Vec<MosaicInfo> {
    page_before(rows.iter().cloned(), key, anchor, count)
}

pub(crate) fn mosaics_since(rows: &[MosaicInfo], anchor: &SortKey, count: usize) -> Vec<MosaicInfo> {
    page_after(rows.iter().cloned(), key, anchor, count)
}

pub(crate) fn by_id<'a>(rows: &'a [MosaicInfo], id: &MosaicId) -> Option<&'a MosaicInfo> {
    rows.iter().find(|mosaic| mosaic.mosaic_id == *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{start_height_key_max, start_height_key_min};
    use timeline_types::{Address, ObjectId};

    fn mosaic(start_height: u64, tag: u8) -> MosaicInfo {
        MosaicInfo {
            id: ObjectId([tag; 12]),
            mosaic_id: MosaicId::from_u64(u64::from(tag)),
            start_height,
            owner_address: Address([0x68; 25]),
            supply: 1000,
        }
    }

    #[test]
    fn test_start_height_then_id_ordering() {
        let rows = vec![mosaic(5, 1), mosaic(5, 2), mosaic(3, 9)];
        let page = mosaics_from(&rows, &start_height_key_max(), 10);
        let tags: Vec<u8> = page.iter().map(|m| m.id.0[0]).collect();
        assert_eq!(tags, vec![2, 1, 9]);
    }

    #[test]
    fn test_paging_around_a_record_is_exclusive() {
        let rows = vec![mosaic(1, 1), mosaic(2, 2), mosaic(3, 3)];
        let anchor = key(&rows[1]);
        assert_eq!(mosaics_from(&rows, &anchor, 10).len(), 1);
        assert_eq!(mosaics_since(&rows, &anchor, 10).len(), 1);
        assert!(mosaics_since(&rows, &start_height_key_min(), 10).len() == 3);
    }

    #[test]
    fn test_lookup_by_mosaic_id() {
        let rows = vec![mosaic(1, 1), mosaic(2, 2)];
        assert!(by_id(&rows, &MosaicId::from_u64(2)).is_some());
        assert!(by_id(&rows, &MosaicId::from_u64(3)).is_none());
    }
}

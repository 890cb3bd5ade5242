// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use timeline_types::{MosaicId, NamespaceId};

/// Bounds for the `limit` path segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSizeConfig {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl Default for PageSizeConfig {
    fn default() -> Self {
        Self {
            min: 10,
            max: 100,
            default: 20,
        }
    }
}

/// The timeline engine's view of the page bounds; `preset` is the value
/// substituted into redirect URLs.
#[derive(Debug, Clone, Copy)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
    pub preset: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub page_size: PageSizeConfig,
    /// Network byte expected at the head of every address anchor.
    pub network_id: u8,
    /// Well-known mosaics excluded by the transfer `mosaic` subfilter.
    pub currency_mosaic_id: MosaicId,
    pub harvest_mosaic_id: MosaicId,
    /// Alias roots resolved per balance-family query.
    pub currency_namespace_id: NamespaceId,
    pub harvest_namespace_id: NamespaceId,
    pub xem_namespace_id: NamespaceId,
    /// Bind address for the standalone server runner.
    pub listen_address: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            page_size: PageSizeConfig::default(),
            network_id: 0x68,
            currency_mosaic_id: MosaicId::from_u64(0x0DC6_7FBE_1CAD_29E3),
            harvest_mosaic_id: MosaicId::from_u64(0x2651_4E2A_1EF3_3824),
            currency_namespace_id: NamespaceId::from_u64(0x85BB_EA6C_C462_B244),
            harvest_namespace_id: NamespaceId::from_u64(0x9412_99B2_B7E1_291C),
            xem_namespace_id: NamespaceId::from_u64(0x84B3_552D_375F_FA4B),
            listen_address: "0.0.0.0:3000".to_owned(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ApiConfig {
    pub fn count_range(&self) -> CountRange {
        CountRange {
            min: self.page_size.min,
            max: self.page_size.max,
            preset: self.page_size.default,
        }
    }

    pub fn well_known_mosaics(&self) -> Vec<MosaicId> {
        vec![self.currency_mosaic_id, self.harvest_mosaic_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = ApiConfig::default();
        let range = config.count_range();
        assert!(range.min <= range.preset && range.preset <= range.max);
        assert_eq!(config.well_known_mosaics().len(), 2);
    }

    #[test]
    fn test_partial_config_deserializes_over_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{ "pageSize": { "min": 1, "max": 50, "default": 25 } }"#)
                .unwrap();
        assert_eq!(config.page_size.min, 1);
        assert_eq!(config.count_range().preset, 25);
        assert_eq!(config.network_id, 0x68);
    }
}

// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared path-segment handling for the timeline routes.

use timeline_types::{parse_uint, Duration, Extreme, ParseError, SentinelSet};

use crate::config::CountRange;
use crate::timeline::AnchorKind;

/// Raw segments of the basic `/:duration/:anchor/limit/:limit` grammar.
///
/// Segments are extracted as strings so that malformed values surface as
/// the layer's own invalid-argument response instead of the router's
/// default rejection.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct TimelinePathParams {
    pub duration: String,
    pub anchor: String,
    pub limit: String,
}

pub(crate) fn parse_duration(segment: &str) -> Result<Duration, ParseError> {
    segment.parse()
}

/// Limit sanitization: parse strictly, then range-check. Out-of-range
/// limits are not an error, they trigger the canonicalizing redirect.
pub(crate) enum Limit {
    Valid(usize),
    OutOfRange,
}

pub(crate) fn parse_limit(segment: &str, range: &CountRange) -> Result<Limit, ParseError> {
    let value = parse_uint(segment)? as usize;
    if (range.min..=range.max).contains(&value) {
        Ok(Limit::Valid(value))
    } else {
        Ok(Limit::OutOfRange)
    }
}

/// Sentinel classification shared by every family: `min`/`max` plus the
/// family's alias flavor.
pub(crate) fn classify_sentinel(set: SentinelSet, segment: &str) -> Option<AnchorKind> {
    set.parse(segment).map(|extreme| match extreme {
        Extreme::Min => AnchorKind::Min,
        Extreme::Max => AnchorKind::Max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: CountRange = CountRange {
        min: 10,
        max: 100,
        preset: 20,
    };

    #[test]
    fn test_limit_in_range() {
        assert!(matches!(parse_limit("25", &RANGE), Ok(Limit::Valid(25))));
        assert!(matches!(parse_limit("10", &RANGE), Ok(Limit::Valid(10))));
        assert!(matches!(parse_limit("100", &RANGE), Ok(Limit::Valid(100))));
    }

    #[test]
    fn test_limit_out_of_range_is_not_an_error() {
        assert!(matches!(parse_limit("0", &RANGE), Ok(Limit::OutOfRange)));
        assert!(matches!(parse_limit("9", &RANGE), Ok(Limit::OutOfRange)));
        assert!(matches!(parse_limit("101", &RANGE), Ok(Limit::OutOfRange)));
    }

    #[test]
    fn test_malformed_limit_is_an_error() {
        assert!(parse_limit("2x", &RANGE).is_err());
        assert!(parse_limit("-1", &RANGE).is_err());
    }

    #[test]
    fn test_sentinel_classification_respects_family_flavor() {
        assert_eq!(
            classify_sentinel(SentinelSet::Time, "latest"),
            Some(AnchorKind::Max)
        );
        assert_eq!(classify_sentinel(SentinelSet::Time, "most"), None);
        assert_eq!(
            classify_sentinel(SentinelSet::Quantity, "least"),
            Some(AnchorKind::Min)
        );
        assert_eq!(classify_sentinel(SentinelSet::Quantity, "longest"), None);
    }
}

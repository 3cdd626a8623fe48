// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Span ownership for a single scan

use std::ops::Range;

/// Byte ranges already owned by accepted hits
///
/// Ranges are kept sorted by start and pairwise disjoint. A set lives for
/// exactly one scan call.
#[derive(Debug, Default, Clone)]
pub struct ClaimSet {
    ranges: Vec<Range<usize>>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_claimed(&self, offset: usize) -> bool {
        self.overlaps(&(offset..offset + 1))
    }

    /// True if any offset of `range` is already claimed
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        let idx = self.first_ending_after(range.start);
        self.ranges
            .get(idx)
            .is_some_and(|claimed| claimed.start < range.end)
    }

    /// Claim `range` unless it is empty or touches an existing claim
    ///
    /// Rejection is outright: ranges are never merged or compared.
    pub fn try_claim(&mut self, range: Range<usize>) -> bool {
        if range.is_empty() || self.overlaps(&range) {
            return false;
        }
        let idx = self.first_ending_after(range.start);
        self.ranges.insert(idx, range);
        true
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.ranges.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = &Range<usize>> {
        self.ranges.iter()
    }

    fn first_ending_after(&self, offset: usize) -> usize {
        self.ranges.partition_point(|claimed| claimed.end <= offset)
    }
}

// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Per-category rollup of accepted hits

use serde::{Deserialize, Serialize};

use super::config::PiiType;
use super::detector::PiiHit;

/// All hits of one category, in scan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedFinding {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub count: usize,
    pub matches: Vec<String>,
}

impl AggregatedFinding {
    pub fn new(pii_type: PiiType) -> Self {
        Self {
            pii_type,
            count: 0,
            matches: Vec::new(),
        }
    }

    fn push(&mut self, value: &str) {
        self.count += 1;
        self.matches.push(value.to_string());
    }
}

/// Group hits by category, ordered by each category's first hit
pub fn aggregate(hits: &[PiiHit]) -> Vec<AggregatedFinding> {
    let mut findings: Vec<AggregatedFinding> = Vec::new();

    for hit in hits {
        match findings.iter_mut().find(|f| f.pii_type == hit.pii_type) {
            Some(finding) => finding.push(&hit.value),
            None => {
                let mut finding = AggregatedFinding::new(hit.pii_type);
                finding.push(&hit.value);
                findings.push(finding);
            }
        }
    }

    findings
}

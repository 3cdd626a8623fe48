// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Log-safe reporting payload for detected PII

use serde::{Deserialize, Serialize};

use super::aggregate::AggregatedFinding;
use super::config::PiiType;
use super::detector::PiiDetector;
use super::markup::content_text;
use super::masking::mask;

/// Examples kept per category in a report
pub const DEFAULT_MAX_EXAMPLES: usize = 3;

/// Labels applied to a page once PII is found
pub const QUARANTINE_LABELS: [&str; 2] = ["confidential", "pii-detected"];

/// Version messages written by our own page updates
pub const APP_UPDATE_MESSAGES: [&str; 2] = [
    "Auto-detected PII: Highlights & Warning Added",
    "Auto-detected PII: Added Confidential Banner",
];

/// Version message for the banner + highlight update
pub const BANNER_VERSION_MESSAGE: &str = APP_UPDATE_MESSAGES[0];

/// True when a page version was produced by this app, so a triggered scan
/// must stop instead of rewriting the page again
pub fn is_app_generated_update(version_message: Option<&str>) -> bool {
    version_message.is_some_and(|message| APP_UPDATE_MESSAGES.contains(&message))
}

/// One category of a report, with masked examples only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSummary {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub count: usize,
    pub examples: Vec<String>,
}

/// Category and count, without any matched values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub count: usize,
}

impl TypeCount {
    pub fn from_findings(findings: &[AggregatedFinding]) -> Vec<Self> {
        findings
            .iter()
            .map(|finding| Self {
                pii_type: finding.pii_type,
                count: finding.count,
            })
            .collect()
    }
}

fn total_count(counts: &[TypeCount]) -> usize {
    counts.iter().map(|c| c.count).sum()
}

/// PII found in one stored version of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionFindings {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub pii_types: Vec<PiiType>,
    pub pii_count: usize,
    pub pii_details: Vec<TypeCount>,
}

impl VersionFindings {
    /// Roll up the findings of one version; `None` when there are none
    pub fn from_findings(version: u64, findings: &[AggregatedFinding]) -> Option<Self> {
        if findings.is_empty() {
            return None;
        }
        let pii_details = TypeCount::from_findings(findings);
        Some(Self {
            version,
            created_at: None,
            created_by: None,
            pii_types: findings.iter().map(|f| f.pii_type).collect(),
            pii_count: total_count(&pii_details),
            pii_details,
        })
    }

    /// Scan the storage markup of one version
    pub fn scan(version: u64, markup: &str, detector: &PiiDetector) -> Option<Self> {
        let text = content_text(markup);
        if text.is_empty() {
            return None;
        }
        Self::from_findings(version, &detector.detect(&text))
    }

    pub fn with_author(
        mut self,
        created_at: Option<String>,
        created_by: Option<String>,
    ) -> Self {
        self.created_at = created_at;
        self.created_by = created_by;
        self
    }
}

/// Short form of a version listed under `versionsWithPii`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version: u64,
    pub pii_types: Vec<PiiType>,
    pub pii_count: usize,
}

/// PII found on another page of the space, in its title or history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFindings {
    pub page_id: String,
    pub page_title: String,
    pub title_pii: Vec<TypeCount>,
    pub content_pii: Vec<VersionFindings>,
    pub versions_with_pii: Vec<VersionSummary>,
}

impl PageFindings {
    /// Findings for one page; `None` when neither the title nor any
    /// version contains PII
    pub fn new(
        page_id: impl Into<String>,
        page_title: impl Into<String>,
        title_findings: &[AggregatedFinding],
        versions: Vec<VersionFindings>,
    ) -> Option<Self> {
        if title_findings.is_empty() && versions.is_empty() {
            return None;
        }
        let versions_with_pii = versions
            .iter()
            .map(|v| VersionSummary {
                version: v.version,
                pii_types: v.pii_types.clone(),
                pii_count: v.pii_count,
            })
            .collect();
        Some(Self {
            page_id: page_id.into(),
            page_title: page_title.into(),
            title_pii: TypeCount::from_findings(title_findings),
            content_pii: versions,
            versions_with_pii,
        })
    }

    /// Scan a page title and the markup of each of its versions
    pub fn scan<'a>(
        page_id: impl Into<String>,
        page_title: &str,
        versions: impl IntoIterator<Item = (u64, &'a str)>,
        detector: &PiiDetector,
    ) -> Option<Self> {
        let title_findings = detector.detect(page_title);
        let versions = versions
            .into_iter()
            .filter_map(|(version, markup)| VersionFindings::scan(version, markup, detector))
            .collect();
        Self::new(page_id, page_title, &title_findings, versions)
    }

    /// Title hits plus every version's hits
    pub fn pii_count(&self) -> usize {
        let versions: usize = self.content_pii.iter().map(|v| v.pii_count).sum();
        total_count(&self.title_pii) + versions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_pii_types_in_preview: usize,
    pub total_other_pages_with_pii: usize,
    pub total_pii_instances: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiiReport {
    /// Current page preview, masked
    pub findings: Vec<FindingSummary>,
    /// Sum of all category counts in the preview
    pub total: usize,
    pub other_pages_with_pii: Vec<PageFindings>,
    pub summary: ReportSummary,
}

impl PiiReport {
    pub fn from_findings(findings: &[AggregatedFinding], max_examples: usize) -> Self {
        Self::new(findings, Vec::new(), max_examples)
    }

    /// Report for the current page preview and the other pages found with PII
    pub fn new(
        findings: &[AggregatedFinding],
        other_pages: Vec<PageFindings>,
        max_examples: usize,
    ) -> Self {
        let findings: Vec<FindingSummary> = findings
            .iter()
            .map(|finding| FindingSummary {
                pii_type: finding.pii_type,
                count: finding.count,
                examples: finding
                    .matches
                    .iter()
                    .take(max_examples)
                    .map(|m| mask(m, finding.pii_type))
                    .collect(),
            })
            .collect();
        let total = findings.iter().map(|f| f.count).sum();
        let summary = ReportSummary {
            total_pii_types_in_preview: findings.len(),
            total_other_pages_with_pii: other_pages.len(),
            total_pii_instances: total
                + other_pages.iter().map(PageFindings::pii_count).sum::<usize>(),
        };

        tracing::info!(
            categories = summary.total_pii_types_in_preview,
            other_pages = summary.total_other_pages_with_pii,
            total = summary.total_pii_instances,
            "Compiled PII findings report"
        );

        Self {
            findings,
            total,
            other_pages_with_pii: other_pages,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.other_pages_with_pii.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

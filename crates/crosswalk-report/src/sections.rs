//! The three report sections: metadata with methodology, the crosswalk
//! table and the per-category pivot.

use chrono::NaiveDateTime;
use crosswalk_map::{CategorySummary, CrosswalkResult};
use crosswalk_model::{ConfidenceTier, CrosswalkConfig, CrosswalkMapping};
use serde::Serialize;

use crate::error::Result;

pub const REPORT_TITLE: &str = "EnableNSW to NDIS Crosswalk Analysis Report";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Run-level facts shown at the top of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub title: String,
    pub analysis_date: String,
    pub total_entries: usize,
    pub mapped_entries: usize,
    pub success_rate: f64,
    pub fuzzy_threshold: u8,
    pub include_repair_codes: bool,
    pub rule_set_version: String,
    pub rule_count: usize,
    pub high_confidence: usize,
    pub functional_equivalent: usize,
    pub review_required: usize,
    pub skipped_enablensw_rows: usize,
    pub skipped_ndis_rows: usize,
    /// SHA-256 of the engine output.
    pub fingerprint: String,
}

/// One flat row of the crosswalk table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosswalkRow {
    pub enablensw_category: String,
    pub enablensw_subcategory: String,
    pub enablensw_description: String,
    pub ndis_item_code: Option<String>,
    pub ndis_item_name: Option<String>,
    pub ndis_category: Option<String>,
    pub ndis_description: Option<String>,
    pub ndis_unit_price: Option<String>,
    pub ndis_source_table: Option<String>,
    pub confidence: String,
    pub match_score: Option<u8>,
    pub match_method: String,
    pub matched_rule: Option<String>,
    pub keywords_matched: String,
    pub repair_codes: String,
    pub note: Option<String>,
}

impl CrosswalkRow {
    pub const HEADERS: [&'static str; 16] = [
        "EnableNSW_Category",
        "EnableNSW_Subcategory",
        "EnableNSW_Description",
        "NDIS_Support_Item_Number",
        "NDIS_Support_Item_Name",
        "NDIS_Category",
        "NDIS_Description",
        "NDIS_Unit_Price",
        "NDIS_Source_Table",
        "Mapping_Confidence",
        "Match_Score",
        "Matching_Method",
        "Matched_Rule",
        "Keywords_Matched",
        "Repair_Maintenance_Codes",
        "Note",
    ];

    pub fn from_mapping(mapping: &CrosswalkMapping) -> Self {
        let item = mapping.matched_item.as_ref();
        Self {
            enablensw_category: mapping.entry.category.clone(),
            enablensw_subcategory: mapping.entry.subcategory.clone(),
            enablensw_description: mapping.entry.description_text().to_string(),
            ndis_item_code: item.map(|i| i.item_code.clone()),
            ndis_item_name: item.map(|i| i.item_name.clone()),
            ndis_category: item.and_then(|i| i.category.clone()),
            ndis_description: item.and_then(|i| i.description.clone()),
            ndis_unit_price: item.and_then(|i| i.unit_price).map(|p| p.to_string()),
            ndis_source_table: item.and_then(|i| i.source_table.clone()),
            confidence: mapping.confidence_tier.label().to_string(),
            match_score: mapping.similarity_score,
            match_method: mapping.match_method.label().to_string(),
            matched_rule: mapping.matched_rule.clone(),
            keywords_matched: mapping.keywords_matched.join(", "),
            repair_codes: mapping.repair_codes().join("; "),
            note: mapping.note.clone(),
        }
    }

    pub fn to_record(&self) -> Vec<String> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            self.enablensw_category.clone(),
            self.enablensw_subcategory.clone(),
            self.enablensw_description.clone(),
            text(&self.ndis_item_code),
            text(&self.ndis_item_name),
            text(&self.ndis_category),
            text(&self.ndis_description),
            text(&self.ndis_unit_price),
            text(&self.ndis_source_table),
            self.confidence.clone(),
            self.match_score.map(|s| s.to_string()).unwrap_or_default(),
            self.match_method.clone(),
            text(&self.matched_rule),
            self.keywords_matched.clone(),
            self.repair_codes.clone(),
            text(&self.note),
        ]
    }
}

/// Pivot row for one EnableNSW category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub enablensw_category: String,
    pub total_subcategories: usize,
    pub mapped_items: usize,
    pub mapping_rate: f64,
    pub ndis_categories: Vec<String>,
    pub high_confidence: usize,
    pub best_fit: usize,
    pub review_required: usize,
}

impl PivotRow {
    pub const HEADERS: [&'static str; 8] = [
        "EnableNSW_Category",
        "Total_Subcategories",
        "Mapped_Items",
        "Mapping_Rate",
        "NDIS_Categories",
        "High_Confidence",
        "Best_Fit",
        "Review_Required",
    ];

    pub fn from_summary(summary: &CategorySummary) -> Self {
        Self {
            enablensw_category: summary.category.clone(),
            total_subcategories: summary.total,
            mapped_items: summary.mapped,
            mapping_rate: summary.success_rate,
            ndis_categories: summary.ndis_categories.clone(),
            high_confidence: summary.high,
            best_fit: summary.functional_equivalent,
            review_required: summary.review_required,
        }
    }

    pub fn to_record(&self) -> Vec<String> {
        let categories = if self.ndis_categories.is_empty() {
            "None".to_string()
        } else {
            self.ndis_categories.join("; ")
        };
        vec![
            self.enablensw_category.clone(),
            self.total_subcategories.to_string(),
            self.mapped_items.to_string(),
            format!("{:.1}%", self.mapping_rate),
            categories,
            self.high_confidence.to_string(),
            self.best_fit.to_string(),
            self.review_required.to_string(),
        ]
    }
}

/// All report sections of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosswalkReport {
    pub metadata: ReportMetadata,
    pub methodology: Vec<String>,
    pub crosswalk: Vec<CrosswalkRow>,
    pub pivot: Vec<PivotRow>,
}

impl CrosswalkReport {
    pub fn build(
        result: &CrosswalkResult,
        config: &CrosswalkConfig,
        analysis_date: NaiveDateTime,
    ) -> Result<Self> {
        let stats = &result.stats;
        let metadata = ReportMetadata {
            title: REPORT_TITLE.to_string(),
            analysis_date: analysis_date.format(DATE_FORMAT).to_string(),
            total_entries: stats.total_entries,
            mapped_entries: stats.mapped,
            success_rate: stats.match_rate,
            fuzzy_threshold: config.fuzzy_threshold.value(),
            include_repair_codes: config.include_repair_codes,
            rule_set_version: config.mapping_rules.version.clone(),
            rule_count: config.mapping_rules.len(),
            high_confidence: stats.tier_count(ConfidenceTier::High),
            functional_equivalent: stats.tier_count(ConfidenceTier::FunctionalEquivalent),
            review_required: stats.tier_count(ConfidenceTier::ReviewRequired),
            skipped_enablensw_rows: stats.skipped_rows.enablensw,
            skipped_ndis_rows: stats.skipped_rows.ndis,
            fingerprint: result.fingerprint()?,
        };
        Ok(Self {
            methodology: methodology(config),
            metadata,
            crosswalk: result.mappings.iter().map(CrosswalkRow::from_mapping).collect(),
            pivot: stats.by_category.iter().map(PivotRow::from_summary).collect(),
        })
    }

    /// Metadata as `(label, value)` pairs in display order.
    pub fn metadata_pairs(&self) -> Vec<(&'static str, String)> {
        let m = &self.metadata;
        vec![
            ("Report", m.title.clone()),
            ("Analysis Date", m.analysis_date.clone()),
            ("Total Items Analyzed", m.total_entries.to_string()),
            ("Successfully Mapped", m.mapped_entries.to_string()),
            ("Mapping Success Rate", format!("{:.1}%", m.success_rate)),
            ("Direct Line Items", m.high_confidence.to_string()),
            ("Best-fit Items", m.functional_equivalent.to_string()),
            ("Review Required", m.review_required.to_string()),
            ("Fuzzy Threshold", m.fuzzy_threshold.to_string()),
            (
                "Repair Codes",
                if m.include_repair_codes { "included" } else { "not included" }.to_string(),
            ),
            (
                "Rule Set",
                format!("{} ({} rules)", m.rule_set_version, m.rule_count),
            ),
            ("Skipped EnableNSW Rows", m.skipped_enablensw_rows.to_string()),
            ("Skipped NDIS Rows", m.skipped_ndis_rows.to_string()),
            ("Fingerprint", m.fingerprint.clone()),
        ]
    }
}

/// Methodology text for a configuration.
pub fn methodology(config: &CrosswalkConfig) -> Vec<String> {
    let threshold = config.fuzzy_threshold.value();
    let high = ConfidenceTier::High.label();
    let best_fit = ConfidenceTier::FunctionalEquivalent.label();
    let review = ConfidenceTier::ReviewRequired.label();
    let repair = if config.include_repair_codes {
        format!(
            "Repair and maintenance codes are linked from the matched item's category (keywords: {}).",
            config.normalized_repair_keywords().join(", ")
        )
    } else {
        "Repair and maintenance codes are not linked.".to_string()
    };
    vec![
        "This crosswalk uses a two-stage matching approach.".to_string(),
        "1. Rule-based matching".to_string(),
        "   - Keyword rules map known equipment families to NDIS categories".to_string(),
        format!(
            "   - Rule set {} with {} rules; the first matching rule wins",
            config.mapping_rules.version,
            config.mapping_rules.len()
        ),
        "   - The most similar item name within the target category is selected".to_string(),
        "2. Fuzzy string matching".to_string(),
        "   - Token-set similarity between EnableNSW and NDIS descriptions".to_string(),
        format!("   - Confidence threshold: {threshold}%"),
        "Confidence levels".to_string(),
        format!("   - {high}: rule-based match"),
        format!("   - {best_fit}: fuzzy match scoring at least {threshold}%"),
        format!("   - {review}: no match reaching {threshold}%"),
        repair,
        "Limitations".to_string(),
        "   - Automated matching may miss contextual nuances".to_string(),
        "   - Manual review is recommended for 'Review required' items".to_string(),
        "   - NDIS pricing and availability are subject to change".to_string(),
    ]
}

//! Filename → document type classification.

use docroute_core::DocType;

/// Result of classifying a filename, including whether a rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub doc_type: DocType,

    /// `false` when no rule matched and the default type was used
    pub matched: bool,
}

/// Substring rules, checked in order against the lowercased filename.
const RULES: &[(&str, DocType)] = &[
    ("activity", DocType::DailyActivity),
    ("balance", DocType::DailyBalance),
];

/// Type assigned to files no rule recognizes.
pub const FALLBACK_DOC_TYPE: DocType = DocType::DailyActivity;

/// Classify a filename. Total: unknown names fall back to `daily-activity`.
pub fn classify(filename: &str) -> DocType {
    classify_detailed(filename).doc_type
}

/// Classify a filename and report whether the fallback was used.
pub fn classify_detailed(filename: &str) -> Classification {
    let lower = filename.to_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|&(_, doc_type)| Classification {
            doc_type,
            matched: true,
        })
        .unwrap_or(Classification {
            doc_type: FALLBACK_DOC_TYPE,
            matched: false,
        })
}

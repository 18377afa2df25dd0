//! Data models for document analysis.

mod analysis;
mod category;
mod report;

pub use analysis::{
    AnalysisMethod, AnalysisRequest, AnalysisResult, Classification, MergedResult, Priority,
    ProviderId, SentimentLabel,
};
pub use category::{is_known_category, DOCUMENT_CATEGORIES};
pub use report::AnalysisReport;

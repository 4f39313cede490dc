//! Advice composition and report rendering
//!
//! - Rules: ordered lookup tables for clothing, activity and health advice
//! - Composer: turns a trend analysis into a suggestion set
//! - Report: renders the analysis as a Markdown report
//! - Pipeline: analyze and render in one call

pub mod composer;
pub mod pipeline;
pub mod report;
pub mod rules;

pub use composer::{AdvisoryComposer, SuggestionSet};
pub use pipeline::{AdvisoryPipeline, AdvisoryReport};
pub use report::{ReportRenderer, report_title};

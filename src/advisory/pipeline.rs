//! Analyze-then-render convenience for the orchestrator

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use super::ReportRenderer;
use crate::config::AdvisoryConfig;
use crate::models::{ForecastRecord, History};
use crate::trends::{TrendAnalysis, TrendAnalyzer};
use crate::Result;

/// Everything the delivery side needs
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub title: String,
    pub body: String,
    pub analysis: TrendAnalysis,
}

pub struct AdvisoryPipeline {
    analyzer: TrendAnalyzer,
    renderer: ReportRenderer,
}

impl AdvisoryPipeline {
    pub fn new(config: &AdvisoryConfig) -> Result<Self> {
        Ok(Self {
            analyzer: TrendAnalyzer::new(config.analysis.clone())?,
            renderer: ReportRenderer::new(config.report.clone()),
        })
    }

    /// Analyze and render with an explicit generation timestamp
    pub fn run(
        &self,
        tomorrow: &ForecastRecord,
        history: &History,
        generated_at: NaiveDateTime,
    ) -> Result<AdvisoryReport> {
        let analysis = self.analyzer.analyze(tomorrow, history)?;
        let body = self.renderer.render(&analysis, generated_at);
        let title = self.renderer.title(analysis.tomorrow.date);

        info!(
            "Advisory for {} generated with {} warning(s)",
            analysis.tomorrow.date,
            analysis.weather_warnings.len()
        );

        Ok(AdvisoryReport {
            title,
            body,
            analysis,
        })
    }

    /// Analyze and render stamped with the current local time
    pub fn run_now(&self, tomorrow: &ForecastRecord, history: &History) -> Result<AdvisoryReport> {
        self.run(tomorrow, history, Local::now().naive_local())
    }
}

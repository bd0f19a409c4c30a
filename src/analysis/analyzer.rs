use super::client::AnalysisClient;
use super::parser::{parse_analysis, DragAnalysis};
use super::prompt::UNAVAILABLE_TEXT;
use rand::Rng;
use std::sync::Arc;

/// Runs the drag analysis for a model file name
///
/// Transport and provider failures are replaced by fixed text before
/// parsing, so [`AeroAnalyzer::analyze`] always yields a result.
pub struct AeroAnalyzer {
    client: Arc<dyn AnalysisClient>,
}

impl AeroAnalyzer {
    /// Create an analyzer over a text source
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        Self { client }
    }

    /// Analyze a model by file name
    pub async fn analyze(&self, file_name: &str) -> DragAnalysis {
        let text = self.fetch_text(file_name).await;
        parse_analysis(&text, &mut rand::rng())
    }

    /// Analyze with a caller-supplied random source for the fallback path
    pub async fn analyze_with_rng<R: Rng>(&self, file_name: &str, rng: &mut R) -> DragAnalysis {
        let text = self.fetch_text(file_name).await;
        parse_analysis(&text, rng)
    }

    async fn fetch_text(&self, file_name: &str) -> String {
        match self.client.request(file_name).await {
            Ok(text) => {
                tracing::debug!(chars = text.len(), "Analysis text received");
                text
            }
            Err(e) => {
                tracing::error!("Aero analysis failed for {}: {}", file_name, e);
                UNAVAILABLE_TEXT.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parser::AnalysisSource;
    use crate::error::{AerosuiteError, Result};
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixed(std::result::Result<&'static str, ()>);

    #[async_trait]
    impl AnalysisClient for Fixed {
        async fn request(&self, _file_name: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|_| AerosuiteError::RateLimited("gateway".to_string()).into())
        }
    }

    #[tokio::test]
    async fn test_analyze_parses_text() {
        let analyzer = AeroAnalyzer::new(Arc::new(Fixed(Ok(
            "DRAG_COEFFICIENT: 0.301\nIMPROVEMENTS:\n1. Roof | Lower it | 0.01",
        ))));
        let analysis = analyzer.analyze("car.glb").await;
        assert_eq!(analysis.source, AnalysisSource::Parsed);
        assert_eq!(analysis.drag_coefficient, 0.301);
        assert_eq!(analysis.improvements.len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_failure_falls_back() {
        let analyzer = AeroAnalyzer::new(Arc::new(Fixed(Err(()))));
        let mut rng = StdRng::seed_from_u64(1);
        let analysis = analyzer.analyze_with_rng("car.glb", &mut rng).await;
        assert_eq!(analysis.source, AnalysisSource::Fallback);
        assert_eq!(analysis.improvements.len(), 3);
    }
}

use crate::core::catalog::PriceCatalog;
use crate::core::{calculator, validator};
use crate::domain::model::{Configuration, PriceBreakdown, ValidationErrors};
use std::sync::Arc;

/// 目錄 + 驗證 + 計價的組合，可以廉價複製並在多處共用
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    catalog: Arc<PriceCatalog>,
}

impl QuoteEngine {
    pub fn new(catalog: PriceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn validate(&self, config: &Configuration) -> ValidationErrors {
        validator::validate_dimensions(&self.catalog, config)
    }

    pub fn calculate(&self, config: &Configuration) -> PriceBreakdown {
        let breakdown = calculator::calculate(&self.catalog, config);
        tracing::debug!(
            item_price = %breakdown.item_price,
            total_price = %breakdown.total_price,
            is_large = breakdown.is_large,
            "Recalculated price"
        );
        breakdown
    }
}

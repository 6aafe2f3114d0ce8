use crate::core::catalog::PriceCatalog;
use crate::domain::model::{Configuration, ValidationErrors};

/// 依廠牌檢查高度、依門型檢查寬度，兩者互不影響
pub fn validate_dimensions(catalog: &PriceCatalog, config: &Configuration) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let height_limits = catalog.height_limits(config.manufacturer);
    if !height_limits.contains(config.height) {
        errors.height = Some(format!(
            "Высота для {} должна быть от {} до {} мм.",
            config.manufacturer, height_limits.min, height_limits.max
        ));
    }

    let width_limits = catalog.width_limits(config.door_type);
    if !width_limits.contains(config.width) {
        errors.width = Some(format!(
            "Ширина для \"{}\" должна быть от {} до {} мм.",
            config.door_type, width_limits.min, width_limits.max
        ));
    }

    if !errors.is_empty() {
        tracing::debug!(
            width = config.width,
            height = config.height,
            "Dimension validation failed: {:?}",
            errors
        );
    }

    errors
}

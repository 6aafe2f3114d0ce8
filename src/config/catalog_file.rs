use crate::core::catalog::{BasePrice, DimensionRange};
use crate::domain::model::{DoorType, Manufacturer, Region};
use crate::utils::error::{QuoteError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 價格目錄檔案（TOML）的結構
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    pub pricing: PricingSection,
    pub base_prices: ByDoorType<ByManufacturer<BasePrice>>,
    pub battery_prices: ByManufacturer<Decimal>,
    pub lock_prices: ByDoorType<ByManufacturer<Decimal>>,
    pub installation_prices: ByRegion<ByDoorType<Decimal>>,
    pub dimension_limits: DimensionLimitsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingSection {
    pub filling_per_sq_meter: Decimal,
    pub painting: Decimal,
    pub markup: Decimal,
    pub large_width_threshold_mm: Option<u32>,
    pub filling_area_factor: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionLimitsSection {
    pub height: ByManufacturer<DimensionRange>,
    pub width: ByDoorType<DimensionRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByManufacturer<T> {
    pub geze: Option<T>,
    pub door_han: Option<T>,
}

impl<T> ByManufacturer<T> {
    pub fn get(&self, manufacturer: Manufacturer) -> Option<&T> {
        match manufacturer {
            Manufacturer::Geze => self.geze.as_ref(),
            Manufacturer::DoorHan => self.door_han.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByDoorType<T> {
    pub sliding_single_leaf: Option<T>,
    pub sliding_double_leaf: Option<T>,
    pub telescopic_one_way: Option<T>,
    pub telescopic_two_way: Option<T>,
}

impl<T> ByDoorType<T> {
    pub fn get(&self, door_type: DoorType) -> Option<&T> {
        match door_type {
            DoorType::SlidingSingleLeaf => self.sliding_single_leaf.as_ref(),
            DoorType::SlidingDoubleLeaf => self.sliding_double_leaf.as_ref(),
            DoorType::TelescopicOneWay => self.telescopic_one_way.as_ref(),
            DoorType::TelescopicTwoWay => self.telescopic_two_way.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByRegion<T> {
    pub kazan: Option<T>,
    pub chelny: Option<T>,
    pub yoshkar_ola: Option<T>,
    pub cheboksary: Option<T>,
}

impl<T> ByRegion<T> {
    pub fn get(&self, region: Region) -> Option<&T> {
        match region {
            Region::Kazan => self.kazan.as_ref(),
            Region::Chelny => self.chelny.as_ref(),
            Region::YoshkarOla => self.yoshkar_ola.as_ref(),
            Region::Cheboksary => self.cheboksary.as_ref(),
        }
    }
}

impl CatalogFile {
    /// 從 TOML 檔案載入目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuoteError::CatalogParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MARKUP_PRICE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        // 未設定的變數直接回報，不留下無法解析的佔位字串
        if let Some(missing) = re
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .find(|var_name| std::env::var(var_name).is_err())
        {
            return Err(QuoteError::MissingConfigError { field: missing });
        }

        let result = re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        Ok(result.to_string())
    }
}

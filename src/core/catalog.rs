//! 價格目錄：啟動時載入一次、之後唯讀。
//!
//! 目錄檔案中的每一個組合都會在建構時檢查，建構成功後所有查詢都不會失敗。

use crate::config::catalog_file::CatalogFile;
use crate::domain::model::{DoorType, Manufacturer, Region};
use crate::utils::error::{QuoteError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CATALOG: &str = include_str!("../../config/catalog.toml");
const DEFAULT_LARGE_WIDTH_THRESHOLD_MM: u32 = 1500;

/// 門型 x 廠牌的基價
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BasePrice {
    Flat(Decimal),
    /// 寬度超過門檻時使用 `large`
    Tiered { base: Decimal, large: Decimal },
}

impl Default for BasePrice {
    fn default() -> Self {
        BasePrice::Flat(Decimal::ZERO)
    }
}

/// 含端點的尺寸範圍（毫米）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionRange {
    pub min: u32,
    pub max: u32,
}

impl DimensionRange {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCatalog {
    base_prices: [[BasePrice; 2]; 4],
    battery_prices: [Decimal; 2],
    lock_prices: [[Decimal; 2]; 4],
    installation_prices: [[Decimal; 4]; 4],
    height_limits: [DimensionRange; 2],
    width_limits: [DimensionRange; 4],
    filling_per_sq_meter: Decimal,
    painting: Decimal,
    markup: Decimal,
    large_width_threshold_mm: u32,
    filling_area_factor: Decimal,
}

impl PriceCatalog {
    /// 隨程式內建的目錄
    pub fn builtin() -> Result<Self> {
        Self::try_from(CatalogFile::from_toml_str(DEFAULT_CATALOG)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_from(CatalogFile::from_file(path)?)
    }

    /// 有指定路徑就讀檔，否則使用內建目錄
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => {
                tracing::info!("📁 Loading price catalog from: {}", path.display());
                Self::from_file(path)?
            }
            None => {
                tracing::debug!("Using built-in price catalog");
                Self::builtin()?
            }
        };
        tracing::info!("✅ Price catalog loaded and validated");
        Ok(catalog)
    }

    pub fn base_price(&self, door_type: DoorType, manufacturer: Manufacturer) -> BasePrice {
        self.base_prices[door_type.index()][manufacturer.index()]
    }

    pub fn battery_price(&self, manufacturer: Manufacturer) -> Decimal {
        self.battery_prices[manufacturer.index()]
    }

    pub fn lock_price(&self, door_type: DoorType, manufacturer: Manufacturer) -> Decimal {
        self.lock_prices[door_type.index()][manufacturer.index()]
    }

    pub fn installation_price(&self, region: Region, door_type: DoorType) -> Decimal {
        self.installation_prices[region.index()][door_type.index()]
    }

    pub fn height_limits(&self, manufacturer: Manufacturer) -> DimensionRange {
        self.height_limits[manufacturer.index()]
    }

    pub fn width_limits(&self, door_type: DoorType) -> DimensionRange {
        self.width_limits[door_type.index()]
    }

    pub fn filling_per_sq_meter(&self) -> Decimal {
        self.filling_per_sq_meter
    }

    pub fn painting_price(&self) -> Decimal {
        self.painting
    }

    pub fn markup(&self) -> Decimal {
        self.markup
    }

    pub fn large_width_threshold_mm(&self) -> u32 {
        self.large_width_threshold_mm
    }

    pub fn filling_area_factor(&self) -> Decimal {
        self.filling_area_factor
    }
}

fn require<'a, T>(value: Option<&'a T>, path: impl FnOnce() -> String) -> Result<&'a T> {
    value.ok_or_else(|| QuoteError::CatalogError {
        path: path(),
        message: "entry is missing".to_string(),
    })
}

fn non_negative(path: &str, amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(QuoteError::CatalogError {
            path: path.to_string(),
            message: format!("amount must not be negative, got {}", amount),
        });
    }
    Ok(amount)
}

fn checked_range(path: &str, range: DimensionRange) -> Result<DimensionRange> {
    if range.min > range.max {
        return Err(QuoteError::CatalogError {
            path: path.to_string(),
            message: format!("min {} is greater than max {}", range.min, range.max),
        });
    }
    Ok(range)
}

impl TryFrom<CatalogFile> for PriceCatalog {
    type Error = QuoteError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        let mut base_prices = [[BasePrice::default(); 2]; 4];
        let mut lock_prices = [[Decimal::ZERO; 2]; 4];
        for door in DoorType::ALL {
            let base_row = require(file.base_prices.get(door), || {
                format!("base_prices.{}", door.key())
            })?;
            let lock_row = require(file.lock_prices.get(door), || {
                format!("lock_prices.{}", door.key())
            })?;

            for manufacturer in Manufacturer::ALL {
                let path = format!("base_prices.{}.{}", door.key(), manufacturer.key());
                let price = *require(base_row.get(manufacturer), || path.clone())?;
                base_prices[door.index()][manufacturer.index()] = match price {
                    BasePrice::Flat(amount) => BasePrice::Flat(non_negative(&path, amount)?),
                    BasePrice::Tiered { .. } if door != DoorType::SlidingDoubleLeaf => {
                        return Err(QuoteError::CatalogError {
                            path,
                            message: "base/large pricing is only supported for double-leaf sliding doors"
                                .to_string(),
                        });
                    }
                    BasePrice::Tiered { base, large } => BasePrice::Tiered {
                        base: non_negative(&path, base)?,
                        large: non_negative(&path, large)?,
                    },
                };

                let path = format!("lock_prices.{}.{}", door.key(), manufacturer.key());
                let lock = *require(lock_row.get(manufacturer), || path.clone())?;
                lock_prices[door.index()][manufacturer.index()] = non_negative(&path, lock)?;
            }
        }

        let mut battery_prices = [Decimal::ZERO; 2];
        let mut height_limits = [DimensionRange::default(); 2];
        for manufacturer in Manufacturer::ALL {
            let path = format!("battery_prices.{}", manufacturer.key());
            let battery = *require(file.battery_prices.get(manufacturer), || path.clone())?;
            battery_prices[manufacturer.index()] = non_negative(&path, battery)?;

            let path = format!("dimension_limits.height.{}", manufacturer.key());
            let range = *require(file.dimension_limits.height.get(manufacturer), || path.clone())?;
            height_limits[manufacturer.index()] = checked_range(&path, range)?;
        }

        let mut width_limits = [DimensionRange::default(); 4];
        for door in DoorType::ALL {
            let path = format!("dimension_limits.width.{}", door.key());
            let range = *require(file.dimension_limits.width.get(door), || path.clone())?;
            width_limits[door.index()] = checked_range(&path, range)?;
        }

        let mut installation_prices = [[Decimal::ZERO; 4]; 4];
        for region in Region::ALL {
            let row = require(file.installation_prices.get(region), || {
                format!("installation_prices.{}", region.key())
            })?;
            for door in DoorType::ALL {
                let path = format!("installation_prices.{}.{}", region.key(), door.key());
                let price = *require(row.get(door), || path.clone())?;
                installation_prices[region.index()][door.index()] = non_negative(&path, price)?;
            }
        }

        let pricing = &file.pricing;
        let large_width_threshold_mm = pricing
            .large_width_threshold_mm
            .unwrap_or(DEFAULT_LARGE_WIDTH_THRESHOLD_MM);
        if large_width_threshold_mm == 0 {
            return Err(QuoteError::CatalogError {
                path: "pricing.large_width_threshold_mm".to_string(),
                message: "threshold must be positive".to_string(),
            });
        }

        let filling_area_factor = pricing
            .filling_area_factor
            .unwrap_or_else(|| Decimal::new(95, 2));
        if filling_area_factor <= Decimal::ZERO || filling_area_factor > Decimal::ONE {
            return Err(QuoteError::CatalogError {
                path: "pricing.filling_area_factor".to_string(),
                message: format!("factor must be in (0, 1], got {}", filling_area_factor),
            });
        }

        Ok(Self {
            base_prices,
            battery_prices,
            lock_prices,
            installation_prices,
            height_limits,
            width_limits,
            filling_per_sq_meter: non_negative(
                "pricing.filling_per_sq_meter",
                pricing.filling_per_sq_meter,
            )?,
            painting: non_negative("pricing.painting", pricing.painting)?,
            markup: non_negative("pricing.markup", pricing.markup)?,
            large_width_threshold_mm,
            filling_area_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(from: &str, to: &str) -> Result<PriceCatalog> {
        assert!(DEFAULT_CATALOG.contains(from), "fixture text not found: {from}");
        PriceCatalog::try_from(CatalogFile::from_toml_str(&DEFAULT_CATALOG.replace(from, to))?)
    }

    #[test]
    fn test_builtin_catalog_is_complete() {
        let catalog = PriceCatalog::builtin().unwrap();

        assert_eq!(
            catalog.base_price(DoorType::SlidingDoubleLeaf, Manufacturer::DoorHan),
            BasePrice::Tiered {
                base: Decimal::from(148535),
                large: Decimal::from(184820),
            }
        );
        assert_eq!(
            catalog.base_price(DoorType::SlidingSingleLeaf, Manufacturer::Geze),
            BasePrice::Flat(Decimal::from(222162))
        );
        assert_eq!(catalog.battery_price(Manufacturer::Geze), Decimal::from(6762));
        assert_eq!(
            catalog.lock_price(DoorType::TelescopicTwoWay, Manufacturer::DoorHan),
            Decimal::from(9600)
        );
        assert_eq!(
            catalog.installation_price(Region::Kazan, DoorType::SlidingDoubleLeaf),
            Decimal::from(25000)
        );
        assert_eq!(
            catalog.installation_price(Region::Cheboksary, DoorType::TelescopicTwoWay),
            Decimal::from(60000)
        );
        assert_eq!(
            catalog.height_limits(Manufacturer::DoorHan),
            DimensionRange { min: 1700, max: 3000 }
        );
        assert_eq!(
            catalog.width_limits(DoorType::TelescopicTwoWay),
            DimensionRange { min: 2300, max: 3000 }
        );
        assert_eq!(catalog.large_width_threshold_mm(), 1500);
        assert_eq!(catalog.filling_area_factor(), Decimal::new(95, 2));
    }

    #[test]
    fn test_missing_entry_names_its_path() {
        let err = catalog_with("door_han = 6300\n", "").unwrap_err();
        match err {
            QuoteError::CatalogError { path, .. } => assert_eq!(path, "battery_prices.door_han"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_installation_row() {
        let err = catalog_with("[installation_prices.chelny]", "[unused_section]").unwrap_err();
        // 未知的區段會先被 TOML 結構拒絕
        assert!(matches!(err, QuoteError::CatalogParseError { .. }));

        let content = DEFAULT_CATALOG.replace(
            "[installation_prices.chelny]\nsliding_single_leaf = 25000\n",
            "[installation_prices.chelny]\n",
        );
        let err = PriceCatalog::try_from(CatalogFile::from_toml_str(&content).unwrap()).unwrap_err();
        match err {
            QuoteError::CatalogError { path, .. } => {
                assert_eq!(path, "installation_prices.chelny.sliding_single_leaf")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tiered_price_only_for_double_leaf() {
        let err = catalog_with(
            "[base_prices.telescopic_one_way]\ngeze = 300000",
            "[base_prices.telescopic_one_way]\ngeze = { base = 300000, large = 320000 }",
        )
        .unwrap_err();
        assert!(matches!(err, QuoteError::CatalogError { ref path, .. } if path == "base_prices.telescopic_one_way.geze"));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = catalog_with(
            "geze = { min = 1700, max = 2500 }",
            "geze = { min = 2600, max = 2500 }",
        )
        .unwrap_err();
        assert!(matches!(err, QuoteError::CatalogError { .. }));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let err = catalog_with("painting = 7000", "painting = -7000").unwrap_err();
        assert!(matches!(err, QuoteError::CatalogError { ref path, .. } if path == "pricing.painting"));
    }

    #[test]
    fn test_optional_pricing_knobs_default() {
        let catalog = catalog_with("large_width_threshold_mm = 1500\n", "").unwrap();
        assert_eq!(catalog.large_width_threshold_mm(), DEFAULT_LARGE_WIDTH_THRESHOLD_MM);
    }
}

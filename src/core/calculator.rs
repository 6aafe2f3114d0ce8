use crate::core::catalog::{BasePrice, PriceCatalog};
use crate::domain::model::{Configuration, DoorType, PriceBreakdown};
use rust_decimal::Decimal;

/// 計算單件價格與總價。純函式，只讀取目錄。
pub fn calculate(catalog: &PriceCatalog, config: &Configuration) -> PriceBreakdown {
    let (base, is_large) = base_price(catalog, config);

    let battery = if config.has_battery {
        catalog.battery_price(config.manufacturer)
    } else {
        Decimal::ZERO
    };

    let lock = if config.has_lock {
        catalog.lock_price(config.door_type, config.manufacturer)
    } else {
        Decimal::ZERO
    };

    let filling = filling_price(catalog, config);

    let painting = if config.has_painting {
        catalog.painting_price()
    } else {
        Decimal::ZERO
    };

    let markup = catalog.markup();

    let item_price = base + battery + lock + filling + painting + markup;

    // 安裝費按件計算
    let installation_price = if config.has_installation {
        catalog.installation_price(config.region, config.door_type)
    } else {
        Decimal::ZERO
    };

    let quantity = Decimal::from(config.quantity.get());
    let total_price = item_price * quantity + installation_price * quantity;

    PriceBreakdown {
        base,
        battery,
        lock,
        filling,
        painting,
        markup,
        item_price,
        installation_price,
        total_price,
        is_large,
    }
}

fn base_price(catalog: &PriceCatalog, config: &Configuration) -> (Decimal, bool) {
    match catalog.base_price(config.door_type, config.manufacturer) {
        BasePrice::Flat(amount) => (amount, false),
        BasePrice::Tiered { base, large } => {
            if config.door_type == DoorType::SlidingDoubleLeaf
                && config.width > catalog.large_width_threshold_mm()
            {
                (large, true)
            } else {
                (base, false)
            }
        }
    }
}

/// 填充面積 = 開口面積 x 係數（扣除框架重疊）
fn filling_price(catalog: &PriceCatalog, config: &Configuration) -> Decimal {
    if !config.has_filling || config.width == 0 || config.height == 0 {
        return Decimal::ZERO;
    }

    let filling_area_m2 = config.opening_area_m2() * catalog.filling_area_factor();
    filling_area_m2 * catalog.filling_per_sq_meter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Manufacturer, Quantity, Region};

    fn catalog() -> PriceCatalog {
        PriceCatalog::builtin().unwrap()
    }

    #[test]
    fn test_default_configuration_uses_large_price() {
        // 雙扇 GEZE 2000x2200，全部選配，喀山含安裝
        let breakdown = calculate(&catalog(), &Configuration::default());

        assert!(breakdown.is_large);
        assert_eq!(breakdown.base, Decimal::from(248183));
        assert_eq!(breakdown.battery, Decimal::from(6762));
        assert_eq!(breakdown.lock, Decimal::from(10192));
        // 2.0 * 2.2 * 0.95 * 6500
        assert_eq!(breakdown.filling, Decimal::from(27170));
        assert_eq!(breakdown.painting, Decimal::from(7000));
        assert_eq!(breakdown.markup, Decimal::from(10000));
        assert_eq!(breakdown.item_price, Decimal::from(309307));
        assert_eq!(breakdown.installation_price, Decimal::from(25000));
        assert_eq!(breakdown.total_price, Decimal::from(334307));
    }

    #[test]
    fn test_threshold_width_uses_base_price() {
        let config = Configuration {
            width: 1500,
            ..Configuration::default()
        };
        let breakdown = calculate(&catalog(), &config);
        assert!(!breakdown.is_large);
        assert_eq!(breakdown.base, Decimal::from(231366));

        let config = Configuration {
            width: 1501,
            ..Configuration::default()
        };
        assert!(calculate(&catalog(), &config).is_large);
    }

    #[test]
    fn test_flat_price_ignores_width() {
        let config = Configuration {
            door_type: DoorType::TelescopicOneWay,
            manufacturer: Manufacturer::DoorHan,
            width: 2400,
            ..Configuration::default()
        };
        let breakdown = calculate(&catalog(), &config);
        assert!(!breakdown.is_large);
        assert_eq!(breakdown.base, Decimal::from(200000));
    }

    #[test]
    fn test_options_off_leave_base_and_markup() {
        let config = Configuration {
            door_type: DoorType::SlidingSingleLeaf,
            manufacturer: Manufacturer::DoorHan,
            width: 1000,
            has_battery: false,
            has_lock: false,
            has_filling: false,
            has_painting: false,
            has_installation: false,
            ..Configuration::default()
        };
        let breakdown = calculate(&catalog(), &config);

        assert_eq!(breakdown.item_price, Decimal::from(157300 + 10000));
        assert_eq!(breakdown.installation_price, Decimal::ZERO);
        assert_eq!(breakdown.total_price, breakdown.item_price);
    }

    #[test]
    fn test_installation_charged_per_unit() {
        let config = Configuration {
            quantity: Quantity::new(3),
            region: Region::Chelny,
            ..Configuration::default()
        };
        let breakdown = calculate(&catalog(), &config);

        assert_eq!(breakdown.installation_price, Decimal::from(30000));
        assert_eq!(
            breakdown.total_price,
            breakdown.item_price * Decimal::from(3) + Decimal::from(90000)
        );
    }

    #[test]
    fn test_zero_dimension_has_no_filling() {
        let config = Configuration {
            width: 0,
            ..Configuration::default()
        };
        assert_eq!(calculate(&catalog(), &config).filling, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_filling_is_kept_exact() {
        let config = Configuration {
            door_type: DoorType::SlidingSingleLeaf,
            width: 1234,
            height: 2111,
            ..Configuration::default()
        };
        // 1.234 * 2.111 * 0.95 * 6500
        let expected = Decimal::new(1234, 3) * Decimal::new(2111, 3) * Decimal::new(95, 2)
            * Decimal::from(6500);
        assert_eq!(calculate(&catalog(), &config).filling, expected);
    }
}

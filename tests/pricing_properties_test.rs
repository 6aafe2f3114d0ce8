use door_quote::core::{calculator, validator};
use door_quote::domain::model::{Configuration, DoorType, Manufacturer, Quantity, Region};
use door_quote::PriceCatalog;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn any_door_type() -> impl Strategy<Value = DoorType> {
    prop::sample::select(DoorType::ALL.to_vec())
}

fn any_manufacturer() -> impl Strategy<Value = Manufacturer> {
    prop::sample::select(Manufacturer::ALL.to_vec())
}

fn any_region() -> impl Strategy<Value = Region> {
    prop::sample::select(Region::ALL.to_vec())
}

prop_compose! {
    fn any_configuration()(
        door_type in any_door_type(),
        manufacturer in any_manufacturer(),
        quantity in 1u32..50,
        width in 0u32..4000,
        height in 0u32..4000,
        flags in prop::array::uniform5(any::<bool>()),
        region in any_region(),
    ) -> Configuration {
        Configuration {
            door_type,
            manufacturer,
            quantity: Quantity::new(quantity),
            width,
            height,
            has_battery: flags[0],
            has_lock: flags[1],
            has_filling: flags[2],
            has_painting: flags[3],
            region,
            has_installation: flags[4],
        }
    }
}

proptest! {
    #[test]
    fn total_is_quantity_times_item_and_installation(config in any_configuration()) {
        let catalog = PriceCatalog::builtin().unwrap();
        let breakdown = calculator::calculate(&catalog, &config);
        let quantity = Decimal::from(config.quantity.get());

        prop_assert_eq!(
            breakdown.total_price,
            quantity * (breakdown.item_price + breakdown.installation_price)
        );
        prop_assert_eq!(
            breakdown.item_price,
            breakdown.base + breakdown.battery + breakdown.lock + breakdown.filling
                + breakdown.painting + breakdown.markup
        );
    }

    #[test]
    fn filling_is_zero_when_off_and_grows_with_opening(config in any_configuration(), extra in 1u32..1000) {
        let catalog = PriceCatalog::builtin().unwrap();

        let off = Configuration { has_filling: false, ..config.clone() };
        prop_assert_eq!(calculator::calculate(&catalog, &off).filling, Decimal::ZERO);

        let on = Configuration { has_filling: true, ..config.clone() };
        let wider = Configuration { width: on.width + extra, ..on.clone() };
        let taller = Configuration { height: on.height + extra, ..on.clone() };
        let filling = calculator::calculate(&catalog, &on).filling;
        prop_assert!(calculator::calculate(&catalog, &wider).filling >= filling);
        prop_assert!(calculator::calculate(&catalog, &taller).filling >= filling);
    }

    #[test]
    fn large_price_only_for_wide_double_leaf(config in any_configuration()) {
        let catalog = PriceCatalog::builtin().unwrap();
        let breakdown = calculator::calculate(&catalog, &config);

        prop_assert_eq!(
            breakdown.is_large,
            config.door_type == DoorType::SlidingDoubleLeaf
                && config.width > catalog.large_width_threshold_mm()
        );
    }

    #[test]
    fn no_errors_iff_dimensions_in_bounds(config in any_configuration()) {
        let catalog = PriceCatalog::builtin().unwrap();
        let errors = validator::validate_dimensions(&catalog, &config);

        let width_ok = catalog.width_limits(config.door_type).contains(config.width);
        let height_ok = catalog.height_limits(config.manufacturer).contains(config.height);

        prop_assert_eq!(errors.width.is_none(), width_ok);
        prop_assert_eq!(errors.height.is_none(), height_ok);
        prop_assert_eq!(errors.is_empty(), width_ok && height_ok);
    }
}

#[test]
fn default_configuration_worked_example() {
    let catalog = PriceCatalog::builtin().unwrap();
    let breakdown = calculator::calculate(&catalog, &Configuration::default());

    assert!(breakdown.is_large);
    assert_eq!(breakdown.base, Decimal::from(248183));
    assert_eq!(breakdown.filling, Decimal::from(27170));
    assert_eq!(breakdown.item_price, Decimal::from(309307));
    assert_eq!(breakdown.installation_price, Decimal::from(25000));
    assert_eq!(breakdown.total_price, Decimal::from(334307));
}

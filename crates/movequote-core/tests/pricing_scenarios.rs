//! End-to-end pricing scenarios against the public API.

use std::sync::Arc;
use std::thread;

use movequote_core::{
    Catalog, CatalogItem, CoreError, ErrorKind, ItemRequest, Money, PricingConfig, PricingEngine,
    QuoteRequest, SelectionEntry, MIN_TRAILER_COST, VEHICLE_CAPACITY,
};

fn request(items: &[(&str, f64)]) -> QuoteRequest {
    QuoteRequest {
        origin: "The Reeds, Centurion".to_string(),
        destination: "Tzaneen".to_string(),
        items: items
            .iter()
            .map(|&(name, qty)| ItemRequest::new(name, qty))
            .collect(),
    }
}

#[test]
fn test_reference_route_item_cost_matches_worked_example() {
    // R4 500 quoted for 299 km, weight 2, one unit, on the 299 km route:
    // 15.0502/km × 299 km × 2 × 1 = 9 000
    let item = CatalogItem::new("Worked Example", "Test", 2, Money::from_units(4500));
    let engine = PricingEngine::default();

    let rate = engine.per_km_rate(&item).unwrap();
    assert!((rate - 4500.0 / 299.0).abs() < 1e-12);

    let selection = [SelectionEntry::new(&item, 1).unwrap()];
    let invoice = engine
        .calculate_invoice("Centurion", "Tzaneen", 299.0, &selection)
        .unwrap();

    assert_eq!(invoice.items()[0].item_cost.units(), 9000);
    assert_eq!(invoice.subtotal().units(), 9000);
    assert_eq!(invoice.total_cost().units(), 9000);
}

#[test]
fn test_under_capacity_has_no_trailer() {
    let catalog = Catalog::builtin();
    // 4 + 3 + 1 × 10 = 17
    let invoice = request(&[("Refrigerator", 1.0), ("Desk", 1.0), ("Box (Medium)", 10.0)])
        .price(&catalog, &PricingEngine::default(), 150.0)
        .unwrap();

    assert!(!invoice.trailer_required());
    assert!(invoice.trailer_cost().is_zero());
    assert_eq!(invoice.total_cost(), invoice.subtotal());
}

#[test]
fn test_exactly_at_capacity_has_no_trailer() {
    let catalog = Catalog::builtin();
    // 4 × 10 + 1 × 10 = 50
    let invoice = request(&[("Large Sofa", 10.0), ("Lamp", 10.0)])
        .price(&catalog, &PricingEngine::default(), 150.0)
        .unwrap();

    assert!(!invoice.trailer_required());
    assert!(invoice.trailer_cost().is_zero());
}

#[test]
fn test_one_over_capacity_adds_trailer() {
    let catalog = Catalog::builtin();
    let engine = PricingEngine::default();
    // 4 × 10 + 1 × 11 = 51
    let items = [("Large Sofa", 10.0), ("Lamp", 11.0)];

    for distance in [50.0, 285.7, 299.0, 800.0] {
        let invoice = request(&items).price(&catalog, &engine, distance).unwrap();
        let expected = Money::round_from((distance * 35.0_f64).max(10_000.0)).unwrap();

        assert!(invoice.trailer_required());
        assert_eq!(invoice.trailer_cost(), expected, "distance {}", distance);
        assert_eq!(
            Some(invoice.total_cost()),
            invoice.subtotal().checked_add(invoice.trailer_cost())
        );
    }
}

#[test]
fn test_total_is_subtotal_plus_trailer_for_many_selections() {
    let catalog = Catalog::builtin();
    let engines = [
        PricingEngine::default(),
        PricingEngine::new(PricingConfig::average_item_rate()).unwrap(),
    ];

    for engine in &engines {
        for (offset, item) in catalog.items().iter().enumerate() {
            for qty in 1..=20_i64 {
                let distance = 3.7 * (offset as f64 + 1.0) + qty as f64;
                let selection = [SelectionEntry::new(item, qty).unwrap()];
                let invoice = engine
                    .calculate_invoice("A", "B", distance, &selection)
                    .unwrap();

                assert_eq!(
                    Some(invoice.total_cost()),
                    invoice.subtotal().checked_add(invoice.trailer_cost())
                );
                assert_eq!(
                    invoice.trailer_required(),
                    item.weight_score as i64 * qty > VEHICLE_CAPACITY
                );
                if invoice.trailer_required() {
                    assert!(invoice.trailer_cost() >= MIN_TRAILER_COST);
                } else {
                    assert!(invoice.trailer_cost().is_zero());
                }
            }
        }
    }
}

#[test]
fn test_line_items_keep_request_order_and_snapshot_fields() {
    let catalog = Catalog::builtin();
    let invoice = request(&[("Suitcase", 2.0), ("King Size Bed", 1.0), ("Oven", 1.0)])
        .price(&catalog, &PricingEngine::default(), 42.0)
        .unwrap();

    let lines: Vec<_> = invoice
        .items()
        .iter()
        .map(|l| (l.name.as_str(), l.quantity, l.weight_score))
        .collect();
    assert_eq!(
        lines,
        vec![("Suitcase", 2, 1), ("King Size Bed", 1, 4), ("Oven", 1, 3)]
    );

    let sum = Money::checked_sum(invoice.items().iter().map(|l| l.item_cost));
    assert_eq!(sum, Some(invoice.subtotal()));
}

#[test]
fn test_repeated_calculation_is_byte_identical() {
    let catalog = Catalog::builtin();
    let engine = PricingEngine::default();
    let req = request(&[("Large Wardrobe", 3.0), ("Bicycle", 2.0), ("Box (Large)", 40.0)]);

    let first = req.price(&catalog, &engine, 187.3).unwrap();
    let second = req.price(&catalog, &engine, 187.3).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}

#[test]
fn test_shared_catalog_prices_concurrently() {
    let catalog = Arc::new(Catalog::builtin());
    let engine = Arc::new(PricingEngine::default());
    let expected = request(&[("Desk", 2.0)])
        .price(&catalog, &engine, 120.0)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                request(&[("Desk", 2.0)])
                    .price(&catalog, &engine, 120.0)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_empty_selection_is_invalid_input() {
    let catalog = Catalog::builtin();
    let err = request(&[])
        .price(&catalog, &PricingEngine::default(), 100.0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_unknown_item_is_not_found_and_named() {
    let catalog = Catalog::builtin();
    let err = request(&[("Lamp", 1.0), ("Hot Tub", 1.0)])
        .price(&catalog, &PricingEngine::default(), 100.0)
        .unwrap_err();

    match err {
        CoreError::ItemNotFound(name) => assert_eq!(name, "Hot Tub"),
        other => panic!("expected ItemNotFound, got {:?}", other),
    }
}

#[test]
fn test_distance_is_reported_to_one_decimal() {
    let catalog = Catalog::builtin();
    let invoice = request(&[("Lamp", 1.0)])
        .price(&catalog, &PricingEngine::default(), 123.456)
        .unwrap();
    assert!((invoice.distance_km() - 123.5).abs() < 1e-9);
}

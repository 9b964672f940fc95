use justb2b_cart::{
    Cart, CartCalculator, IncentiveAdjustment, LineKind, PaymentGateway, PaymentPolicy,
    RecalcOutcome, ShippingPolicy, ShippingRate,
};
use justb2b_catalog::product::{Catalog, Product, ProductId, ProductType};
use justb2b_core::app_config::Settings;
use justb2b_core::customer::CustomerStatus;
use justb2b_core::money::{Price, RoundingMode};
use rust_decimal_macros::dec;

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.upsert(Product {
        id: ProductId(101),
        name: "Krem regenerujący 50ml".to_string(),
        product_type: ProductType::Simple,
        regular_price: Some(dec!(246.00)),
        sale_price: None,
        b2b_net_price: Some(dec!(150.00)),
        tax_rate: Some(dec!(0.23)),
        in_stock: true,
        category_ids: vec![5],
    });
    catalog.upsert(Product {
        id: ProductId(102),
        name: "Serum z witaminą C".to_string(),
        product_type: ProductType::Simple,
        regular_price: Some(dec!(184.50)),
        sale_price: Some(dec!(150.00)),
        b2b_net_price: Some(dec!(100.00)),
        tax_rate: Some(dec!(0.23)),
        in_stock: true,
        category_ids: vec![5],
    });
    catalog
}

fn host_cart() -> Cart {
    let rate = Some(dec!(0.23));
    let mut cart = Cart::new();
    cart.add_product(
        ProductId(101),
        4,
        Price::from_gross(dec!(246.00), rate, RoundingMode::HalfUp),
    );
    cart.add_product(
        ProductId(102),
        5,
        Price::from_gross(dec!(150.00), rate, RoundingMode::HalfUp),
    );
    cart
}

fn shipping_rates() -> Vec<ShippingRate> {
    vec![
        ShippingRate {
            id: "inpost_paczkomaty:3".to_string(),
            label: "InPost Paczkomaty".to_string(),
            cost: dec!(13.99),
        },
        ShippingRate {
            id: "flat_rate:7".to_string(),
            label: "Kurier DPD".to_string(),
            cost: dec!(18.00),
        },
    ]
}

fn checkout_gateways() -> Vec<PaymentGateway> {
    vec![
        PaymentGateway {
            id: "bacs".to_string(),
            title: "Przelew bankowy".to_string(),
        },
        PaymentGateway {
            id: "cod".to_string(),
            title: "Za pobraniem".to_string(),
        },
    ]
}

#[test]
fn test_accepted_customer_checkout_end_to_end() {
    let catalog = catalog();
    let settings = Settings::default();
    let status = CustomerStatus::B2bAccepted;

    let mut cart = host_cart();
    let mut calculator = CartCalculator::new(&catalog, status, &settings);

    let RecalcOutcome::Completed {
        overridden_lines,
        incentive,
        totals,
    } = calculator.recalculate(&mut cart)
    else {
        panic!("first pass must complete");
    };

    // Both lines carry a net price, both get overridden.
    assert_eq!(overridden_lines, 2);
    assert_eq!(cart.lines[0].unit_price.net, dec!(150.00));
    assert_eq!(cart.lines[0].unit_price.gross, dec!(184.50));
    assert_eq!(cart.lines[1].unit_price.net, dec!(100.00));

    // 4 * 150 + 5 * 100 = 1100 net; the 1000 tier grants 5 samples.
    assert_eq!(totals.customer_net_subtotal, dec!(1100.00));
    assert_eq!(incentive, IncentiveAdjustment::Inserted);
    let sample = cart.incentive_line().expect("tier reached");
    assert_eq!(sample.quantity, 1);
    match &sample.kind {
        LineKind::Incentive { sample_count, label, .. } => {
            assert_eq!(*sample_count, 5);
            assert_eq!(label, "Mix próbek, 5 próbek - przy zamówieniu 1000 zł");
        }
        _ => panic!("expected incentive line"),
    }

    // Gross subtotal 1353.00 clears the 1000 B2B threshold; only the
    // matching carrier goes free.
    let shipping = ShippingPolicy::new(&settings.shipping);
    let rates = shipping.adjust(&cart, status, shipping_rates());
    assert_eq!(rates[0].cost, dec!(0));
    assert_eq!(rates[1].cost, dec!(18.00));

    // Bank transfer is offered under the deferred-payment title, coupons
    // are off, and choosing COD costs extra.
    let payments = PaymentPolicy::new(&settings.payments);
    let gateways = payments.available_gateways(status, checkout_gateways());
    assert!(gateways
        .iter()
        .any(|g| g.id == "bacs" && g.title == "Przelew bankowy z terminem 14 dni"));
    assert!(!payments.coupons_enabled(status, true));
    assert_eq!(payments.surcharge("cod").unwrap().amount, dec!(5.00));
}

#[test]
fn test_retail_customer_keeps_host_conditions() {
    let catalog = catalog();
    let settings = Settings::default();
    let status = CustomerStatus::B2c;

    let mut cart = host_cart();
    let mut calculator = CartCalculator::new(&catalog, status, &settings);

    let RecalcOutcome::Completed {
        overridden_lines,
        incentive,
        totals,
    } = calculator.recalculate(&mut cart)
    else {
        panic!("first pass must complete");
    };

    // The sale price on product 102 survives untouched.
    assert_eq!(overridden_lines, 0);
    assert_eq!(cart.lines[1].unit_price.gross, dec!(150.00));
    assert_eq!(incentive, IncentiveAdjustment::Unchanged);
    assert!(cart.incentive_line().is_none());

    // 4 * 246 + 5 * 150 = 1734 gross clears the 600 retail threshold.
    assert_eq!(totals.gross_subtotal, dec!(1734.00));
    let shipping = ShippingPolicy::new(&settings.shipping);
    let rates = shipping.adjust(&cart, status, shipping_rates());
    assert_eq!(rates[0].cost, dec!(0));

    // No bank transfer at retail checkout; coupons behave as the host set
    // them.
    let payments = PaymentPolicy::new(&settings.payments);
    let gateways = payments.available_gateways(status, checkout_gateways());
    assert!(gateways.iter().all(|g| g.id != "bacs"));
    assert!(payments.coupons_enabled(status, true));
}

#[test]
fn test_pending_customer_is_still_retail() {
    let catalog = catalog();
    let settings = Settings::default();

    let mut cart = host_cart();
    let mut calculator = CartCalculator::new(&catalog, CustomerStatus::B2bPending, &settings);

    let RecalcOutcome::Completed {
        overridden_lines, ..
    } = calculator.recalculate(&mut cart)
    else {
        panic!("first pass must complete");
    };

    assert_eq!(overridden_lines, 0);
    assert!(cart.incentive_line().is_none());
}

#[test]
fn test_status_change_mid_session_drops_stale_sample() {
    let catalog = catalog();
    let settings = Settings::default();

    let mut cart = host_cart();
    let mut accepted = CartCalculator::new(&catalog, CustomerStatus::B2bAccepted, &settings);
    accepted.recalculate(&mut cart);
    assert!(cart.incentive_line().is_some());

    // Same session, but the status read now comes back non-accepted.
    let mut retail = CartCalculator::new(&catalog, CustomerStatus::B2c, &settings);
    let RecalcOutcome::Completed { incentive, .. } = retail.recalculate(&mut cart) else {
        panic!("first pass must complete");
    };

    assert_eq!(incentive, IncentiveAdjustment::Removed);
    assert!(cart.incentive_line().is_none());
}

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    Cart, CatalogService, Money, NewCategory, NewProduct, OrderId, OrderService, ProductId,
    StockService, normalize,
};

fn make_catalog(products: u32, stock: u32) -> CatalogService {
    let mut catalog = CatalogService::new();
    catalog
        .create_category(NewCategory::new("cat-bench", "Bench"))
        .unwrap();
    for n in 0..products {
        catalog
            .create_product(NewProduct::new(
                format!("p-{n:03}"),
                format!("Product {n}"),
                Money::from_cents(100 + i64::from(n)),
                stock,
                "cat-bench",
            ))
            .unwrap();
    }
    catalog
}

fn fill_cart(catalog: &CatalogService, lines: u32) -> Cart {
    let mut cart = Cart::new();
    for n in 0..lines {
        let product = catalog
            .get_product_by_id(&ProductId::new(format!("p-{n:03}")))
            .unwrap();
        cart.add(product, 1).unwrap();
    }
    cart
}

fn bench_can_fulfill(c: &mut Criterion) {
    let catalog = make_catalog(100, 10);
    let cart = fill_cart(&catalog, 50);
    let stock = StockService::new();

    c.bench_function("domain/can_fulfill_50_lines", |b| {
        b.iter(|| stock.can_fulfill(&cart, &catalog));
    });
}

fn bench_place_order(c: &mut Criterion) {
    c.bench_function("domain/place_order_10_lines", |b| {
        b.iter_batched(
            || {
                let catalog = make_catalog(100, 10);
                let cart = fill_cart(&catalog, 10);
                (catalog, cart)
            },
            |(mut catalog, mut cart)| {
                let mut orders = OrderService::new(StockService::new());
                orders
                    .place_order(&mut catalog, &mut cart, OrderId::new("o-bench"))
                    .unwrap();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_normalize_products(c: &mut Criterion) {
    let catalog = make_catalog(200, 5);
    let raw = serde_json::to_value(catalog.products()).unwrap();

    c.bench_function("domain/normalize_200_products", |b| {
        b.iter(|| normalize::products(&raw));
    });
}

criterion_group!(
    benches,
    bench_can_fulfill,
    bench_place_order,
    bench_normalize_products,
);
criterion_main!(benches);

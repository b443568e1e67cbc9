//! Property: serialized add sequences accumulate exactly, within stock

use freshcart_cart::{CartError, CartService, DiscardNotices, NoticeSink};
use freshcart_domain::{Product, UserId};
use freshcart_store::{AuthSession, CartStore, IdentityProvider};
use freshcart_test_utils::{product_fixture, InMemoryBackend};
use proptest::prelude::*;
use std::sync::Arc;

const STOCK: u32 = 9;

fn catalog() -> Vec<Product> {
    vec![
        product_fixture("Almonds", "650.00", STOCK),
        product_fixture("Cashews", "720.00", STOCK),
        product_fixture("Raisins", "210.00", STOCK),
        product_fixture("Walnuts", "840.00", STOCK),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn adds_accumulate_and_respect_the_stock_ceiling(
        ops in proptest::collection::vec((0usize..4, 1u32..4), 1..12)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let backend = Arc::new(InMemoryBackend::new());
            let service = CartService::new(
                Arc::new(AuthSession::signed_in(UserId::new())) as Arc<dyn IdentityProvider>,
                Arc::clone(&backend) as Arc<dyn CartStore>,
                Arc::new(DiscardNotices) as Arc<dyn NoticeSink>,
            );

            let products = catalog();
            for product in &products {
                backend.stock_product(product.clone());
            }

            let mut expected = [0u32; 4];
            for (index, quantity) in ops {
                let product = &products[index];
                let result = service.add_to_cart(product, quantity).await;

                if expected[index] + quantity > STOCK {
                    assert!(matches!(result, Err(CartError::InsufficientStock { .. })));
                } else {
                    result.unwrap();
                    expected[index] += quantity;
                }
            }

            let total: u32 = expected.iter().sum();
            assert_eq!(service.item_count(), total);

            for item in service.items() {
                let product = item.product.expect("joined snapshot");
                assert_eq!(item.quantity, expected[products
                    .iter()
                    .position(|p| p.id == product.id)
                    .unwrap()]);
                assert!(item.quantity <= product.stock_quantity);
            }
        });
    }
}

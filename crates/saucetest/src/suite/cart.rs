//! Cart scenarios.

use futures::future::BoxFuture;

use crate::assertion::Check;
use crate::driver::Driver;
use crate::result::SuiteResult;
use crate::runner::{Scenario, ScenarioContext};
use crate::site::Product;
use crate::suite::sign_in;

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario {
            name: "cart lists the added products",
            tags: &["cart", "smoke"],
            run: cart_lists_products,
        },
        Scenario {
            name: "removing from the cart drops the line item",
            tags: &["cart"],
            run: remove_drops_line_item,
        },
        Scenario {
            name: "continue shopping keeps the cart intact",
            tags: &["cart"],
            run: continue_shopping_keeps_cart,
        },
    ]
}

fn cart_lists_products<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        products.add_to_cart(Product::Backpack).await?;
        products.add_to_cart(Product::BikeLight).await?;

        let cart = products.open_cart().await?;
        Check::equals("line items", &2, &cart.item_count().await?)?;
        Check::holds(
            cart.contains(Product::Backpack).await?,
            "backpack missing from cart",
        )?;
        Check::holds(
            cart.contains(Product::BikeLight).await?,
            "bike light missing from cart",
        )?;
        Check::holds(
            cart.total_price().await? > 0.0,
            "cart total should be positive",
        )
    })
}

fn remove_drops_line_item<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        products.add_to_cart(Product::Backpack).await?;
        products.add_to_cart(Product::Onesie).await?;

        let cart = products.open_cart().await?;
        cart.remove(Product::Backpack).await?;
        Check::equals("line items after removal", &1, &cart.item_count().await?)?;
        let names = cart.item_names().await?;
        Check::does_not_hold(
            names.iter().any(|n| n == Product::Backpack.name()),
            "removed product still listed",
        )
    })
}

fn continue_shopping_keeps_cart<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        products.add_to_cart(Product::Backpack).await?;

        let cart = products.open_cart().await?;
        let products = cart.continue_shopping().await?;
        Check::equals("badge after returning", &1, &products.cart_badge_count().await?)
    })
}

//! Product listing scenarios.

use futures::future::BoxFuture;

use crate::assertion::Check;
use crate::driver::Driver;
use crate::result::SuiteResult;
use crate::runner::{Scenario, ScenarioContext};
use crate::site::{Product, SortOrder};
use crate::suite::sign_in;

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario {
            name: "inventory shows name and price for the first product",
            tags: &["products", "smoke"],
            run: first_product_details,
        },
        Scenario {
            name: "adding products grows the cart badge",
            tags: &["products", "cart"],
            run: badge_grows,
        },
        Scenario {
            name: "removing a product shrinks the cart badge",
            tags: &["products", "cart"],
            run: badge_shrinks,
        },
        Scenario {
            name: "sorting by name descending reverses the listing",
            tags: &["products"],
            run: sort_descending,
        },
        Scenario {
            name: "sorting by price ascending orders by amount",
            tags: &["products"],
            run: sort_by_price,
        },
    ]
}

fn first_product_details<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        let name = products.first_product_name().await?;
        let price = products.first_product_price().await?;
        Check::does_not_hold(name.is_empty(), "first product has no name")?;
        Check::holds(price.starts_with('$'), "first product price has no dollar sign")
    })
}

fn badge_grows<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        Check::equals("badge before", &0, &products.cart_badge_count().await?)?;
        products.add_to_cart(Product::Backpack).await?;
        Check::equals("badge after one", &1, &products.cart_badge_count().await?)?;
        products.add_to_cart(Product::BikeLight).await?;
        Check::equals("badge after two", &2, &products.cart_badge_count().await?)
    })
}

fn badge_shrinks<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        products.add_to_cart(Product::Backpack).await?;
        products.remove_from_cart(Product::Backpack).await?;
        Check::equals("badge after removal", &0, &products.cart_badge_count().await?)
    })
}

fn sort_descending<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        products.sort_by(SortOrder::NameDescending).await?;
        let names = products.product_names().await?;
        let mut expected = names.clone();
        expected.sort_by(|a, b| b.cmp(a));
        Check::equals("descending order", &expected, &names)
    })
}

fn sort_by_price<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        products.sort_by(SortOrder::PriceAscending).await?;
        let price = products.first_product_price().await?;
        Check::holds(price.starts_with('$'), "cheapest product price has no dollar sign")
    })
}

//! Checkout scenarios.

use futures::future::BoxFuture;

use crate::assertion::Check;
use crate::driver::Driver;
use crate::page::CheckoutStepOnePage;
use crate::result::SuiteResult;
use crate::runner::{Scenario, ScenarioContext};
use crate::site::{self, Product};
use crate::suite::sign_in;

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario {
            name: "order happy path completes",
            tags: &["checkout", "smoke"],
            run: happy_path,
        },
        Scenario {
            name: "missing first name is rejected",
            tags: &["checkout"],
            run: missing_first_name,
        },
        Scenario {
            name: "missing last name is rejected",
            tags: &["checkout"],
            run: missing_last_name,
        },
        Scenario {
            name: "missing postal code is rejected",
            tags: &["checkout"],
            run: missing_postal_code,
        },
        Scenario {
            name: "cancelling checkout keeps the cart",
            tags: &["checkout"],
            run: cancel_keeps_cart,
        },
    ]
}

/// Put one product in the cart and land on the information form
async fn start_checkout<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> SuiteResult<CheckoutStepOnePage<'a, D>> {
    let products = sign_in(ctx).await?;
    products.add_to_cart(Product::Backpack).await?;
    products.open_cart().await?.checkout().await
}

fn happy_path<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let form = start_checkout(ctx).await?;
        form.fill_information("Jamie", "Doe", "75000").await?;
        let overview = form.continue_to_overview().await?;

        let names = overview.item_names().await?;
        Check::holds(
            names.iter().any(|n| n == Product::Backpack.name()),
            "ordered product missing from overview",
        )?;
        let subtotal = overview.subtotal().await?;
        let tax = overview.tax().await?;
        let total = overview.total().await?;
        Check::holds(
            (subtotal + tax - total).abs() < 0.005,
            "overview totals do not add up",
        )?;

        let complete = overview.finish().await?;
        let message = complete.confirmation_message().await?;
        Check::equals("confirmation", &site::ORDER_COMPLETE_MESSAGE, &message.as_str())?;

        let products = complete.back_home().await?;
        Check::equals("badge after order", &0, &products.cart_badge_count().await?)
    })
}

fn missing_first_name<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let form = start_checkout(ctx).await?;
        form.fill_information("", "Doe", "75000").await?;
        let banner = form.continue_expecting_error().await?;
        Check::equals("error banner", &site::MISSING_FIRST_NAME_ERROR, &banner.as_str())?;
        let url = ctx.actions().current_url().await?;
        Check::contains("url after rejected continue", &url, site::CHECKOUT_STEP_ONE_PATH)
    })
}

fn missing_last_name<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let form = start_checkout(ctx).await?;
        form.fill_information("Jamie", "", "75000").await?;
        let banner = form.continue_expecting_error().await?;
        Check::equals("error banner", &site::MISSING_LAST_NAME_ERROR, &banner.as_str())?;
        let url = ctx.actions().current_url().await?;
        Check::contains("url after rejected continue", &url, site::CHECKOUT_STEP_ONE_PATH)
    })
}

fn missing_postal_code<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let form = start_checkout(ctx).await?;
        form.fill_information("Jamie", "Doe", "").await?;
        let banner = form.continue_expecting_error().await?;
        Check::equals("error banner", &site::MISSING_POSTAL_CODE_ERROR, &banner.as_str())?;
        let url = ctx.actions().current_url().await?;
        Check::contains("url after rejected continue", &url, site::CHECKOUT_STEP_ONE_PATH)
    })
}

fn cancel_keeps_cart<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let form = start_checkout(ctx).await?;
        let cart = form.cancel().await?;
        Check::equals("line items after cancel", &1, &cart.item_count().await?)?;
        let names = cart.item_names().await?;
        Check::holds(
            names.iter().any(|n| n == Product::Backpack.name()),
            "carted product missing after cancel",
        )
    })
}

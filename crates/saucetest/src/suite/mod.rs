//! The regression scenarios, grouped by storefront area.
//!
//! Every scenario is generic over the driver so the whole suite runs
//! against a real browser session or a scripted page model alike.

mod cart;
mod checkout;
mod login;
mod products;

use crate::driver::Driver;
use crate::page::{LoginPage, ProductsPage};
use crate::result::SuiteResult;
use crate::runner::{Scenario, ScenarioContext};

/// Every scenario, in execution order
#[must_use]
pub fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    let mut all = login::scenarios();
    all.extend(products::scenarios());
    all.extend(cart::scenarios());
    all.extend(checkout::scenarios());
    all
}

/// Open the login form for this session
async fn open_login<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> SuiteResult<LoginPage<'a, D>> {
    LoginPage::open(ctx.actions(), &ctx.settings).await
}

/// Log in with the configured valid user and land on the product listing
async fn sign_in<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> SuiteResult<ProductsPage<'a, D>> {
    open_login(ctx)
        .await?
        .login(&ctx.settings.valid_username, &ctx.settings.valid_password)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_names_are_unique() {
        let scenarios = scenarios::<MockDriver>();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn test_every_scenario_is_tagged() {
        for scenario in scenarios::<MockDriver>() {
            assert!(!scenario.tags.is_empty(), "{} has no tags", scenario.name);
        }
    }

    #[test]
    fn test_smoke_subset_exists() {
        let smoke = scenarios::<MockDriver>()
            .iter()
            .filter(|s| s.tags.contains(&"smoke"))
            .count();
        assert!(smoke >= 4);
    }
}

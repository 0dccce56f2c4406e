//! Login and session scenarios.

use futures::future::BoxFuture;

use crate::assertion::Check;
use crate::driver::Driver;
use crate::result::SuiteResult;
use crate::runner::{Scenario, ScenarioContext};
use crate::site;
use crate::suite::{open_login, sign_in};

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario {
            name: "valid login lands on products",
            tags: &["login", "smoke"],
            run: valid_login,
        },
        Scenario {
            name: "mismatched credentials are rejected",
            tags: &["login"],
            run: mismatched_credentials,
        },
        Scenario {
            name: "unknown username is rejected",
            tags: &["login"],
            run: unknown_username,
        },
        Scenario {
            name: "error banner can be dismissed",
            tags: &["login"],
            run: dismiss_error_banner,
        },
        Scenario {
            name: "locked out user is rejected",
            tags: &["login"],
            run: locked_out_user,
        },
        Scenario {
            name: "empty username is rejected",
            tags: &["login"],
            run: empty_username,
        },
        Scenario {
            name: "empty password is rejected",
            tags: &["login"],
            run: empty_password,
        },
        Scenario {
            name: "logo shows on the login form",
            tags: &["login", "smoke"],
            run: logo_visible,
        },
        Scenario {
            name: "logout returns to the login form",
            tags: &["login", "menu"],
            run: logout_round_trip,
        },
    ]
}

fn valid_login<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        Check::equals(
            "product count",
            &site::PRODUCT_COUNT,
            &products.product_count().await?,
        )
    })
}

fn mismatched_credentials<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        let banner = login
            .login_expecting_error(&ctx.settings.valid_username, "definitely_wrong")
            .await?;
        Check::equals("error banner", &site::LOGIN_MISMATCH_ERROR, &banner.as_str())
    })
}

fn unknown_username<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        let banner = login
            .login_expecting_error("no_such_user", &ctx.settings.valid_password)
            .await?;
        Check::equals("error banner", &site::LOGIN_MISMATCH_ERROR, &banner.as_str())
    })
}

fn dismiss_error_banner<'a, D: Driver>(
    ctx: &'a ScenarioContext<D>,
) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        let _ = login
            .login_expecting_error(&ctx.settings.valid_username, "")
            .await?;
        login.dismiss_error().await
    })
}

fn locked_out_user<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        let banner = login
            .login_expecting_error(&ctx.settings.locked_username, &ctx.settings.valid_password)
            .await?;
        Check::equals("error banner", &site::LOCKED_USER_ERROR, &banner.as_str())
    })
}

fn empty_username<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        let banner = login
            .login_expecting_error("", &ctx.settings.valid_password)
            .await?;
        Check::equals("error banner", &site::EMPTY_USERNAME_ERROR, &banner.as_str())
    })
}

fn empty_password<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        let banner = login
            .login_expecting_error(&ctx.settings.valid_username, "")
            .await?;
        Check::equals("error banner", &site::EMPTY_PASSWORD_ERROR, &banner.as_str())
    })
}

fn logo_visible<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let login = open_login(ctx).await?;
        Check::holds(login.is_logo_displayed().await?, "logo not displayed")
    })
}

fn logout_round_trip<'a, D: Driver>(ctx: &'a ScenarioContext<D>) -> BoxFuture<'a, SuiteResult<()>> {
    Box::pin(async move {
        let products = sign_in(ctx).await?;
        let login = products.logout().await?;
        Check::holds(
            login.is_logo_displayed().await?,
            "login form not shown after logout",
        )
    })
}

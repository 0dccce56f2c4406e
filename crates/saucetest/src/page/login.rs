//! The login page, the entry point of every session.

use crate::actions::Actions;
use crate::config::Settings;
use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::page::ProductsPage;
use crate::result::SuiteResult;
use crate::wait::{self, Condition};

fn username_input() -> Locator {
    Locator::new("username input", Selector::id("user-name"))
}

fn password_input() -> Locator {
    Locator::new("password input", Selector::id("password"))
}

fn login_button() -> Locator {
    Locator::new("login button", Selector::id("login-button"))
}

fn error_banner() -> Locator {
    Locator::new("login error banner", Selector::data_test("error"))
}

fn error_close_button() -> Locator {
    Locator::new("error close button", Selector::class_name("error-button"))
}

fn logo() -> Locator {
    Locator::new("login logo", Selector::class_name("login_logo"))
}

/// The login form at the site root
#[derive(Debug)]
pub struct LoginPage<'d, D: Driver> {
    actions: Actions<'d, D>,
}

impl<'d, D: Driver> LoginPage<'d, D> {
    /// Navigate to the site root and wait for the login form.
    ///
    /// # Errors
    ///
    /// Navigation failure, or a timeout waiting for the logo.
    pub async fn open(actions: Actions<'d, D>, settings: &Settings) -> SuiteResult<Self> {
        actions.goto(&settings.base_url).await?;
        wait::for_element(
            actions.driver(),
            &logo(),
            Condition::Visible,
            actions.wait_options(),
        )
        .await?;
        Ok(Self { actions })
    }

    /// Submit credentials and land on the products page.
    ///
    /// # Errors
    ///
    /// Any interaction failure, or [`crate::result::SuiteError::WrongPage`]
    /// when the site rejects the credentials and stays on the form.
    pub async fn login(self, username: &str, password: &str) -> SuiteResult<ProductsPage<'d, D>> {
        self.submit(username, password).await?;
        ProductsPage::arrive(self.actions).await
    }

    /// Submit credentials the site is expected to reject, returning the
    /// error banner text.
    ///
    /// # Errors
    ///
    /// Any interaction failure, or a timeout if no banner appears.
    pub async fn login_expecting_error(
        &self,
        username: &str,
        password: &str,
    ) -> SuiteResult<String> {
        self.submit(username, password).await?;
        self.actions.text(&error_banner()).await
    }

    /// Close the error banner via its X button.
    ///
    /// # Errors
    ///
    /// A timeout if no banner is showing.
    pub async fn dismiss_error(&self) -> SuiteResult<()> {
        self.actions.click(&error_close_button()).await
    }

    async fn submit(&self, username: &str, password: &str) -> SuiteResult<()> {
        tracing::info!(username, "logging in");
        self.actions.type_text(&username_input(), username).await?;
        self.actions.type_text(&password_input(), password).await?;
        self.actions.click(&login_button()).await
    }

    /// Whether the site logo is currently visible
    ///
    /// # Errors
    ///
    /// Driver failure reading element state.
    pub async fn is_logo_displayed(&self) -> SuiteResult<bool> {
        self.actions.is_displayed(&logo()).await
    }
}

/// Re-enter the login page after logout, without navigating.
impl<'d, D: Driver> LoginPage<'d, D> {
    pub(crate) async fn arrive(actions: Actions<'d, D>) -> SuiteResult<Self> {
        wait::for_element(
            actions.driver(),
            &logo(),
            Condition::Visible,
            actions.wait_options(),
        )
        .await?;
        Ok(Self { actions })
    }
}

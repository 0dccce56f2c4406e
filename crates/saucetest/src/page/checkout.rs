//! The three checkout pages: information form, order overview, confirmation.

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::page::{self, CartPage, ProductsPage};
use crate::result::{SuiteError, SuiteResult};
use crate::site;

fn first_name_input() -> Locator {
    Locator::new("first name input", Selector::id("first-name"))
}

fn last_name_input() -> Locator {
    Locator::new("last name input", Selector::id("last-name"))
}

fn postal_code_input() -> Locator {
    Locator::new("postal code input", Selector::id("postal-code"))
}

fn continue_button() -> Locator {
    Locator::new("continue button", Selector::id("continue"))
}

fn cancel_button() -> Locator {
    Locator::new("cancel button", Selector::id("cancel"))
}

fn finish_button() -> Locator {
    Locator::new("finish button", Selector::id("finish"))
}

fn back_home_button() -> Locator {
    Locator::new("back home button", Selector::id("back-to-products"))
}

fn error_banner() -> Locator {
    Locator::new("checkout error banner", Selector::data_test("error"))
}

fn item_name() -> Locator {
    Locator::new("overview item name", Selector::class_name("inventory_item_name"))
}

fn subtotal_label() -> Locator {
    Locator::new("subtotal label", Selector::class_name("summary_subtotal_label"))
}

fn tax_label() -> Locator {
    Locator::new("tax label", Selector::class_name("summary_tax_label"))
}

fn total_label() -> Locator {
    Locator::new("total label", Selector::class_name("summary_total_label"))
}

fn complete_header() -> Locator {
    Locator::new("completion header", Selector::class_name("complete-header"))
}

/// The buyer information form at `checkout-step-one.html`
#[derive(Debug)]
pub struct CheckoutStepOnePage<'d, D: Driver> {
    actions: Actions<'d, D>,
}

impl<'d, D: Driver> CheckoutStepOnePage<'d, D> {
    pub(crate) async fn arrive(actions: Actions<'d, D>) -> SuiteResult<Self> {
        page::verify_arrival(
            actions,
            "checkout information",
            site::CHECKOUT_STEP_ONE_PATH,
            site::CHECKOUT_INFO_TITLE,
        )
        .await?;
        Ok(Self { actions })
    }

    /// Fill the buyer fields; empty strings leave a field untouched
    ///
    /// # Errors
    ///
    /// Timeout waiting for a field.
    pub async fn fill_information(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> SuiteResult<()> {
        if !first_name.is_empty() {
            self.actions.type_text(&first_name_input(), first_name).await?;
        }
        if !last_name.is_empty() {
            self.actions.type_text(&last_name_input(), last_name).await?;
        }
        if !postal_code.is_empty() {
            self.actions.type_text(&postal_code_input(), postal_code).await?;
        }
        Ok(())
    }

    /// Submit the form and land on the order overview.
    ///
    /// # Errors
    ///
    /// Interaction failure, or the form rejecting the submission and the
    /// overview never appearing.
    pub async fn continue_to_overview(self) -> SuiteResult<CheckoutOverviewPage<'d, D>> {
        self.actions.click(&continue_button()).await?;
        CheckoutOverviewPage::arrive(self.actions).await
    }

    /// Submit a form the site is expected to reject, returning the error
    /// banner text. Fails if the submission advanced past the form.
    ///
    /// # Errors
    ///
    /// Interaction failure, a timeout if no banner appears, or
    /// [`crate::result::SuiteError::WrongPage`] if the browser left the
    /// information form.
    pub async fn continue_expecting_error(&self) -> SuiteResult<String> {
        self.actions.click(&continue_button()).await?;
        let banner = self.actions.text(&error_banner()).await?;
        let url = self.actions.current_url().await?;
        if url.contains(site::CHECKOUT_STEP_ONE_PATH) {
            Ok(banner)
        } else {
            Err(SuiteError::WrongPage {
                page: "checkout information".to_string(),
                expected: site::CHECKOUT_STEP_ONE_PATH.to_string(),
                actual: url,
            })
        }
    }

    /// Abandon checkout and return to the cart
    ///
    /// # Errors
    ///
    /// Interaction failure, or the cart page never appearing.
    pub async fn cancel(self) -> SuiteResult<CartPage<'d, D>> {
        self.actions.click(&cancel_button()).await?;
        CartPage::arrive(self.actions).await
    }
}

/// The order overview at `checkout-step-two.html`
#[derive(Debug)]
pub struct CheckoutOverviewPage<'d, D: Driver> {
    actions: Actions<'d, D>,
}

impl<'d, D: Driver> CheckoutOverviewPage<'d, D> {
    pub(crate) async fn arrive(actions: Actions<'d, D>) -> SuiteResult<Self> {
        page::verify_arrival(
            actions,
            "checkout overview",
            site::CHECKOUT_STEP_TWO_PATH,
            site::CHECKOUT_OVERVIEW_TITLE,
        )
        .await?;
        Ok(Self { actions })
    }

    /// Names of the products in the order, in display order
    ///
    /// # Errors
    ///
    /// Driver failure reading elements.
    pub async fn item_names(&self) -> SuiteResult<Vec<String>> {
        self.actions.texts(&item_name()).await
    }

    /// Item subtotal before tax
    ///
    /// # Errors
    ///
    /// Timeout waiting for the label, or an unparsable amount.
    pub async fn subtotal(&self) -> SuiteResult<f64> {
        page::parse_money(&self.actions.text(&subtotal_label()).await?)
    }

    /// Tax amount
    ///
    /// # Errors
    ///
    /// Timeout waiting for the label, or an unparsable amount.
    pub async fn tax(&self) -> SuiteResult<f64> {
        page::parse_money(&self.actions.text(&tax_label()).await?)
    }

    /// Order total including tax
    ///
    /// # Errors
    ///
    /// Timeout waiting for the label, or an unparsable amount.
    pub async fn total(&self) -> SuiteResult<f64> {
        page::parse_money(&self.actions.text(&total_label()).await?)
    }

    /// Place the order
    ///
    /// # Errors
    ///
    /// Interaction failure, or the confirmation page never appearing.
    pub async fn finish(self) -> SuiteResult<CheckoutCompletePage<'d, D>> {
        tracing::info!("placing order");
        self.actions.click(&finish_button()).await?;
        CheckoutCompletePage::arrive(self.actions).await
    }

    /// Abandon the order and return to the product listing
    ///
    /// # Errors
    ///
    /// Interaction failure, or the products page never appearing.
    pub async fn cancel(self) -> SuiteResult<ProductsPage<'d, D>> {
        self.actions.click(&cancel_button()).await?;
        ProductsPage::arrive(self.actions).await
    }
}

/// The order confirmation at `checkout-complete.html`
#[derive(Debug)]
pub struct CheckoutCompletePage<'d, D: Driver> {
    actions: Actions<'d, D>,
}

impl<'d, D: Driver> CheckoutCompletePage<'d, D> {
    pub(crate) async fn arrive(actions: Actions<'d, D>) -> SuiteResult<Self> {
        page::verify_arrival(
            actions,
            "checkout complete",
            site::CHECKOUT_COMPLETE_PATH,
            site::CHECKOUT_COMPLETE_TITLE,
        )
        .await?;
        Ok(Self { actions })
    }

    /// The confirmation header text
    ///
    /// # Errors
    ///
    /// Timeout waiting for the header.
    pub async fn confirmation_message(&self) -> SuiteResult<String> {
        self.actions.text(&complete_header()).await
    }

    /// Return to the product listing
    ///
    /// # Errors
    ///
    /// Interaction failure, or the products page never appearing.
    pub async fn back_home(self) -> SuiteResult<ProductsPage<'d, D>> {
        self.actions.click(&back_home_button()).await?;
        ProductsPage::arrive(self.actions).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDom, MockDriver, MockElement};
    use crate::page::test_support::fast_actions;
    use crate::site::Product;

    fn information_form(dom: &mut MockDom) {
        dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::CHECKOUT_STEP_ONE_PATH);
        dom.put(
            &Selector::class_name("title"),
            MockElement::interactable(site::CHECKOUT_INFO_TITLE),
        );
        dom.put(&Selector::id("first-name"), MockElement::interactable(""));
        dom.put(&Selector::id("last-name"), MockElement::interactable(""));
        dom.put(&Selector::id("postal-code"), MockElement::interactable(""));
        dom.put(&Selector::id("continue"), MockElement::interactable("Continue"));
        dom.put(&Selector::id("cancel"), MockElement::interactable("Cancel"));
    }

    fn overview(dom: &mut MockDom) {
        dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::CHECKOUT_STEP_TWO_PATH);
        dom.put(
            &Selector::class_name("title"),
            MockElement::interactable(site::CHECKOUT_OVERVIEW_TITLE),
        );
        dom.put(
            &Selector::class_name("inventory_item_name"),
            MockElement::interactable(Product::Backpack.name()),
        );
        dom.put(
            &Selector::class_name("summary_subtotal_label"),
            MockElement::interactable("Item total: $29.99"),
        );
        dom.put(
            &Selector::class_name("summary_tax_label"),
            MockElement::interactable("Tax: $2.40"),
        );
        dom.put(
            &Selector::class_name("summary_total_label"),
            MockElement::interactable("Total: $32.39"),
        );
        dom.put(&Selector::id("finish"), MockElement::interactable("Finish"));
        dom.put(&Selector::id("cancel"), MockElement::interactable("Cancel"));
    }

    #[test]
    fn test_parse_money() {
        assert!((page::parse_money("Item total: $29.99").unwrap() - 29.99).abs() < f64::EPSILON);
        assert!((page::parse_money("Tax: $2.40").unwrap() - 2.40).abs() < f64::EPSILON);
        assert!(page::parse_money("Tax: none").is_err());
    }

    #[tokio::test]
    async fn test_fill_information_skips_empty_fields() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(information_form);
        let form = CheckoutStepOnePage::arrive(fast_actions(&driver)).await.unwrap();

        form.fill_information("Jamie", "", "75000").await.unwrap();
        let typed = driver.typed();
        assert_eq!(typed.len(), 2);
        assert!(typed.iter().all(|(sel, _)| !sel.contains("last-name")));
    }

    #[tokio::test]
    async fn test_rejected_continue_returns_banner_text() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(information_form);
        driver.on_click(continue_button().selector(), |dom| {
            dom.put(
                &Selector::data_test("error"),
                MockElement::interactable(site::MISSING_FIRST_NAME_ERROR),
            );
        });
        let form = CheckoutStepOnePage::arrive(fast_actions(&driver)).await.unwrap();

        let message = form.continue_expecting_error().await.unwrap();
        assert_eq!(message, site::MISSING_FIRST_NAME_ERROR);
        let url = driver.current_url().await.unwrap();
        assert!(url.contains(site::CHECKOUT_STEP_ONE_PATH));
    }

    #[tokio::test]
    async fn test_rejected_continue_that_advances_is_wrong_page() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(information_form);
        driver.on_click(continue_button().selector(), |dom| {
            dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::CHECKOUT_STEP_TWO_PATH);
            dom.put(
                &Selector::data_test("error"),
                MockElement::interactable(site::MISSING_FIRST_NAME_ERROR),
            );
        });
        let form = CheckoutStepOnePage::arrive(fast_actions(&driver)).await.unwrap();

        let err = form.continue_expecting_error().await.unwrap_err();
        assert!(matches!(err, SuiteError::WrongPage { .. }));
    }

    #[tokio::test]
    async fn test_overview_totals_parse() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(overview);
        let page = CheckoutOverviewPage::arrive(fast_actions(&driver)).await.unwrap();

        let subtotal = page.subtotal().await.unwrap();
        let tax = page.tax().await.unwrap();
        let total = page.total().await.unwrap();
        assert!((subtotal + tax - total).abs() < 0.001);
        assert_eq!(
            page.item_names().await.unwrap(),
            vec![Product::Backpack.name().to_string()]
        );
    }

    #[tokio::test]
    async fn test_finish_lands_on_confirmation() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(overview);
        driver.on_click(finish_button().selector(), |dom| {
            dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::CHECKOUT_COMPLETE_PATH);
            dom.put(
                &Selector::class_name("title"),
                MockElement::interactable(site::CHECKOUT_COMPLETE_TITLE),
            );
            dom.put(
                &Selector::class_name("complete-header"),
                MockElement::interactable(site::ORDER_COMPLETE_MESSAGE),
            );
        });
        let page = CheckoutOverviewPage::arrive(fast_actions(&driver)).await.unwrap();

        let complete = page.finish().await.unwrap();
        assert_eq!(
            complete.confirmation_message().await.unwrap(),
            site::ORDER_COMPLETE_MESSAGE
        );
    }
}

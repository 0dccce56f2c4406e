//! Typed page objects for the storefront.
//!
//! Each page is a struct over the action layer whose constructor verifies
//! the browser actually landed there (URL fragment plus header text), so a
//! navigation method can only hand back a page that exists. Holding a page
//! value is the proof the transition happened.

mod cart;
mod checkout;
mod login;
mod products;

pub use cart::CartPage;
pub use checkout::{CheckoutCompletePage, CheckoutOverviewPage, CheckoutStepOnePage};
pub use login::LoginPage;
pub use products::ProductsPage;

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::result::{SuiteError, SuiteResult};
use crate::wait;

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use crate::actions::Actions;
    use crate::config::Settings;
    use crate::driver::{MockDom, MockDriver, MockElement};
    use crate::locator::Selector;
    use crate::site;
    use crate::wait::WaitOptions;

    pub fn fast_actions(driver: &MockDriver) -> Actions<'_, MockDriver> {
        Actions::new(
            driver,
            WaitOptions::new()
                .with_timeout(Duration::from_millis(100))
                .with_poll_interval(Duration::from_millis(5)),
        )
    }

    pub fn settings() -> Settings {
        Settings::default()
    }

    /// Seed the login form elements into a mock page
    pub fn login_form(dom: &mut MockDom) {
        dom.put(&Selector::id("user-name"), MockElement::interactable(""));
        dom.put(&Selector::id("password"), MockElement::interactable(""));
        dom.put(&Selector::id("login-button"), MockElement::interactable("Login"));
        dom.put(
            &Selector::class_name("login_logo"),
            MockElement::interactable("Swag Labs"),
        );
    }

    /// Seed the products page: header, sort dropdown, cart link, inventory
    /// items with add buttons for every product.
    pub fn products_page(dom: &mut MockDom) {
        dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::INVENTORY_PATH);
        dom.put(
            &Selector::class_name("title"),
            MockElement::interactable(site::PRODUCTS_TITLE),
        );
        dom.put(
            &Selector::class_name("shopping_cart_link"),
            MockElement::interactable(""),
        );
        dom.put(
            &Selector::class_name("product_sort_container"),
            MockElement::interactable(""),
        );
        let items = site::Product::ALL
            .iter()
            .map(|p| MockElement::interactable(p.name()))
            .collect::<Vec<_>>();
        dom.put_all(&Selector::class_name("inventory_item"), items.clone());
        dom.put_all(&Selector::class_name("inventory_item_name"), items);
        dom.put_all(
            &Selector::class_name("inventory_item_price"),
            vec![MockElement::interactable("$29.99"); site::PRODUCT_COUNT],
        );
        for product in site::Product::ALL {
            dom.put(
                &Selector::id(product.add_button_id()),
                MockElement::interactable("Add to cart"),
            );
        }
        dom.put(
            &Selector::id("react-burger-menu-btn"),
            MockElement::interactable(""),
        );
    }
}

fn header_locator() -> Locator {
    Locator::new("page header", Selector::class_name("title"))
}

/// Extract the trailing dollar amount from a label like `"Item total: $29.99"`.
fn parse_money(label: &str) -> SuiteResult<f64> {
    label
        .rsplit('$')
        .next()
        .and_then(|amount| amount.trim().parse().ok())
        .ok_or_else(|| SuiteError::assertion(format!("no dollar amount in '{label}'")))
}

/// Wait for the URL fragment, then confirm the page header reads as expected.
async fn verify_arrival<D: Driver>(
    actions: Actions<'_, D>,
    page_name: &'static str,
    url_fragment: &str,
    expected_header: &str,
) -> SuiteResult<()> {
    wait::for_url_containing(
        actions.driver(),
        page_name,
        url_fragment,
        actions.navigation_wait(),
    )
    .await?;
    let header = actions.text(&header_locator()).await?;
    if header == expected_header {
        tracing::debug!(page = page_name, "arrived");
        Ok(())
    } else {
        Err(SuiteError::WrongPage {
            page: page_name.to_string(),
            expected: expected_header.to_string(),
            actual: header,
        })
    }
}

//! The inventory page shown after login.

use crate::actions::{Actions, ClickPolicy};
use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::page::{self, CartPage, LoginPage};
use crate::result::SuiteResult;
use crate::site::{self, Product, SortOrder};

fn inventory_item() -> Locator {
    Locator::new("inventory item", Selector::class_name("inventory_item"))
}

fn item_name() -> Locator {
    Locator::new("item name", Selector::class_name("inventory_item_name"))
}

fn item_price() -> Locator {
    Locator::new("item price", Selector::class_name("inventory_item_price"))
}

fn sort_dropdown() -> Locator {
    Locator::new("sort dropdown", Selector::class_name("product_sort_container"))
}

fn cart_link() -> Locator {
    Locator::new("cart link", Selector::class_name("shopping_cart_link"))
}

fn cart_badge() -> Locator {
    Locator::new("cart badge", Selector::class_name("shopping_cart_badge"))
}

fn menu_button() -> Locator {
    Locator::new("menu button", Selector::id("react-burger-menu-btn"))
}

fn logout_link() -> Locator {
    Locator::new("logout link", Selector::id("logout_sidebar_link"))
}

fn add_button(product: Product) -> Locator {
    Locator::new("add to cart button", Selector::id(product.add_button_id()))
}

fn remove_button(product: Product) -> Locator {
    Locator::new("remove button", Selector::id(product.remove_button_id()))
}

/// The product listing at `inventory.html`
#[derive(Debug)]
pub struct ProductsPage<'d, D: Driver> {
    actions: Actions<'d, D>,
}

impl<'d, D: Driver> ProductsPage<'d, D> {
    /// Confirm the browser landed on the inventory page.
    pub(crate) async fn arrive(actions: Actions<'d, D>) -> SuiteResult<Self> {
        page::verify_arrival(
            actions,
            "products",
            site::INVENTORY_PATH,
            site::PRODUCTS_TITLE,
        )
        .await?;
        Ok(Self { actions })
    }

    /// Number of products listed
    ///
    /// # Errors
    ///
    /// Driver failure counting elements.
    pub async fn product_count(&self) -> SuiteResult<usize> {
        self.actions.count(&inventory_item()).await
    }

    /// Product names in display order
    ///
    /// # Errors
    ///
    /// Driver failure reading elements.
    pub async fn product_names(&self) -> SuiteResult<Vec<String>> {
        self.actions.texts(&item_name()).await
    }

    /// Name of the first listed product
    ///
    /// # Errors
    ///
    /// Timeout waiting for the listing.
    pub async fn first_product_name(&self) -> SuiteResult<String> {
        self.actions.text(&item_name()).await
    }

    /// Price label of the first listed product, e.g. `$29.99`
    ///
    /// # Errors
    ///
    /// Timeout waiting for the listing.
    pub async fn first_product_price(&self) -> SuiteResult<String> {
        self.actions.text(&item_price()).await
    }

    /// Add a product to the cart
    ///
    /// # Errors
    ///
    /// Timeout if the add button is missing, which also happens when the
    /// product is already in the cart.
    pub async fn add_to_cart(&self, product: Product) -> SuiteResult<()> {
        tracing::info!(product = %product, "adding to cart");
        self.actions.click(&add_button(product)).await
    }

    /// Remove a product from the cart
    ///
    /// # Errors
    ///
    /// Timeout if the remove button is missing.
    pub async fn remove_from_cart(&self, product: Product) -> SuiteResult<()> {
        tracing::info!(product = %product, "removing from cart");
        self.actions.click(&remove_button(product)).await
    }

    /// Number shown on the cart badge; no badge means an empty cart
    ///
    /// # Errors
    ///
    /// Driver failure, or a badge whose text is not a number.
    pub async fn cart_badge_count(&self) -> SuiteResult<usize> {
        if !self.actions.is_displayed(&cart_badge()).await? {
            return Ok(0);
        }
        let text = self.actions.text(&cart_badge()).await?;
        text.trim().parse().map_err(|_| {
            crate::result::SuiteError::assertion(format!("cart badge is not a count: '{text}'"))
        })
    }

    /// Reorder the listing via the sort dropdown
    ///
    /// # Errors
    ///
    /// Timeout waiting for the dropdown, or driver failure selecting.
    pub async fn sort_by(&self, order: SortOrder) -> SuiteResult<()> {
        self.actions.select(&sort_dropdown(), order.label()).await
    }

    /// Open the cart page
    ///
    /// # Errors
    ///
    /// Interaction failure, or the cart page never appearing.
    pub async fn open_cart(self) -> SuiteResult<CartPage<'d, D>> {
        self.actions.click(&cart_link()).await?;
        CartPage::arrive(self.actions).await
    }

    /// Open the hamburger menu. The open animation can swallow a native
    /// click, so this interaction carries the script fallback.
    ///
    /// # Errors
    ///
    /// Both click strategies failing.
    pub async fn open_menu(&self) -> SuiteResult<()> {
        self.actions
            .click_with(&menu_button(), ClickPolicy::NativeThenScript)
            .await
    }

    /// Log out via the menu, landing back on the login form
    ///
    /// # Errors
    ///
    /// Menu or logout click failing, or the login form never appearing.
    pub async fn logout(self) -> SuiteResult<LoginPage<'d, D>> {
        tracing::info!("logging out");
        self.open_menu().await?;
        self.actions
            .click_with(&logout_link(), ClickPolicy::NativeThenScript)
            .await?;
        LoginPage::arrive(self.actions).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use crate::page::test_support::{fast_actions, login_form, products_page};

    async fn on_products(driver: &MockDriver) -> ProductsPage<'_, MockDriver> {
        driver.with_dom(products_page);
        ProductsPage::arrive(fast_actions(driver)).await.unwrap()
    }

    #[tokio::test]
    async fn test_lists_all_six_products() {
        let driver = MockDriver::new("about:blank");
        let page = on_products(&driver).await;

        assert_eq!(page.product_count().await.unwrap(), site::PRODUCT_COUNT);
        assert_eq!(
            page.first_product_name().await.unwrap(),
            "Sauce Labs Backpack"
        );
        assert!(page.first_product_price().await.unwrap().starts_with('$'));
    }

    #[tokio::test]
    async fn test_badge_absent_reads_as_empty_cart() {
        let driver = MockDriver::new("about:blank");
        let page = on_products(&driver).await;

        assert_eq!(page.cart_badge_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_to_cart_updates_badge() {
        let driver = MockDriver::new("about:blank");
        let backpack = Product::Backpack;
        driver.on_click(add_button(backpack).selector(), |dom| {
            dom.put(
                &Selector::class_name("shopping_cart_badge"),
                MockElement::interactable("1"),
            );
        });
        let page = on_products(&driver).await;

        page.add_to_cart(backpack).await.unwrap();
        assert_eq!(page.cart_badge_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sort_selects_by_label() {
        let driver = MockDriver::new("about:blank");
        let page = on_products(&driver).await;

        page.sort_by(SortOrder::NameDescending).await.unwrap();
        let selected = driver.selected();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].1, "Name (Z to A)");
    }

    #[tokio::test]
    async fn test_logout_falls_back_to_script_click() {
        let driver = MockDriver::new("about:blank");
        driver.break_native_click(menu_button().selector());
        driver.on_click(menu_button().selector(), |dom| {
            dom.put(
                &Selector::id("logout_sidebar_link"),
                MockElement::interactable("Logout"),
            );
        });
        driver.on_click(logout_link().selector(), |dom| {
            dom.url = site::DEFAULT_BASE_URL.to_string();
            login_form(dom);
        });
        let page = on_products(&driver).await;

        let login = page.logout().await.unwrap();
        assert!(login.is_logo_displayed().await.unwrap());
    }
}

//! The cart page.

use crate::actions::Actions;
use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::page::{self, CheckoutStepOnePage, ProductsPage};
use crate::result::SuiteResult;
use crate::site::{self, Product};

fn cart_item() -> Locator {
    Locator::new("cart item", Selector::class_name("cart_item"))
}

fn item_name() -> Locator {
    Locator::new("cart item name", Selector::class_name("inventory_item_name"))
}

fn item_price() -> Locator {
    Locator::new("cart item price", Selector::class_name("inventory_item_price"))
}

fn continue_shopping_button() -> Locator {
    Locator::new("continue shopping button", Selector::id("continue-shopping"))
}

fn checkout_button() -> Locator {
    Locator::new("checkout button", Selector::id("checkout"))
}

fn remove_button(product: Product) -> Locator {
    Locator::new("remove button", Selector::id(product.remove_button_id()))
}

/// The cart at `cart.html`
#[derive(Debug)]
pub struct CartPage<'d, D: Driver> {
    actions: Actions<'d, D>,
}

impl<'d, D: Driver> CartPage<'d, D> {
    pub(crate) async fn arrive(actions: Actions<'d, D>) -> SuiteResult<Self> {
        page::verify_arrival(actions, "cart", site::CART_PATH, site::CART_TITLE).await?;
        Ok(Self { actions })
    }

    /// Number of line items in the cart
    ///
    /// # Errors
    ///
    /// Driver failure counting elements.
    pub async fn item_count(&self) -> SuiteResult<usize> {
        self.actions.count(&cart_item()).await
    }

    /// Names of the carted products, in display order
    ///
    /// # Errors
    ///
    /// Driver failure reading elements.
    pub async fn item_names(&self) -> SuiteResult<Vec<String>> {
        self.actions.texts(&item_name()).await
    }

    /// Whether the cart holds a line item for this product
    ///
    /// # Errors
    ///
    /// Driver failure reading elements.
    pub async fn contains(&self, product: Product) -> SuiteResult<bool> {
        Ok(self
            .item_names()
            .await?
            .iter()
            .any(|name| name == product.name()))
    }

    /// Sum of the listed item prices
    ///
    /// # Errors
    ///
    /// Driver failure reading elements, or an unparsable price label.
    pub async fn total_price(&self) -> SuiteResult<f64> {
        let mut total = 0.0;
        for label in self.actions.texts(&item_price()).await? {
            total += page::parse_money(&label)?;
        }
        Ok(total)
    }

    /// Remove a product from the cart
    ///
    /// # Errors
    ///
    /// Timeout if the product has no remove button here.
    pub async fn remove(&self, product: Product) -> SuiteResult<()> {
        tracing::info!(product = %product, "removing from cart");
        self.actions.click(&remove_button(product)).await
    }

    /// Go back to the product listing, cart contents intact
    ///
    /// # Errors
    ///
    /// Interaction failure, or the products page never appearing.
    pub async fn continue_shopping(self) -> SuiteResult<ProductsPage<'d, D>> {
        self.actions.click(&continue_shopping_button()).await?;
        ProductsPage::arrive(self.actions).await
    }

    /// Begin checkout
    ///
    /// # Errors
    ///
    /// Interaction failure, or the information form never appearing.
    pub async fn checkout(self) -> SuiteResult<CheckoutStepOnePage<'d, D>> {
        self.actions.click(&checkout_button()).await?;
        CheckoutStepOnePage::arrive(self.actions).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDom, MockDriver, MockElement};
    use crate::page::test_support::fast_actions;

    fn cart_with_backpack(dom: &mut MockDom) {
        dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::CART_PATH);
        dom.put(
            &Selector::class_name("title"),
            MockElement::interactable(site::CART_TITLE),
        );
        dom.put(&Selector::class_name("cart_item"), MockElement::interactable(""));
        dom.put(
            &Selector::class_name("inventory_item_name"),
            MockElement::interactable(Product::Backpack.name()),
        );
        dom.put(
            &Selector::id(Product::Backpack.remove_button_id()),
            MockElement::interactable("Remove"),
        );
        dom.put(
            &Selector::class_name("inventory_item_price"),
            MockElement::interactable("$29.99"),
        );
        dom.put(
            &Selector::id("continue-shopping"),
            MockElement::interactable("Continue Shopping"),
        );
        dom.put(&Selector::id("checkout"), MockElement::interactable("Checkout"));
    }

    #[tokio::test]
    async fn test_lists_carted_items() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(cart_with_backpack);
        let cart = CartPage::arrive(fast_actions(&driver)).await.unwrap();

        assert_eq!(cart.item_count().await.unwrap(), 1);
        assert_eq!(
            cart.item_names().await.unwrap(),
            vec![Product::Backpack.name().to_string()]
        );
        assert!(cart.contains(Product::Backpack).await.unwrap());
        assert!(!cart.contains(Product::BikeLight).await.unwrap());
        assert!((cart.total_price().await.unwrap() - 29.99).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_remove_empties_the_cart() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(cart_with_backpack);
        driver.on_click(remove_button(Product::Backpack).selector(), |dom| {
            dom.remove(&Selector::class_name("cart_item"));
            dom.remove(&Selector::class_name("inventory_item_name"));
        });
        let cart = CartPage::arrive(fast_actions(&driver)).await.unwrap();

        cart.remove(Product::Backpack).await.unwrap();
        assert_eq!(cart.item_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_checkout_lands_on_information_form() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(cart_with_backpack);
        driver.on_click(checkout_button().selector(), |dom| {
            dom.url = format!("{}{}", site::DEFAULT_BASE_URL, site::CHECKOUT_STEP_ONE_PATH);
            dom.put(
                &Selector::class_name("title"),
                MockElement::interactable(site::CHECKOUT_INFO_TITLE),
            );
        });
        let cart = CartPage::arrive(fast_actions(&driver)).await.unwrap();

        cart.checkout().await.unwrap();
    }
}

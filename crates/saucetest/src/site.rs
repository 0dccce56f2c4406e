//! Fixed facts about the application under test.
//!
//! URLs, page titles, literal error messages, and the product catalog the
//! storefront ships with. Everything asserted verbatim by the suite lives
//! here, in one place.

/// Default base URL for the storefront
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/";

/// URL path of the inventory (products) page
pub const INVENTORY_PATH: &str = "inventory.html";
/// URL path of the cart page
pub const CART_PATH: &str = "cart.html";
/// URL path of checkout step one (your information)
pub const CHECKOUT_STEP_ONE_PATH: &str = "checkout-step-one.html";
/// URL path of checkout step two (overview)
pub const CHECKOUT_STEP_TWO_PATH: &str = "checkout-step-two.html";
/// URL path of the checkout completion page
pub const CHECKOUT_COMPLETE_PATH: &str = "checkout-complete.html";

/// In-page title of the products page
pub const PRODUCTS_TITLE: &str = "Products";
/// In-page title of the cart page
pub const CART_TITLE: &str = "Your Cart";
/// In-page title of checkout step one
pub const CHECKOUT_INFO_TITLE: &str = "Checkout: Your Information";
/// In-page title of the checkout overview
pub const CHECKOUT_OVERVIEW_TITLE: &str = "Checkout: Overview";
/// In-page title of the completion page
pub const CHECKOUT_COMPLETE_TITLE: &str = "Checkout: Complete!";

/// Error shown for credentials that match no user
pub const LOGIN_MISMATCH_ERROR: &str =
    "Epic sadface: Username and password do not match any user in this service";
/// Error shown for the locked-out user
pub const LOCKED_USER_ERROR: &str = "Epic sadface: Sorry, this user has been locked out.";
/// Error shown when the username field is left empty
pub const EMPTY_USERNAME_ERROR: &str = "Epic sadface: Username is required";
/// Error shown when the password field is left empty
pub const EMPTY_PASSWORD_ERROR: &str = "Epic sadface: Password is required";

/// Checkout step one error for a missing first name
pub const MISSING_FIRST_NAME_ERROR: &str = "Error: First Name is required";
/// Checkout step one error for a missing last name
pub const MISSING_LAST_NAME_ERROR: &str = "Error: Last Name is required";
/// Checkout step one error for a missing postal code
pub const MISSING_POSTAL_CODE_ERROR: &str = "Error: Postal Code is required";

/// Message shown on the completion page
pub const ORDER_COMPLETE_MESSAGE: &str = "Thank you for your order!";

/// Number of products on the inventory page
pub const PRODUCT_COUNT: usize = 6;

/// The storefront's product catalog.
///
/// The add/remove buttons on the inventory and cart pages carry ids derived
/// from the display name, so the catalog doubles as the locator source for
/// per-product interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// Sauce Labs Backpack
    Backpack,
    /// Sauce Labs Bike Light
    BikeLight,
    /// Sauce Labs Bolt T-Shirt
    BoltTShirt,
    /// Sauce Labs Fleece Jacket
    FleeceJacket,
    /// Sauce Labs Onesie
    Onesie,
    /// Test.allTheThings() T-Shirt (Red)
    RedTShirt,
}

impl Product {
    /// All products, in the storefront's default (A-to-Z) order
    pub const ALL: [Self; 6] = [
        Self::Backpack,
        Self::BikeLight,
        Self::BoltTShirt,
        Self::FleeceJacket,
        Self::Onesie,
        Self::RedTShirt,
    ];

    /// Display name as it appears on the inventory and cart pages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backpack => "Sauce Labs Backpack",
            Self::BikeLight => "Sauce Labs Bike Light",
            Self::BoltTShirt => "Sauce Labs Bolt T-Shirt",
            Self::FleeceJacket => "Sauce Labs Fleece Jacket",
            Self::Onesie => "Sauce Labs Onesie",
            Self::RedTShirt => "Test.allTheThings() T-Shirt (Red)",
        }
    }

    /// Button-id slug: lowercased display name with spaces as dashes
    #[must_use]
    pub fn slug(self) -> String {
        self.name().to_lowercase().replace(' ', "-")
    }

    /// Id of this product's add-to-cart button
    #[must_use]
    pub fn add_button_id(self) -> String {
        format!("add-to-cart-{}", self.slug())
    }

    /// Id of this product's remove button
    #[must_use]
    pub fn remove_button_id(self) -> String {
        format!("remove-{}", self.slug())
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort options offered by the inventory sort dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Name (A to Z)
    NameAscending,
    /// Name (Z to A)
    NameDescending,
    /// Price (low to high)
    PriceAscending,
    /// Price (high to low)
    PriceDescending,
}

impl SortOrder {
    /// Visible text of the dropdown option
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAscending => "Name (A to Z)",
            Self::NameDescending => "Name (Z to A)",
            Self::PriceAscending => "Price (low to high)",
            Self::PriceDescending => "Price (high to low)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_dashes_and_lowercase() {
        assert_eq!(Product::Backpack.slug(), "sauce-labs-backpack");
        assert_eq!(Product::BoltTShirt.slug(), "sauce-labs-bolt-t-shirt");
    }

    #[test]
    fn test_slug_keeps_punctuation() {
        // The red t-shirt id keeps its dots and parentheses verbatim
        assert_eq!(
            Product::RedTShirt.slug(),
            "test.allthethings()-t-shirt-(red)"
        );
    }

    #[test]
    fn test_button_ids() {
        assert_eq!(
            Product::BikeLight.add_button_id(),
            "add-to-cart-sauce-labs-bike-light"
        );
        assert_eq!(
            Product::Onesie.remove_button_id(),
            "remove-sauce-labs-onesie"
        );
    }

    #[test]
    fn test_catalog_size_matches_page() {
        assert_eq!(Product::ALL.len(), PRODUCT_COUNT);
    }
}

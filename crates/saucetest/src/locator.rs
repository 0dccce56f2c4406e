//! Locators: how the suite finds elements on a page.
//!
//! A [`Selector`] describes one way to find an element and compiles to a CSS
//! selector or a JavaScript query expression; a [`Locator`] pairs a selector
//! with the human name used in log lines and timeout errors.

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Raw CSS selector (e.g. `button[id^='add-to-cart']`)
    Css(String),
    /// Element id. Compiled as `[id='..']` because storefront ids contain
    /// dots and parentheses that would need escaping in `#id` form.
    Id(String),
    /// Single class name
    ClassName(String),
    /// `data-test` attribute, the storefront's stable test hooks
    DataTest(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a class-name selector
    #[must_use]
    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    /// Create a `data-test` attribute selector
    #[must_use]
    pub fn data_test(value: impl Into<String>) -> Self {
        Self::DataTest(value.into())
    }

    /// Compile to a CSS selector string
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::Id(id) => format!("[id='{id}']"),
            Self::ClassName(name) => format!(".{name}"),
            Self::DataTest(value) => format!("[data-test='{value}']"),
        }
    }

    /// JavaScript expression resolving to the first matching element (or null)
    #[must_use]
    pub fn to_query(&self) -> String {
        let css = self.to_css();
        format!("document.querySelector({css:?})")
    }

    /// JavaScript expression resolving to the number of matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        let css = self.to_css();
        format!("document.querySelectorAll({css:?}).length")
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::Id(id) => write!(f, "id={id}"),
            Self::ClassName(name) => write!(f, "class={name}"),
            Self::DataTest(value) => write!(f, "data-test={value}"),
        }
    }
}

/// A named selector.
///
/// The name is what shows up in traces and in `ElementTimeout` errors, so it
/// should read like the element it points at ("login button", not "btn1").
#[derive(Debug, Clone)]
pub struct Locator {
    name: &'static str,
    selector: Selector,
}

impl Locator {
    /// Create a locator
    #[must_use]
    pub fn new(name: &'static str, selector: Selector) -> Self {
        Self { name, selector }
    }

    /// Human name of the element
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_css_forms() {
        assert_eq!(Selector::id("login-button").to_css(), "[id='login-button']");
        assert_eq!(Selector::class_name("title").to_css(), ".title");
        assert_eq!(Selector::data_test("error").to_css(), "[data-test='error']");
        assert_eq!(
            Selector::css("button[id^='remove']").to_css(),
            "button[id^='remove']"
        );
    }

    #[test]
    fn test_id_selector_survives_punctuation() {
        // `#add-to-cart-test.allthethings()-t-shirt-(red)` would be invalid
        // CSS; the attribute form works unescaped.
        let selector = Selector::id("add-to-cart-test.allthethings()-t-shirt-(red)");
        assert_eq!(
            selector.to_css(),
            "[id='add-to-cart-test.allthethings()-t-shirt-(red)']"
        );
    }

    #[test]
    fn test_queries_quote_the_css() {
        let query = Selector::class_name("shopping_cart_badge").to_query();
        assert_eq!(query, "document.querySelector(\".shopping_cart_badge\")");

        let count = Selector::css("div.cart_item").to_count_query();
        assert_eq!(count, "document.querySelectorAll(\"div.cart_item\").length");
    }

    #[test]
    fn test_locator_display_names_element_and_selector() {
        let locator = Locator::new("cart badge", Selector::class_name("shopping_cart_badge"));
        assert_eq!(
            locator.to_string(),
            "cart badge [class=shopping_cart_badge]"
        );
    }
}

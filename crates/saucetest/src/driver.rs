//! Abstract browser driver.
//!
//! Page objects and scenarios talk to a [`Driver`] rather than to a concrete
//! browser handle. The CDP-backed session (behind the `browser` feature)
//! implements it for real runs; [`MockDriver`] implements it over an
//! in-memory page model so the suite's own logic is testable without a
//! browser.

use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Observable state of one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Not in the DOM
    Absent,
    /// In the DOM but not visible
    Hidden,
    /// Visible but not enabled
    Disabled,
    /// Visible and enabled
    Interactable,
}

impl ElementState {
    /// Whether the element exists at all
    #[must_use]
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Whether the element is rendered
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Disabled | Self::Interactable)
    }

    /// Whether the element accepts interaction
    #[must_use]
    pub const fn is_interactable(self) -> bool {
        matches!(self, Self::Interactable)
    }
}

/// Primitive browser operations the suite is built from.
///
/// One implementation per backend. No retries or waiting at this level;
/// synchronization lives in [`crate::wait`] and the action layer.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL
    async fn goto(&self, url: &str) -> SuiteResult<()>;

    /// Current URL of the page
    async fn current_url(&self) -> SuiteResult<String>;

    /// Observable state of the first element matching the selector
    async fn state(&self, selector: &Selector) -> SuiteResult<ElementState>;

    /// Click the first matching element via native input
    async fn click(&self, selector: &Selector) -> SuiteResult<()>;

    /// Click the first matching element by running `el.click()` in the page
    async fn click_via_script(&self, selector: &Selector) -> SuiteResult<()>;

    /// Clear the first matching input and type text into it
    async fn type_text(&self, selector: &Selector, text: &str) -> SuiteResult<()>;

    /// Text content of the first matching element
    async fn read_text(&self, selector: &Selector) -> SuiteResult<String>;

    /// Text content of every matching element, in DOM order
    async fn read_texts(&self, selector: &Selector) -> SuiteResult<Vec<String>>;

    /// Number of matching elements
    async fn count(&self, selector: &Selector) -> SuiteResult<usize>;

    /// Select a dropdown option by its visible text
    async fn select_by_text(&self, selector: &Selector, option: &str) -> SuiteResult<()>;

    /// Capture a PNG screenshot of the page
    async fn screenshot(&self) -> SuiteResult<Vec<u8>>;

    /// Tear the session down
    async fn close(&self) -> SuiteResult<()>;
}

// ============================================================================
// Mock driver
// ============================================================================

/// One element in the mock page model
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Element state
    pub state: ElementState,
    /// Text content
    pub text: String,
}

impl MockElement {
    /// An interactable element with text
    #[must_use]
    pub fn interactable(text: impl Into<String>) -> Self {
        Self {
            state: ElementState::Interactable,
            text: text.into(),
        }
    }

    /// A present-but-hidden element
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            state: ElementState::Hidden,
            text: String::new(),
        }
    }
}

type ClickHandler = Box<dyn FnMut(&mut MockDom) + Send>;
type GotoHandler = Box<dyn FnMut(&mut MockDom, &str) + Send>;

/// In-memory page model the mock driver serves answers from.
///
/// Keyed by compiled CSS (`Selector::to_css`), so tests script elements with
/// the same selectors the page objects use.
#[derive(Default)]
pub struct MockDom {
    /// Current URL
    pub url: String,
    /// Elements by compiled CSS selector
    pub elements: HashMap<String, Vec<MockElement>>,
    /// Text typed per selector, in order
    pub typed: Vec<(String, String)>,
    /// Options selected per selector, in order
    pub selected: Vec<(String, String)>,
    click_handlers: HashMap<String, ClickHandler>,
    native_click_broken: HashMap<String, bool>,
    goto_handler: Option<GotoHandler>,
}

impl std::fmt::Debug for MockDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDom")
            .field("url", &self.url)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

impl MockDom {
    /// Put a single element under a selector (replacing any previous set)
    pub fn put(&mut self, selector: &Selector, element: MockElement) {
        let _ = self.elements.insert(selector.to_css(), vec![element]);
    }

    /// Put several elements under one selector
    pub fn put_all(&mut self, selector: &Selector, elements: Vec<MockElement>) {
        let _ = self.elements.insert(selector.to_css(), elements);
    }

    /// Remove every element under a selector
    pub fn remove(&mut self, selector: &Selector) {
        let _ = self.elements.remove(&selector.to_css());
    }

    fn first(&self, selector: &Selector) -> Option<&MockElement> {
        self.elements
            .get(&selector.to_css())
            .and_then(|els| els.first())
    }
}

/// Scriptable driver over a [`MockDom`]
#[derive(Debug, Default)]
pub struct MockDriver {
    dom: Mutex<MockDom>,
    closed: Mutex<bool>,
}

impl MockDriver {
    /// Create a mock driver with an empty page at the given URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let driver = Self::default();
        driver.dom.lock().unwrap().url = url.into();
        driver
    }

    /// Script the page model
    pub fn with_dom(&self, f: impl FnOnce(&mut MockDom)) {
        f(&mut self.dom.lock().unwrap());
    }

    /// Register a handler run when the given element is clicked
    pub fn on_click(&self, selector: &Selector, f: impl FnMut(&mut MockDom) + Send + 'static) {
        let _ = self
            .dom
            .lock()
            .unwrap()
            .click_handlers
            .insert(selector.to_css(), Box::new(f));
    }

    /// Register a handler run after every navigation
    pub fn on_goto(&self, f: impl FnMut(&mut MockDom, &str) + Send + 'static) {
        self.dom.lock().unwrap().goto_handler = Some(Box::new(f));
    }

    /// Make native clicks on this element fail, as an animation-obscured
    /// element would; script-driven clicks still work.
    pub fn break_native_click(&self, selector: &Selector) {
        let _ = self
            .dom
            .lock()
            .unwrap()
            .native_click_broken
            .insert(selector.to_css(), true);
    }

    /// Text typed so far, as (selector, text) pairs
    #[must_use]
    pub fn typed(&self) -> Vec<(String, String)> {
        self.dom.lock().unwrap().typed.clone()
    }

    /// Options selected so far, as (selector, option) pairs
    #[must_use]
    pub fn selected(&self) -> Vec<(String, String)> {
        self.dom.lock().unwrap().selected.clone()
    }

    /// Whether `close` has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    fn run_click_handler(&self, key: &str) {
        let handler = self.dom.lock().unwrap().click_handlers.remove(key);
        if let Some(mut handler) = handler {
            {
                let mut dom = self.dom.lock().unwrap();
                handler(&mut dom);
            }
            let mut dom = self.dom.lock().unwrap();
            // keep the handler unless the click installed a replacement
            dom.click_handlers.entry(key.to_string()).or_insert(handler);
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> SuiteResult<()> {
        if self.is_closed() {
            return Err(SuiteError::SessionClosed);
        }
        let handler = {
            let mut dom = self.dom.lock().unwrap();
            dom.url = url.to_string();
            dom.goto_handler.take()
        };
        if let Some(mut handler) = handler {
            {
                let mut dom = self.dom.lock().unwrap();
                handler(&mut dom, url);
            }
            self.dom.lock().unwrap().goto_handler = Some(handler);
        }
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        Ok(self.dom.lock().unwrap().url.clone())
    }

    async fn state(&self, selector: &Selector) -> SuiteResult<ElementState> {
        Ok(self
            .dom
            .lock()
            .unwrap()
            .first(selector)
            .map_or(ElementState::Absent, |el| el.state))
    }

    async fn click(&self, selector: &Selector) -> SuiteResult<()> {
        let key = selector.to_css();
        {
            let dom = self.dom.lock().unwrap();
            if dom.native_click_broken.get(&key).copied().unwrap_or(false) {
                return Err(SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: "element click intercepted".to_string(),
                });
            }
            if dom.first(selector).is_none() {
                return Err(SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: "no such element".to_string(),
                });
            }
        }
        self.run_click_handler(&key);
        Ok(())
    }

    async fn click_via_script(&self, selector: &Selector) -> SuiteResult<()> {
        let key = selector.to_css();
        if self.dom.lock().unwrap().first(selector).is_none() {
            return Err(SuiteError::Interaction {
                locator: selector.to_string(),
                message: "no such element".to_string(),
            });
        }
        self.run_click_handler(&key);
        Ok(())
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
        let mut dom = self.dom.lock().unwrap();
        if dom.first(selector).is_none() {
            return Err(SuiteError::Interaction {
                locator: selector.to_string(),
                message: "no such element".to_string(),
            });
        }
        dom.typed.push((selector.to_css(), text.to_string()));
        Ok(())
    }

    async fn read_text(&self, selector: &Selector) -> SuiteResult<String> {
        self.dom
            .lock()
            .unwrap()
            .first(selector)
            .map(|el| el.text.clone())
            .ok_or_else(|| SuiteError::Interaction {
                locator: selector.to_string(),
                message: "no such element".to_string(),
            })
    }

    async fn read_texts(&self, selector: &Selector) -> SuiteResult<Vec<String>> {
        Ok(self
            .dom
            .lock()
            .unwrap()
            .elements
            .get(&selector.to_css())
            .map(|els| els.iter().map(|el| el.text.clone()).collect())
            .unwrap_or_default())
    }

    async fn count(&self, selector: &Selector) -> SuiteResult<usize> {
        Ok(self
            .dom
            .lock()
            .unwrap()
            .elements
            .get(&selector.to_css())
            .map_or(0, Vec::len))
    }

    async fn select_by_text(&self, selector: &Selector, option: &str) -> SuiteResult<()> {
        let mut dom = self.dom.lock().unwrap();
        if dom.first(selector).is_none() {
            return Err(SuiteError::Interaction {
                locator: selector.to_string(),
                message: "no such element".to_string(),
            });
        }
        dom.selected.push((selector.to_css(), option.to_string()));
        Ok(())
    }

    async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
        // 1x1 transparent PNG, enough for save/attach paths
        Ok(vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
            0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
            0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
        ])
    }

    async fn close(&self) -> SuiteResult<()> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn badge() -> Selector {
        Selector::class_name("shopping_cart_badge")
    }

    #[tokio::test]
    async fn test_state_of_missing_element_is_absent() {
        let driver = MockDriver::new("about:blank");
        assert_eq!(
            driver.state(&badge()).await.unwrap(),
            ElementState::Absent
        );
    }

    #[tokio::test]
    async fn test_scripted_element_round_trip() {
        let driver = MockDriver::new("about:blank");
        driver.with_dom(|dom| dom.put(&badge(), MockElement::interactable("3")));

        assert_eq!(
            driver.state(&badge()).await.unwrap(),
            ElementState::Interactable
        );
        assert_eq!(driver.read_text(&badge()).await.unwrap(), "3");
    }

    #[tokio::test]
    async fn test_click_handler_mutates_dom() {
        let driver = MockDriver::new("about:blank");
        let button = Selector::id("checkout");
        driver.with_dom(|dom| dom.put(&button, MockElement::interactable("Checkout")));
        driver.on_click(&button, |dom| dom.url = "cart.html".to_string());

        driver.click(&button).await.unwrap();
        assert_eq!(driver.current_url().await.unwrap(), "cart.html");

        // handler survives for repeat clicks
        driver.with_dom(|dom| dom.url = "elsewhere".to_string());
        driver.click(&button).await.unwrap();
        assert_eq!(driver.current_url().await.unwrap(), "cart.html");
    }

    #[tokio::test]
    async fn test_broken_native_click_still_clicks_via_script() {
        let driver = MockDriver::new("about:blank");
        let menu = Selector::id("react-burger-menu-btn");
        driver.with_dom(|dom| dom.put(&menu, MockElement::interactable("")));
        driver.break_native_click(&menu);

        assert!(driver.click(&menu).await.is_err());
        assert!(driver.click_via_script(&menu).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_texts_and_count() {
        let driver = MockDriver::new("about:blank");
        let names = Selector::class_name("inventory_item_name");
        driver.with_dom(|dom| {
            dom.put_all(
                &names,
                vec![
                    MockElement::interactable("Sauce Labs Backpack"),
                    MockElement::interactable("Sauce Labs Onesie"),
                ],
            );
        });

        assert_eq!(driver.count(&names).await.unwrap(), 2);
        assert_eq!(
            driver.read_texts(&names).await.unwrap(),
            vec!["Sauce Labs Backpack", "Sauce Labs Onesie"]
        );
    }

    #[tokio::test]
    async fn test_type_and_select_are_recorded() {
        let driver = MockDriver::new("about:blank");
        let field = Selector::id("user-name");
        let sort = Selector::class_name("product_sort_container");
        driver.with_dom(|dom| {
            dom.put(&field, MockElement::interactable(""));
            dom.put(&sort, MockElement::interactable(""));
        });

        driver.type_text(&field, "standard_user").await.unwrap();
        driver.select_by_text(&sort, "Name (Z to A)").await.unwrap();

        assert_eq!(
            driver.typed(),
            vec![("[id='user-name']".to_string(), "standard_user".to_string())]
        );
        assert_eq!(driver.selected().len(), 1);
    }

    #[tokio::test]
    async fn test_goto_after_close_is_rejected() {
        let driver = MockDriver::new("about:blank");
        driver.close().await.unwrap();

        assert!(driver.is_closed());
        assert!(matches!(
            driver.goto("https://www.saucedemo.com/").await,
            Err(SuiteError::SessionClosed)
        ));
    }
}

//! Saucetest: a browser regression suite for the SauceDemo storefront.
//!
//! The suite drives the site through typed page objects over a [`Driver`]
//! abstraction. A real session speaks the Chrome `DevTools` Protocol
//! (behind the `browser` feature); unit tests run the same page objects
//! and scenarios against a scripted in-memory page model.
//!
//! ```text
//! scenarios ──► page objects ──► actions ──► Driver ──┬─► CDP session
//!                                  │                  └─► mock page model
//!                                waits
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod actions;
pub mod assertion;
pub mod browser;
pub mod config;
pub mod driver;
pub mod locator;
pub mod page;
pub mod reporter;
pub mod result;
pub mod runner;
pub mod screenshot;
pub mod site;
pub mod suite;
pub mod wait;

pub use actions::{Actions, ClickPolicy};
pub use assertion::Check;
pub use browser::BrowserKind;
#[cfg(feature = "browser")]
pub use browser::Session;
pub use config::{ReportSettings, Settings};
pub use driver::{Driver, ElementState, MockDom, MockDriver, MockElement};
pub use locator::{Locator, Selector};
pub use page::{
    CartPage, CheckoutCompletePage, CheckoutOverviewPage, CheckoutStepOnePage, LoginPage,
    ProductsPage,
};
pub use reporter::{Reporter, ScenarioRecord, ScenarioStatus};
pub use result::{SuiteError, SuiteResult};
pub use runner::{Runner, Scenario, ScenarioContext, ScenarioFn, TagFilter};
pub use site::{Product, SortOrder};
pub use wait::{Condition, WaitOptions};

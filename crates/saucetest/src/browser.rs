//! Real browser sessions over the Chrome `DevTools` Protocol.
//!
//! Compiled with the `browser` feature this module drives Chromium through
//! chromiumoxide; without it the crate still builds and the suite runs
//! against [`crate::driver::MockDriver`] in unit tests.

use crate::result::SuiteResult;

/// Browser families the configuration accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    /// Chrome or Chromium
    #[default]
    Chrome,
    /// Firefox
    Firefox,
    /// Edge
    Edge,
}

impl BrowserKind {
    /// Parse a configured browser name; unrecognized names log a warning
    /// and fall back to Chrome.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Self::Chrome,
            "firefox" => Self::Firefox,
            "edge" => Self::Edge,
            other => {
                tracing::warn!(browser = other, "unknown browser name, using chrome");
                Self::Chrome
            }
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
        })
    }
}

#[cfg(feature = "browser")]
pub use cdp::Session;

#[cfg(feature = "browser")]
mod cdp {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::{
        DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
    };
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tokio::sync::Mutex;

    use super::BrowserKind;
    use crate::config::Settings;
    use crate::driver::{Driver, ElementState};
    use crate::locator::Selector;
    use crate::result::{SuiteError, SuiteResult};

    /// JS string literal for embedding a text value into an expression
    fn js_str(value: &str) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
    }

    /// One live browser session
    #[derive(Debug)]
    pub struct Session {
        browser: Arc<Mutex<CdpBrowser>>,
        page: CdpPage,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Session {
        /// Launch a browser and open a blank page.
        ///
        /// Only Chromium speaks CDP, so other configured browser kinds log
        /// a warning and a Chromium session is launched instead.
        ///
        /// # Errors
        ///
        /// [`SuiteError::BrowserLaunch`] when the browser cannot start.
        pub async fn launch(settings: &Settings) -> SuiteResult<Self> {
            let kind = BrowserKind::from_name(&settings.browser);
            if kind != BrowserKind::Chrome {
                tracing::warn!(%kind, "only chrome speaks CDP, launching chromium");
            }
            tracing::info!(headless = settings.headless, "launching browser");

            let mut builder = CdpConfig::builder().no_sandbox();
            if !settings.headless {
                builder = builder.with_head();
            }
            if let Some(binary) = &settings.browser_binary {
                builder = builder.chrome_executable(binary);
            }
            let config = builder.build().map_err(|e| SuiteError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(config)
                    .await
                    .map_err(|e| SuiteError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| SuiteError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            Ok(Self {
                browser: Arc::new(Mutex::new(browser)),
                page,
                handle,
            })
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> SuiteResult<T> {
            let result = self
                .page
                .evaluate(expr)
                .await
                .map_err(|e| SuiteError::Script {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| SuiteError::Script {
                message: e.to_string(),
            })
        }

        /// Viewport center of the first match
        async fn element_center(&self, selector: &Selector) -> SuiteResult<(f64, f64)> {
            let expr = format!(
                "(() => {{ const el = {query}; \
                 if (!el) return null; \
                 el.scrollIntoView({{block: 'center'}}); \
                 const r = el.getBoundingClientRect(); \
                 return [r.left + r.width / 2, r.top + r.height / 2]; }})()",
                query = selector.to_query()
            );
            let center: Option<(f64, f64)> = self.eval(expr).await?;
            center.ok_or_else(|| SuiteError::Interaction {
                locator: selector.to_string(),
                message: "no such element".to_string(),
            })
        }

        async fn dispatch_mouse(
            &self,
            selector: &Selector,
            event_type: DispatchMouseEventType,
            x: f64,
            y: f64,
        ) -> SuiteResult<()> {
            let params = DispatchMouseEventParams::builder()
                .r#type(event_type)
                .x(x)
                .y(y)
                .button(MouseButton::Left)
                .click_count(1)
                .build()
                .map_err(|e| SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: e,
                })?;
            self.page
                .execute(params)
                .await
                .map_err(|e| SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    #[async_trait]
    impl Driver for Session {
        async fn goto(&self, url: &str) -> SuiteResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| SuiteError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> SuiteResult<String> {
            self.eval("window.location.href".to_string()).await
        }

        async fn state(&self, selector: &Selector) -> SuiteResult<ElementState> {
            let expr = format!(
                "(() => {{ const el = {query}; \
                 if (!el) return 'absent'; \
                 const style = window.getComputedStyle(el); \
                 const rect = el.getBoundingClientRect(); \
                 if (style.display === 'none' || style.visibility === 'hidden' || rect.width === 0) return 'hidden'; \
                 if (el.disabled) return 'disabled'; \
                 return 'interactable'; }})()",
                query = selector.to_query()
            );
            let state: String = self.eval(expr).await?;
            Ok(match state.as_str() {
                "hidden" => ElementState::Hidden,
                "disabled" => ElementState::Disabled,
                "interactable" => ElementState::Interactable,
                _ => ElementState::Absent,
            })
        }

        async fn click(&self, selector: &Selector) -> SuiteResult<()> {
            let (x, y) = self.element_center(selector).await?;
            self.dispatch_mouse(selector, DispatchMouseEventType::MousePressed, x, y)
                .await?;
            self.dispatch_mouse(selector, DispatchMouseEventType::MouseReleased, x, y)
                .await
        }

        async fn click_via_script(&self, selector: &Selector) -> SuiteResult<()> {
            let expr = format!(
                "(() => {{ const el = {query}; \
                 if (!el) return false; el.click(); return true; }})()",
                query = selector.to_query()
            );
            let clicked: bool = self.eval(expr).await?;
            if clicked {
                Ok(())
            } else {
                Err(SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: "no such element".to_string(),
                })
            }
        }

        async fn type_text(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
            // the native value setter keeps React-controlled inputs in sync
            let expr = format!(
                "(() => {{ const el = {query}; \
                 if (!el) return false; \
                 el.focus(); \
                 const setter = Object.getOwnPropertyDescriptor(window.HTMLInputElement.prototype, 'value').set; \
                 setter.call(el, {text}); \
                 el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                 return true; }})()",
                query = selector.to_query(),
                text = js_str(text)
            );
            let typed: bool = self.eval(expr).await?;
            if typed {
                Ok(())
            } else {
                Err(SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: "no such element".to_string(),
                })
            }
        }

        async fn read_text(&self, selector: &Selector) -> SuiteResult<String> {
            let expr = format!(
                "(() => {{ const el = {query}; \
                 return el ? el.textContent.trim() : null; }})()",
                query = selector.to_query()
            );
            let text: Option<String> = self.eval(expr).await?;
            text.ok_or_else(|| SuiteError::Interaction {
                locator: selector.to_string(),
                message: "no such element".to_string(),
            })
        }

        async fn read_texts(&self, selector: &Selector) -> SuiteResult<Vec<String>> {
            let expr = format!(
                "Array.from(document.querySelectorAll({css:?})).map(el => el.textContent.trim())",
                css = selector.to_css()
            );
            self.eval(expr).await
        }

        async fn count(&self, selector: &Selector) -> SuiteResult<usize> {
            let expr = selector.to_count_query();
            self.eval(expr).await
        }

        async fn select_by_text(&self, selector: &Selector, option: &str) -> SuiteResult<()> {
            let expr = format!(
                "(() => {{ const el = {query}; \
                 if (!el) return 'no such element'; \
                 const opt = Array.from(el.options).find(o => o.textContent.trim() === {option}); \
                 if (!opt) return 'no such option'; \
                 el.value = opt.value; \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                 return ''; }})()",
                query = selector.to_query(),
                option = js_str(option)
            );
            let outcome: String = self.eval(expr).await?;
            if outcome.is_empty() {
                Ok(())
            } else {
                Err(SuiteError::Interaction {
                    locator: selector.to_string(),
                    message: outcome,
                })
            }
        }

        async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = self
                .page
                .execute(params)
                .await
                .map_err(|e| SuiteError::Screenshot {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| SuiteError::Screenshot {
                    message: e.to_string(),
                })
        }

        async fn close(&self) -> SuiteResult<()> {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| SuiteError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

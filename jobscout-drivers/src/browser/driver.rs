use crate::browser::Browser;
use crate::error::{DriverError, DriverResult};
use crate::locator::Locator;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use tracing::info;
use webdriver::capabilities::Capabilities;

/// Where and how to start the WebDriver session.
#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub webdriver_url: String,
    pub headless: bool,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: false,
        }
    }
}

/// [`Browser`] backed by a `fantoccini` WebDriver client (Chromedriver by default).
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Connect to a running WebDriver service and open a new session.
    pub async fn connect(settings: &DriverSettings) -> DriverResult<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![json!("--disable-dev-shm-usage"), json!("--no-sandbox")];
        if settings.headless {
            args.push(json!("--headless"));
            args.push(json!("--disable-gpu"));
        }
        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&settings.webdriver_url)
            .await
            .map_err(|source| DriverError::Connect {
                url: settings.webdriver_url.clone(),
                source,
            })?;

        info!(
            target: "browser.session",
            url = %settings.webdriver_url,
            headless = settings.headless,
            "WebDriver session started"
        );
        Ok(Self { client })
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> DriverResult<()> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Element = Element;

    async fn goto(&self, url: &str) -> DriverResult<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> DriverResult<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn maximize(&self) -> DriverResult<()> {
        self.client.maximize_window().await?;
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> DriverResult<Element> {
        Ok(self.client.find(locator.as_fantoccini()).await?)
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<Element>> {
        Ok(self.client.find_all(locator.as_fantoccini()).await?)
    }

    async fn find_in(&self, parent: &Element, locator: &Locator) -> DriverResult<Element> {
        Ok(parent.find(locator.as_fantoccini()).await?)
    }

    async fn find_all_in(&self, parent: &Element, locator: &Locator) -> DriverResult<Vec<Element>> {
        Ok(parent.find_all(locator.as_fantoccini()).await?)
    }

    async fn is_displayed(&self, element: &Element) -> DriverResult<bool> {
        Ok(element.is_displayed().await?)
    }

    async fn is_enabled(&self, element: &Element) -> DriverResult<bool> {
        Ok(element.is_enabled().await?)
    }

    async fn click(&self, element: &Element) -> DriverResult<()> {
        element.click().await?;
        Ok(())
    }

    async fn scroll_into_view(&self, element: &Element) -> DriverResult<()> {
        let arg = serde_json::to_value(element)?;
        self.client
            .execute("arguments[0].scrollIntoView({block: 'center'});", vec![arg])
            .await?;
        Ok(())
    }

    async fn clear(&self, element: &Element) -> DriverResult<()> {
        element.clear().await?;
        Ok(())
    }

    async fn send_keys(&self, element: &Element, text: &str) -> DriverResult<()> {
        element.send_keys(text).await?;
        Ok(())
    }

    async fn text(&self, element: &Element) -> DriverResult<String> {
        Ok(element.text().await?)
    }

    async fn attr(&self, element: &Element, name: &str) -> DriverResult<Option<String>> {
        Ok(element.attr(name).await?)
    }
}

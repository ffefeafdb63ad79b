use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{debug, info};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::CrawlError;

/// Anything that can hand back the rendered markup of one listing page.
pub trait PageSource {
    fn fetch(&mut self, offset: u64) -> Result<String, CrawlError>;
}

impl<P: PageSource + ?Sized> PageSource for &mut P {
    fn fetch(&mut self, offset: u64) -> Result<String, CrawlError> {
        (**self).fetch(offset)
    }
}

/// The search URL for `offset`: the template with `recnum` set, and nothing
/// else changed.
pub fn search_url(template: &str, offset: u64) -> Result<Url, CrawlError> {
    let mut url = Url::parse(template)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "recnum")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("recnum", &offset.to_string());
    Ok(url)
}

/// One headless Chrome process with a single tab, reused for every page.
/// Dropping it shuts the browser down, whichever way the crawl ended.
pub struct BrowserFetcher {
    // Field order matters: the tab goes before the browser that owns it.
    tab: Arc<Tab>,
    _browser: Browser,
    template: String,
    ready_selector: String,
    render_timeout: Duration,
}

impl BrowserFetcher {
    pub fn launch(config: &CrawlConfig) -> Result<Self, CrawlError> {
        // Fail on a bad template before paying for a browser start.
        search_url(&config.search_template, 0)?;

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(CrawlError::browser)?;
        let browser = Browser::new(options).map_err(CrawlError::browser)?;
        let tab = browser.new_tab().map_err(CrawlError::browser)?;
        info!("Launched headless browser");

        Ok(BrowserFetcher {
            tab,
            _browser: browser,
            template: config.search_template.clone(),
            ready_selector: config.listing_selector.clone(),
            render_timeout: config.render_timeout,
        })
    }

    /// Blocks until the first listing item exists or the render timeout runs
    /// out. A timeout is expected on the page past the last result; any other
    /// browser fault aborts the fetch.
    fn wait_for_listing(&self, offset: u64) -> Result<(), CrawlError> {
        match self
            .tab
            .wait_for_element_with_custom_timeout(&self.ready_selector, self.render_timeout)
        {
            Ok(_) => {
                debug!("Listing rendered at offset {}", offset);
                Ok(())
            }
            Err(e) if is_render_timeout(&*e) => {
                debug!(
                    "No '{}' within {:?} at offset {}",
                    self.ready_selector, self.render_timeout, offset
                );
                Ok(())
            }
            Err(e) => Err(CrawlError::browser(e)),
        }
    }
}

fn is_render_timeout(err: &(dyn Error + Send + Sync + 'static)) -> bool {
    err.is::<Timeout>()
}

impl PageSource for BrowserFetcher {
    fn fetch(&mut self, offset: u64) -> Result<String, CrawlError> {
        let url = search_url(&self.template, offset)?;
        info!("Loading {}", url);

        self.tab
            .navigate_to(url.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(CrawlError::browser)?;
        self.wait_for_listing(offset)?;

        let html = self.tab.get_content().map_err(CrawlError::browser)?;
        debug!("Fetched and rendered page at offset {} ({} bytes)", offset, html.len());
        Ok(html)
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        info!("Closing headless browser");
    }
}

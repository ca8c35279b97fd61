//! Browser side effects the game asks for: file downloads and external links.
//!
//! The game only sees the [`Host`] trait, so input handling stays testable
//! without a DOM.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// A text file to hand to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("downloads are disabled")]
    DownloadsDisabled,
    #[error("browser window is not available")]
    NoWindow,
    #[error("browser call failed: {0}")]
    Js(String),
}

fn js_err(err: JsValue) -> HostError {
    HostError::Js(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

pub trait Host {
    fn offer_download(&self, file: &ExportFile) -> Result<(), HostError>;
    fn open_link(&self, url: &str) -> Result<(), HostError>;
}

/// DOM-backed host.
pub struct BrowserHost {
    downloads_enabled: bool,
}

impl BrowserHost {
    pub fn new(downloads_enabled: bool) -> Self {
        Self { downloads_enabled }
    }
}

impl Host for BrowserHost {
    fn offer_download(&self, file: &ExportFile) -> Result<(), HostError> {
        if !self.downloads_enabled {
            return Err(HostError::DownloadsDisabled);
        }
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoWindow)?;

        let parts = js_sys::Array::of1(&JsValue::from_str(&file.contents));
        let options = BlobPropertyBag::new();
        options.set_type("text/plain");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| HostError::Js("created element is not an anchor".into()))?;
        anchor.set_href(&url);
        anchor.set_download(&file.file_name);
        anchor.click();

        Url::revoke_object_url(&url).map_err(js_err)
    }

    fn open_link(&self, url: &str) -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        window
            .open_with_url_and_target(url, "_blank")
            .map(|_| ())
            .map_err(js_err)
    }
}

/// Records requests instead of touching the DOM.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingHost {
    pub downloads_enabled: bool,
    pub downloads: std::cell::RefCell<Vec<ExportFile>>,
    pub links: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl Host for RecordingHost {
    fn offer_download(&self, file: &ExportFile) -> Result<(), HostError> {
        if !self.downloads_enabled {
            return Err(HostError::DownloadsDisabled);
        }
        self.downloads.borrow_mut().push(file.clone());
        Ok(())
    }

    fn open_link(&self, url: &str) -> Result<(), HostError> {
        self.links.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_browser_host_refuses_before_touching_dom() {
        let host = BrowserHost::new(false);
        let file = ExportFile {
            file_name: "PILL-ABC.txt".into(),
            contents: "x".into(),
        };
        assert_eq!(host.offer_download(&file), Err(HostError::DownloadsDisabled));
    }

    #[test]
    fn host_error_messages() {
        assert_eq!(HostError::DownloadsDisabled.to_string(), "downloads are disabled");
        assert_eq!(
            HostError::Js("boom".into()).to_string(),
            "browser call failed: boom"
        );
    }
}

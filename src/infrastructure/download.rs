use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::application::ReportDownload;
use crate::domain::{
    errors::{AppError, AppResult},
    logging::LogComponent,
};
use crate::log_debug;

/// Save `download` through a temporary object URL and a synthetic anchor click.
pub fn save_text_file(download: &ReportDownload) -> AppResult<()> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&download.contents));
    let options = BlobPropertyBag::new();
    options.set_type(download.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let result = click_anchor(&url, &download.file_name);
    // Revoke even if the click failed.
    Url::revoke_object_url(&url)?;
    result?;

    log_debug!(
        LogComponent::Infrastructure("Download"),
        "saved {} ({} bytes)",
        download.file_name,
        download.contents.len()
    );
    Ok(())
}

fn click_anchor(url: &str, file_name: &str) -> AppResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Rendering("document not available".to_string()))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| AppError::Rendering("failed to create download link".to_string()))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Hands a byte buffer to the browser as a file download: wraps it in a
/// Blob, points a temporary anchor at the object URL, and clicks it.
pub fn save_bytes(bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), String> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Failed to build download blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create download URL".to_string())?;

    let window = web_sys::window().ok_or_else(|| "No window available".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "No document available".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Failed to create download link".to_string())?
        .dyn_into()
        .map_err(|_| "Failed to create download link".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = Url::revoke_object_url(&url);
    Ok(())
}

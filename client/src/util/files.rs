//! Browser file glue for the image picker.

use catalog::image::{ImageError, ImageUpload, validate_image};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// First file selected in a file input, if any.
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files().and_then(|files| files.get(0))
}

/// Check the declared type and size of a picked file without reading it.
///
/// # Errors
///
/// See [`validate_image`].
pub fn check_file(file: &web_sys::File) -> Result<(), ImageError> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = file.size() as u64;
    validate_image(&file.type_(), size)
}

/// Read a picked file into memory.
///
/// # Errors
///
/// Returns an error string if the browser fails to read the file.
pub async fn read_file(file: &web_sys::File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let buffer: js_sys::ArrayBuffer = buffer.dyn_into().map_err(|e| format!("{e:?}"))?;
    Ok(ImageUpload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// Object URL for a local preview. Revoke with [`revoke_preview_url`].
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_preview_url(url: &str) {
    if url.starts_with("blob:") {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

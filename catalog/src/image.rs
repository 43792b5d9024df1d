//! Product image validation and storage naming.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

/// Accepted image MIME types.
pub const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Largest accepted image, in bytes (5 MB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Folder of product images in the object store.
pub const PRODUCT_IMAGE_FOLDER: &str = "products";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("image too large: {0} bytes")]
    TooLarge(u64),
}

impl ImageError {
    /// Static text shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedType(_) => "Please select a valid image file (JPEG, PNG, GIF, or WEBP)",
            Self::TooLarge(_) => "Image size should be less than 5MB",
        }
    }
}

/// A file picked by the user, read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name as reported by the browser.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// # Errors
    ///
    /// See [`validate_image`].
    pub fn validate(&self) -> Result<(), ImageError> {
        validate_image(&self.content_type, self.size())
    }
}

/// Check a file's declared type and size before anything is uploaded.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedType`] when the type is not one of
/// [`ACCEPTED_TYPES`], or [`ImageError::TooLarge`] above [`MAX_IMAGE_BYTES`].
pub fn validate_image(content_type: &str, size: u64) -> Result<(), ImageError> {
    if !ACCEPTED_TYPES.contains(&content_type) {
        return Err(ImageError::UnsupportedType(content_type.to_owned()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge(size));
    }
    Ok(())
}

/// Replace every character outside `[A-Za-z0-9.]` with `_`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}

/// Storage path for a new product image: `products/{millis}_{sanitized}`.
#[must_use]
pub fn product_image_path(timestamp_millis: i128, file_name: &str) -> String {
    format!("{PRODUCT_IMAGE_FOLDER}/{timestamp_millis}_{}", sanitize_file_name(file_name))
}

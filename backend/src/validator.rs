use image::{DynamicImage, ImageError, ImageReader};
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("could not determine image format")]
    UnknownFormat,
    #[error(transparent)]
    Decode(#[from] ImageError),
}

/// Structurally verifies and decodes an uploaded byte stream.
///
/// Format detection goes off the magic bytes, then a full decode pass proves
/// the structure is intact. No size limit or MIME allow-list is enforced
/// beyond a successful decode.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ValidateError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::from)?;
    let format = reader.format().ok_or(ValidateError::UnknownFormat)?;
    let image = reader.decode()?;
    log::info!("Received image of format: {format:?}");
    Ok(image)
}

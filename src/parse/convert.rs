//! Image → one-page PDF conversion for scanned bank statements.
//!
//! The bank-parse endpoints only take PDFs, so PNG/JPEG scans are
//! flattened to RGB and embedded on a single page sized to the image. The
//! result is a *derived* artifact written next to nothing else in the
//! request's staging directory — the source file is never touched.
//!
//! Decoding and PDF serialisation are CPU-bound; callers run this under
//! `spawn_blocking` (see [`crate::client`]).

use crate::error::DocumentAiError;
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{Image, ImageTransform, Mm, PdfDocument, Px};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolution at which image pixels map onto the PDF page.
const EMBED_DPI: f32 = 300.0;

/// Convert the image at `source` into a one-page RGB PDF under `dest_dir`.
///
/// The derived file keeps the source's full base name with `.pdf`
/// appended (`scan.png` → `scan.png.pdf`), which cannot collide with the
/// source even when both live in the same directory.
pub fn image_to_pdf(source: &Path, dest_dir: &Path) -> Result<PathBuf, DocumentAiError> {
    let decoded = image_crate::open(source).map_err(|e| DocumentAiError::ImageConversion {
        path: source.to_path_buf(),
        detail: e.to_string(),
    })?;
    // Flatten alpha and palette variants; the embedder expects plain RGB.
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let width = Mm::from(Px(rgb.width() as usize).into_pt(EMBED_DPI));
    let height = Mm::from(Px(rgb.height() as usize).into_pt(EMBED_DPI));

    let base = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    let out = dest_dir.join(format!("{base}.pdf"));

    let (doc, page, layer) = PdfDocument::new("bank statement", width, height, "page");
    let embedded = Image::from_dynamic_image(&rgb);
    embedded.add_to_layer(
        doc.get_page(page).get_layer(layer),
        ImageTransform {
            dpi: Some(EMBED_DPI),
            ..Default::default()
        },
    );

    let file = File::create(&out).map_err(|e| DocumentAiError::Io {
        path: out.clone(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| DocumentAiError::ImageConversion {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?;

    debug!("converted {} to {}", source.display(), out.display());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::image_crate::{ImageBuffer, Rgb};

    #[test]
    fn png_becomes_a_pdf_with_derived_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("scan.png");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(8, 8, Rgb([210u8, 40, 40]));
        img.save(&src).unwrap();

        let out = image_to_pdf(&src, dir.path()).unwrap();

        assert_eq!(out.file_name().unwrap().to_str().unwrap(), "scan.png.pdf");
        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF");
        // Source artifact untouched.
        assert!(src.exists());
    }

    #[test]
    fn derived_artifact_can_land_in_a_different_directory() {
        let src_dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("photo.jpg");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(4, 6, Rgb([10u8, 10, 200]));
        img.save(&src).unwrap();

        let out = image_to_pdf(&src, staging.path()).unwrap();
        assert!(out.starts_with(staging.path()));
        assert_eq!(out.file_name().unwrap().to_str().unwrap(), "photo.jpg.pdf");
    }

    #[test]
    fn unreadable_source_is_a_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("not_an_image.png");
        std::fs::write(&src, b"definitely not a png").unwrap();

        let err = image_to_pdf(&src, dir.path()).unwrap_err();
        assert!(matches!(err, DocumentAiError::ImageConversion { .. }));
    }
}

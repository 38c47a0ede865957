//! Image intake and client-side compression.
//!
//! Incoming files are sniffed and size-checked before they join the
//! selection; the selection itself is capped at five entries with earlier
//! picks winning. Each accepted file is downscaled and re-encoded once,
//! asynchronously, and the result is attributed back to the file through
//! its stable selection key so completion order can never scramble the
//! preview order.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use image::GenericImageView;
use thiserror::Error;

use api::{Attachment, MAX_ATTACHMENTS};

use crate::core::report::generate_id;
use crate::core::timing;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LANDSCAPE_WIDTH: u32 = 800;
const MAX_PORTRAIT_HEIGHT: u32 = 600;
const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("{name}: only JPG and PNG images are allowed")]
    UnsupportedType { name: String },
    #[error("{name} is too large. Max size is 5MB")]
    TooLarge { name: String },
    #[error("Error processing image {name}")]
    Undecodable { name: String },
}

/// A newly selected or dropped file, before validation.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One accepted file in the active form session.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    /// Stable key for attributing async compression results.
    pub key: u64,
    pub name: String,
    pub mime_type: String,
    /// Pre-compression size; this is what the 5 MiB cap applies to.
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
    pub preview: Option<CompressedImage>,
    /// Decode failed; kept out of the submission but visible in the UI.
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
    pub encoded_bytes: u64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImageSelection {
    files: Vec<SelectedImage>,
    next_key: u64,
}

impl ImageSelection {
    pub fn files(&self) -> &[SelectedImage] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Validates and merges newly picked files into the selection.
    ///
    /// Per-file policy, in order: reject anything that is not JPEG/PNG,
    /// reject anything over the size cap, then append survivors after the
    /// existing picks and truncate to five. Overflow beyond the cap is
    /// dropped silently. Returns the keys this call added that survived
    /// the cap (each needs exactly one compression pass; files from
    /// earlier batches already have one in flight) and the per-file
    /// rejections for the notification surface.
    pub fn admit(&mut self, candidates: Vec<FileCandidate>) -> (Vec<u64>, Vec<IntakeError>) {
        let mut admitted = Vec::new();
        let mut rejections = Vec::new();

        for candidate in candidates {
            let mime = match sniff_image_mime(&candidate.bytes) {
                Some(mime) => mime,
                None => {
                    rejections.push(IntakeError::UnsupportedType {
                        name: candidate.name,
                    });
                    continue;
                }
            };

            let size = candidate.bytes.len() as u64;
            if size > MAX_IMAGE_BYTES {
                rejections.push(IntakeError::TooLarge {
                    name: candidate.name,
                });
                continue;
            }

            self.next_key += 1;
            admitted.push(self.next_key);
            self.files.push(SelectedImage {
                key: self.next_key,
                name: candidate.name,
                mime_type: mime.to_string(),
                size_bytes: size,
                bytes: candidate.bytes,
                preview: None,
                failed: false,
            });
        }

        self.files.truncate(MAX_ATTACHMENTS);
        admitted.retain(|key| self.files.iter().any(|file| file.key == *key));

        (admitted, rejections)
    }

    /// Drops one entry by position. Remaining entries keep their order and
    /// are not re-validated.
    pub fn remove(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn bytes_for(&self, key: u64) -> Option<(String, String, Vec<u8>)> {
        self.files
            .iter()
            .find(|file| file.key == key)
            .map(|file| (file.name.clone(), file.mime_type.clone(), file.bytes.clone()))
    }

    /// Records a compression result for the file with `key`. Results for
    /// files that were removed in the meantime are dropped on the floor.
    pub fn attach_result(&mut self, key: u64, result: Result<CompressedImage, IntakeError>) {
        if let Some(file) = self.files.iter_mut().find(|file| file.key == key) {
            match result {
                Ok(compressed) => file.preview = Some(compressed),
                Err(_) => file.failed = true,
            }
        }
    }

    /// Builds the attachment list for submission: compressed files only,
    /// in selection order.
    pub fn attachments(&self) -> Vec<Attachment> {
        self.files
            .iter()
            .filter_map(|file| {
                file.preview.as_ref().map(|compressed| Attachment {
                    id: generate_id(),
                    name: file.name.clone(),
                    mime_type: compressed.mime_type.clone(),
                    size_bytes: file.size_bytes,
                    data_url: compressed.data_url.clone(),
                    captured_at: timing::now_rfc3339(),
                })
            })
            .collect()
    }
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match infer::get(bytes).map(|kind| kind.mime_type()) {
        Some("image/jpeg") => Some("image/jpeg"),
        Some("image/png") => Some("image/png"),
        _ => None,
    }
}

/// Target dimensions preserving aspect ratio: landscape (and square)
/// images cap the width at 800, portrait images cap the height at 600.
/// Never upscales.
pub fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width >= height {
        if width > MAX_LANDSCAPE_WIDTH {
            let scaled = (height as f64 * MAX_LANDSCAPE_WIDTH as f64 / width as f64).round() as u32;
            (MAX_LANDSCAPE_WIDTH, scaled.max(1))
        } else {
            (width, height)
        }
    } else if height > MAX_PORTRAIT_HEIGHT {
        let scaled = (width as f64 * MAX_PORTRAIT_HEIGHT as f64 / height as f64).round() as u32;
        (scaled.max(1), MAX_PORTRAIT_HEIGHT)
    } else {
        (width, height)
    }
}

/// Decodes, downscales and re-encodes one accepted image in its original
/// format (JPEG at quality 80). A decode failure only skips this file.
pub fn compress_bytes(name: &str, mime_type: &str, bytes: &[u8]) -> Result<CompressedImage, IntakeError> {
    let decoded = image::load_from_memory(bytes).map_err(|_| IntakeError::Undecodable {
        name: name.to_string(),
    })?;

    let (width, height) = decoded.dimensions();
    let (target_w, target_h) = target_dimensions(width, height);

    let resized = if (target_w, target_h) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_w, target_h, FilterType::Triangle)
    };

    let mut encoded = Vec::new();
    match mime_type {
        "image/jpeg" => {
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
            resized
                .write_with_encoder(encoder)
                .map_err(|_| IntakeError::Undecodable {
                    name: name.to_string(),
                })?;
        }
        _ => {
            resized
                .write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)
                .map_err(|_| IntakeError::Undecodable {
                    name: name.to_string(),
                })?;
        }
    }

    Ok(CompressedImage {
        mime_type: mime_type.to_string(),
        width: target_w,
        height: target_h,
        encoded_bytes: encoded.len() as u64,
        data_url: format!("data:{mime_type};base64,{}", BASE64.encode(&encoded)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 80, 40]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn candidate(name: &str, bytes: Vec<u8>) -> FileCandidate {
        FileCandidate {
            name: name.to_string(),
            bytes,
        }
    }

    #[test]
    fn landscape_caps_width_and_keeps_aspect() {
        assert_eq!(target_dimensions(1600, 1200), (800, 600));
        assert_eq!(target_dimensions(2000, 500), (800, 200));
    }

    #[test]
    fn portrait_caps_height_and_keeps_aspect() {
        assert_eq!(target_dimensions(1200, 1600), (450, 600));
        assert_eq!(target_dimensions(300, 1200), (150, 600));
    }

    #[test]
    fn small_images_are_never_upscaled() {
        assert_eq!(target_dimensions(640, 480), (640, 480));
        assert_eq!(target_dimensions(320, 590), (320, 590));
    }

    #[test]
    fn square_images_take_the_landscape_branch() {
        assert_eq!(target_dimensions(1000, 1000), (800, 800));
    }

    #[test]
    fn merge_keeps_earlier_picks_and_caps_at_five() {
        let mut selection = ImageSelection::default();

        let first: Vec<FileCandidate> = (0..3)
            .map(|i| candidate(&format!("a{i}.png"), png_bytes(4, 4)))
            .collect();
        selection.admit(first);
        assert_eq!(selection.len(), 3);

        let second: Vec<FileCandidate> = (0..4)
            .map(|i| candidate(&format!("b{i}.png"), png_bytes(4, 4)))
            .collect();
        let (_, rejections) = selection.admit(second);

        assert!(rejections.is_empty());
        assert_eq!(selection.len(), 5);
        let names: Vec<&str> = selection.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a0.png", "a1.png", "a2.png", "b0.png", "b1.png"]);
    }

    #[test]
    fn admit_reports_only_the_keys_it_added() {
        let mut selection = ImageSelection::default();

        // First batch still uncompressed when the second one arrives.
        let (first, _) = selection.admit(vec![
            candidate("a0.png", png_bytes(4, 4)),
            candidate("a1.png", png_bytes(4, 4)),
        ]);
        assert_eq!(first.len(), 2);

        let second_batch: Vec<FileCandidate> = (0..4)
            .map(|i| candidate(&format!("b{i}.png"), png_bytes(4, 4)))
            .collect();
        let (second, rejections) = selection.admit(second_batch);

        // Only the three new files that fit under the cap come back;
        // the first batch's keys are not handed out a second time.
        assert!(rejections.is_empty());
        assert_eq!(second.len(), 3);
        assert!(second.iter().all(|key| !first.contains(key)));
    }

    #[test]
    fn non_image_bytes_are_rejected_by_type() {
        let mut selection = ImageSelection::default();
        let (pending, rejections) =
            selection.admit(vec![candidate("notes.txt", b"just some text".to_vec())]);

        assert!(pending.is_empty());
        assert!(selection.is_empty());
        assert!(matches!(
            rejections.as_slice(),
            [IntakeError::UnsupportedType { name }] if name == "notes.txt"
        ));
    }

    #[test]
    fn oversized_images_are_rejected_by_size() {
        let mut selection = ImageSelection::default();
        // Valid PNG header followed by padding to push it over the cap.
        let mut bytes = png_bytes(4, 4);
        bytes.resize((MAX_IMAGE_BYTES + 1) as usize, 0);
        let (_, rejections) = selection.admit(vec![candidate("huge.png", bytes)]);

        assert!(selection.is_empty());
        assert!(matches!(
            rejections.as_slice(),
            [IntakeError::TooLarge { name }] if name == "huge.png"
        ));
    }

    #[test]
    fn removal_preserves_order_of_the_rest() {
        let mut selection = ImageSelection::default();
        selection.admit(
            (0..4)
                .map(|i| candidate(&format!("f{i}.png"), png_bytes(4, 4)))
                .collect(),
        );

        selection.remove(1);

        let names: Vec<&str> = selection.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["f0.png", "f2.png", "f3.png"]);
    }

    #[test]
    fn compression_downscales_and_reports_target_dimensions() {
        let compressed = compress_bytes("wide.png", "image/png", &png_bytes(1600, 1200)).unwrap();

        assert_eq!((compressed.width, compressed.height), (800, 600));
        assert_eq!(compressed.mime_type, "image/png");
        assert!(compressed.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn corrupt_image_surfaces_a_decode_error() {
        // PNG magic with a truncated body: sniffs as PNG, fails to decode.
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0; 32]);

        let err = compress_bytes("broken.png", "image/png", &bytes).unwrap_err();
        assert!(matches!(err, IntakeError::Undecodable { name } if name == "broken.png"));
    }

    #[test]
    fn results_attach_by_key_regardless_of_completion_order() {
        let mut selection = ImageSelection::default();
        let (pending, _) = selection.admit(vec![
            candidate("one.png", png_bytes(900, 300)),
            candidate("two.png", png_bytes(4, 4)),
        ]);
        assert_eq!(pending.len(), 2);

        // Complete the second file before the first.
        for key in pending.iter().rev() {
            let (name, mime, bytes) = selection.bytes_for(*key).unwrap();
            let result = compress_bytes(&name, &mime, &bytes);
            selection.attach_result(*key, result);
        }

        let attachments = selection.attachments();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].name, "one.png");
        assert_eq!(attachments[1].name, "two.png");
    }
}

mod controller;
pub use controller::{
    build_payload, local_fallback_report, perform_submission, validate_report_fields, FormFields,
    SubmissionOutcome,
};

mod intake;
pub use intake::{
    compress_bytes, target_dimensions, CompressedImage, FileCandidate, ImageSelection,
    IntakeError, SelectedImage, MAX_IMAGE_BYTES,
};

mod view;
pub use view::ReportForm;

//! Canonical report model re-exports plus client-side id generation.

use rand::Rng;

pub use api::{Attachment, NewReport, Report, ReportStatus, Reporter, MAX_ATTACHMENTS};

const ID_LEN: usize = 9;

/// Client-generated report/attachment id: an underscore followed by nine
/// random lowercase alphanumerics. Server-assigned ids are UUIDs and never
/// collide with this shape, so the two collections stay distinguishable.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_LEN)
        .map(|_| {
            let ch = rng.sample(rand::distributions::Alphanumeric) as char;
            ch.to_ascii_lowercase()
        })
        .collect();
    format!("_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_the_local_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 1 + ID_LEN);
        assert!(id.starts_with('_'));
        assert!(id[1..]
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_are_fresh() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}

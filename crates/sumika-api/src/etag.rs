//! Cache-validation tokens derived from entity identity and state

use sha2::{Digest, Sha256};
use sumika_core::Resource;

/// Hash a sequence of fields into a quoted strong validator
///
/// Fields are separated by a byte that cannot occur in ids or decimal
/// numbers, so ("ab", "c") and ("a", "bc") fingerprint differently.
fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0x1f]);
    }
    let digest = format!("{:x}", hasher.finalize());
    format!("\"{}\"", &digest[..32])
}

/// ETag for a resource: a pure function of (id, size)
pub fn resource_etag(resource: &Resource) -> String {
    fingerprint(&["resource", &resource.id, &resource.size.to_string()])
}

/// ETag for a container: a pure function of (id, member count)
pub fn container_etag(id: &str, member_count: usize) -> String {
    fingerprint(&["container", id, &member_count.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::Utc;

    fn create_test_resource(id: &str, size: usize) -> Resource {
        let now = Utc::now();
        Resource {
            id: id.to_string(),
            content_type: "application/ld+json".to_string(),
            data: Bytes::from(vec![b'x'; size]),
            size,
            checksum: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_resource_etag_is_stable() {
        let resource = create_test_resource("r1", 10);
        assert_eq!(resource_etag(&resource), resource_etag(&resource));
    }

    #[test]
    fn test_resource_etag_changes_with_size() {
        let a = create_test_resource("r1", 10);
        let b = create_test_resource("r1", 11);
        assert_ne!(resource_etag(&a), resource_etag(&b));
    }

    #[test]
    fn test_resource_etag_changes_with_id() {
        let a = create_test_resource("r1", 10);
        let b = create_test_resource("r2", 10);
        assert_ne!(resource_etag(&a), resource_etag(&b));
    }

    #[test]
    fn test_resource_etag_ignores_timestamps() {
        let mut a = create_test_resource("r1", 10);
        let b = create_test_resource("r1", 10);
        a.updated_at = a.updated_at + chrono::Duration::hours(1);
        assert_eq!(resource_etag(&a), resource_etag(&b));
    }

    #[test]
    fn test_container_etag_tracks_member_count() {
        assert_eq!(container_etag("c1", 3), container_etag("c1", 3));
        assert_ne!(container_etag("c1", 3), container_etag("c1", 4));
        assert_ne!(container_etag("c1", 3), container_etag("c2", 3));
    }

    #[test]
    fn test_etag_shape_is_quoted_hex() {
        let tag = container_etag("c1", 0);
        assert!(tag.starts_with('"') && tag.ends_with('"'));
        let inner = &tag[1..tag.len() - 1];
        assert_eq!(inner.len(), 32);
        assert!(inner.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        // concatenation-equal field splits still fingerprint apart
        assert_ne!(container_etag("c11", 1), container_etag("c1", 11));
    }
}

// ─── Offline Identity ───
// Locally-derived identity values; nothing here touches the network.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use uuid::{Builder, Variant, Version};

/// Derive the offline identity token for a username.
///
/// MD5 over `"OfflinePlayer:" + username`, stamped as an RFC 4122
/// version-3 UUID, rendered lowercase hyphenated. Deterministic within and
/// across processes; byte compatibility with any external offline-UUID
/// scheme is not contractual.
pub fn derive_offline_uuid(username: &str) -> String {
    let seed = format!("OfflinePlayer:{}", username);
    let digest: [u8; 16] = Md5::digest(seed.as_bytes()).into();

    Builder::from_bytes(digest)
        .with_variant(Variant::RFC4122)
        .with_version(Version::Md5)
        .into_uuid()
        .to_string()
}

/// Identity values substituted into game arguments for an offline launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineSession {
    pub username: String,
    pub uuid: String,
    pub access_token: String,
    pub user_type: String,
    pub user_properties: String,
}

impl OfflineSession {
    pub fn new(username: &str) -> Self {
        let username = username.trim();
        let username = if username.is_empty() {
            "Player"
        } else {
            username
        };

        Self {
            username: username.to_string(),
            uuid: derive_offline_uuid(username),
            access_token: "0".into(),
            user_type: "legacy".into(),
            user_properties: "{}".into(),
        }
    }
}

impl Default for OfflineSession {
    fn default() -> Self {
        Self::new("Player")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_username_always_yields_same_identity() {
        assert_eq!(derive_offline_uuid("Steve"), derive_offline_uuid("Steve"));
        assert_ne!(derive_offline_uuid("Steve"), derive_offline_uuid("Alex"));
        // Usernames are case-sensitive.
        assert_ne!(derive_offline_uuid("Steve"), derive_offline_uuid("steve"));
    }

    #[test]
    fn identity_is_uuid_formatted() {
        let uuid = derive_offline_uuid("Steve");
        let parsed = uuid::Uuid::parse_str(&uuid).unwrap();
        assert_eq!(parsed.get_variant(), Variant::RFC4122);
        assert_eq!(parsed.get_version(), Some(Version::Md5));
        assert_eq!(uuid, uuid.to_lowercase());
    }

    #[test]
    fn blank_usernames_fall_back_to_player() {
        let session = OfflineSession::new("   ");
        assert_eq!(session.username, "Player");
        assert_eq!(session.uuid, derive_offline_uuid("Player"));
        assert_eq!(session.access_token, "0");
        assert_eq!(session.user_type, "legacy");
        assert_eq!(session.user_properties, "{}");
    }
}

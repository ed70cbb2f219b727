//! Identifiers for events created by bcscal.
//!
//! Google Calendar accepts client-chosen event ids made of the base32hex
//! alphabet (`0-9`, `a-v`), 5 to 1024 characters long. Every id we create
//! starts with [`NAMESPACE`], which is how later runs tell our events apart
//! from everything else on the calendar.

use std::fmt;

use base32::Alphabet;
use uuid::Uuid;

/// Prefix carried by every event id bcscal creates.
pub const NAMESPACE: &str = "bcscal";

/// Maximum number of category characters folded into the id.
const FINGERPRINT_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId(String);

impl EventId {
    /// Create a fresh id for an event of `category_name`.
    pub fn generate(category_name: &str) -> Self {
        let suffix = base32::encode(
            Alphabet::Rfc4648Hex { padding: false },
            Uuid::new_v4().as_bytes(),
        )
        .to_ascii_lowercase();

        let id = format!("{NAMESPACE}{}{suffix}", fingerprint(category_name));
        tracing::debug!(%id, category = category_name, "generated event id");
        EventId(id)
    }

    /// Whether `id` was created by bcscal.
    pub fn is_self_owned(id: &str) -> bool {
        id.starts_with(NAMESPACE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Characters of `name` that are valid base32hex symbols, truncated.
fn fingerprint(name: &str) -> String {
    name.chars()
        .filter(|c| matches!(c, 'a'..='v' | '0'..='9'))
        .take(FINGERPRINT_LEN)
        .collect()
}

//! Session identifier generation.

use rand::RngCore;

/// Length of a session identifier in characters.
pub const SESSION_ID_LEN: usize = 40;

/// Generate a new session identifier.
///
/// Returns 40 lowercase hex characters built from 20 bytes of CSPRNG
/// output. 160 bits of entropy keeps identifiers unguessable and
/// collision-free at any realistic active-session count.
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_LEN / 2];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

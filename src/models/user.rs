use serde::Deserialize;

/// The current user's profile as returned by `/users/me`.
/// Fetched fresh on every profile visit; never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

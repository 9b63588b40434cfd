//! ============================================================================
//! Account Snapshot Fetcher - Profile components for one membership
//! ============================================================================

use tracing::info;

use crate::bungie::{decode, BungieFetch, ProfileResponse};
use crate::types::Result;

/// Components requested: 100 Profiles, 200 Characters, 205 CharacterEquipment,
/// 800 Collectibles (profile and character scope)
pub const PROFILE_COMPONENTS: &str = "100,200,205,800";

/// Which account to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRef {
    pub membership_type: i32,
    pub destiny_membership_id: String,
}

impl MembershipRef {
    pub fn new(membership_type: i32, destiny_membership_id: impl Into<String>) -> Self {
        Self {
            membership_type,
            destiny_membership_id: destiny_membership_id.into(),
        }
    }

    pub fn profile_path(&self) -> String {
        format!(
            "/Destiny2/{}/Profile/{}/",
            self.membership_type, self.destiny_membership_id
        )
    }
}

/// Fetch collectible state and equipment for the account.
/// Any non-success response surfaces as `UpstreamError`; nothing is retried.
pub async fn fetch_profile(
    fetch: &dyn BungieFetch,
    access_token: &str,
    membership: &MembershipRef,
) -> Result<ProfileResponse> {
    info!(
        "Fetching profile {}/{}",
        membership.membership_type, membership.destiny_membership_id
    );

    let value = fetch
        .get(
            &membership.profile_path(),
            access_token,
            &[("components", PROFILE_COMPONENTS)],
        )
        .await?;

    decode(value, "profile response")
}

//! Who is using the tool for the lifetime of one invocation.

use pickup_core::PickupRequest;

pub const ADMIN_USER: &str = "admin";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_name: Option<String>,
}

impl Session {
    /// Blank names count as logged out.
    pub fn start(user_name: Option<&str>) -> Self {
        let user_name = user_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Self { user_name }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn require_user(&self) -> anyhow::Result<&str> {
        self.user_name()
            .ok_or_else(|| anyhow::anyhow!("Enter your name with --user (or PICKUP_USER) to continue"))
    }

    pub fn is_admin(&self) -> bool {
        self.user_name() == Some(ADMIN_USER)
    }

    pub fn require_admin(&self) -> anyhow::Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            anyhow::bail!("Only the {ADMIN_USER} user can do that")
        }
    }

    /// The requester or the admin may change a pickup.
    pub fn can_manage(&self, pickup: &PickupRequest) -> bool {
        self.is_admin()
            || self
                .user_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(&pickup.user_name))
    }
}

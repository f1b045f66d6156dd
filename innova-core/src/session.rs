use innova_shared::Masked;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::CoreError;

/// Dashboard role of the signed-in user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    Resident,
    Employee,
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" | "ADMINISTRATOR" | "ADMINISTRADOR" => Ok(Role::Administrator),
            "RESIDENT" | "RESIDENTE" => Ok(Role::Resident),
            "EMPLOYEE" | "EMPLEADO" => Ok(Role::Employee),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

/// Explicit context for the current user, passed down to every workflow and
/// collaborator call instead of living in a global.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub display_name: Masked<String>,
    pub role: Role,
    pub building_id: Option<String>,
    /// Bearer token forwarded to the backend.
    pub access_token: Option<Masked<String>>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: Masked(String::new()),
            role,
            building_id: None,
            access_token: None,
        }
    }

    pub fn with_building(mut self, building_id: impl Into<String>) -> Self {
        self.building_id = Some(building_id.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Masked(token.into()));
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Masked(name.into());
        self
    }

    /// Whether this user may act on a record owned by `owner_id`.
    /// Administrators act on anything; residents only on their own records.
    pub fn may_act_for(&self, owner_id: Option<&str>) -> bool {
        match self.role {
            Role::Administrator => true,
            Role::Resident => owner_id == Some(self.user_id.as_str()),
            Role::Employee => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("residente".parse::<Role>().unwrap(), Role::Resident);
        assert_eq!("Employee".parse::<Role>().unwrap(), Role::Employee);
        assert!("GUEST".parse::<Role>().is_err());
    }

    #[test]
    fn test_resident_acts_only_for_self() {
        let session = Session::new("u-1", Role::Resident);
        assert!(session.may_act_for(Some("u-1")));
        assert!(!session.may_act_for(Some("u-2")));
        assert!(!session.may_act_for(None));

        let admin = Session::new("a-1", Role::Administrator);
        assert!(admin.may_act_for(Some("u-2")));
        assert!(admin.may_act_for(None));

        let employee = Session::new("e-1", Role::Employee);
        assert!(!employee.may_act_for(Some("e-1")));
    }

    #[test]
    fn test_token_is_masked_in_debug() {
        let session = Session::new("u-1", Role::Resident).with_token("secret-token");
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}

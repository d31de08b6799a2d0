use serde::{Deserialize, Serialize};

use crate::call::Id;

/// What a user is allowed to do.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Operator,
    Supervisor,
    Admin,
}

impl Role {
    pub fn may_download_recordings(self) -> bool {
        matches!(self, Role::Supervisor | Role::Admin)
    }
}

/// A member of staff.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(id: Id, name: impl Into<String>, role: Role) -> Self {
        User {
            id,
            name: name.into(),
            role,
        }
    }
}

/// The fixed roster of users.
#[derive(Clone, Debug)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    pub fn new(users: Vec<User>) -> Self {
        Directory { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: Id) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Resolves the raw value of the identity header. Anything that is
    /// not the ID of a known user resolves to nobody.
    pub fn resolve(&self, header: Option<&str>) -> Option<User> {
        header
            .and_then(|raw| raw.trim().parse::<Id>().ok())
            .and_then(|id| self.find(id))
            .cloned()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Directory::new(vec![
            User::new(1, "Operator One", Role::Operator),
            User::new(2, "Supervisor Sue", Role::Supervisor),
            User::new(3, "Admin Adam", Role::Admin),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_users_only() {
        let directory = Directory::default();

        assert_eq!(directory.resolve(Some("2")).map(|u| u.role), Some(Role::Supervisor));
        assert_eq!(directory.resolve(Some(" 3 ")).map(|u| u.name), Some("Admin Adam".to_owned()));
        assert_eq!(directory.resolve(Some("4")), None);
        assert_eq!(directory.resolve(Some("admin")), None);
        assert_eq!(directory.resolve(Some("")), None);
        assert_eq!(directory.resolve(None), None);
    }

    #[test]
    fn only_supervisors_and_admins_download() {
        assert!(!Role::Operator.may_download_recordings());
        assert!(Role::Supervisor.may_download_recordings());
        assert!(Role::Admin.may_download_recordings());
    }

    #[test]
    fn roles_serialize_in_lowercase() {
        let json = serde_json::to_string(&User::new(1, "Operator One", Role::Operator)).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Operator One","role":"operator"}"#);
    }
}

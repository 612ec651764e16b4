use serde::{Deserialize, Serialize};

/// Closed set of principal roles.
///
/// Exactly one role per principal at a time. Adding a role means adding
/// explicit policy rows for it; nothing is granted implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    SecondaryPrincipal,
    Teacher,
    Parent,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::SecondaryPrincipal,
        Role::Teacher,
        Role::Parent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::SecondaryPrincipal => "secondary_principal",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
        }
    }

    /// Whether the role is the platform-wide one (no home tenant).
    pub fn is_platform(self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "secondary_principal" => Ok(Role::SecondaryPrincipal),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn role_string_roundtrip() {
        for role in Role::ALL {
            let as_str = role.as_str();
            assert_eq!(<Role as std::str::FromStr>::from_str(as_str).ok(), Some(role));
            assert_eq!(role.to_string(), as_str);
        }
    }

    #[test]
    fn role_from_str_invalid() {
        assert!(<Role as std::str::FromStr>::from_str("principal").is_err());
    }

    #[test]
    fn only_super_admin_is_platform() {
        for role in Role::ALL {
            assert_eq!(role.is_platform(), role == Role::SuperAdmin);
        }
    }
}

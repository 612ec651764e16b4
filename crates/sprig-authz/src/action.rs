use serde::{Deserialize, Serialize};

/// Closed set of actions a caller can request on a resource.
///
/// `Assign` and `Invite` are resource-family variants; for policy lookup
/// they fall back to the `Update` class unless the table lists them
/// explicitly (see [`Action::class`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Assign,
    Invite,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Assign,
        Action::Invite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Assign => "assign",
            Action::Invite => "invite",
        }
    }

    /// The policy class an action folds into when no explicit rule exists.
    pub fn class(self) -> Action {
        match self {
            Action::Assign | Action::Invite => Action::Update,
            other => other,
        }
    }

    /// Whether the action can target a resource that does not exist yet.
    pub fn is_create(self) -> bool {
        matches!(self, Action::Create | Action::Invite)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Action::Read),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "assign" => Ok(Action::Assign),
            "invite" => Ok(Action::Invite),
            _ => Err(()),
        }
    }
}

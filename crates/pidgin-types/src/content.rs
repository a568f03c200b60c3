use serde::{Deserialize, Serialize};

use crate::part::Part;

/// Speaker attached to a [`Content`] block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// An ordered sequence of parts, optionally attributed to a role.
///
/// This is both the body of an `asset`/`input` segment going into the
/// encoder and the value the decoder hands back (always with
/// `role: user`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Content {
    /// Content with the given parts and no role.
    #[must_use]
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts, role: None }
    }

    /// Content attributed to the user, the shape the decoder produces.
    #[must_use]
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            parts,
            role: Some(Role::User),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

//! Users

use serde::{Deserialize, Serialize};

/// A sales representative's customer account, as listed in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Directory identifier; owns stored orders.
    pub id: String,

    /// Display name, printed in exports.
    pub name: String,

    /// Role label.
    #[serde(default)]
    pub role: String,

    /// Initials shown in place of an avatar.
    #[serde(default)]
    pub avatar_initials: String,

    /// Contact email.
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Create a user with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            id: id.into(),
            avatar_initials: initials(&name),
            name,
            role: String::new(),
            email: String::new(),
        }
    }
}

/// First letter of the first two words, uppercased.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_initials() {
        let user = User::new("U1", "ana maría lópez");

        assert_eq!(user.avatar_initials, "AM");
    }

    #[test]
    fn initials_of_single_word() {
        assert_eq!(initials("Ana"), "A");
        assert_eq!(initials(""), "");
    }
}

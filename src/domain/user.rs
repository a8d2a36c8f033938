use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A registered user as returned by the backend.
/// Identity is the numeric id; two users are equal when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    #[serde(default)]
    pub default_currency: String,
}

impl User {
    pub fn new(id: UserId, full_name: impl Into<String>, default_currency: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            default_currency: default_currency.into(),
        }
    }

    /// First character of the full name, used as a compact avatar.
    pub fn initial(&self) -> Option<char> {
        self.full_name.chars().next()
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Parse a comma-separated list of user ids such as "2, 3,4".
/// Entries that are not positive integers are dropped.
pub fn parse_shared_with(input: &str) -> Vec<UserId> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse::<UserId>().ok())
        .filter(|id| *id > 0)
        .collect()
}

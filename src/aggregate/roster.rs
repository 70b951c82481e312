//! Account rosters: who commented, who tagged, who was tagged, followers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_json::{json, Value};

use crate::domain::{Comment, IdentityKey, Post, Profile, UserRef};
use crate::report::{Line, Operation, Render};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub user: UserRef,
    /// Occurrences of this account in the input, before deduplication.
    pub counter: usize,
}

/// Distinct accounts with their occurrence counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub operation: Operation,
    pub entries: Vec<RosterEntry>,
}

/// Collapse repeated accounts into one entry each.
///
/// The first occurrence supplies the displayed username and full name.
/// References with neither id nor username cannot be told apart and are
/// dropped. Entries are ordered by counter, highest first, ties in
/// first-seen order.
pub fn dedup(users: impl IntoIterator<Item = UserRef>) -> Vec<RosterEntry> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut entries: Vec<RosterEntry> = Vec::new();

    for user in users {
        let key = user.identity_key();
        if key == IdentityKey::Username(String::new()) {
            continue;
        }
        match index.entry(key) {
            Entry::Occupied(slot) => entries[*slot.get()].counter += 1,
            Entry::Vacant(slot) => {
                slot.insert(entries.len());
                entries.push(RosterEntry { user, counter: 1 });
            }
        }
    }

    entries.sort_by(|a, b| b.counter.cmp(&a.counter));
    entries
}

/// Everyone who commented on any of the target's posts.
pub fn commenters<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Roster {
    Roster {
        operation: Operation::WhoCommented,
        entries: dedup(comments.into_iter().map(|c| c.author.clone())),
    }
}

/// Owners of posts in which the target is tagged.
pub fn taggers(owners: Vec<UserRef>) -> Roster {
    Roster {
        operation: Operation::WhoTagged,
        entries: dedup(owners),
    }
}

/// Accounts the target tagged in its own posts.
pub fn tagged_by_user(posts: &[Post]) -> Roster {
    Roster {
        operation: Operation::Tagged,
        entries: dedup(posts.iter().flat_map(|p| p.tagged_users.iter().cloned())),
    }
}

impl Roster {
    fn key(&self) -> &'static str {
        match self.operation {
            Operation::WhoCommented => "users_who_commented",
            Operation::WhoTagged => "users_who_tagged",
            _ => "tagged",
        }
    }

    pub fn total_occurrences(&self) -> usize {
        self.entries.iter().map(|e| e.counter).sum()
    }
}

impl Render for Roster {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        let mut lines = vec![Line::header(format!(
            "{} distinct users, {} occurrences",
            self.entries.len(),
            self.total_occurrences()
        ))];
        lines.extend(self.entries.iter().map(|e| {
            Line::plain(format!(
                "{}\t{}\t{}\t{}",
                e.user.id_display(),
                e.user.username,
                e.user.full_name,
                e.counter
            ))
        }));
        lines
    }

    fn dump(&self) -> Value {
        let entries: Vec<Value> = self
            .entries
            .iter()
            .map(|e| {
                json!({
                    "id": e.user.id,
                    "username": e.user.username,
                    "full_name": e.user.full_name,
                    "counter": e.counter,
                })
            })
            .collect();
        json!({ self.key(): entries })
    }
}

/// Followers or followings exactly as the pages delivered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserList {
    pub operation: Operation,
    pub users: Vec<UserRef>,
}

pub fn user_list(operation: Operation, users: Vec<UserRef>) -> UserList {
    UserList { operation, users }
}

impl UserList {
    fn key(&self) -> &'static str {
        match self.operation {
            Operation::Followings => "followings",
            _ => "followers",
        }
    }
}

impl Render for UserList {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        let mut lines = vec![Line::header(format!("{} {}", self.users.len(), self.key()))];
        lines.extend(self.users.iter().map(|u| {
            Line::plain(format!("{}\t{}\t{}", u.id_display(), u.username, u.full_name))
        }));
        lines
    }

    fn dump(&self) -> Value {
        let users: Vec<Value> = self
            .users
            .iter()
            .map(|u| json!({ "id": u.id, "username": u.username, "full_name": u.full_name }))
            .collect();
        json!({ self.key(): users })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    PhoneNumber,
}

impl ContactField {
    fn of(self, profile: &Profile) -> Option<&str> {
        match self {
            ContactField::Email => profile.public_email.as_deref(),
            ContactField::PhoneNumber => profile.contact_phone_number.as_deref(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ContactField::Email => "email",
            ContactField::PhoneNumber => "phone_number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub user: UserRef,
    pub value: String,
}

/// Roster members that expose the requested contact field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactList {
    pub operation: Operation,
    pub field: ContactField,
    pub contacts: Vec<Contact>,
}

pub fn contacts(operation: Operation, details: Vec<(UserRef, Profile)>) -> ContactList {
    let field = match operation {
        Operation::FollowersPhone | Operation::FollowingsPhone => ContactField::PhoneNumber,
        _ => ContactField::Email,
    };

    let contacts = details
        .into_iter()
        .filter_map(|(user, profile)| {
            let value = field.of(&profile)?.to_string();
            Some(Contact { user, value })
        })
        .collect();

    ContactList {
        operation,
        field,
        contacts,
    }
}

impl ContactList {
    fn key(&self) -> String {
        let side = match self.operation {
            Operation::FollowingsEmail | Operation::FollowingsPhone => "followings",
            _ => "followers",
        };
        format!("{}_{}", side, self.field.name())
    }
}

impl Render for ContactList {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        self.contacts
            .iter()
            .map(|c| {
                Line::plain(format!(
                    "{}\t{}\t{}\t{}",
                    c.user.id_display(),
                    c.user.username,
                    c.user.full_name,
                    c.value
                ))
            })
            .collect()
    }

    fn dump(&self) -> Value {
        let field = self.field.name();
        let entries: Vec<Value> = self
            .contacts
            .iter()
            .map(|c| {
                json!({
                    "id": c.user.id,
                    "username": c.user.username,
                    "full_name": c.user.full_name,
                    field: c.value,
                })
            })
            .collect();
        json!({ self.key(): entries })
    }
}

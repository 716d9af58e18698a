use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_HELPER_SHARE, DEFAULT_PILOT_SHARE},
    errors::{require, AllocationError, Result},
    percent::{clamp_percent, normalize},
    state::{Participant, Role},
};

/// Share handed to a participant when it joins the roster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShareDefaults {
    pub pilot: f64,
    pub helper: f64,
}

impl Default for ShareDefaults {
    fn default() -> Self {
        Self {
            pilot: DEFAULT_PILOT_SHARE,
            helper: DEFAULT_HELPER_SHARE,
        }
    }
}

impl ShareDefaults {
    pub fn for_role(&self, role: Role) -> f64 {
        match role {
            Role::Pilot => self.pilot,
            Role::Helper => self.helper,
        }
    }
}

/// Ordered set of participants for one operation
///
/// A name may appear at most once per role. Edits to one entry never touch
/// the others, and insertion order is kept for display and persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    participants: Vec<Participant>,
    #[serde(skip)]
    defaults: ShareDefaults,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: ShareDefaults) -> Self {
        Self {
            participants: Vec::new(),
            defaults,
        }
    }

    pub fn defaults(&self) -> ShareDefaults {
        self.defaults
    }

    /// Appends a participant with the role's default share
    pub fn add(&mut self, name: &str, role: Role) -> Result<&Participant> {
        let share = self.defaults.for_role(role);
        self.insert(name, role, share)
    }

    /// Appends a participant with an explicit share (clamped into [0, 100])
    pub fn insert(&mut self, name: &str, role: Role, share_percent: f64) -> Result<&Participant> {
        let name = name.trim();

        // No blank names
        require!(!name.is_empty(), AllocationError::EmptyParticipantName);

        // No duplicates within a role
        require!(
            self.position(name, role).is_none(),
            AllocationError::DuplicateParticipant {
                name: name.to_string(),
                role,
            }
        );

        self.participants.push(Participant {
            name: name.to_string(),
            role,
            share_percent: clamp_percent(share_percent),
        });

        let last = self.participants.len() - 1;
        Ok(&self.participants[last])
    }

    /// Removes the matching entry; absent entries are not an error
    pub fn remove(&mut self, name: &str, role: Role) -> Option<Participant> {
        let index = self.position(name.trim(), role)?;
        Some(self.participants.remove(index))
    }

    /// Normalizes `raw_percent` and stores it as the entry's share
    /// Returns the stored share, or None when no such participant exists
    pub fn set_share(&mut self, name: &str, role: Role, raw_percent: &str) -> Option<f64> {
        self.set_share_percent(name, role, normalize(raw_percent))
    }

    pub fn set_share_percent(&mut self, name: &str, role: Role, percent: f64) -> Option<f64> {
        let index = self.position(name.trim(), role)?;
        let share = clamp_percent(percent);
        self.participants[index].share_percent = share;
        Some(share)
    }

    /// Sum of every participant share, unclamped
    pub fn total_share(&self) -> f64 {
        self.participants.iter().map(|p| p.share_percent).sum()
    }

    pub fn get(&self, name: &str, role: Role) -> Option<&Participant> {
        self.position(name.trim(), role).map(|i| &self.participants[i])
    }

    pub fn contains(&self, name: &str, role: Role) -> bool {
        self.get(name, role).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(move |p| p.role == role)
    }

    /// Names for one role, in roster order
    pub fn names(&self, role: Role) -> Vec<String> {
        self.by_role(role).map(|p| p.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn position(&self, name: &str, role: Role) -> Option<usize> {
        self.participants
            .iter()
            .position(|p| p.role == role && p.name == name)
    }
}

//! Role registry.
//!
//! The five pipeline roles form a closed set. Display names are registered
//! once here; the extractor resolves records through this table so that a
//! renamed agent never requires touching extraction logic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed category of pipeline output.
///
/// Variants are declared in canonical pipeline order, which is also the
/// derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Requirements intake (business analyst)
    Intake,
    /// Technical architecture
    Architect,
    /// Quality and risk audit
    Quality,
    /// Technical synthesis for the executive summary
    Synthesis,
    /// Project management roadmap
    Manager,
}

/// Display name to role association. Exact, case-sensitive lookups only.
const REGISTRY: [(&str, Role); Role::COUNT] = [
    ("Requirements Intake Specialist", Role::Intake),
    ("Technical Architect", Role::Architect),
    ("Senior Quality Auditor", Role::Quality),
    ("Technical Synthesizer", Role::Synthesis),
    ("Project Manager", Role::Manager),
];

/// A display name that does not belong to any registered role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown agent role: {name:?} is not a registered role display name")]
pub struct UnknownRole {
    /// The display name that failed to resolve
    pub name: String,
}

impl Role {
    /// Number of roles.
    pub const COUNT: usize = 5;

    /// All roles in canonical pipeline order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Intake, Self::Architect, Self::Quality, Self::Synthesis, Self::Manager];

    /// Short identifier used in maps, config and serialized output.
    pub fn key(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Architect => "architect",
            Self::Quality => "quality",
            Self::Synthesis => "synthesis",
            Self::Manager => "manager",
        }
    }

    /// Human-readable display name of the agent that plays this role.
    pub fn display_name(self) -> &'static str {
        REGISTRY[self.index()].0
    }

    /// Position in canonical pipeline order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolve a role from an agent display name.
    pub fn from_display_name(name: &str) -> Result<Self, UnknownRole> {
        REGISTRY
            .iter()
            .find(|(display, _)| *display == name)
            .map(|(_, role)| *role)
            .ok_or_else(|| UnknownRole { name: name.to_string() })
    }

    /// Parse a short identifier such as `intake`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A total mapping from every [`Role`] to a value.
///
/// There is no way to build a `RoleMap` that lacks an entry, so lookups
/// never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMap<T> {
    values: [T; Role::COUNT],
}

impl<T> RoleMap<T> {
    /// Build a map by evaluating `f` for each role in canonical order.
    pub fn from_fn(mut f: impl FnMut(Role) -> T) -> Self {
        Self { values: Role::ALL.map(&mut f) }
    }

    /// Value bound to `role`.
    pub fn get(&self, role: Role) -> &T {
        &self.values[role.index()]
    }

    /// Mutable value bound to `role`.
    pub fn get_mut(&mut self, role: Role) -> &mut T {
        &mut self.values[role.index()]
    }

    /// Replace the value bound to `role`, returning the previous one.
    pub fn insert(&mut self, role: Role, value: T) -> T {
        std::mem::replace(&mut self.values[role.index()], value)
    }

    /// Iterate entries in canonical pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().zip(self.values.iter())
    }

    /// Transform every value, keeping the role binding.
    pub fn map<U>(self, mut f: impl FnMut(Role, T) -> U) -> RoleMap<U> {
        let [intake, architect, quality, synthesis, manager] = self.values;
        RoleMap {
            values: [
                f(Role::Intake, intake),
                f(Role::Architect, architect),
                f(Role::Quality, quality),
                f(Role::Synthesis, synthesis),
                f(Role::Manager, manager),
            ],
        }
    }
}

impl<T: Default> Default for RoleMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> std::ops::Index<Role> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: Role) -> &T {
        self.get(role)
    }
}

impl<T: Serialize> Serialize for RoleMap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Role::COUNT))?;
        for (role, value) in self.iter() {
            map.serialize_entry(role.key(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_display_name(role.display_name()), Ok(role));
        }
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        assert!(Role::from_display_name("technical architect").is_err());
        assert!(Role::from_display_name("Technical Architect ").is_err());
        assert!(Role::from_display_name("Senior Technical Architect").is_err());
        assert!(Role::from_display_name("Architect").is_err());

        let err = Role::from_display_name("Unknown Agent").unwrap_err();
        assert_eq!(err.name, "Unknown Agent");
        assert!(err.to_string().contains("Unknown Agent"));
    }

    #[test]
    fn test_canonical_order() {
        let keys: Vec<_> = Role::ALL.iter().map(|r| r.key()).collect();
        assert_eq!(keys, ["intake", "architect", "quality", "synthesis", "manager"]);
        assert!(Role::Intake < Role::Manager);
        assert_eq!(Role::Synthesis.index(), 3);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Role::from_key("quality"), Some(Role::Quality));
        assert_eq!(Role::from_key("Quality"), None);
        assert_eq!(Role::Manager.to_string(), "manager");
    }

    #[test]
    fn test_role_map_is_total() {
        let mut map = RoleMap::from_fn(|role| role.index() * 10);
        assert_eq!(map[Role::Quality], 20);

        let previous = map.insert(Role::Quality, 7);
        assert_eq!(previous, 20);
        assert_eq!(*map.get(Role::Quality), 7);

        *map.get_mut(Role::Manager) += 1;
        assert_eq!(map[Role::Manager], 41);

        let labels = map.map(|role, v| format!("{role}={v}"));
        let collected: Vec<_> = labels.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(
            collected,
            ["intake=0", "architect=10", "quality=7", "synthesis=30", "manager=41"]
        );
    }

    #[test]
    fn test_role_map_serializes_with_keys() {
        let map = RoleMap::from_fn(|role| role.display_name());
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["intake"], "Requirements Intake Specialist");
        assert_eq!(json["manager"], "Project Manager");
    }
}

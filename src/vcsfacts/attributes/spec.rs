//! Attribute specifications and registry.
//!
//! This module defines the schema for attributes: their user-facing names,
//! what kind of value they hold, and which other attributes must be looked up
//! to compute them.

use crate::error::{FactsError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One fact the engine can report.
///
/// The discriminant doubles as the bit position inside
/// [`AttributeSet`](super::AttributeSet) and as the index into [`ATTRIBUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Vcs,
    RevisionShort,
    Branch,
    Tag,
    State,
    HasRemote,
    CommitsAhead,
    CommitsBehind,
    HasStash,
    StashCount,
    IsDirty,
    HasAdded,
    Added,
    HasModified,
    Modified,
    HasDeleted,
    Deleted,
    HasRenamed,
    Renamed,
    HasUnmerged,
    Unmerged,
    HasUntracked,
}

impl Attribute {
    /// Every attribute, in registry order.
    pub const ALL: [Attribute; 22] = [
        Attribute::Vcs,
        Attribute::RevisionShort,
        Attribute::Branch,
        Attribute::Tag,
        Attribute::State,
        Attribute::HasRemote,
        Attribute::CommitsAhead,
        Attribute::CommitsBehind,
        Attribute::HasStash,
        Attribute::StashCount,
        Attribute::IsDirty,
        Attribute::HasAdded,
        Attribute::Added,
        Attribute::HasModified,
        Attribute::Modified,
        Attribute::HasDeleted,
        Attribute::Deleted,
        Attribute::HasRenamed,
        Attribute::Renamed,
        Attribute::HasUnmerged,
        Attribute::Unmerged,
        Attribute::HasUntracked,
    ];

    pub fn spec(self) -> &'static AttributeSpec {
        &ATTRIBUTES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> AttributeKind {
        self.spec().kind
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = FactsError;

    fn from_str(s: &str) -> Result<Self> {
        BY_NAME
            .get(s.trim())
            .copied()
            .ok_or_else(|| FactsError::UnknownAttribute(s.to_string()))
    }
}

/// The kind of value an attribute holds.
///
/// Determines the attribute's zero value, which is what the normalizer
/// resets unrequested attributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Free text (e.g., `branch`, `tag`). Zero is the empty string.
    Text,

    /// Closed set of values (e.g., `vcs`, `state`). Zero is the "none" variant.
    Enum,

    /// Boolean (e.g., `dirty`, `has-remote`). Zero is `false`.
    Flag,

    /// Non-negative counter (e.g., `added`, `ahead`). Zero is `0`.
    Count,
}

/// Specification for a single attribute.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub attr: Attribute,

    /// The attribute name used on the command line and in output
    pub name: &'static str,

    pub kind: AttributeKind,

    /// Attributes that must also be looked up whenever this one is.
    ///
    /// This is the dependency table consumed by the resolver. It only lists
    /// what is strictly required to compute the attribute.
    pub implies: &'static [Attribute],
}

impl AttributeSpec {
    const fn new(attr: Attribute, name: &'static str, kind: AttributeKind) -> Self {
        Self {
            attr,
            name,
            kind,
            implies: &[],
        }
    }

    const fn implies(mut self, attrs: &'static [Attribute]) -> Self {
        self.implies = attrs;
        self
    }
}

/// Registry of all attributes.
///
/// Entries are in [`Attribute`] declaration order so lookups are a plain index.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new(Attribute::Vcs, "vcs", AttributeKind::Enum),
    AttributeSpec::new(Attribute::RevisionShort, "revision", AttributeKind::Text),
    AttributeSpec::new(Attribute::Branch, "branch", AttributeKind::Text),
    AttributeSpec::new(Attribute::Tag, "tag", AttributeKind::Text),
    AttributeSpec::new(Attribute::State, "state", AttributeKind::Enum),
    // upstream is resolved relative to the current branch
    AttributeSpec::new(Attribute::HasRemote, "has-remote", AttributeKind::Flag)
        .implies(&[Attribute::Branch]),
    AttributeSpec::new(Attribute::CommitsAhead, "ahead", AttributeKind::Count)
        .implies(&[Attribute::HasRemote]),
    AttributeSpec::new(Attribute::CommitsBehind, "behind", AttributeKind::Count)
        .implies(&[Attribute::HasRemote]),
    AttributeSpec::new(Attribute::HasStash, "has-stash", AttributeKind::Flag),
    AttributeSpec::new(Attribute::StashCount, "stashes", AttributeKind::Count)
        .implies(&[Attribute::HasStash]),
    // IsDirty implies no Has* flag, see engine::plan
    AttributeSpec::new(Attribute::IsDirty, "dirty", AttributeKind::Flag),
    AttributeSpec::new(Attribute::HasAdded, "has-added", AttributeKind::Flag),
    AttributeSpec::new(Attribute::Added, "added", AttributeKind::Count)
        .implies(&[Attribute::HasAdded]),
    AttributeSpec::new(Attribute::HasModified, "has-modified", AttributeKind::Flag),
    AttributeSpec::new(Attribute::Modified, "modified", AttributeKind::Count)
        .implies(&[Attribute::HasModified]),
    AttributeSpec::new(Attribute::HasDeleted, "has-deleted", AttributeKind::Flag),
    AttributeSpec::new(Attribute::Deleted, "deleted", AttributeKind::Count)
        .implies(&[Attribute::HasDeleted]),
    AttributeSpec::new(Attribute::HasRenamed, "has-renamed", AttributeKind::Flag),
    AttributeSpec::new(Attribute::Renamed, "renamed", AttributeKind::Count)
        .implies(&[Attribute::HasRenamed]),
    AttributeSpec::new(Attribute::HasUnmerged, "has-unmerged", AttributeKind::Flag),
    AttributeSpec::new(Attribute::Unmerged, "unmerged", AttributeKind::Count)
        .implies(&[Attribute::HasUnmerged]),
    AttributeSpec::new(Attribute::HasUntracked, "has-untracked", AttributeKind::Flag),
];

static BY_NAME: Lazy<HashMap<&'static str, Attribute>> =
    Lazy::new(|| ATTRIBUTES.iter().map(|spec| (spec.name, spec.attr)).collect());

/// Look up an attribute spec by its user-facing name.
pub fn get_spec(name: &str) -> Option<&'static AttributeSpec> {
    name.parse::<Attribute>().ok().map(Attribute::spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_in_declaration_order() {
        assert_eq!(ATTRIBUTES.len(), Attribute::ALL.len());
        for (i, attr) in Attribute::ALL.iter().enumerate() {
            assert_eq!(ATTRIBUTES[i].attr, *attr);
            assert_eq!(*attr as usize, i);
        }
    }

    #[test]
    fn names_are_unique() {
        assert_eq!(BY_NAME.len(), ATTRIBUTES.len());
    }

    #[test]
    fn parse_known_names() {
        assert_eq!("branch".parse::<Attribute>().unwrap(), Attribute::Branch);
        assert_eq!(" dirty ".parse::<Attribute>().unwrap(), Attribute::IsDirty);
        assert_eq!("stashes".parse::<Attribute>().unwrap(), Attribute::StashCount);
        assert_eq!(
            "has-untracked".parse::<Attribute>().unwrap(),
            Attribute::HasUntracked
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "bookmark".parse::<Attribute>().unwrap_err();
        assert!(matches!(err, FactsError::UnknownAttribute(ref name) if name == "bookmark"));
        assert!(get_spec("bookmark").is_none());
    }

    #[test]
    fn counts_imply_their_flag() {
        let spec = get_spec("added").unwrap();
        assert_eq!(spec.kind, AttributeKind::Count);
        assert_eq!(spec.implies, &[Attribute::HasAdded]);
    }

    #[test]
    fn dirty_implies_nothing() {
        assert!(Attribute::IsDirty.spec().implies.is_empty());
        assert_eq!(Attribute::IsDirty.kind(), AttributeKind::Flag);
    }

    #[test]
    fn display_uses_registry_name() {
        assert_eq!(Attribute::CommitsAhead.to_string(), "ahead");
        assert_eq!(Attribute::RevisionShort.to_string(), "revision");
    }
}

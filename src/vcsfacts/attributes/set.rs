//! Fixed-schema attribute sets.
//!
//! An [`AttributeSet`] plays three roles during one invocation: the caller's
//! wanted set, the resolved lookup set, and (implicitly, through non-zero
//! values) what was found.

use super::Attribute;
use crate::error::Result;
use std::fmt;

/// A set of attributes, stored as one bit per [`Attribute`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet(u32);

impl AttributeSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self::from_iter(Attribute::ALL)
    }

    /// Parse a list of user-facing attribute names (e.g. `["branch", "dirty"]`).
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter(|name| !name.as_ref().trim().is_empty())
            .map(|name| name.as_ref().parse::<Attribute>())
            .collect()
    }

    const fn bit(attr: Attribute) -> u32 {
        1 << attr as u32
    }

    pub fn contains(&self, attr: Attribute) -> bool {
        self.0 & Self::bit(attr) != 0
    }

    pub fn contains_any(&self, attrs: &[Attribute]) -> bool {
        attrs.iter().any(|attr| self.contains(*attr))
    }

    /// Adds `attr`, returning `true` if it was not already present.
    pub fn insert(&mut self, attr: Attribute) -> bool {
        let added = !self.contains(attr);
        self.0 |= Self::bit(attr);
        added
    }

    pub fn remove(&mut self, attr: Attribute) {
        self.0 &= !Self::bit(attr);
    }

    /// Sets membership of `attr` from a boolean.
    pub fn set(&mut self, attr: Attribute, present: bool) {
        if present {
            self.insert(attr);
        } else {
            self.remove(attr);
        }
    }

    pub fn with(mut self, attr: Attribute) -> Self {
        self.insert(attr);
        self
    }

    pub fn union(self, other: AttributeSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates members in registry order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL
            .into_iter()
            .filter(move |attr| self.contains(*attr))
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut set = Self::empty();
        for attr in iter {
            set.insert(attr);
        }
        set
    }
}

impl<const N: usize> From<[Attribute; N]> for AttributeSet {
    fn from(attrs: [Attribute; N]) -> Self {
        attrs.into_iter().collect()
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Attribute::name)).finish()
    }
}

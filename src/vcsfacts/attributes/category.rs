//! File-change categories.
//!
//! Each countable category pairs a `has-*` flag with a counter. Untracked
//! files are not a countable category: they only have a flag.

use super::Attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Added,
    Modified,
    Deleted,
    Renamed,
    Unmerged,
}

impl Category {
    /// Classification precedence order.
    pub const ALL: [Category; 5] = [
        Category::Added,
        Category::Modified,
        Category::Deleted,
        Category::Renamed,
        Category::Unmerged,
    ];

    pub const fn flag(self) -> Attribute {
        match self {
            Category::Added => Attribute::HasAdded,
            Category::Modified => Attribute::HasModified,
            Category::Deleted => Attribute::HasDeleted,
            Category::Renamed => Attribute::HasRenamed,
            Category::Unmerged => Attribute::HasUnmerged,
        }
    }

    pub const fn count(self) -> Attribute {
        match self {
            Category::Added => Attribute::Added,
            Category::Modified => Attribute::Modified,
            Category::Deleted => Attribute::Deleted,
            Category::Renamed => Attribute::Renamed,
            Category::Unmerged => Attribute::Unmerged,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Counter attributes of every category.
pub const COUNT_ATTRS: [Attribute; 5] = [
    Attribute::Added,
    Attribute::Modified,
    Attribute::Deleted,
    Attribute::Renamed,
    Attribute::Unmerged,
];

//! Status scan types shared by every backend.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Which side of the repository a status scan looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanShow {
    /// HEAD vs index (staged changes)
    IndexOnly,
    /// Index vs working tree (unstaged changes, untracked files)
    WorkdirOnly,
    /// Both in one pass
    IndexAndWorkdir,
}

impl ScanShow {
    pub fn touches_index(self) -> bool {
        matches!(self, ScanShow::IndexOnly | ScanShow::IndexAndWorkdir)
    }

    pub fn touches_workdir(self) -> bool {
        matches!(self, ScanShow::WorkdirOnly | ScanShow::IndexAndWorkdir)
    }
}

/// One status scan: granularity plus flags handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanSpec {
    pub show: ScanShow,
    pub include_untracked: bool,
    /// Rename detection HEAD->index and index->workdir
    pub detect_renames: bool,
    pub renames_from_rewrites: bool,
    pub exclude_submodules: bool,
}

impl ScanSpec {
    pub fn new(show: ScanShow) -> Self {
        Self {
            show,
            include_untracked: false,
            detect_renames: false,
            renames_from_rewrites: false,
            exclude_submodules: true,
        }
    }
}

/// Change flags of one status entry, index side and workdir side.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusBits(u16);

impl StatusBits {
    pub const CURRENT: Self = Self(0);
    pub const INDEX_NEW: Self = Self(1 << 0);
    pub const INDEX_MODIFIED: Self = Self(1 << 1);
    pub const INDEX_DELETED: Self = Self(1 << 2);
    pub const INDEX_RENAMED: Self = Self(1 << 3);
    pub const INDEX_TYPECHANGE: Self = Self(1 << 4);
    pub const WT_NEW: Self = Self(1 << 5);
    pub const WT_MODIFIED: Self = Self(1 << 6);
    pub const WT_DELETED: Self = Self(1 << 7);
    pub const WT_TYPECHANGE: Self = Self(1 << 8);
    pub const WT_RENAMED: Self = Self(1 << 9);
    pub const WT_UNREADABLE: Self = Self(1 << 10);
    pub const IGNORED: Self = Self(1 << 11);
    pub const CONFLICTED: Self = Self(1 << 12);

    pub const INDEX_MASK: Self = Self(0b1_1111);
    pub const WT_MASK: Self = Self(0b111_1110_0000);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for StatusBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StatusBits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for StatusBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(StatusBits, &str); 13] = [
            (StatusBits::INDEX_NEW, "INDEX_NEW"),
            (StatusBits::INDEX_MODIFIED, "INDEX_MODIFIED"),
            (StatusBits::INDEX_DELETED, "INDEX_DELETED"),
            (StatusBits::INDEX_RENAMED, "INDEX_RENAMED"),
            (StatusBits::INDEX_TYPECHANGE, "INDEX_TYPECHANGE"),
            (StatusBits::WT_NEW, "WT_NEW"),
            (StatusBits::WT_MODIFIED, "WT_MODIFIED"),
            (StatusBits::WT_DELETED, "WT_DELETED"),
            (StatusBits::WT_TYPECHANGE, "WT_TYPECHANGE"),
            (StatusBits::WT_RENAMED, "WT_RENAMED"),
            (StatusBits::WT_UNREADABLE, "WT_UNREADABLE"),
            (StatusBits::IGNORED, "IGNORED"),
            (StatusBits::CONFLICTED, "CONFLICTED"),
        ];
        if self.is_empty() {
            return f.write_str("CURRENT");
        }
        let mut rest = *self;
        let mut first = true;
        for (bit, name) in NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                rest.remove(bit);
                first = false;
            }
        }
        if !rest.is_empty() {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{:#x}", rest.0)?;
        }
        Ok(())
    }
}

/// One path reported by a status scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub status: StatusBits,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, status: StatusBits) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

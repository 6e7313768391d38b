//! Dependency closure over the attribute registry.

use crate::attributes::{Attribute, AttributeSet};

/// Expand `wanted` into the set of attributes that must be looked up.
///
/// Follows the `implies` table of [`ATTRIBUTES`](crate::attributes::ATTRIBUTES)
/// transitively. `Vcs` is always included since opening the repository
/// determines it.
pub fn resolve(wanted: AttributeSet) -> AttributeSet {
    let mut lookup = wanted.with(Attribute::Vcs);
    let mut pending: Vec<Attribute> = lookup.iter().collect();
    while let Some(attr) = pending.pop() {
        for implied in attr.spec().implies {
            if lookup.insert(*implied) {
                pending.push(*implied);
            }
        }
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Category;

    #[test]
    fn vcs_is_always_looked_up() {
        assert_eq!(resolve(AttributeSet::empty()), AttributeSet::from([Attribute::Vcs]));
    }

    #[test]
    fn ahead_pulls_remote_and_branch() {
        let lookup = resolve(AttributeSet::from([Attribute::CommitsAhead]));
        assert_eq!(
            lookup,
            AttributeSet::from([
                Attribute::Vcs,
                Attribute::Branch,
                Attribute::HasRemote,
                Attribute::CommitsAhead,
            ])
        );
    }

    #[test]
    fn stash_count_pulls_has_stash() {
        let lookup = resolve(AttributeSet::from([Attribute::StashCount]));
        assert!(lookup.contains(Attribute::HasStash));
    }

    #[test]
    fn counts_pull_their_flag() {
        for category in Category::ALL {
            let lookup = resolve(AttributeSet::from([category.count()]));
            assert!(lookup.contains(category.flag()), "{:?}", category);
        }
    }

    #[test]
    fn dirty_pulls_no_category() {
        let lookup = resolve(AttributeSet::from([Attribute::IsDirty]));
        assert_eq!(lookup, AttributeSet::from([Attribute::Vcs, Attribute::IsDirty]));
    }

    #[test]
    fn flags_do_not_pull_counts() {
        let lookup = resolve(AttributeSet::from([Attribute::HasAdded, Attribute::HasStash]));
        assert!(!lookup.contains(Attribute::Added));
        assert!(!lookup.contains(Attribute::StashCount));
    }

    #[test]
    fn closure_is_idempotent_for_every_single_attribute() {
        for attr in Attribute::ALL {
            let once = resolve(AttributeSet::from([attr]));
            assert_eq!(resolve(once), once, "{}", attr);
        }
        let all = resolve(AttributeSet::all());
        assert_eq!(all, AttributeSet::all());
    }
}

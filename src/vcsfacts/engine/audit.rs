//! Report work that was done but not needed.
//!
//! A backend lookup that fills in an attribute nobody looked up usually
//! means a scan ran wider than necessary. The audit never alters results.

use crate::attributes::{AttrValue, Attribute, AttributeSet};
use crate::model::FactRecord;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditNotice {
    pub attr: Attribute,
    pub value: AttrValue,
}

impl fmt::Display for AuditNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} found ({}) without being looked up", self.attr, self.value)
    }
}

pub fn audit(lookup: AttributeSet, found: &FactRecord) -> Vec<AuditNotice> {
    found
        .non_zero()
        .iter()
        .filter(|attr| !lookup.contains(*attr))
        .map(|attr| AuditNotice {
            attr,
            value: found.get_attr(attr),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vcs;

    #[test]
    fn clean_run_has_no_notices() {
        let found = FactRecord {
            vcs: Vcs::Git,
            branch: "master".into(),
            ..Default::default()
        };
        let lookup = AttributeSet::from([Attribute::Vcs, Attribute::Branch, Attribute::Tag]);
        assert!(audit(lookup, &found).is_empty());
    }

    #[test]
    fn reports_found_but_not_looked_up() {
        let found = FactRecord {
            vcs: Vcs::Git,
            has_untracked: true,
            stash_count: 2,
            ..Default::default()
        };
        let notices = audit(AttributeSet::from([Attribute::Vcs]), &found);
        assert_eq!(
            notices,
            vec![
                AuditNotice {
                    attr: Attribute::StashCount,
                    value: AttrValue::Count(2),
                },
                AuditNotice {
                    attr: Attribute::HasUntracked,
                    value: AttrValue::Flag(true),
                },
            ]
        );
        assert_eq!(notices[0].to_string(), "stashes found (2) without being looked up");
    }
}

//! Derive composite facts, then cut the record down to what was asked for.

use crate::attributes::{Attribute, AttributeSet, Category};
use crate::model::{FactRecord, Options};

/// Fill in facts that follow from others. Only ever turns values on.
pub fn derive(record: &mut FactRecord, options: &Options) {
    record.has_remote |= record.commits_ahead > 0 || record.commits_behind > 0;
    record.has_stash |= record.stash_count > 0;
    for category in Category::ALL {
        if record.count(category) > 0 {
            *record.flag_mut(category.flag()) = true;
        }
    }
    let dirty = Category::ALL.into_iter().any(|c| record.has(c))
        || (record.has_untracked && options.dirty_if_untracked);
    record.is_dirty |= dirty;
}

/// Reset every attribute outside `wanted` to its zero value.
pub fn filter(record: &mut FactRecord, wanted: AttributeSet) {
    for attr in Attribute::ALL {
        if !wanted.contains(attr) {
            record.reset_attr(attr);
        }
    }
}

pub fn normalize(found: &FactRecord, wanted: AttributeSet, options: &Options) -> FactRecord {
    let mut record = found.clone();
    derive(&mut record, options);
    filter(&mut record, wanted);
    record
}

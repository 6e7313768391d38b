//! # Attribute System
//!
//! Every fact the engine can report is an [`Attribute`]. Callers request facts
//! as an [`AttributeSet`] and receive a [`FactRecord`](crate::model::FactRecord)
//! holding one value per attribute.
//!
//! - **Specifications**: the [`ATTRIBUTES`] registry names each attribute,
//!   gives its value kind, and lists the attributes it implies
//! - **Sets**: [`AttributeSet`] is a copyable bitset over all attributes
//! - **Values**: [`AttrValue`] gives uniform access to record fields
//! - **Categories**: [`Category`] pairs each countable file category with its
//!   flag and counter
//!
//! ## Attribute Kinds
//!
//! | Kind | Examples | Zero value |
//! |------|----------|------------|
//! | `Text` | `branch`, `tag`, `revision` | `""` |
//! | `Enum` | `vcs`, `state` | none variant (renders `""`) |
//! | `Flag` | `dirty`, `has-remote` | `false` |
//! | `Count` | `added`, `ahead`, `stashes` | `0` |
//!
//! ## Usage
//!
//! ```ignore
//! let wanted = AttributeSet::parse(["branch", "dirty"])?;
//! for attr in wanted.iter() {
//!     println!("{}={}", attr, record.get_attr(attr));
//! }
//! ```

mod category;
mod set;
mod spec;
mod value;

pub use category::{Category, COUNT_ATTRS};
pub use set::AttributeSet;
pub use spec::{get_spec, Attribute, AttributeKind, AttributeSpec, ATTRIBUTES};
pub use value::AttrValue;

//! Utility-class style handling for markup edits.
//!
//! - **Class lists** via [`ClassList`], tokenised class attribute values
//! - **Inline styles** via [`parse_inline_style`] and [`Declaration`], plus
//!   property-name casing helpers for object-style `style={{...}}` props
//! - **Mapping** via [`map_property`] and [`map_declarations`], which turn
//!   CSS declarations into utility classes (`font-size: 16px` to
//!   `text-base`), falling back to arbitrary values such as `p-[13px]`
//! - **Merging** via [`merge`], which resolves conflicts between classes of
//!   the same [`ConflictGroup`] so the newest class wins, and [`sort`] for a
//!   canonical order
//!
//! ```
//! use stitch_style::{ClassList, map_property, merge};
//!
//! let existing = ClassList::parse("p-4 text-sm");
//! let incoming: ClassList = map_property("padding", "2rem").into_iter().collect();
//! assert_eq!(merge(&existing, &incoming).to_string(), "text-sm p-8");
//! ```

mod class_list;
mod declaration;
mod error;
mod groups;
mod mapper;
mod merger;
mod units;

pub use class_list::ClassList;
pub use declaration::{Declaration, parse_inline_style, to_camel_case, to_kebab_case};
pub use error::StyleError;
pub use groups::{
    Category, ClassKey, ConflictGroup, category_of, class_key, conflict_group, conflict_groups,
    split_variants,
};
pub use mapper::{StyleMapping, map_declarations, map_property};
pub use merger::{deduplicate, find_conflict, merge, remove, sort};
pub use units::{Length, PX_PER_REM, Unit, parse_thousandths};

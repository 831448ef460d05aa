//! Headless core of the Ladle tag picker: catalog cache and lazy loading,
//! pure filter/rank/group functions, the bounded recency list, and the
//! selection-controller state machine. Rendering lives elsewhere; this crate
//! only manages state and hands fresh selection values to its owner.

pub mod catalog;
pub mod filter;
pub mod group;
pub mod picker;
pub mod recent;
pub mod tag;

pub use crate::catalog::CatalogCache;
pub use crate::catalog::CatalogLoader;
pub use crate::catalog::PendingLoad;
pub use crate::filter::filter_tags;
pub use crate::filter::popular_tags;
pub use crate::group::ALL_TAGS_LABEL;
pub use crate::group::POPULAR_TAGS_LIMIT;
pub use crate::group::TagSections;
pub use crate::group::build_sections;
pub use crate::group::group_by_category;
pub use crate::picker::PickerPhase;
pub use crate::picker::SelectionChangedCallback;
pub use crate::picker::TagPicker;
pub use crate::picker::TagPickerBuilder;
pub use crate::recent::RECENT_TAGS_CAP;
pub use crate::recent::RecentTags;
pub use crate::tag::Tag;
pub use crate::tag::catalog_from_json;
pub use crate::tag::catalog_from_str;

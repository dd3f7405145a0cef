//! Tab plumbing: `page` wraps one tab's content, `registry` maps keys to
//! views, `tab_labels` owns keys and titles.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::*;

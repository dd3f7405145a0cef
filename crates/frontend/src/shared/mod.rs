pub mod api_utils;
pub mod date_utils;
pub mod export;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod page_frame;
pub mod page_standard;
pub mod pdf;

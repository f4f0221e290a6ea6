pub mod accordion;
pub mod header;
pub mod image_fallback;
pub mod lazy_images;
pub mod load_time;
pub mod menu;
pub mod smooth_scroll;

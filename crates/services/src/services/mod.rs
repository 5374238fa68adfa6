pub mod categories;
pub mod config;
pub mod dashboard;
pub mod orders;
pub mod page_head;
pub mod popularity;
pub mod reviews;
pub mod seo;
pub mod seo_admin;
pub mod sitemap;

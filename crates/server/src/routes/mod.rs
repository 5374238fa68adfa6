pub mod categories;
pub mod dashboard;
pub mod health;
pub mod metadata;
pub mod orders;
pub mod popularity;
pub mod reviews;
pub mod seo_admin;
pub mod sitemap;

pub mod category;
pub mod order;
pub mod popularity;
pub mod product;
pub mod review;
pub mod seo_metadata;

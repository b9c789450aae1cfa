pub mod filters;
pub mod saved_filters;

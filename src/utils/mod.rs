pub mod filters;
pub mod status;

pub use filters::filter_by_league;
pub use status::StatusFilter;

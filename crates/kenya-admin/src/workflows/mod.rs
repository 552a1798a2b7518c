pub mod county_filter;
pub mod hierarchy;

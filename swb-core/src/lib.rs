pub mod basetype;
pub mod huc10;
pub mod summary;
pub mod table;
pub mod time_period;

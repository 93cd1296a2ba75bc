pub mod constants;
pub mod db;
pub mod donations;
pub mod donors;
pub mod errors;
pub mod expenses;
pub mod guardians;
pub mod notifications;
pub mod purposes;
pub mod schema;
pub mod schools;
pub mod scoring;
pub mod students;
pub mod visits;

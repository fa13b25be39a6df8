pub mod categories;
pub mod courses;
pub mod faqs;
pub mod resource;
pub mod units;
pub mod users;

pub mod access_token;
pub mod requests;
pub mod responses;
pub mod restaurant;
pub mod restaurant_category;

pub mod fare;
pub mod health;
pub mod promo;
pub mod tracking;

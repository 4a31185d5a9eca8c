pub mod products;
pub mod reports;
pub mod sales;
pub mod whatsapp;

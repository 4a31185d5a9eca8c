pub mod chat_service;
pub mod nl_date;
pub mod reporting;
pub mod sales_service;

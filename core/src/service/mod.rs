pub mod catalog_service;
pub mod coefficient_service;
pub mod dto;
pub mod ledger_service;
pub mod month_service;
pub mod persistence;
pub mod settings_service;
pub mod snapshot_service;

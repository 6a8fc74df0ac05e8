pub mod day_record;
pub mod keys;
pub mod month_record;
pub mod position;
pub mod settings;
pub mod work_data;

pub mod use_driver_records;
pub mod use_reference_data;
pub mod use_toasts;

pub use use_driver_records::use_driver_records;
pub use use_reference_data::use_reference_data;
pub use use_toasts::use_toasts;

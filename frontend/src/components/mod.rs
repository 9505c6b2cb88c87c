pub mod delete_confirm_modal;
pub mod driver_search;
pub mod header;
pub mod history_view;
pub mod record_modal;
pub mod record_table;
pub mod reference_panel;
pub mod reference_view;
pub mod register_modal;
pub mod toast;

pub use delete_confirm_modal::DeleteConfirmModal;
pub use driver_search::DriverSearch;
pub use header::Header;
pub use history_view::HistoryView;
pub use record_modal::RecordModal;
pub use record_table::RecordTable;
pub use reference_view::ReferenceView;
pub use register_modal::RegisterModal;
pub use toast::ToastContainer;

pub mod chat_pane;
pub mod session_list;
pub mod upload_panel;

pub use chat_pane::ChatPane;
pub use session_list::SessionList;
pub use upload_panel::UploadPanel;

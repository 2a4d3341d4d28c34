//! UI Components
//!
//! Leptos components of the toolbox board.

mod board_header;
mod new_item_form;
mod notice_bar;
mod kanban_board;
mod section_column;
mod toolbox_card;
mod delete_confirm_button;

pub use board_header::BoardHeader;
pub use new_item_form::NewItemForm;
pub use notice_bar::NoticeBar;
pub use kanban_board::KanbanBoard;
pub use section_column::SectionColumn;
pub use toolbox_card::ToolboxCard;
pub use delete_confirm_button::DeleteConfirmButton;

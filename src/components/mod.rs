//! UI Components
//!
//! Reusable Leptos components.

mod module_tree_view;
mod new_module_form;
mod notice_area;
mod test_case_list;
mod tree_row;

pub use module_tree_view::ModuleTreeView;
pub use new_module_form::NewModuleForm;
pub use notice_area::NoticeArea;
pub use test_case_list::TestCaseList;
pub use tree_row::TreeRowView;

pub mod confirmbox;
pub mod detailbox;
pub mod folder_form_state;
pub mod helpbox;
pub mod listitems;
pub mod picker_state;
pub mod pickerbox;

pub mod input_form;
pub mod timeline_list;

pub use input_form::{FormEvent, InputForm};
pub use timeline_list::TimelineListState;

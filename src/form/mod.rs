pub mod slot_form;
pub mod export;

pub use slot_form::{parse_header, parse_slot_form, FormError, FormFields, TimetableHeader};
pub use export::{export_timetable_to_csv, write_timetable_csv};

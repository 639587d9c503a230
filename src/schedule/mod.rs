pub mod types;
pub mod credits;
pub mod slot_utils;
pub mod catalog;
pub mod shuffle;
pub mod scheduler;
pub mod colors;

pub use types::{Cell, ColorMap, Day, DaySchedule, SessionKind, Shortfall, Slot, SlotRole, Timetable, TimetableGrid};
pub use credits::{parse_credits, Credits};
pub use catalog::{CatalogMode, ReservedPolicy, SlotConfig, RESERVED_COURSE};
pub use shuffle::{RandomShuffler, Shuffler};
pub use scheduler::{schedule_courses, MAX_ATTEMPTS};
pub use colors::{resolve_colors, FALLBACK_COLOR};

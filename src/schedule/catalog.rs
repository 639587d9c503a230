use serde::{Deserialize, Serialize};
use super::slot_utils::sort_chronologically;
use super::types::{Day, Slot, SlotRole};

/// Course code pinned to the reserved slot
pub const RESERVED_COURSE: &str = "HS205";

/// Reserved slot label used by the fixed and grouped catalogs
pub const RESERVED_SLOT: &str = "5:00 - 6:30 PM";

/// Reserved slot label used by the chronological catalog (24-hour labels)
pub const RESERVED_SLOT_24H: &str = "17:00 - 18:30";

pub const DEFAULT_MORNING_BREAK: &str = "10:30 - 11:00";
pub const DEFAULT_LUNCH_BREAK: &str = "13:30 - 14:30";

/// How the day's slot list is put together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Slot lists are kept in the order given; minor slots come first
    Fixed,
    /// lectures, morning break, tutorials, lunch break, labs, reserved slot
    Grouped,
    /// Every slot sorted by start time, reserved slot added if missing
    Chronological,
}

/// Where the reserved course goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservedPolicy {
    /// Placed on every listed day
    Pinned(Vec<Day>),
    /// Placed once, on a random day whose reserved slot is free
    Random,
}

/// Slot layout for one timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub mode: CatalogMode,
    pub lecture_slots: Vec<String>,
    pub tutorial_slots: Vec<String>,
    pub lab_slots: Vec<String>,
    pub minor_slots: Vec<String>,
    pub morning_break: String,
    pub lunch_break: String,
    pub reserved_slot: String,
    pub reserved_policy: ReservedPolicy,
    /// A lab on a day keeps the same course's lectures off that day
    pub lab_blocks_lectures: bool,
}

impl SlotConfig {
    /// The built-in day used when no slot layout is supplied
    pub fn fixed() -> Self {
        SlotConfig {
            mode: CatalogMode::Fixed,
            lecture_slots: vec!["9:00 - 10:30 AM".to_string(), "11:00 - 12:30 PM".to_string()],
            tutorial_slots: vec!["12:30 - 1:30 PM".to_string()],
            lab_slots: vec!["2:30 - 4:30 PM".to_string()],
            minor_slots: vec![
                "8:00 - 9:00 AM(Minor Slot)".to_string(),
                "6:30 - 8:30 PM(Minor Slot)".to_string(),
            ],
            morning_break: "10:30 - 11:00 AM".to_string(),
            lunch_break: "1:30 - 2:30 PM".to_string(),
            reserved_slot: RESERVED_SLOT.to_string(),
            reserved_policy: ReservedPolicy::Pinned(vec![Day::Wed, Day::Fri]),
            lab_blocks_lectures: false,
        }
    }

    /// Caller supplied slots kept in role groups
    pub fn grouped(
        lecture_slots: Vec<String>,
        tutorial_slots: Vec<String>,
        lab_slots: Vec<String>,
        morning_break: impl Into<String>,
        lunch_break: impl Into<String>,
    ) -> Self {
        SlotConfig {
            mode: CatalogMode::Grouped,
            lecture_slots,
            tutorial_slots,
            lab_slots,
            minor_slots: Vec::new(),
            morning_break: morning_break.into(),
            lunch_break: lunch_break.into(),
            reserved_slot: RESERVED_SLOT.to_string(),
            reserved_policy: ReservedPolicy::Pinned(vec![Day::Fri]),
            lab_blocks_lectures: false,
        }
    }

    /// Caller supplied 24-hour slots, sorted by start time
    pub fn chronological(
        lecture_slots: Vec<String>,
        tutorial_slots: Vec<String>,
        lab_slots: Vec<String>,
        minor_slots: Vec<String>,
        morning_break: impl Into<String>,
        lunch_break: impl Into<String>,
    ) -> Self {
        SlotConfig {
            mode: CatalogMode::Chronological,
            lecture_slots,
            tutorial_slots,
            lab_slots,
            minor_slots,
            morning_break: morning_break.into(),
            lunch_break: lunch_break.into(),
            reserved_slot: RESERVED_SLOT_24H.to_string(),
            reserved_policy: ReservedPolicy::Random,
            lab_blocks_lectures: true,
        }
    }

    /// Builds the ordered slot list shared by every day
    pub fn build_catalog(&self) -> Vec<Slot> {
        let mut catalog = SlotCatalog::new(&self.morning_break, &self.lunch_break);

        match self.mode {
            CatalogMode::Fixed => {
                // 8:00 minor, 9:00 lecture, 10:30 break, 11:00 lecture, 12:30 tutorial,
                // 1:30 break, 2:30 lab, 5:00 reserved, 6:30 minor
                let (early_minor, late_minor) = split_minor(&self.minor_slots);
                catalog.extend(early_minor, SlotRole::Minor);
                if let Some((first, rest)) = self.lecture_slots.split_first() {
                    catalog.push(first, SlotRole::Lecture);
                    catalog.push(&self.morning_break, SlotRole::Break);
                    catalog.extend(rest, SlotRole::Lecture);
                } else {
                    catalog.push(&self.morning_break, SlotRole::Break);
                }
                catalog.extend(&self.tutorial_slots, SlotRole::Tutorial);
                catalog.push(&self.lunch_break, SlotRole::Break);
                catalog.extend(&self.lab_slots, SlotRole::Lab);
                catalog.push(&self.reserved_slot, SlotRole::Reserved);
                catalog.extend(late_minor, SlotRole::Minor);
            }
            CatalogMode::Grouped => {
                catalog.extend(&self.lecture_slots, SlotRole::Lecture);
                catalog.push(&self.morning_break, SlotRole::Break);
                catalog.extend(&self.tutorial_slots, SlotRole::Tutorial);
                catalog.push(&self.lunch_break, SlotRole::Break);
                catalog.extend(&self.lab_slots, SlotRole::Lab);
                catalog.push(&self.reserved_slot, SlotRole::Reserved);
            }
            CatalogMode::Chronological => {
                catalog.extend(&self.minor_slots, SlotRole::Minor);
                catalog.extend(&self.lecture_slots, SlotRole::Lecture);
                catalog.push(&self.morning_break, SlotRole::Break);
                catalog.extend(&self.tutorial_slots, SlotRole::Tutorial);
                catalog.push(&self.lunch_break, SlotRole::Break);
                catalog.extend(&self.lab_slots, SlotRole::Lab);
                // Appended only when no supplied slot already uses the label
                catalog.push(&self.reserved_slot, SlotRole::Reserved);
                sort_chronologically(&mut catalog.slots);
            }
        }

        catalog.slots
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        SlotConfig::fixed()
    }
}

/// The fixed day opens and closes with a minor slot
fn split_minor(minor_slots: &[String]) -> (&[String], &[String]) {
    let late = if minor_slots.len() >= 2 { 1 } else { 0 };
    minor_slots.split_at(minor_slots.len() - late)
}

/// Ordered slot list keyed by label: the first occurrence of a label wins,
/// except that a break label is always a break.
struct SlotCatalog<'a> {
    slots: Vec<Slot>,
    morning_break: &'a str,
    lunch_break: &'a str,
}

impl<'a> SlotCatalog<'a> {
    fn new(morning_break: &'a str, lunch_break: &'a str) -> Self {
        SlotCatalog { slots: Vec::new(), morning_break, lunch_break }
    }

    fn push(&mut self, label: &str, role: SlotRole) {
        if self.slots.iter().any(|s| s.label == label) {
            return;
        }
        let role = if label == self.morning_break || label == self.lunch_break {
            SlotRole::Break
        } else {
            role
        };
        self.slots.push(Slot { label: label.to_string(), role });
    }

    fn extend(&mut self, labels: &[String], role: SlotRole) {
        for label in labels {
            self.push(label, role);
        }
    }
}

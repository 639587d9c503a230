use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize, Serializer};

/// Course code -> hex color used when rendering
pub type ColorMap = HashMap<String, String>;

pub const LAB_SUFFIX: &str = "_LAB(2hrs)";
pub const TUTORIAL_SUFFIX: &str = "_TUT";

/// Weekdays covered by the timetable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Position of the day within the week, Monday = 0
    pub fn index(&self) -> usize {
        match self {
            Day::Mon => 0,
            Day::Tue => 1,
            Day::Wed => 2,
            Day::Thu => 3,
            Day::Fri => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a slot may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    Lecture,
    Tutorial,
    Lab,
    Minor,
    Break,
    Reserved,
}

/// Contents of one (day, slot) cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Break(String),
    Lecture(String),
    Tutorial(String),
    Lab(String),
    Reserved(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Course code occupying the cell, if any
    pub fn course_code(&self) -> Option<&str> {
        match self {
            Cell::Lecture(code) | Cell::Tutorial(code) | Cell::Lab(code) | Cell::Reserved(code) => {
                Some(code)
            }
            Cell::Empty | Cell::Break(_) => None,
        }
    }

    /// Text shown in the grid, e.g. "CS101", "CS101_TUT", "CS101_LAB(2hrs)"
    pub fn label(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Break(label) => label.clone(),
            Cell::Lecture(code) | Cell::Reserved(code) => code.clone(),
            Cell::Tutorial(code) => format!("{}{}", code, TUTORIAL_SUFFIX),
            Cell::Lab(code) => format!("{}{}", code, LAB_SUFFIX),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// A slot definition shared by every day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub label: String,
    pub role: SlotRole,
}

/// One slot of one day together with its contents
#[derive(Debug, Clone, Serialize)]
pub struct SlotCell {
    pub label: String,
    pub role: SlotRole,
    pub value: Cell,
}

/// Ordered slots of a single day
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub day: Day,
    pub slots: Vec<SlotCell>,
}

impl DaySchedule {
    /// Returns true if any cell of the day holds exactly `cell`
    pub fn contains(&self, cell: &Cell) -> bool {
        self.slots.iter().any(|s| s.value == *cell)
    }

    pub fn get(&self, label: &str) -> Option<&Cell> {
        self.slots.iter().find(|s| s.label == label).map(|s| &s.value)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut Cell> {
        self.slots.iter_mut().find(|s| s.label == label).map(|s| &mut s.value)
    }
}

/// Day x slot grid for the whole week
#[derive(Debug, Clone, Serialize)]
pub struct TimetableGrid {
    days: Vec<DaySchedule>,
}

impl TimetableGrid {
    /// Creates a grid with the same slots on every weekday, breaks pre-filled
    pub fn new(slots: &[Slot], morning_break: &str, lunch_break: &str) -> Self {
        let days = Day::ALL
            .iter()
            .map(|&day| DaySchedule {
                day,
                slots: slots
                    .iter()
                    .map(|slot| SlotCell {
                        label: slot.label.clone(),
                        role: slot.role,
                        value: initial_cell(slot, morning_break, lunch_break),
                    })
                    .collect(),
            })
            .collect();
        TimetableGrid { days }
    }

    /// Days in week order
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    // `days` is always built from Day::ALL, so the index is in range
    pub fn day(&self, day: Day) -> &DaySchedule {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DaySchedule {
        &mut self.days[day.index()]
    }

    pub fn cell(&self, day: Day, label: &str) -> Option<&Cell> {
        self.day(day).get(label)
    }

    /// Slot labels in display order
    pub fn slot_labels(&self) -> Vec<&str> {
        self.days
            .first()
            .map(|d| d.slots.iter().map(|s| s.label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Number of cells across the week equal to `cell`
    pub fn count(&self, cell: &Cell) -> usize {
        self.days
            .iter()
            .flat_map(|d| &d.slots)
            .filter(|s| s.value == *cell)
            .count()
    }
}

fn initial_cell(slot: &Slot, morning_break: &str, lunch_break: &str) -> Cell {
    if slot.role != SlotRole::Break {
        return Cell::Empty;
    }
    if slot.label == morning_break {
        Cell::Break("Morning Break".to_string())
    } else if slot.label == lunch_break {
        Cell::Break("Lunch Break".to_string())
    } else {
        Cell::Break(slot.label.clone())
    }
}

/// Kind of session being placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Reserved,
    Lab,
    Lecture,
    Tutorial,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionKind::Reserved => "reserved",
            SessionKind::Lab => "lab",
            SessionKind::Lecture => "lecture",
            SessionKind::Tutorial => "tutorial",
        };
        f.write_str(name)
    }
}

/// A course whose sessions could not all be placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub code: String,
    pub session: SessionKind,
    pub required: u32,
    pub placed: u32,
}

/// Result of a scheduling run
#[derive(Debug, Clone, Serialize)]
pub struct Timetable {
    pub grid: TimetableGrid,
    pub colors: ColorMap,
    pub shortfalls: Vec<Shortfall>,
}

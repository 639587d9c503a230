use log::{debug, info, warn};
use crate::parser::CourseRecord;
use super::catalog::{ReservedPolicy, SlotConfig, RESERVED_COURSE};
use super::colors::resolve_colors;
use super::shuffle::Shuffler;
use super::types::{Cell, ColorMap, Day, SessionKind, Shortfall, Slot, SlotRole, Timetable, TimetableGrid};

/// Attempts per course and session kind before giving up
pub const MAX_ATTEMPTS: u32 = 50;

/// Builds a weekly timetable.
///
/// Runs four phases in order, each over the courses in input order:
/// the reserved course, then labs, lectures and tutorials. Placement is a
/// randomized best-effort search: sessions that cannot be placed within
/// [`MAX_ATTEMPTS`] are reported in [`Timetable::shortfalls`] and the run
/// carries on. Earlier placements are never moved.
pub fn schedule_courses<S: Shuffler>(
    courses: &[CourseRecord],
    mut colors: ColorMap,
    config: &SlotConfig,
    shuffler: &mut S,
) -> Timetable {
    let catalog = config.build_catalog();
    let grid = TimetableGrid::new(&catalog, &config.morning_break, &config.lunch_break);

    info!(
        "Scheduling {} courses over {} slots per day ({:?} catalog)",
        courses.len(),
        catalog.len(),
        config.mode
    );

    let mut placement = Placement {
        grid,
        days: Day::ALL.to_vec(),
        lecture_slots: labels_with_role(&catalog, SlotRole::Lecture),
        tutorial_slots: labels_with_role(&catalog, SlotRole::Tutorial),
        lab_slots: labels_with_role(&catalog, SlotRole::Lab),
        lab_blocks_lectures: config.lab_blocks_lectures,
        shuffler,
        shortfalls: Vec::new(),
    };

    // 1) Reserved course first, so nothing else can take its slot
    if let Some(course) = courses.iter().find(|c| is_reserved(&c.code)) {
        placement.place_reserved(&course.code, &config.reserved_slot, &config.reserved_policy);
    }

    let schedulable: Vec<&CourseRecord> = courses
        .iter()
        .filter(|c| {
            let code = c.code.trim();
            if code.is_empty() {
                debug!("Skipping course without a code");
                return false;
            }
            !is_reserved(code)
        })
        .collect();

    // 2) Labs
    for course in &schedulable {
        let required = course.credits.lab_sessions();
        placement.place_sessions(course.code.trim(), SessionKind::Lab, required);
    }

    // 3) Lectures
    for course in &schedulable {
        let required = course.credits.lecture_sessions();
        placement.place_sessions(course.code.trim(), SessionKind::Lecture, required);
    }

    // 4) Tutorials
    for course in &schedulable {
        let required = course.credits.tutorial_sessions();
        placement.place_sessions(course.code.trim(), SessionKind::Tutorial, required);
    }

    resolve_colors(&mut colors, courses);

    let Placement { grid, shortfalls, .. } = placement;
    info!("Scheduling finished with {} shortfall(s)", shortfalls.len());

    Timetable { grid, colors, shortfalls }
}

/// Case-insensitive match against the reserved course code
pub fn is_reserved(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(RESERVED_COURSE)
}

fn labels_with_role(catalog: &[Slot], role: SlotRole) -> Vec<String> {
    catalog
        .iter()
        .filter(|s| s.role == role)
        .map(|s| s.label.clone())
        .collect()
}

/// Mutable state of one scheduling run.
/// Day and slot orders stay shuffled from one attempt to the next.
struct Placement<'a, S> {
    grid: TimetableGrid,
    days: Vec<Day>,
    lecture_slots: Vec<String>,
    tutorial_slots: Vec<String>,
    lab_slots: Vec<String>,
    lab_blocks_lectures: bool,
    shuffler: &'a mut S,
    shortfalls: Vec<Shortfall>,
}

impl<'a, S: Shuffler> Placement<'a, S> {
    fn place_reserved(&mut self, code: &str, reserved_slot: &str, policy: &ReservedPolicy) {
        let cell = Cell::Reserved(RESERVED_COURSE.to_string());

        if self.grid.cell(Day::Mon, reserved_slot).is_none() {
            info!("{} present but no '{}' slot in the day, not placed", code, reserved_slot);
            return;
        }

        let (required, placed) = match policy {
            ReservedPolicy::Pinned(days) => {
                let mut placed = 0;
                for &day in days {
                    if let Some(slot) = self.grid.day_mut(day).get_mut(reserved_slot) {
                        if slot.is_empty() {
                            *slot = cell.clone();
                            placed += 1;
                        }
                    }
                }
                (days.len() as u32, placed)
            }
            ReservedPolicy::Random => {
                let mut attempts = 0;
                let mut placed = 0;
                while placed == 0 && attempts < MAX_ATTEMPTS {
                    attempts += 1;
                    self.shuffler.shuffle(&mut self.days);
                    let free_day = self.days.iter().copied().find(|&day| {
                        self.grid.cell(day, reserved_slot).map_or(false, Cell::is_empty)
                    });
                    if let Some(day) = free_day {
                        if let Some(slot) = self.grid.day_mut(day).get_mut(reserved_slot) {
                            *slot = cell.clone();
                            placed = 1;
                            debug!("Reserved {} on {} at {}", code, day, reserved_slot);
                        }
                    }
                }
                (1, placed)
            }
        };

        self.record(code, SessionKind::Reserved, required, placed);
    }

    /// Places up to `required` sessions of one kind for one course
    fn place_sessions(&mut self, code: &str, kind: SessionKind, required: u32) {
        if required == 0 {
            return;
        }

        let cell = match kind {
            SessionKind::Lab => Cell::Lab(code.to_string()),
            SessionKind::Lecture => Cell::Lecture(code.to_string()),
            SessionKind::Tutorial => Cell::Tutorial(code.to_string()),
            SessionKind::Reserved => return,
        };
        let blockers = self.blockers(code, kind);
        // Labs keep trying after a fruitless attempt, lectures and tutorials give up
        let stop_on_stall = kind != SessionKind::Lab;

        let mut placed = 0;
        let mut attempts = 0;
        while placed < required && attempts < MAX_ATTEMPTS {
            attempts += 1;
            self.shuffler.shuffle(&mut self.days);
            let slots = match kind {
                SessionKind::Lab => &mut self.lab_slots,
                SessionKind::Lecture => &mut self.lecture_slots,
                _ => &mut self.tutorial_slots,
            };
            self.shuffler.shuffle(slots);

            match find_free_slot(&self.grid, &self.days, slots, &blockers) {
                Some((day, label)) => {
                    if let Some(slot) = self.grid.day_mut(day).get_mut(&label) {
                        *slot = cell.clone();
                    }
                    placed += 1;
                    debug!("Placed {} {} on {} at {}", kind, code, day, label);
                }
                None if stop_on_stall => break,
                None => {}
            }
        }

        self.record(code, kind, required, placed);
    }

    /// Cells that keep a new session of `kind` off a day
    fn blockers(&self, code: &str, kind: SessionKind) -> Vec<Cell> {
        let lecture = Cell::Lecture(code.to_string());
        let lab = Cell::Lab(code.to_string());
        match kind {
            SessionKind::Lab => vec![lecture, lab],
            SessionKind::Lecture if self.lab_blocks_lectures => vec![lecture, lab],
            SessionKind::Lecture => vec![lecture],
            SessionKind::Tutorial => vec![Cell::Tutorial(code.to_string())],
            SessionKind::Reserved => Vec::new(),
        }
    }

    fn record(&mut self, code: &str, session: SessionKind, required: u32, placed: u32) {
        if placed < required {
            warn!(
                "Could only place {} of {} {} session(s) for {}",
                placed, required, session, code
            );
            self.shortfalls.push(Shortfall {
                code: code.to_string(),
                session,
                required,
                placed,
            });
        }
    }
}

/// First empty slot from `slots` on the first day in `days` that holds none of `blockers`
fn find_free_slot(
    grid: &TimetableGrid,
    days: &[Day],
    slots: &[String],
    blockers: &[Cell],
) -> Option<(Day, String)> {
    for &day in days {
        let schedule = grid.day(day);
        if blockers.iter().any(|b| schedule.contains(b)) {
            continue;
        }
        for label in slots {
            if schedule.get(label).map_or(false, Cell::is_empty) {
                return Some((day, label.clone()));
            }
        }
    }
    None
}

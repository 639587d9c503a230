use timetable_generator::parser::{load_courses_from_reader, CourseRecord};
use timetable_generator::schedule::{
    parse_credits, schedule_courses, Cell, ColorMap, RandomShuffler, ReservedPolicy, SlotConfig, SlotRole,
    Timetable, RESERVED_COURSE,
};

const SHEET: &str = "\
Course Code,Course Title,Credits (L-T-P-S-C),Color
CS201,Data Structures,3-1-2-0-5,FF00B050
CS202,Operating Systems,3-0-2-0-4,
MA202,Probability,3-1-0-0-4,#FF0000
EC203,Signals,3-1-3-0-5,
HS205,Soft Skills,1-0-0-0-1,
CS203,Algorithms,4-1-4-0-6,
PH201,Physics Lab,0-0-1-0-1,
XX999,Broken Row,not-credits,
";

fn strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn configs() -> Vec<SlotConfig> {
    vec![
        SlotConfig::fixed(),
        SlotConfig::grouped(
            strings(&["09:00 - 10:00", "10:00 - 11:00", "11:30 - 12:30"]),
            strings(&["12:30 - 13:30"]),
            strings(&["14:30 - 16:30", "16:30 - 18:30"]),
            "11:00 - 11:30",
            "13:30 - 14:30",
        ),
        SlotConfig::chronological(
            strings(&["11:30 - 12:30", "09:00 - 10:00", "10:00 - 11:00"]),
            strings(&["12:30 - 13:30", "16:30 - 17:00"]),
            strings(&["14:30 - 16:30"]),
            strings(&["08:00 - 09:00", "18:30 - 19:30"]),
            "11:00 - 11:30",
            "13:30 - 14:30",
        ),
    ]
}

fn assert_invariants(courses: &[CourseRecord], config: &SlotConfig, timetable: &Timetable) {
    let grid = &timetable.grid;

    for course in courses {
        let code = course.code.trim().to_string();
        for day in grid.days() {
            for cell in [Cell::Lecture(code.clone()), Cell::Tutorial(code.clone()), Cell::Lab(code.clone())] {
                let hits = day.slots.iter().filter(|s| s.value == cell).count();
                assert!(hits <= 1, "{} appears {} times on {}", cell, hits, day.day);
            }
        }

        let color = timetable.colors.get(&code).map(String::as_str).unwrap_or("");
        assert!(!color.is_empty(), "{} has no color", code);
    }

    for day in grid.days() {
        for slot in &day.slots {
            match slot.role {
                SlotRole::Break => assert!(matches!(slot.value, Cell::Break(_)), "break overwritten on {}", day.day),
                SlotRole::Minor => assert_eq!(slot.value, Cell::Empty),
                SlotRole::Lecture => assert!(matches!(slot.value, Cell::Empty | Cell::Lecture(_))),
                SlotRole::Tutorial => assert!(matches!(slot.value, Cell::Empty | Cell::Tutorial(_))),
                SlotRole::Lab => assert!(matches!(slot.value, Cell::Empty | Cell::Lab(_))),
                SlotRole::Reserved => assert!(matches!(slot.value, Cell::Empty | Cell::Reserved(_))),
            }
        }
        assert_eq!(day.slots.len(), grid.slot_labels().len());
    }

    let reserved = grid.count(&Cell::Reserved(RESERVED_COURSE.to_string()));
    let has_reserved = courses.iter().any(|c| c.code.trim().eq_ignore_ascii_case(RESERVED_COURSE));
    let expected = match &config.reserved_policy {
        _ if !has_reserved => 0,
        ReservedPolicy::Random => 1,
        ReservedPolicy::Pinned(days) => days.len(),
    };
    assert_eq!(reserved, expected);
}

#[test]
fn repeated_runs_always_keep_invariants() {
    let sheet = load_courses_from_reader(SHEET.as_bytes()).unwrap();
    for config in configs() {
        for seed in 0..200 {
            let mut shuffler = RandomShuffler::seeded(seed);
            let timetable = schedule_courses(&sheet.courses, sheet.colors.clone(), &config, &mut shuffler);
            assert_invariants(&sheet.courses, &config, &timetable);
        }
    }
}

#[test]
fn unseeded_runs_keep_invariants() {
    let sheet = load_courses_from_reader(SHEET.as_bytes()).unwrap();
    for config in configs() {
        for _ in 0..50 {
            let timetable =
                schedule_courses(&sheet.courses, sheet.colors.clone(), &config, &mut RandomShuffler::from_entropy());
            assert_invariants(&sheet.courses, &config, &timetable);
        }
    }
}

#[test]
fn same_seed_gives_same_timetable() {
    let sheet = load_courses_from_reader(SHEET.as_bytes()).unwrap();
    let config = SlotConfig::fixed();
    let render = |seed| {
        let timetable =
            schedule_courses(&sheet.courses, sheet.colors.clone(), &config, &mut RandomShuffler::seeded(seed));
        serde_json::to_string(&timetable.grid).unwrap()
    };
    assert_eq!(render(42), render(42));
}

#[test]
fn single_course_gets_two_lectures_and_one_tutorial() {
    let courses = vec![CourseRecord {
        code: "CS101".to_string(),
        title: String::new(),
        credits: parse_credits("3-1-0-0-4"),
    }];
    let config = SlotConfig::grouped(
        strings(&["09:00 - 10:30", "11:00 - 12:30"]),
        strings(&["12:30 - 13:30"]),
        Vec::new(),
        "10:30 - 11:00",
        "13:30 - 14:30",
    );
    for seed in 0..100 {
        let timetable = schedule_courses(&courses, ColorMap::new(), &config, &mut RandomShuffler::seeded(seed));
        assert_eq!(timetable.grid.count(&Cell::Lecture("CS101".to_string())), 2);
        assert_eq!(timetable.grid.count(&Cell::Tutorial("CS101".to_string())), 1);
        assert!(timetable.shortfalls.is_empty());
        assert_invariants(&courses, &config, &timetable);
    }
}

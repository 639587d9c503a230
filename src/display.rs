use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;

use crate::form::TimetableHeader;
use crate::schedule::{Cell, Timetable};

/// Text shown for a cell in the plain-text views
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "[EMPTY]".to_string(),
        Cell::Break(label) => format!("-- {} --", label),
        other => other.label(),
    }
}

/// Formats the timetable as plain text, one block per day
pub fn format_timetable(header: &TimetableHeader, timetable: &Timetable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "** {} **", header.institute_name);
    let _ = writeln!(
        out,
        "{} | Semester {} | {} | Room {} | {}",
        header.academic_year, header.semester, header.branch, header.classroom, header.group_mail
    );

    for day in timetable.grid.days() {
        let _ = writeln!(out, "\n{}", day.day);
        for slot in &day.slots {
            let _ = writeln!(out, "  {} -> {}", slot.label, format_cell(&slot.value));
        }
    }

    if !timetable.shortfalls.is_empty() {
        let _ = writeln!(out, "\nNot fully scheduled ({}):", timetable.shortfalls.len());
        for s in &timetable.shortfalls {
            let _ = writeln!(out, "  - {} {}: {} of {} placed", s.code, s.session, s.placed, s.required);
        }
    }

    out
}

/// Prints the timetable in a readable format
pub fn print_timetable(header: &TimetableHeader, timetable: &Timetable) {
    println!("{}", format_timetable(header, timetable));
}

/// Writes the plain-text timetable to a file
pub fn write_timetable_to_file(
    header: &TimetableHeader,
    timetable: &Timetable,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    file.write_all(format_timetable(header, timetable).as_bytes())?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the timetable as a standalone HTML page.
/// Course cells take the course color, break columns are greyed out.
pub fn render_html(header: &TimetableHeader, timetable: &Timetable) -> String {
    let grid = &timetable.grid;
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Timetable</title>\n\
         <style>\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #444; padding: 6px 10px; text-align: center; }}\n\
         td.break {{ background: #d9d9d9; font-style: italic; }}\n\
         </style>\n</head>\n<body>\n"
    );
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(&header.institute_name));
    let _ = writeln!(
        html,
        "<p>Academic year {} &middot; Semester {} &middot; {} &middot; Room {} &middot; {}</p>",
        escape_html(&header.academic_year),
        escape_html(&header.semester),
        escape_html(&header.branch),
        escape_html(&header.classroom),
        escape_html(&header.group_mail),
    );

    let _ = writeln!(html, "<table>\n<tr><th>Day</th>");
    for label in grid.slot_labels() {
        let _ = writeln!(html, "<th>{}</th>", escape_html(label));
    }
    let _ = writeln!(html, "</tr>");

    for day in grid.days() {
        let _ = writeln!(html, "<tr><th>{}</th>", day.day);
        for slot in &day.slots {
            match &slot.value {
                Cell::Empty => {
                    let _ = writeln!(html, "<td></td>");
                }
                Cell::Break(label) => {
                    let _ = writeln!(html, "<td class=\"break\">{}</td>", escape_html(label));
                }
                cell => {
                    let color = cell
                        .course_code()
                        .and_then(|code| timetable.colors.get(code))
                        .map(String::as_str)
                        .unwrap_or("");
                    let _ = writeln!(
                        html,
                        "<td style=\"background: {}\">{}</td>",
                        escape_html(color),
                        escape_html(&cell.label())
                    );
                }
            }
        }
        let _ = writeln!(html, "</tr>");
    }
    let _ = writeln!(html, "</table>");

    // Legend, sorted by course code
    let legend: BTreeMap<&String, &String> = timetable.colors.iter().collect();
    let _ = writeln!(html, "<h3>Courses</h3>\n<ul>");
    for (code, color) in legend {
        let _ = writeln!(
            html,
            "<li><span style=\"background: {}\">&nbsp;&nbsp;&nbsp;&nbsp;</span> {}</li>",
            escape_html(color),
            escape_html(code)
        );
    }
    let _ = writeln!(html, "</ul>\n</body>\n</html>");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ColorMap, Shortfall, SessionKind, Slot, SlotRole, TimetableGrid};

    fn timetable() -> Timetable {
        let slots = vec![
            Slot { label: "09:00 - 10:30".to_string(), role: SlotRole::Lecture },
            Slot { label: "10:30 - 11:00".to_string(), role: SlotRole::Break },
        ];
        let mut grid = TimetableGrid::new(&slots, "10:30 - 11:00", "13:30 - 14:30");
        if let Some(cell) = grid.day_mut(crate::schedule::Day::Tue).get_mut("09:00 - 10:30") {
            *cell = Cell::Lecture("CS<1>".to_string());
        }
        let mut colors = ColorMap::new();
        colors.insert("CS<1>".to_string(), "#00B050".to_string());
        Timetable {
            grid,
            colors,
            shortfalls: vec![Shortfall {
                code: "MA102".to_string(),
                session: SessionKind::Tutorial,
                required: 2,
                placed: 1,
            }],
        }
    }

    #[test]
    fn text_lists_every_day_and_shortfall() {
        let text = format_timetable(&TimetableHeader::default(), &timetable());
        for day in ["MON", "TUE", "WED", "THU", "FRI"] {
            assert!(text.contains(day));
        }
        assert!(text.contains("09:00 - 10:30 -> CS<1>"));
        assert!(text.contains("10:30 - 11:00 -> -- Morning Break --"));
        assert!(text.contains("MA102 tutorial: 1 of 2 placed"));
    }

    #[test]
    fn html_colors_and_escapes_cells() {
        let html = render_html(&TimetableHeader::default(), &timetable());
        assert!(html.contains("<td style=\"background: #00B050\">CS&lt;1&gt;</td>"));
        assert!(html.contains("<td class=\"break\">Morning Break</td>"));
        // Header row plus one row per day
        assert_eq!(html.matches("<tr><th>").count(), 6);
    }

    #[test]
    fn writes_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.txt");
        let path_str = path.to_str().unwrap();
        write_timetable_to_file(&TimetableHeader::default(), &timetable(), path_str).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("** Indian Institute"));
    }
}

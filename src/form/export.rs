use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;

use crate::schedule::TimetableGrid;

/// Writes the grid as CSV: a `Day,<slot labels...>` header, then one row per day
pub fn write_timetable_csv<W: Write>(grid: &TimetableGrid, writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec!["Day"];
    header.extend(grid.slot_labels());
    wtr.write_record(&header)?;

    for day in grid.days() {
        let mut row = vec![day.day.to_string()];
        row.extend(day.slots.iter().map(|s| s.value.label()));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the grid to a CSV file, replacing any existing file
pub fn export_timetable_to_csv(
    grid: &TimetableGrid,
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(csv_path)?;
    write_timetable_csv(grid, file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Slot, SlotRole};
    use csv::ReaderBuilder;
    use tempfile::NamedTempFile;

    fn grid() -> TimetableGrid {
        let slots = vec![
            Slot { label: "09:00 - 10:30".to_string(), role: SlotRole::Lecture },
            Slot { label: "10:30 - 11:00".to_string(), role: SlotRole::Break },
        ];
        TimetableGrid::new(&slots, "10:30 - 11:00", "13:30 - 14:30")
    }

    #[test]
    fn writes_header_and_one_row_per_day() {
        let mut out = Vec::new();
        write_timetable_csv(&grid(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Day,09:00 - 10:30,10:30 - 11:00");
        assert_eq!(lines[1], "MON,,Morning Break");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn exported_file_reads_back() {
        let file = NamedTempFile::new().unwrap();
        export_timetable_to_csv(&grid(), file.path()).unwrap();
        let mut reader = ReaderBuilder::new().from_path(file.path()).unwrap();
        let days: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap_or("").to_string())
            .collect();
        assert_eq!(days, vec!["MON", "TUE", "WED", "THU", "FRI"]);
    }
}

use crate::parser::CourseRecord;
use super::types::ColorMap;

/// Color given to courses the sheet did not color
pub const FALLBACK_COLOR: &str = "#FFD700";

/// Makes sure every course has a non-empty color; existing colors are kept
pub fn resolve_colors(color_map: &mut ColorMap, courses: &[CourseRecord]) {
    for course in courses {
        let code = course.code.trim();
        let color = color_map.entry(code.to_string()).or_default();
        if color.trim().is_empty() {
            *color = FALLBACK_COLOR.to_string();
        }
    }
}

/// Normalizes a color read from the sheet.
/// Eight hex digits are ARGB, so the alpha byte is dropped ("FF00B050" -> "#00B050").
pub fn normalize_color(raw: &str) -> String {
    let value = raw.trim().trim_start_matches('#');
    if value.is_empty() {
        return String::new();
    }
    if value.len() == 8 && value.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("#{}", &value[2..])
    } else {
        format!("#{}", value)
    }
}

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::catalog::{CatalogMode, SlotConfig, DEFAULT_LUNCH_BREAK, DEFAULT_MORNING_BREAK};

/// Raw form fields, e.g. "lecture_slot_1" -> "09:00 - 10:30"
pub type FormFields = HashMap<String, String>;

pub const INSTITUTE_NAME: &str = "Indian Institute of Information Technology Dharwad";

/// Descriptive block printed above the timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableHeader {
    pub institute_name: String,
    pub academic_year: String,
    pub semester: String,
    pub classroom: String,
    pub branch: String,
    pub group_mail: String,
}

impl Default for TimetableHeader {
    fn default() -> Self {
        TimetableHeader {
            institute_name: INSTITUTE_NAME.to_string(),
            academic_year: "Jan - April 2025".to_string(),
            semester: "IV".to_string(),
            classroom: "C104".to_string(),
            branch: "CSE".to_string(),
            group_mail: "2023csea@iiitdwd.ac.in".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("'{key}' must be a whole number, got '{value}'")]
    InvalidCount { key: String, value: String },

    #[error("unknown slot layout '{0}' (valid: fixed, grouped, chronological)")]
    UnknownMode(String),
}

/// Reads the slot layout from form fields.
///
/// Slots are read as `<role>_slot_<i>` for `i` in `1..=num_<role>_slots`;
/// missing keys are skipped. Without a `mode` field the layout is inferred:
/// no slot fields at all means the fixed day, minor slots mean the
/// chronological day, anything else the grouped day. A layout without
/// lecture, tutorial or lab slots is accepted; every session then ends up
/// as a shortfall.
pub fn parse_slot_form(fields: &FormFields) -> Result<SlotConfig, FormError> {
    let mode = match fields.get("mode").map(|m| m.trim().to_lowercase()) {
        Some(m) if m.is_empty() => None,
        Some(m) => Some(match m.as_str() {
            "fixed" => CatalogMode::Fixed,
            "grouped" => CatalogMode::Grouped,
            "chronological" => CatalogMode::Chronological,
            other => return Err(FormError::UnknownMode(other.to_string())),
        }),
        None => None,
    };

    if mode == Some(CatalogMode::Fixed) || (mode.is_none() && !has_slot_fields(fields)) {
        return Ok(SlotConfig::fixed());
    }

    let lecture_slots = read_slots(fields, "lecture", 2)?;
    let tutorial_slots = read_slots(fields, "tutorial", 1)?;
    let lab_slots = read_slots(fields, "lab", 1)?;
    let minor_slots = read_slots(fields, "minor", 0)?;
    let morning_break = text_or(fields, "morning_break", DEFAULT_MORNING_BREAK);
    let lunch_break = text_or(fields, "lunch_break", DEFAULT_LUNCH_BREAK);

    let mode = mode.unwrap_or(if minor_slots.is_empty() {
        CatalogMode::Grouped
    } else {
        CatalogMode::Chronological
    });

    Ok(match mode {
        CatalogMode::Chronological => SlotConfig::chronological(
            lecture_slots,
            tutorial_slots,
            lab_slots,
            minor_slots,
            morning_break,
            lunch_break,
        ),
        _ => SlotConfig::grouped(lecture_slots, tutorial_slots, lab_slots, morning_break, lunch_break),
    })
}

/// Reads the header block, falling back to the defaults field by field
pub fn parse_header(fields: &FormFields) -> TimetableHeader {
    let defaults = TimetableHeader::default();
    TimetableHeader {
        institute_name: defaults.institute_name,
        academic_year: text_or(fields, "academic_year", &defaults.academic_year),
        semester: text_or(fields, "semester", &defaults.semester),
        classroom: text_or(fields, "classroom", &defaults.classroom),
        branch: text_or(fields, "branch", &defaults.branch),
        group_mail: text_or(fields, "group_mail", &defaults.group_mail),
    }
}

fn has_slot_fields(fields: &FormFields) -> bool {
    fields.keys().any(|k| {
        k.contains("_slot_") || (k.starts_with("num_") && k.ends_with("_slots")) || k.ends_with("_break")
    })
}

fn text_or(fields: &FormFields, key: &str, default: &str) -> String {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn read_slots(fields: &FormFields, role: &str, default_count: usize) -> Result<Vec<String>, FormError> {
    let count_key = format!("num_{}_slots", role);
    let count = match fields.get(&count_key).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => value.parse::<usize>().map_err(|_| FormError::InvalidCount {
            key: count_key.clone(),
            value: value.to_string(),
        })?,
        _ => default_count,
    };

    // Present keys only, never a walk over 1..=count
    let prefix = format!("{}_slot_", role);
    let mut indexed: Vec<(usize, &str)> = fields
        .iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix(&prefix)?.parse::<usize>().ok()?;
            (1..=count).contains(&index).then(|| (index, value.trim()))
        })
        .filter(|(_, value)| !value.is_empty())
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    Ok(indexed.into_iter().map(|(_, value)| value.to_string()).collect())
}

use serde::{Deserialize, Serialize};

/// Hour counts from an `L-T-P-S-C` credit string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    pub lecture: u32,
    pub tutorial: u32,
    pub lab: u32,
    pub self_study: u32,
    pub total: u32,
}

impl Credits {
    pub fn as_tuple(&self) -> (u32, u32, u32, u32, u32) {
        (self.lecture, self.tutorial, self.lab, self.self_study, self.total)
    }

    /// Lecture sessions to place: one lecture hour is always left out of the grid
    pub fn lecture_sessions(&self) -> u32 {
        self.lecture.saturating_sub(1)
    }

    pub fn tutorial_sessions(&self) -> u32 {
        self.tutorial
    }

    /// Lab sessions to place. Each session is a 2 hour block, a single lab hour still takes one.
    pub fn lab_sessions(&self) -> u32 {
        if self.lab >= 2 {
            self.lab / 2
        } else {
            self.lab
        }
    }
}

/// Parses a credit string of the form "L-T-P-S-C"
/// Returns all zeros if the string is malformed in any way
pub fn parse_credits(credit_str: &str) -> Credits {
    try_parse_credits(credit_str).unwrap_or_default()
}

fn try_parse_credits(credit_str: &str) -> Option<Credits> {
    let parts: Vec<&str> = credit_str.split('-').collect();
    if parts.len() != 5 {
        return None;
    }

    let mut values = [0u32; 5];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part.trim().parse().ok()?;
    }

    Some(Credits {
        lecture: values[0],
        tutorial: values[1],
        lab: values[2],
        self_study: values[3],
        total: values[4],
    })
}

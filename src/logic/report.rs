//! CSV report for pasting into a spreadsheet.

use crate::logic::Schedule;
use crate::models::{Match, ReportError, TimeSlot};
use rand::Rng;

pub const HEADER: [&str; 7] = [
    "group",
    "date",
    "start",
    "end",
    "court",
    "competitor_1",
    "competitor_2",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReportOptions {
    pub delimiter: u8,
    /// Randomly swap the two competitor columns so nobody is always listed first.
    pub shuffle_sides: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            shuffle_sides: true,
        }
    }
}

/// Render assigned matches grouped by group (first-appearance order), then by start and court.
pub fn render_csv<R: Rng + ?Sized>(
    matches: &[Match],
    options: &ReportOptions,
    rng: &mut R,
) -> Result<String, ReportError> {
    let mut rows: Vec<(&Match, &TimeSlot)> = Vec::with_capacity(matches.len());
    for m in matches {
        let slot = m.time.as_ref().ok_or_else(|| ReportError::Unassigned {
            group: m.group.clone(),
            players: format!("{} vs {}", m.competitor_1, m.competitor_2),
        })?;
        rows.push((m, slot));
    }

    let mut groups: Vec<&str> = Vec::new();
    for m in matches {
        if !groups.contains(&m.group.as_str()) {
            groups.push(m.group.as_str());
        }
    }
    let group_index = |name: &str| groups.iter().position(|g| *g == name).unwrap_or(groups.len());
    rows.sort_by_key(|(m, slot)| (group_index(m.group.as_str()), slot.start, slot.court));

    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .from_writer(&mut buf);
        writer.write_record(HEADER)?;
        for (m, slot) in rows {
            let (first, second) = if options.shuffle_sides && rng.gen_bool(0.5) {
                (&m.competitor_2, &m.competitor_1)
            } else {
                (&m.competitor_1, &m.competitor_2)
            };
            writer.write_record([
                m.group.clone(),
                slot.start.format("%Y-%m-%d").to_string(),
                slot.start.format("%H:%M").to_string(),
                slot.end.format("%H:%M").to_string(),
                slot.court.to_string(),
                first.to_string(),
                second.to_string(),
            ])?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// The whole schedule (id, seed and matches) as pretty JSON.
pub fn render_json(schedule: &Schedule) -> Result<String, ReportError> {
    let mut json = serde_json::to_string_pretty(schedule)?;
    json.push('\n');
    Ok(json)
}

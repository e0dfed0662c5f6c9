//! Time-slot validation for shift templates.
//!
//! Reports the first problem found, tagged with the form field it belongs to
//! (for example `timeSlots.1.block2StartTime`). Fixing that field and
//! validating again surfaces the next problem, if any.

use super::intervals::{blocks_overlap, BlockSpan, TimeBlock};
use super::models::{GlobalTolerances, SegmentType, ShiftTemplate, ShiftType, TimeSlot};
use crate::utils::time::{parse_time, Minutes};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_TIME_SLOTS: usize = 5;
pub const MIN_BLOCK_MINUTES: Minutes = 60;
pub const MAX_BLOCK_MINUTES: Minutes = 16 * 60;
pub const MAX_BREAK_MINUTES: i32 = 480;
pub const MAX_TOLERANCE_MINUTES: i32 = 60;
pub const MAX_NAME_LENGTH: usize = 100;

/// A single field-tagged validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Form field location, dot separated
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Last segment of the path, i.e. the field name without its slot prefix
    pub fn field(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

fn ordinal(block: usize) -> &'static str {
    match block {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "4th",
    }
}

fn start_field(block: usize) -> &'static str {
    match block {
        1 => "startTime",
        2 => "block2StartTime",
        3 => "block3StartTime",
        _ => "block4StartTime",
    }
}

fn end_field(block: usize) -> &'static str {
    match block {
        1 => "endTime",
        2 => "block2EndTime",
        3 => "block3EndTime",
        _ => "block4EndTime",
    }
}

fn slot_path(slot: usize, field: &str) -> String {
    format!("timeSlots.{}.{}", slot, field)
}

fn required_time(
    slot: usize,
    block: usize,
    value: Option<&str>,
    field: &str,
    label: &str,
) -> Result<Minutes, ValidationError> {
    // Blank counts as missing, but padding around a time is a format error
    let value = value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        ValidationError::new(
            slot_path(slot, field),
            format!("{} block {} time is required", ordinal(block), label),
        )
    })?;

    parse_time(value).ok_or_else(|| {
        ValidationError::new(slot_path(slot, field), "Invalid time format (HH:MM)")
    })
}

fn check_range(path: String, value: Option<i32>, max: i32, label: &str) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(0..=max).contains(&v) => Err(ValidationError::new(
            path,
            format!("{} must be between 0 and {} minutes", label, max),
        )),
        _ => Ok(()),
    }
}

/// Check one slot's blocks and return them as minute blocks
///
/// Only the first block of a continuous slot may wrap past midnight.
pub fn slot_blocks(slot_index: usize, slot: &TimeSlot) -> Result<Vec<TimeBlock>, ValidationError> {
    let count = slot.segment_type.block_count();
    let mut blocks: Vec<TimeBlock> = Vec::with_capacity(count);

    for n in 1..=count {
        let (start, end) = slot.block(n);
        let start = required_time(slot_index, n, start, start_field(n), "start")?;
        let end = required_time(slot_index, n, end, end_field(n), "end")?;
        let block = TimeBlock::new(start, end);

        let may_wrap = n == 1 && slot.segment_type == SegmentType::Continuous;
        if block.span == BlockSpan::WrapsMidnight && !may_wrap {
            return Err(ValidationError::new(
                slot_path(slot_index, end_field(n)),
                format!("{} block end time must be after its start time", ordinal(n)),
            ));
        }

        let duration = block.duration();
        if duration < MIN_BLOCK_MINUTES {
            return Err(ValidationError::new(
                slot_path(slot_index, end_field(n)),
                format!("{} block must be at least 1 hour long", ordinal(n)),
            ));
        }
        if duration > MAX_BLOCK_MINUTES {
            return Err(ValidationError::new(
                slot_path(slot_index, end_field(n)),
                format!("{} block cannot be longer than 16 hours", ordinal(n)),
            ));
        }

        if let Some(previous) = blocks.last() {
            if block.start <= previous.end {
                return Err(ValidationError::new(
                    slot_path(slot_index, start_field(n)),
                    format!(
                        "{} block must start after the {} block ends",
                        ordinal(n),
                        ordinal(n - 1)
                    ),
                ));
            }
        }

        blocks.push(block);
    }

    Ok(blocks)
}

fn check_slot_limits(slot_index: usize, slot: &TimeSlot) -> Result<(), ValidationError> {
    check_range(
        slot_path(slot_index, "breakMinutes"),
        slot.break_minutes,
        MAX_BREAK_MINUTES,
        "Break",
    )?;
    check_range(
        slot_path(slot_index, "clockInToleranceMinutes"),
        slot.clock_in_tolerance_minutes,
        MAX_TOLERANCE_MINUTES,
        "Clock-in tolerance",
    )?;
    check_range(
        slot_path(slot_index, "clockOutToleranceMinutes"),
        slot.clock_out_tolerance_minutes,
        MAX_TOLERANCE_MINUTES,
        "Clock-out tolerance",
    )
}

fn check_global_tolerances(globals: &GlobalTolerances) -> Result<(), ValidationError> {
    let fields = [
        ("globalClockInTolerance", globals.global_clock_in_tolerance, MAX_TOLERANCE_MINUTES, "Clock-in tolerance"),
        ("globalClockOutTolerance", globals.global_clock_out_tolerance, MAX_TOLERANCE_MINUTES, "Clock-out tolerance"),
        ("globalBreakMinutes", globals.global_break_minutes, MAX_BREAK_MINUTES, "Break"),
    ];

    for (field, value, max, label) in fields {
        if value.is_none() {
            return Err(ValidationError::new(field, "Required for split shifts"));
        }
        check_range(field.to_string(), value, max, label)?;
    }

    Ok(())
}

/// Validate a slot set and return each slot's blocks when it is accepted
pub fn resolve_slots(
    slots: &[TimeSlot],
    shift_type: ShiftType,
    globals: Option<&GlobalTolerances>,
) -> Result<Vec<Vec<TimeBlock>>, ValidationError> {
    if shift_type == ShiftType::SplitShift {
        check_global_tolerances(&globals.copied().unwrap_or_default())?;
    }

    let mut resolved = Vec::with_capacity(slots.len());
    for (index, slot) in slots.iter().enumerate() {
        resolved.push(slot_blocks(index, slot)?);
        check_slot_limits(index, slot)?;
    }

    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            if blocks_overlap(&resolved[i], &resolved[j]) {
                return Err(ValidationError::new(
                    slot_path(j, "startTime"),
                    format!("Time slot {} overlaps with time slot {}", i + 1, j + 1),
                ));
            }
        }
    }

    Ok(resolved)
}

/// Validate the time slots of a template
pub fn validate(
    slots: &[TimeSlot],
    shift_type: ShiftType,
    globals: Option<&GlobalTolerances>,
) -> Result<(), ValidationError> {
    resolve_slots(slots, shift_type, globals).map(|_| ())
}

fn is_hex_color(color: &str) -> bool {
    let bytes = color.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

/// Validate template metadata, then its time slots
pub fn validate_template(template: &ShiftTemplate) -> Result<(), ValidationError> {
    resolve_template(template).map(|_| ())
}

/// Validate a whole template and return each slot's blocks when it is accepted
pub fn resolve_template(template: &ShiftTemplate) -> Result<Vec<Vec<TimeBlock>>, ValidationError> {
    let name = template.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("name", "Template name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(
            "name",
            format!("Template name cannot exceed {} characters", MAX_NAME_LENGTH),
        ));
    }
    if !is_hex_color(&template.color) {
        return Err(ValidationError::new("color", "Color must be a hex value like #3b82f6"));
    }
    if template.time_slots.is_empty() {
        return Err(ValidationError::new("timeSlots", "At least one time slot is required"));
    }
    if template.time_slots.len() > MAX_TIME_SLOTS {
        return Err(ValidationError::new(
            "timeSlots",
            format!("A template can have at most {} time slots", MAX_TIME_SLOTS),
        ));
    }

    resolve_slots(&template.time_slots, template.shift_type, Some(&template.tolerances))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_based(slots: &[TimeSlot]) -> Result<(), ValidationError> {
        validate(slots, ShiftType::SlotBased, None)
    }

    #[test]
    fn test_continuous_duration_bounds() {
        assert!(slot_based(&[TimeSlot::continuous("09:00", "10:00")]).is_ok());
        assert!(slot_based(&[TimeSlot::continuous("06:00", "22:00")]).is_ok());

        let err = slot_based(&[TimeSlot::continuous("09:00", "09:59")]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.endTime");
        assert_eq!(err.message, "1st block must be at least 1 hour long");

        let err = slot_based(&[TimeSlot::continuous("06:00", "22:01")]).unwrap_err();
        assert_eq!(err.message, "1st block cannot be longer than 16 hours");
    }

    #[test]
    fn test_continuous_may_wrap_midnight() {
        assert!(slot_based(&[TimeSlot::continuous("22:00", "02:00")]).is_ok());

        // Same start and end means a full day, which is too long
        let err = slot_based(&[TimeSlot::continuous("08:00", "08:00")]).unwrap_err();
        assert_eq!(err.field(), "endTime");
    }

    #[test]
    fn test_split_blocks_cannot_wrap() {
        let slot = TimeSlot::split(("22:00", "02:00"), ("10:00", "12:00"));
        let err = slot_based(&[slot]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.endTime");
        assert_eq!(err.message, "1st block end time must be after its start time");

        let slot = TimeSlot::split(("09:00", "12:00"), ("23:00", "01:00"));
        let err = slot_based(&[slot]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.block2EndTime");
    }

    #[test]
    fn test_missing_block_fields() {
        let mut slot = TimeSlot::split(("09:00", "12:00"), ("14:00", "18:00"));
        slot.block2_start_time = None;
        let err = slot_based(&[slot.clone()]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.block2StartTime");
        assert_eq!(err.message, "2nd block start time is required");

        slot.block2_start_time = Some("  ".to_string());
        assert_eq!(slot_based(&[slot]).unwrap_err().field(), "block2StartTime");

        let quad = TimeSlot {
            segment_type: SegmentType::Quad,
            block3_start_time: Some("15:00".to_string()),
            block3_end_time: Some("17:00".to_string()),
            ..TimeSlot::split(("06:00", "08:00"), ("10:00", "12:00"))
        };
        let err = slot_based(&[quad]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.block4StartTime");
        assert_eq!(err.message, "4th block start time is required");
    }

    #[test]
    fn test_extra_block_fields_are_ignored() {
        let mut slot = TimeSlot::continuous("09:00", "17:00");
        slot.block2_start_time = Some("garbage".to_string());
        assert!(slot_based(&[slot]).is_ok());
    }

    #[test]
    fn test_invalid_time_format() {
        let err = slot_based(&[TimeSlot::continuous("9:00", "17:00")]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.startTime");
        assert_eq!(err.message, "Invalid time format (HH:MM)");
    }

    #[test]
    fn test_blocks_must_ascend_within_slot() {
        let touching = TimeSlot::split(("09:00", "12:00"), ("12:00", "14:00"));
        let err = slot_based(&[touching]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.block2StartTime");
        assert_eq!(err.message, "2nd block must start after the 1st block ends");

        let reversed = TimeSlot::split(("14:00", "18:00"), ("09:00", "12:00"));
        assert_eq!(slot_based(&[reversed]).unwrap_err().field(), "block2StartTime");
    }

    #[test]
    fn test_triple_slot_accepted() {
        let slot = TimeSlot {
            segment_type: SegmentType::Triple,
            block3_start_time: Some("19:00".to_string()),
            block3_end_time: Some("22:00".to_string()),
            ..TimeSlot::split(("07:00", "10:00"), ("12:00", "15:00"))
        };
        let blocks = resolve_slots(&[slot], ShiftType::SlotBased, None).unwrap();
        assert_eq!(blocks[0].len(), 3);
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        let slots = [
            TimeSlot::continuous("09:00", "13:00"),
            TimeSlot::continuous("13:00", "17:00"),
        ];
        assert!(slot_based(&slots).is_ok());
    }

    #[test]
    fn test_overlapping_slots_report_second_slot() {
        let slots = [
            TimeSlot::continuous("09:00", "13:00"),
            TimeSlot::continuous("12:00", "17:00"),
        ];
        let err = slot_based(&slots).unwrap_err();
        assert_eq!(err.path, "timeSlots.1.startTime");
        assert_eq!(err.message, "Time slot 1 overlaps with time slot 2");
    }

    #[test]
    fn test_first_overlapping_pair_wins() {
        let slots = [
            TimeSlot::continuous("06:00", "08:00"),
            TimeSlot::continuous("10:00", "14:00"),
            TimeSlot::continuous("07:00", "09:00"),
            TimeSlot::continuous("13:00", "15:00"),
        ];
        let err = slot_based(&slots).unwrap_err();
        assert_eq!(err.message, "Time slot 1 overlaps with time slot 3");
        assert_eq!(err.path, "timeSlots.2.startTime");
    }

    #[test]
    fn test_split_gap_leaves_room_for_other_slot() {
        let slots = [
            TimeSlot::split(("09:00", "12:00"), ("14:00", "18:00")),
            TimeSlot::continuous("12:30", "13:30"),
        ];
        assert!(slot_based(&slots).is_ok());
    }

    #[test]
    fn test_night_slot_overlaps_early_slot() {
        let slots = [
            TimeSlot::continuous("22:00", "06:00"),
            TimeSlot::continuous("05:00", "09:00"),
        ];
        let err = slot_based(&slots).unwrap_err();
        assert_eq!(err.message, "Time slot 1 overlaps with time slot 2");

        let slots = [
            TimeSlot::continuous("22:00", "06:00"),
            TimeSlot::continuous("06:00", "14:00"),
            TimeSlot::continuous("14:00", "22:00"),
        ];
        assert!(slot_based(&slots).is_ok());
    }

    #[test]
    fn test_per_slot_limits() {
        let mut slot = TimeSlot::continuous("09:00", "17:00");
        slot.break_minutes = Some(481);
        let err = slot_based(&[slot.clone()]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.breakMinutes");

        slot.break_minutes = Some(30);
        slot.clock_out_tolerance_minutes = Some(-1);
        let err = slot_based(&[slot]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.clockOutToleranceMinutes");
        assert_eq!(err.message, "Clock-out tolerance must be between 0 and 60 minutes");
    }

    #[test]
    fn test_split_shift_requires_global_tolerances() {
        let slots = [TimeSlot::continuous("09:00", "17:00")];
        let err = validate(&slots, ShiftType::SplitShift, None).unwrap_err();
        assert_eq!(err.path, "globalClockInTolerance");

        let globals = GlobalTolerances {
            global_clock_in_tolerance: Some(10),
            global_clock_out_tolerance: Some(10),
            global_break_minutes: None,
        };
        let err = validate(&slots, ShiftType::SplitShift, Some(&globals)).unwrap_err();
        assert_eq!(err.path, "globalBreakMinutes");
        assert_eq!(err.message, "Required for split shifts");

        let globals = GlobalTolerances {
            global_break_minutes: Some(60),
            ..globals
        };
        assert!(validate(&slots, ShiftType::SplitShift, Some(&globals)).is_ok());

        // Slot-based templates never look at the globals
        assert!(validate(&slots, ShiftType::SlotBased, None).is_ok());
    }

    #[test]
    fn test_template_metadata() {
        let valid = ShiftTemplate::new("Morning").with_slot(TimeSlot::continuous("06:00", "14:00"));
        assert!(validate_template(&valid).is_ok());

        let mut template = valid.clone();
        template.name = "   ".to_string();
        assert_eq!(validate_template(&template).unwrap_err().path, "name");

        let mut template = valid.clone();
        template.color = "blue".to_string();
        assert_eq!(validate_template(&template).unwrap_err().path, "color");

        let mut template = valid.clone();
        template.time_slots.clear();
        assert_eq!(validate_template(&template).unwrap_err().path, "timeSlots");

        let mut template = valid;
        template.time_slots = (0..6)
            .map(|h| TimeSlot::continuous(&format!("{:02}:00", h * 2), &format!("{:02}:00", h * 2 + 1)))
            .collect();
        let err = validate_template(&template).unwrap_err();
        assert_eq!(err.message, "A template can have at most 5 time slots");
    }

    #[test]
    fn test_padded_times_are_rejected() {
        let err = slot_based(&[TimeSlot::continuous(" 09:00", "17:00")]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.startTime");
        assert_eq!(err.message, "Invalid time format (HH:MM)");

        let err = slot_based(&[TimeSlot::continuous("09:00", "17:00\t")]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.endTime");
        assert_eq!(err.message, "Invalid time format (HH:MM)");

        let template = ShiftTemplate::new("Padded").with_slot(TimeSlot::continuous(" 09:00", "17:00\t"));
        assert_eq!(validate_template(&template).unwrap_err().path, "timeSlots.0.startTime");
    }

    #[test]
    fn test_global_tolerance_bounds() {
        let slots = [TimeSlot::continuous("09:00", "17:00")];
        let within = GlobalTolerances {
            global_clock_in_tolerance: Some(60),
            global_clock_out_tolerance: Some(0),
            global_break_minutes: Some(480),
        };
        assert!(validate(&slots, ShiftType::SplitShift, Some(&within)).is_ok());

        let late_clock_in = GlobalTolerances {
            global_clock_in_tolerance: Some(61),
            ..within
        };
        let err = validate(&slots, ShiftType::SplitShift, Some(&late_clock_in)).unwrap_err();
        assert_eq!(err.path, "globalClockInTolerance");
        assert_eq!(err.message, "Clock-in tolerance must be between 0 and 60 minutes");

        let negative_break = GlobalTolerances {
            global_break_minutes: Some(-1),
            ..within
        };
        let err = validate(&slots, ShiftType::SplitShift, Some(&negative_break)).unwrap_err();
        assert_eq!(err.path, "globalBreakMinutes");
        assert_eq!(err.message, "Break must be between 0 and 480 minutes");
    }

    #[test]
    fn test_name_length_limit() {
        let slot = TimeSlot::continuous("06:00", "14:00");
        let longest = ShiftTemplate::new("a".repeat(MAX_NAME_LENGTH)).with_slot(slot.clone());
        assert!(validate_template(&longest).is_ok());

        let too_long = ShiftTemplate::new("a".repeat(MAX_NAME_LENGTH + 1)).with_slot(slot);
        let err = validate_template(&too_long).unwrap_err();
        assert_eq!(err.path, "name");
        assert_eq!(err.message, "Template name cannot exceed 100 characters");
    }

    #[test]
    fn test_later_blocks_must_ascend() {
        let triple = TimeSlot {
            segment_type: SegmentType::Triple,
            block3_start_time: Some("12:00".to_string()),
            block3_end_time: Some("14:00".to_string()),
            ..TimeSlot::split(("06:00", "09:00"), ("10:00", "12:00"))
        };
        let err = slot_based(&[triple]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.block3StartTime");
        assert_eq!(err.message, "3rd block must start after the 2nd block ends");

        let quad = TimeSlot {
            segment_type: SegmentType::Quad,
            block3_start_time: Some("13:00".to_string()),
            block3_end_time: Some("15:00".to_string()),
            block4_start_time: Some("14:00".to_string()),
            block4_end_time: Some("16:00".to_string()),
            ..TimeSlot::split(("06:00", "09:00"), ("10:00", "12:00"))
        };
        let err = slot_based(&[quad]).unwrap_err();
        assert_eq!(err.path, "timeSlots.0.block4StartTime");
        assert_eq!(err.message, "4th block must start after the 3rd block ends");
    }

    #[test]
    fn test_resolve_template_returns_blocks() {
        let template = ShiftTemplate::new("Split day")
            .with_slot(TimeSlot::split(("07:00", "11:00"), ("15:00", "19:00")))
            .with_slot(TimeSlot::continuous("22:00", "02:00"));
        let blocks = resolve_template(&template).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(blocks[1][0].span, BlockSpan::WrapsMidnight);
    }

    #[test]
    fn test_field_of_top_level_path() {
        let err = ValidationError::new("name", "Template name is required");
        assert_eq!(err.field(), "name");
    }
}

use serde::{Deserialize, Serialize};

/// How many contiguous blocks make up a time slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    #[default]
    Continuous,
    Split,
    Triple,
    Quad,
}

impl SegmentType {
    /// Number of blocks a slot of this type carries
    pub fn block_count(self) -> usize {
        match self {
            SegmentType::Continuous => 1,
            SegmentType::Split => 2,
            SegmentType::Triple => 3,
            SegmentType::Quad => 4,
        }
    }
}

/// Scheduling mode of a whole template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    #[default]
    SlotBased,
    SplitShift,
}

/// One scheduling unit of a template, as edited in the template form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default)]
    pub segment_type: SegmentType,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block2_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block2_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block3_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block3_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block4_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block4_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_in_tolerance_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out_tolerance_minutes: Option<i32>,
}

impl TimeSlot {
    /// Create a single-block slot
    pub fn continuous(start: &str, end: &str) -> Self {
        Self {
            segment_type: SegmentType::Continuous,
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Default::default()
        }
    }

    /// Create a two-block slot
    pub fn split(first: (&str, &str), second: (&str, &str)) -> Self {
        Self {
            segment_type: SegmentType::Split,
            block2_start_time: Some(second.0.to_string()),
            block2_end_time: Some(second.1.to_string()),
            ..Self::continuous(first.0, first.1)
        }
    }

    /// Start and end strings of block `n` (1-based), whether or not the
    /// segment type declares it
    pub fn block(&self, n: usize) -> (Option<&str>, Option<&str>) {
        let (start, end) = match n {
            1 => (&self.start_time, &self.end_time),
            2 => (&self.block2_start_time, &self.block2_end_time),
            3 => (&self.block3_start_time, &self.block3_end_time),
            4 => (&self.block4_start_time, &self.block4_end_time),
            _ => return (None, None),
        };
        (start.as_deref(), end.as_deref())
    }

    /// Copy of this slot without the block fields its segment type ignores
    pub fn normalized(&self) -> Self {
        let blocks = self.segment_type.block_count();
        let keep = |n: usize, value: &Option<String>| if n <= blocks { value.clone() } else { None };

        Self {
            block2_start_time: keep(2, &self.block2_start_time),
            block2_end_time: keep(2, &self.block2_end_time),
            block3_start_time: keep(3, &self.block3_start_time),
            block3_end_time: keep(3, &self.block3_end_time),
            block4_start_time: keep(4, &self.block4_start_time),
            block4_end_time: keep(4, &self.block4_end_time),
            ..self.clone()
        }
    }
}

/// Template-wide tolerances, required when the template uses split shifts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalTolerances {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_clock_in_tolerance: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_clock_out_tolerance: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_break_minutes: Option<i32>,
}

/// A shift template: ordered time slots plus metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    // Missing names reach the template checks as empty
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub shift_type: ShiftType,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(flatten)]
    pub tolerances: GlobalTolerances,
}

fn default_color() -> String {
    "#3b82f6".to_string()
}

fn default_active() -> bool {
    true
}

impl ShiftTemplate {
    /// Create a new active slot-based template with no slots
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            color: default_color(),
            store_id: None,
            is_active: true,
            shift_type: ShiftType::SlotBased,
            time_slots: Vec::new(),
            tolerances: GlobalTolerances::default(),
        }
    }

    /// Add a slot to the template
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Body sent to the backend on create/update
    ///
    /// The id travels in the URL, ignored block fields are dropped and global
    /// tolerances are only kept for split-shift templates.
    pub fn to_request(&self) -> Self {
        let tolerances = match self.shift_type {
            ShiftType::SplitShift => self.tolerances,
            ShiftType::SlotBased => GlobalTolerances::default(),
        };

        Self {
            id: None,
            name: self.name.trim().to_string(),
            time_slots: self.time_slots.iter().map(TimeSlot::normalized).collect(),
            tolerances,
            ..self.clone()
        }
    }
}

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum WorkStatus {
    Scheduled,
    Working,
    Completed,
}

impl WorkStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkStatus::Scheduled => "scheduled",
            WorkStatus::Working => "working",
            WorkStatus::Completed => "completed",
        }
    }

    /// Convert DB string → enum.
    /// External shift planners write placeholder rows as either `scheduled`
    /// or `pending`; both read back as Scheduled.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "scheduled" | "pending" => Some(WorkStatus::Scheduled),
            "working" => Some(WorkStatus::Working),
            "completed" => Some(WorkStatus::Completed),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, WorkStatus::Scheduled)
    }

    pub fn is_working(&self) -> bool {
        matches!(self, WorkStatus::Working)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, WorkStatus::Completed)
    }
}

use serde::Deserialize;

/// Selects warnings or exclusions for administrative listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EscalationFilter {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    #[serde(default)]
    pub active_only: bool,
}

impl EscalationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_student(mut self, student_id: i64) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn with_course(mut self, course_id: i64) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }
}

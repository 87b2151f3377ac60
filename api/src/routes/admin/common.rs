use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AssignCoursesRequest {
    #[validate(range(min = 1, message = "teacher_id must be a positive id"))]
    pub teacher_id: i64,
    pub course_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

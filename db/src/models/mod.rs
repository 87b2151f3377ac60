pub mod attendance_record;
pub mod course;
pub mod enrollment;
pub mod exclusion;
pub mod session;
pub mod teacher_course;
pub mod user;
pub mod warning;

pub use attendance_record::Entity as AttendanceRecord;
pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use exclusion::Entity as Exclusion;
pub use session::Entity as Session;
pub use teacher_course::Entity as TeacherCourse;
pub use user::Entity as User;
pub use warning::Entity as Warning;

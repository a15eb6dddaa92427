use super::*;

#[test]
fn admin_endpoints_use_collection_segment() {
    assert_eq!(collection_endpoint(ResourceKind::Formations), "/api/v1/admin/formations");
    assert_eq!(item_endpoint(ResourceKind::Users, 7), "/api/v1/admin/users/7");
    assert_eq!(upload_endpoint(ResourceKind::Lessons, 3), "/api/v1/admin/lessons/3/upload");
}

#[test]
fn student_endpoints_format_expected_paths() {
    assert_eq!(lesson_endpoint(12), "/api/v1/student/lessons/12");
    assert_eq!(practice_endpoint(4), "/api/v1/student/certifications/4/practice");
    assert_eq!(start_session_endpoint(4), "/api/v1/student/certifications/4/sessions");
    assert_eq!(save_answer_endpoint(99), "/api/v1/student/exam-sessions/99/answers");
    assert_eq!(submit_endpoint(99), "/api/v1/student/exam-sessions/99/submit");
}

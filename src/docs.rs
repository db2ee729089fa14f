use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::assignments::model::{
    Assignment, AssignmentComment, AssignmentWithComments, CreateAssignmentDto,
    UpdateAssignmentDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequestDto, User};
use crate::modules::discussion::model::{
    CreateReplyDto, CreateTopicDto, Reply, Topic, TopicWithReplies, UpdateTopicDto,
};
use crate::modules::resources::model::{
    CreateResourceDto, Resource, ResourceComment, ResourceWithComments, UpdateResourceDto,
};
use crate::modules::students::model::{
    ChangePasswordDto, CreateStudentDto, Student, UpdateStudentDto,
};
use crate::modules::weeks::model::{CreateWeekDto, UpdateWeekDto, Week, WeekComment, WeekWithComments};
use crate::utils::listing::ListParams;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student_by_id,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::change_password,
        crate::modules::resources::controller::get_resources,
        crate::modules::resources::controller::create_resource,
        crate::modules::resources::controller::get_resource_by_id,
        crate::modules::resources::controller::update_resource,
        crate::modules::resources::controller::delete_resource,
        crate::modules::resources::controller::get_comments,
        crate::modules::resources::controller::add_comment,
        crate::modules::resources::controller::delete_comment,
        crate::modules::assignments::controller::get_assignments,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::get_assignment_by_id,
        crate::modules::assignments::controller::update_assignment,
        crate::modules::assignments::controller::delete_assignment,
        crate::modules::assignments::controller::get_comments,
        crate::modules::assignments::controller::add_comment,
        crate::modules::assignments::controller::delete_comment,
        crate::modules::discussion::controller::get_topics,
        crate::modules::discussion::controller::create_topic,
        crate::modules::discussion::controller::get_topic_by_id,
        crate::modules::discussion::controller::update_topic,
        crate::modules::discussion::controller::delete_topic,
        crate::modules::discussion::controller::get_replies,
        crate::modules::discussion::controller::add_reply,
        crate::modules::discussion::controller::delete_reply,
        crate::modules::weeks::controller::get_weeks,
        crate::modules::weeks::controller::create_week,
        crate::modules::weeks::controller::get_week_by_id,
        crate::modules::weeks::controller::update_week,
        crate::modules::weeks::controller::delete_week,
        crate::modules::weeks::controller::get_comments,
        crate::modules::weeks::controller::add_comment,
        crate::modules::weeks::controller::delete_comment,
    ),
    components(
        schemas(
            ErrorResponse,
            User,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            ChangePasswordDto,
            Resource,
            ResourceComment,
            ResourceWithComments,
            CreateResourceDto,
            UpdateResourceDto,
            Assignment,
            AssignmentComment,
            AssignmentWithComments,
            CreateAssignmentDto,
            UpdateAssignmentDto,
            Topic,
            Reply,
            TopicWithReplies,
            CreateTopicDto,
            UpdateTopicDto,
            CreateReplyDto,
            Week,
            WeekComment,
            WeekWithComments,
            CreateWeekDto,
            UpdateWeekDto,
            ListParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Students", description = "Student record management (admin only)"),
        (name = "Resources", description = "Course resources and their comments"),
        (name = "Assignments", description = "Assignments and their comments"),
        (name = "Discussion", description = "Discussion topics and replies"),
        (name = "Weeks", description = "Weekly course breakdown")
    ),
    info(
        title = "Courseboard API",
        version = "0.1.0",
        description = "A university course portal REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

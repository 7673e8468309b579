use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management Service API",
        version = "1.0.0",
        description = "Administrator authentication and user directory CRUD.\n\n**Authentication:** POST /login issues a 1-hour JWT for registered admins.\n\n**Features:**\n- Admin registration and login\n- User creation with image upload (jpg, jpeg, png, gif)\n- User listing, update and deletion keyed by email\n- Uploaded files served under /uploads"
    ),
    paths(
        crate::api::admins::create_admin,
        crate::api::admins::login,
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::delete_user,
        crate::api::users::update_user,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::admin_service::CreateAdminRequest,
            crate::services::admin_service::LoginRequest,
            crate::services::user_service::UserForm,
            crate::models::AdminInfo,
            crate::models::User,
            crate::models::Gender,
            crate::utils::error::FieldError,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Admins", description = "Administrator registration and login."),
        (name = "Users", description = "User directory CRUD with image uploads."),
        (name = "Health", description = "Liveness and health check endpoints.")
    )
)]
pub struct ApiDoc;

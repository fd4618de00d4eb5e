//! OpenAPI documentation for the catalog API, served at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Bearer-token security scheme for the write routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token obtained from `POST /login`:\n\n\
                            ```\nAuthorization: Bearer YOUR_SESSION_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::login,
        api::handlers::auth::session_info,
        api::handlers::tools::list_tools,
        api::handlers::tools::create_tool,
        api::handlers::tools::update_tool,
        api::handlers::tools::delete_tool,
        api::handlers::prompts::list_prompts,
        api::handlers::prompts::create_prompt,
        api::handlers::prompts::update_prompt,
        api::handlers::prompts::delete_prompt,
        api::handlers::seed::seed_catalog,
    ),
    components(schemas(
        api::models::MessageResponse,
        api::models::CreatedResponse,
        api::models::auth::LoginRequest,
        api::models::auth::LoginResponse,
        api::models::auth::SessionResponse,
        api::models::tools::ToolPayload,
        api::models::tools::HowToStep,
        api::models::tools::ToolRecord,
        api::models::prompts::PromptPayload,
        api::models::prompts::PromptRecord,
        api::models::seed::SeedRequest,
    )),
    tags(
        (name = "authentication", description = "Login and session verification"),
        (name = "tools", description = "Tool catalog records"),
        (name = "prompts", description = "Prompt template records"),
        (name = "seed", description = "One-time catalog seeding"),
    )
)]
pub struct ApiDoc;

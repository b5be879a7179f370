//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{account_handler, admin_handler, home_handler, househelp_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{AccountResponse, AccountSummary, LoginSummary, ProfileView, ReachOut, Role};
use crate::services::{ReachOutReceipt, SystemSummary};
use crate::types::MessageResponse;

/// OpenAPI documentation for HouseHelp Finder
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HouseHelp Finder",
        version = "0.1.0",
        description = "Directory of domestic-help providers with reach-out requests and an admin dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Directory
        home_handler::index,
        home_handler::reach_out_form,
        home_handler::reach_out,
        // Account
        account_handler::login_form,
        account_handler::login,
        account_handler::logout,
        account_handler::access_denied,
        account_handler::summary,
        // Househelp
        househelp_handler::create_form,
        househelp_handler::create,
        househelp_handler::index,
        househelp_handler::edit_form,
        househelp_handler::edit,
        househelp_handler::change_password_form,
        househelp_handler::change_password,
        // Admin
        admin_handler::index,
        admin_handler::list_admins,
        admin_handler::list_house_helps,
        admin_handler::create_form,
        admin_handler::create,
        admin_handler::delete,
    ),
    components(
        schemas(
            // Domain types
            Role,
            ReachOut,
            AccountResponse,
            AccountSummary,
            ProfileView,
            LoginSummary,
            // Service results
            ReachOutReceipt,
            SystemSummary,
            MessageResponse,
            // Request types
            home_handler::ReachOutRequest,
            account_handler::LoginRequest,
            account_handler::LoginForm,
            househelp_handler::CreateAccountRequest,
            househelp_handler::EditProfileRequest,
            househelp_handler::ChangePasswordRequest,
            househelp_handler::ChangePasswordForm,
            admin_handler::DeleteAccountRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Directory", description = "Public househelp directory and reach-outs"),
        (name = "Account", description = "Sign-in and session"),
        (name = "Househelp", description = "Registration and own-account management"),
        (name = "Admin", description = "Administrator dashboard")
    )
)]
pub struct ApiDoc;

/// Security schemes for the session cookie and Bearer tokens
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token issued by /account/login"))
                        .build(),
                ),
            );
        }
    }
}

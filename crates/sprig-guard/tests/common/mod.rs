//! Shared harness for guard HTTP tests: an axum app over the in-memory
//! collaborators, seeded with two schools and a handful of principals.
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use sprig_authz::memory::{MemoryCredentialValidator, MemoryDirectory, MemoryProfileStore};
use sprig_authz::{
    default_policy, Action, Engine, IdentityResolver, MemoryAuditSink, Profile, ResourceId,
    ResourceRef, ResourceType, Role, TenantId, TenantScopeResolver, UserId,
};
use sprig_guard::{ApiError, Guard};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct TestApp {
    pub router: Router,
    pub audit: Arc<MemoryAuditSink>,
    pub validator: Arc<MemoryCredentialValidator>,
    pub profiles: Arc<MemoryProfileStore>,
}

/// Two schools; tokens are `tok-<role>` for school-a principals plus
/// `tok-root` for the platform admin and `tok-inactive` for a deactivated
/// school-a admin.
pub fn test_app() -> TestApp {
    let validator = Arc::new(MemoryCredentialValidator::new());
    let profiles = Arc::new(MemoryProfileStore::new());
    let seed = [
        ("tok-teacher", "u-teacher", Role::Teacher, Some("school-a"), true),
        ("tok-parent", "u-parent", Role::Parent, Some("school-a"), true),
        ("tok-admin", "u-admin", Role::Admin, Some("school-a"), true),
        ("tok-inactive", "u-inactive", Role::Admin, Some("school-a"), false),
        ("tok-root", "u-root", Role::SuperAdmin, None, true),
    ];
    for (token, user, role, tenant, active) in seed {
        validator.insert(token, UserId::new(user));
        profiles.insert(
            UserId::new(user),
            Profile {
                role,
                tenant_id: tenant.map(TenantId::new),
                active,
            },
        );
    }

    let directory = Arc::new(MemoryDirectory::new());
    directory.insert(
        ResourceType::Child,
        ResourceId::new("42"),
        TenantId::new("school-a"),
    );
    directory.insert(
        ResourceType::Child,
        ResourceId::new("99"),
        TenantId::new("school-b"),
    );
    directory.insert(
        ResourceType::Classroom,
        ResourceId::new("5"),
        TenantId::new("school-a"),
    );

    let audit = Arc::new(MemoryAuditSink::new());
    let engine = Engine::new(
        Arc::new(default_policy()),
        TenantScopeResolver::new(directory),
        audit.clone(),
    );
    let guard = Guard::new(
        IdentityResolver::new(validator.clone(), profiles.clone()),
        engine,
    );

    let router = Router::new()
        .route("/v1/children/:id", get(get_child))
        .route("/v1/classrooms/:id", delete(delete_classroom))
        .route("/v1/messages", post(create_message))
        .route("/v1/schools/:id", post(update_school))
        .layer(TraceLayer::new_for_http())
        .with_state(guard);

    TestApp {
        router,
        audit,
        validator,
        profiles,
    }
}

async fn get_child(
    Path(id): Path<String>,
    State(guard): State<Guard>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reference = ResourceRef::existing(ResourceType::Child, id.clone());
    guard
        .run(&headers, Action::Read, &reference, |allowed| async move {
            Json(serde_json::json!({
                "id": id,
                "tenant": allowed.resource_tenant.map(|t| t.to_string()),
            }))
        })
        .await
}

async fn delete_classroom(
    Path(id): Path<String>,
    State(guard): State<Guard>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reference = ResourceRef::existing(ResourceType::Classroom, id.clone());
    let _allowed = guard.check(&headers, Action::Delete, &reference).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

async fn create_message(
    State(guard): State<Guard>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reference = ResourceRef {
        resource_type: ResourceType::Message,
        resource_id: None,
        target_tenant: None,
    };
    let allowed = guard.check(&headers, Action::Create, &reference).await?;
    Ok(Json(serde_json::json!({
        "tenant": allowed.resource_tenant.map(|t| t.to_string()),
    })))
}

async fn update_school(
    Path(id): Path<String>,
    State(guard): State<Guard>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reference = ResourceRef::existing(ResourceType::School, id.clone());
    let _allowed = guard.check(&headers, Action::Update, &reference).await?;
    Ok(Json(serde_json::json!({ "updated": id })))
}

pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

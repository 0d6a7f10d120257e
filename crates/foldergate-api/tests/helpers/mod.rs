//! Shared test helpers for API tests: an in-memory app driven with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use foldergate_api::{AppState, build_app};
use foldergate_auth::guardian::DashboardGuardianProvider;
use foldergate_auth::jwt::{JwtDecoder, JwtEncoder};
use foldergate_core::config::AppConfig;
use foldergate_core::{AppError, AppResult};
use foldergate_database::repositories::{AclStore, DashboardStore, TeamStore, UserStore};
use foldergate_entity::dashboard::{Dashboard, DashboardRef};
use foldergate_entity::permission::AclEntry;
use foldergate_entity::user::OrgRole;
use foldergate_service::folder::FolderService;
use foldergate_service::user::DisplayNameResolver;

pub const ORG: i64 = 1;
pub const VIEWER_ID: i64 = 10;
pub const EDITOR_ID: i64 = 20;
pub const ADMIN_ID: i64 = 30;

#[derive(Default)]
pub struct MemoryDashboards {
    rows: Mutex<HashMap<i64, Dashboard>>,
}

#[async_trait]
impl DashboardStore for MemoryDashboards {
    async fn find(&self, org_id: i64, key: &DashboardRef) -> AppResult<Option<Dashboard>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .find(|d| {
                d.org_id == org_id
                    && match key {
                        DashboardRef::Id(id) => d.id == *id,
                        DashboardRef::Slug(slug) => &d.slug == slug,
                    }
            })
            .cloned())
    }

    async fn delete(&self, org_id: i64, id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        if rows.get(&id).is_some_and(|d| d.org_id == org_id) {
            rows.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

pub struct MemoryAcls {
    entries: HashMap<i64, Vec<AclEntry>>,
    fail: bool,
}

#[async_trait]
impl AclStore for MemoryAcls {
    async fn acl_entries(&self, _org_id: i64, dashboard_id: i64) -> AppResult<Vec<AclEntry>> {
        if self.fail {
            return Err(AppError::database("relation \"dashboard_acl\" does not exist"));
        }
        Ok(self.entries.get(&dashboard_id).cloned().unwrap_or_default())
    }
}

pub struct MemoryTeams {
    teams: HashMap<i64, Vec<i64>>,
    fail: bool,
}

#[async_trait]
impl TeamStore for MemoryTeams {
    async fn team_ids_for_user(&self, _org_id: i64, user_id: i64) -> AppResult<Vec<i64>> {
        if self.fail {
            return Err(AppError::database("connection refused"));
        }
        Ok(self.teams.get(&user_id).cloned().unwrap_or_default())
    }
}

pub struct MemoryUsers;

#[async_trait]
impl UserStore for MemoryUsers {
    async fn find_login(&self, user_id: i64) -> AppResult<Option<String>> {
        Ok(match user_id {
            VIEWER_ID => Some("viewer".to_string()),
            EDITOR_ID => Some("editor".to_string()),
            ADMIN_ID => Some("admin".to_string()),
            _ => None,
        })
    }
}

/// Seed data for a test app. ACL entries only apply to dashboards whose
/// `has_acl` flag is set.
pub struct Fixture {
    pub dashboards: Vec<Dashboard>,
    pub acl_entries: HashMap<i64, Vec<AclEntry>>,
    pub teams: HashMap<i64, Vec<i64>>,
    pub fail_acl: bool,
    pub fail_teams: bool,
}

impl Default for Fixture {
    /// Folder 1 "Ops" (no ACL, created by the editor) and plain dashboard 2.
    fn default() -> Self {
        let mut ops = Dashboard::new_folder(ORG, "Ops");
        ops.id = 1;
        ops.created_by = EDITOR_ID;
        ops.version = 3;

        let mut plain = Dashboard::new_folder(ORG, "CPU usage");
        plain.id = 2;
        plain.is_folder = false;

        Self {
            dashboards: vec![ops, plain],
            acl_entries: HashMap::new(),
            teams: HashMap::new(),
            fail_acl: false,
            fail_teams: false,
        }
    }
}

impl Fixture {
    /// Mark a seeded dashboard as governed by its ACL entries.
    pub fn with_acl(mut self, dashboard_id: i64, entries: Vec<AclEntry>) -> Self {
        for dashboard in &mut self.dashboards {
            if dashboard.id == dashboard_id {
                dashboard.has_acl = true;
            }
        }
        self.acl_entries.insert(dashboard_id, entries);
        self
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Signs tokens accepted by the router
    pub encoder: JwtEncoder,
    /// Application config
    pub config: AppConfig,
}

/// Status and parsed JSON body of a test response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a test application with the default fixture
    pub fn new() -> Self {
        Self::with(Fixture::default())
    }

    /// Create a test application over the given seed data
    pub fn with(fixture: Fixture) -> Self {
        let config = AppConfig::default();

        let dashboards = MemoryDashboards {
            rows: Mutex::new(fixture.dashboards.into_iter().map(|d| (d.id, d)).collect()),
        };
        let acls = MemoryAcls {
            entries: fixture.acl_entries,
            fail: fixture.fail_acl,
        };
        let teams = MemoryTeams {
            teams: fixture.teams,
            fail: fixture.fail_teams,
        };

        let guardians = DashboardGuardianProvider::new(Arc::new(acls), config.guardian.clone());
        let folder_service = FolderService::new(
            Arc::new(dashboards),
            Arc::new(guardians),
            DisplayNameResolver::new(Arc::new(MemoryUsers)),
        );

        let state = AppState::new(
            Arc::new(config.clone()),
            Arc::new(JwtDecoder::new(&config.auth)),
            Arc::new(teams),
            Arc::new(folder_service),
        );

        Self {
            router: build_app(state),
            encoder: JwtEncoder::new(&config.auth),
            config,
        }
    }

    /// A valid bearer token for a user in the test org
    pub fn token(&self, user_id: i64, role: OrgRole) -> String {
        self.token_in(ORG, user_id, role)
    }

    /// A valid bearer token for a user in any org
    pub fn token_in(&self, org_id: i64, user_id: i64, role: OrgRole) -> String {
        self.encoder
            .issue(user_id, org_id, role, &format!("user{user_id}"))
            .expect("Failed to issue token")
            .token
    }

    /// Send a request with an optional bearer token
    pub async fn request(&self, method: &str, path: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a prepared request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}

// ninja-client/tests/support/mod.rs
// In-process partner backend for board tests
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use ninja_client::{
    Coupon, CouponBoard, CouponType, Location, MenuItem, NewCoupon, OneshotHttpClient, Session,
};

pub const TOKEN: &str = "test-token";
pub const OPERATOR: &str = "op-1";

/// Backend operations that can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Locations,
    ListCoupons,
    MenuItems,
    Create,
    Update,
    Delete,
    Activate,
    Deactivate,
    Upload,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub locations: Vec<Location>,
    pub coupons: Vec<Coupon>,
    pub menu_items: Vec<MenuItem>,
    pub next_id: u32,
    pub failing: HashSet<Op>,
    pub calls: Vec<Op>,
    /// (coupon id, file name, content type, size)
    pub uploads: Vec<(String, String, String, usize)>,
}

impl BackendState {
    /// Record the call, then check auth and injected failures
    fn check(&mut self, headers: &HeaderMap, op: Op) -> Result<(), StatusCode> {
        self.calls.push(op);
        let expected = format!("Bearer {TOKEN}");
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected);
        if !authorized {
            return Err(StatusCode::UNAUTHORIZED);
        }
        if self.failing.contains(&op) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }

    fn coupon_mut(&mut self, id: &str) -> Result<&mut Coupon, StatusCode> {
        self.coupons
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

pub type SharedState = Arc<Mutex<BackendState>>;

#[derive(Clone)]
pub struct MockBackend {
    pub state: SharedState,
}

impl MockBackend {
    /// Two locations; L1 has a Burger and Fries on the menu and two coupons
    pub fn seeded() -> Self {
        let menu_item = |id: &str, name: &str, location_id: &str| MenuItem {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: 8.0,
            image: None,
            is_available: true,
            location_id: location_id.into(),
        };

        let mut c1 = NewCoupon {
            location_id: "L1".into(),
            purchased_item_ids: Some(vec!["m1".into()]),
            free_item_ids: Some(vec!["m2".into()]),
            ..NewCoupon::new(CouponType::Bogo, "BURGER2", "2025-11-30", 20)
        }
        .into_coupon("c1");
        c1.image = Some("https://cdn.test/coupons/c1/burger.png".into());

        let mut c2 = NewCoupon {
            location_id: "L1".into(),
            discount_percentage: Some(25.0),
            start_hour: Some(0),
            end_hour: Some(2),
            ..NewCoupon::new(CouponType::HappyHour, "MIDNIGHT", "2026-01-15", 50)
        }
        .into_coupon("c2");
        c2.is_active = false;

        let c3 = NewCoupon {
            location_id: "L2".into(),
            ..NewCoupon::new(CouponType::FreeItem, "HARBORFRY", "2025-10-01", 5)
        }
        .into_coupon("c3");

        let state = BackendState {
            locations: vec![
                Location {
                    id: "L1".into(),
                    name: "Downtown".into(),
                    address: "1 Main St".into(),
                },
                Location {
                    id: "L2".into(),
                    name: "Harbor".into(),
                    address: "9 Pier Rd".into(),
                },
            ],
            coupons: vec![c1, c2, c3],
            menu_items: vec![
                menu_item("m1", "Burger", "L1"),
                menu_item("m2", "Fries", "L1"),
                menu_item("m9", "Chowder", "L2"),
            ],
            next_id: 100,
            ..Default::default()
        };

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/operators/{operator_id}/locations", get(list_locations))
            .route("/api/locations/{location_id}/coupons", get(list_coupons))
            .route("/api/locations/{location_id}/menu-items", get(list_menu_items))
            .route("/api/coupons", post(create_coupon))
            .route("/api/coupons/{id}", put(update_coupon).delete(delete_coupon))
            .route("/api/coupons/{id}/activate", patch(activate_coupon))
            .route("/api/coupons/{id}/deactivate", patch(deactivate_coupon))
            .route("/api/coupons/{id}/image", post(upload_image))
            .with_state(self.state.clone())
    }

    pub fn board(&self) -> CouponBoard<OneshotHttpClient> {
        self.board_with(Session::new(TOKEN, OPERATOR))
    }

    pub fn board_with(&self, session: Session) -> CouponBoard<OneshotHttpClient> {
        CouponBoard::new(OneshotHttpClient::new(self.router()), session)
    }

    /// Board with locations loaded and L1 selected
    pub async fn ready_board(&self) -> CouponBoard<OneshotHttpClient> {
        let mut board = self.board();
        board.load_locations().await.expect("load locations");
        board.select_location("L1").await.expect("select L1");
        self.clear_calls();
        board
    }

    pub fn fail(&self, op: Op) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn stored(&self, id: &str) -> Option<Coupon> {
        let state = self.state.lock().unwrap();
        state.coupons.iter().find(|c| c.id == id).cloned()
    }
}

async fn list_locations(
    State(state): State<SharedState>,
    Path(operator_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Location>>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(&headers, Op::Locations)?;
    if operator_id != OPERATOR {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(state.locations.clone()))
}

async fn list_coupons(
    State(state): State<SharedState>,
    Path(location_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Coupon>>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(&headers, Op::ListCoupons)?;
    let coupons = state
        .coupons
        .iter()
        .filter(|c| c.location_id == location_id)
        .cloned()
        .collect();
    Ok(Json(coupons))
}

async fn list_menu_items(
    State(state): State<SharedState>,
    Path(location_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<MenuItem>>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(&headers, Op::MenuItems)?;
    let items = state
        .menu_items
        .iter()
        .filter(|m| m.location_id == location_id)
        .cloned()
        .collect();
    Ok(Json(items))
}

async fn create_coupon(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(draft): Json<NewCoupon>,
) -> Result<Json<Coupon>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(&headers, Op::Create)?;
    if !state.locations.iter().any(|l| l.id == draft.location_id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    state.next_id += 1;
    let mut coupon = draft.into_coupon(format!("cpn-{}", state.next_id));
    coupon.created_at = Some(shared::util::now_iso());
    state.coupons.push(coupon.clone());
    Ok(Json(coupon))
}

async fn update_coupon(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(coupon): Json<Coupon>,
) -> Result<Json<Coupon>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(&headers, Op::Update)?;
    let stored = state.coupon_mut(&id)?;
    *stored = Coupon {
        id: id.clone(),
        updated_at: Some(shared::util::now_iso()),
        ..coupon
    };
    Ok(Json(stored.clone()))
}

async fn delete_coupon(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(&headers, Op::Delete)?;
    let before = state.coupons.len();
    state.coupons.retain(|c| c.id != id);
    if state.coupons.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({ "message": "Coupon deleted" })))
}

fn set_active(state: &SharedState, id: &str, headers: &HeaderMap, op: Op, active: bool) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.check(headers, op)?;
    let stored = state.coupon_mut(id)?;
    stored.is_active = active;
    Ok(Json(json!({ "message": "Coupon status updated", "coupon": stored.clone() })))
}

async fn activate_coupon(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    set_active(&state, &id, &headers, Op::Activate, true)
}

async fn deactivate_coupon(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    set_active(&state, &id, &headers, Op::Deactivate, false)
}

async fn upload_image(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        file = Some((file_name, content_type, bytes.len()));
    }
    let (file_name, content_type, size) = file.ok_or(StatusCode::BAD_REQUEST)?;

    let mut state = state.lock().unwrap();
    state.check(&headers, Op::Upload)?;
    let url = format!("https://cdn.test/coupons/{id}/{file_name}");
    state.coupon_mut(&id)?.image = Some(url.clone());
    state.uploads.push((id, file_name, content_type, size));
    Ok(Json(json!({ "imageUrl": url })))
}

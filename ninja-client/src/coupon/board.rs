//! Coupon board
//!
//! Page-level state for coupon management: the operator's locations, the
//! coupons and menu of the selected location, the list filter, and the
//! delete-confirmation dialog. Every mutation goes to the backend first;
//! the local list is patched only from the server's answer.
//!
//! Failures are logged where they happen and leave the local list exactly
//! as it was. The error is still returned so callers can surface it.

use serde_json::Value;
use shared::models::{Coupon, Location, MenuItem, MutationResponse, NewCoupon};
use validator::Validate;

use crate::client::HttpClient;
use crate::upload::ImageUpload;
use crate::{ClientError, ClientResult, Session};

use super::display::CouponCard;
use super::filter::CouponFilter;

mod paths {
    pub fn locations(operator_id: &str) -> String {
        format!("api/operators/{operator_id}/locations")
    }

    pub fn location_coupons(location_id: &str) -> String {
        format!("api/locations/{location_id}/coupons")
    }

    pub fn location_menu_items(location_id: &str) -> String {
        format!("api/locations/{location_id}/menu-items")
    }

    pub const COUPONS: &str = "api/coupons";

    pub fn coupon(id: &str) -> String {
        format!("api/coupons/{id}")
    }

    pub fn activate(id: &str) -> String {
        format!("api/coupons/{id}/activate")
    }

    pub fn deactivate(id: &str) -> String {
        format!("api/coupons/{id}/deactivate")
    }

    pub fn image(id: &str) -> String {
        format!("api/coupons/{id}/image")
    }
}

/// Coupon management state bound to one HTTP transport and one session
#[derive(Debug)]
pub struct CouponBoard<C: HttpClient> {
    http: C,
    session: Session,
    sign_in_required: bool,
    locations: Vec<Location>,
    selected_location: Option<String>,
    coupons: Vec<Coupon>,
    menu_items: Vec<MenuItem>,
    filter: CouponFilter,
    pending_delete: Option<String>,
}

impl<C: HttpClient> CouponBoard<C> {
    /// Bind a transport to a session. The session token replaces whatever
    /// token the transport carried.
    pub fn new(mut http: C, session: Session) -> Self {
        http.set_token(session.token.clone());
        Self {
            http,
            session,
            sign_in_required: false,
            locations: Vec::new(),
            selected_location: None,
            coupons: Vec::new(),
            menu_items: Vec::new(),
            filter: CouponFilter::All,
            pending_delete: None,
        }
    }

    // ========== State access ==========

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Set after a 401; the operator has to sign in again
    pub fn sign_in_required(&self) -> bool {
        self.sign_in_required
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn selected_location(&self) -> Option<&Location> {
        let id = self.selected_location.as_deref()?;
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn coupon(&self, id: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.id == id)
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn filter(&self) -> CouponFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CouponFilter) {
        self.filter = filter;
    }

    /// Coupons passing the current filter
    pub fn visible_coupons(&self) -> Vec<&Coupon> {
        self.filter.apply(&self.coupons)
    }

    /// Rendered cards for the visible coupons
    pub fn coupon_cards(&self) -> Vec<CouponCard> {
        self.visible_coupons()
            .into_iter()
            .map(|c| CouponCard::new(c, &self.menu_items))
            .collect()
    }

    // ========== Delete confirmation dialog ==========

    /// Coupon awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // ========== Loading ==========

    /// Fetch the operator's locations
    pub async fn load_locations(&mut self) -> ClientResult<&[Location]> {
        let Some(operator_id) = self.session.operator_id().map(str::to_owned) else {
            return self.fail(
                "load_locations",
                None,
                ClientError::Validation("session has no operator id".into()),
            );
        };

        match self.http.get::<Vec<Location>>(&paths::locations(&operator_id)).await {
            Ok(locations) => {
                tracing::info!(operator_id = %operator_id, count = locations.len(), "Locations loaded");
                self.locations = locations;
                Ok(&self.locations)
            }
            Err(e) => self.fail("load_locations", None, e),
        }
    }

    /// Switch to another location and load its coupons and menu
    ///
    /// Coupons and menu items of the previous location are dropped before
    /// the fetches start.
    pub async fn select_location(&mut self, location_id: &str) -> ClientResult<()> {
        if !self.locations.iter().any(|l| l.id == location_id) {
            return self.fail(
                "select_location",
                None,
                ClientError::UnknownLocation(location_id.to_string()),
            );
        }

        self.selected_location = Some(location_id.to_string());
        self.coupons.clear();
        self.menu_items.clear();
        self.pending_delete = None;

        self.refresh().await?;
        self.load_menu_items().await
    }

    /// Re-fetch the coupon list of the selected location
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let location_id = self.require_location("refresh")?;

        match self
            .http
            .get::<Vec<Coupon>>(&paths::location_coupons(&location_id))
            .await
        {
            Ok(coupons) => {
                tracing::debug!(location_id = %location_id, count = coupons.len(), "Coupons loaded");
                self.coupons = coupons;
                Ok(())
            }
            Err(e) => self.fail("refresh", None, e),
        }
    }

    async fn load_menu_items(&mut self) -> ClientResult<()> {
        let location_id = self.require_location("load_menu_items")?;

        match self
            .http
            .get::<Vec<MenuItem>>(&paths::location_menu_items(&location_id))
            .await
        {
            Ok(items) => {
                self.menu_items = items;
                Ok(())
            }
            Err(e) => self.fail("load_menu_items", None, e),
        }
    }

    // ========== Mutations ==========

    /// Create a coupon at the selected location
    ///
    /// The server-assigned record is appended to the list. When an image is
    /// given it is uploaded afterwards; an upload failure is logged and does
    /// not undo the created coupon.
    pub async fn create_coupon(
        &mut self,
        mut draft: NewCoupon,
        image: Option<ImageUpload>,
    ) -> ClientResult<Coupon> {
        let location_id = self.require_location("create_coupon")?;
        draft.location_id = location_id.clone();
        if let Err(e) = draft.validate() {
            return self.fail("create_coupon", None, e.into());
        }

        let coupon = match self.http.post::<MutationResponse, _>(paths::COUPONS, &draft).await {
            Ok(response) => response.into_coupon(),
            Err(e) => return self.fail("create_coupon", None, e),
        };

        tracing::info!(
            coupon_id = %coupon.id,
            location_id = %location_id,
            coupon_type = %coupon.coupon_type,
            "Coupon created"
        );
        self.coupons.push(coupon.clone());

        if let Some(image) = image {
            // Already logged; the coupon stands with a placeholder image.
            let _ = self.upload_image(&coupon.id, image).await;
        }

        Ok(coupon)
    }

    /// Upload an image for a coupon, then reload the whole list so the
    /// hosted image URL shows up
    pub async fn upload_image(&mut self, coupon_id: &str, image: ImageUpload) -> ClientResult<()> {
        match self
            .http
            .upload::<Value>(&paths::image(coupon_id), &image)
            .await
        {
            Ok(_) => {
                tracing::info!(
                    coupon_id = %coupon_id,
                    file_name = %image.file_name,
                    size = image.len(),
                    "Coupon image uploaded"
                );
                self.refresh().await
            }
            Err(e) => self.fail("upload_image", Some(coupon_id), e),
        }
    }

    /// Save an edited coupon and replace the local copy with the server's
    pub async fn update_coupon(&mut self, coupon: Coupon) -> ClientResult<Coupon> {
        match self
            .http
            .put::<MutationResponse, _>(&paths::coupon(&coupon.id), &coupon)
            .await
        {
            Ok(response) => {
                let updated = response.into_coupon();
                tracing::info!(coupon_id = %updated.id, "Coupon updated");
                self.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => self.fail("update_coupon", Some(&coupon.id), e),
        }
    }

    /// Change only the quantity of a coupon
    pub async fn update_quantity(&mut self, id: &str, quantity: u32) -> ClientResult<Coupon> {
        let Some(existing) = self.coupon(id) else {
            return self.fail("update_quantity", Some(id), ClientError::CouponNotFound(id.to_string()));
        };
        let coupon = Coupon {
            quantity,
            ..existing.clone()
        };
        self.update_coupon(coupon).await
    }

    /// Delete the coupon awaiting confirmation. The dialog closes whether
    /// or not the delete succeeds.
    pub async fn confirm_delete(&mut self) -> ClientResult<()> {
        match self.pending_delete.take() {
            Some(id) => self.delete_coupon(&id).await,
            None => Ok(()),
        }
    }

    /// Delete a coupon and drop it from the list
    ///
    /// A confirmation pending for this coupon is closed either way; one
    /// pending for another coupon stays open.
    pub async fn delete_coupon(&mut self, id: &str) -> ClientResult<()> {
        let result = self.http.delete::<Value>(&paths::coupon(id)).await;
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }

        match result {
            Ok(_) => {
                tracing::info!(coupon_id = %id, "Coupon deleted");
                self.coupons.retain(|c| c.id != id);
                Ok(())
            }
            Err(e) => self.fail("delete_coupon", Some(id), e),
        }
    }

    /// Flip a coupon between active and inactive
    ///
    /// An active coupon gets the deactivate call, an inactive one the
    /// activate call. The record in the response envelope replaces the
    /// local copy.
    pub async fn toggle_active(&mut self, id: &str) -> ClientResult<Coupon> {
        let Some(is_active) = self.coupon(id).map(|c| c.is_active) else {
            return self.fail("toggle_active", Some(id), ClientError::CouponNotFound(id.to_string()));
        };
        let path = if is_active {
            paths::deactivate(id)
        } else {
            paths::activate(id)
        };

        match self.http.patch_empty::<MutationResponse>(&path).await {
            Ok(response) => {
                let updated = response.into_coupon();
                tracing::info!(coupon_id = %updated.id, is_active = updated.is_active, "Coupon toggled");
                self.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => self.fail("toggle_active", Some(id), e),
        }
    }

    // ========== Internals ==========

    /// Replace the local record with the same id
    fn replace(&mut self, coupon: Coupon) {
        if let Some(slot) = self.coupons.iter_mut().find(|c| c.id == coupon.id) {
            *slot = coupon;
        }
    }

    fn require_location(&mut self, action: &'static str) -> ClientResult<String> {
        match self.selected_location.clone() {
            Some(id) => Ok(id),
            None => self.fail(action, None, ClientError::NoLocationSelected),
        }
    }

    /// Log a failed operation. A 401 also signs the session out.
    fn fail<T>(&mut self, action: &'static str, coupon_id: Option<&str>, err: ClientError) -> ClientResult<T> {
        if err.is_unauthorized() {
            tracing::warn!(action, "Session rejected by backend, sign-in required");
            self.session.sign_out();
            self.http.set_token(None);
            self.sign_in_required = true;
        } else {
            tracing::error!(action, coupon_id = coupon_id.unwrap_or("-"), error = %err, "Coupon operation failed");
        }
        Err(err)
    }
}

#[cfg(all(test, feature = "in-process"))]
mod tests {
    use super::*;
    use crate::OneshotHttpClient;
    use axum::Router;

    fn board() -> CouponBoard<OneshotHttpClient> {
        CouponBoard::new(OneshotHttpClient::new(Router::new()), Session::new("t", "op-1"))
    }

    #[test]
    fn test_session_token_applied_to_transport() {
        let board = board();
        assert_eq!(board.http.token(), Some("t"));
        assert!(!board.sign_in_required());
    }

    #[test]
    fn test_delete_dialog_state() {
        let mut board = board();
        assert!(board.pending_delete().is_none());

        board.request_delete("c1");
        assert_eq!(board.pending_delete(), Some("c1"));

        board.cancel_delete();
        assert!(board.pending_delete().is_none());
    }

    #[tokio::test]
    async fn test_create_without_location_is_rejected() {
        let mut board = board();
        let draft = NewCoupon::default();

        let err = board.create_coupon(draft, None).await.unwrap_err();
        assert!(matches!(err, ClientError::NoLocationSelected));
        assert!(board.coupons().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_location_is_rejected() {
        let mut board = board();

        let err = board.select_location("nowhere").await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownLocation(id) if id == "nowhere"));
        assert!(board.selected_location().is_none());
    }

    #[tokio::test]
    async fn test_toggle_unknown_coupon() {
        let mut board = board();

        let err = board.toggle_active("ghost").await.unwrap_err();
        assert!(matches!(err, ClientError::CouponNotFound(_)));
    }
}

//! Coupon admin - print the coupon cards of an operator's locations
//!
//! Run with:
//! ```bash
//! NINJA_API_URL=https://partner.example.com NINJA_API_TOKEN=... NINJA_OPERATOR_ID=op-1 \
//!     cargo run -p ninja-client --example coupon_admin -- active
//! ```
//!
//! The optional argument is a filter: `all` (default), `active`, `inactive`.

use anyhow::Context;
use ninja_client::logger::init_logger;
use ninja_client::{ClientConfig, CouponBoard, CouponFilter, Session, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_logger(None);

    let filter: CouponFilter = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => CouponFilter::All,
    };

    let config = ClientConfig::from_env();
    let store = config.session_path.clone().map(SessionStore::new);

    // Prefer the persisted session, fall back to env values
    let session = store
        .as_ref()
        .and_then(SessionStore::load)
        .unwrap_or_else(|| Session::from_config(&config));
    if !session.is_authenticated() {
        anyhow::bail!("no session token: set NINJA_API_TOKEN or sign in first");
    }

    let http = config.build_http_client()?;
    let mut board = CouponBoard::new(http, session);
    board.set_filter(filter);

    let location_ids: Vec<String> = board
        .load_locations()
        .await
        .context("loading locations")?
        .iter()
        .map(|l| l.id.clone())
        .collect();

    for location_id in location_ids {
        board.select_location(&location_id).await?;
        if let Some(location) = board.selected_location() {
            println!("== {} ({})", location.name, location.address);
        }

        for card in board.coupon_cards() {
            let status = if card.is_active { "active" } else { "inactive" };
            println!("  [{}] {} {}", status, card.code, card.image);
            for field in &card.fields {
                println!("      {}", field);
            }
        }
    }

    if let Some(store) = store {
        store.save(board.session())?;
    }

    Ok(())
}

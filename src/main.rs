//! Walks one shift of the canteen through the order lifecycle, a role request and
//! the boards. Run with `RUST_LOG=info` (or `debug` for every actor message).

use keyed_actor::tracing::setup_tracing;
use order_board::board::{customer_label, DeliveryBoard, KitchenBoard, TvBoard, NOT_FOUND};
use order_board::clock::system_clock;
use order_board::config::Config;
use order_board::lifecycle::CanteenSystem;
use order_board::model::{AuditFilter, Identity, OrderKey, Priority, Role};
use order_board::order_actor::OrderError;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting canteen order board");

    let system = CanteenSystem::new(&config);
    let orders = &system.orders;
    let key = |number: &str| OrderKey::new(config.counter.clone(), number);

    let span = tracing::info_span!("order_12");
    async {
        let placed = orders.place_order(Role::Counter, key("12")).await?;
        info!(placed_at = ?placed.value.placed_at, "Order placed");
        let accepted = orders.accept(Role::Kitchen, &key("12"), Some(placed.version)).await?;
        let ready = orders.mark_ready(Role::Kitchen, &key("12"), Some(accepted.version)).await?;
        let delivered = orders.deliver(Role::Delivery, &key("12"), Some(ready.version)).await?;
        info!(record = %delivered.value.to_json().unwrap_or_default(), "Order delivered");

        let requeued = orders
            .requeue(Role::Delivery, &key("12"), Some(delivered.version), "Kitchen backlog", Some(Priority::High))
            .await?;
        info!(record = %requeued.value.to_json().unwrap_or_default(), "Order sent back to the kitchen");
        Ok::<_, OrderError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("duplicate_7");
    async {
        orders.place_order(Role::Counter, key("7")).await?;
        match orders.place_order(Role::Counter, key("7")).await {
            Err(OrderError::DuplicateNumber(id)) => warn!(%id, "Duplicate order number rejected"),
            Err(e) => return Err(e),
            Ok(_) => error!("Duplicate order number was accepted"),
        }
        match orders.accept(Role::Delivery, &key("7"), None).await {
            Err(e @ OrderError::Unauthorized { .. }) => warn!(error = %e, "Write refused"),
            other => info!(?other, "Unexpected outcome"),
        }
        Ok::<_, OrderError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("role_request");
    async {
        let admin = Identity::new("uid-admin", "admin@canteen.test");
        let newcomer = Identity::new("uid-ravi", "ravi@canteen.test");
        system
            .profiles
            .create_profile(&admin.uid, &admin.email, Some(Role::Admin))
            .await
            .map_err(|e| e.to_string())?;

        system.role_requests.submit(&newcomer).await.map_err(|e| e.to_string())?;
        let pending = system.role_requests.pending().await.map_err(|e| e.to_string())?;
        info!(pending = pending.len(), "Role requests waiting");

        let acting = system.resolver().resolve(&admin).await.map_err(|e| e.to_string())?;
        let decided = system
            .role_requests
            .approve(acting, &admin, &newcomer.uid, Role::Delivery)
            .await
            .map_err(|e| e.to_string())?;
        info!(status = ?decided.status, role = ?decided.granted_role, "Role request decided");

        let trail = system
            .audit
            .recent(&AuditFilter::default())
            .await
            .map_err(|e| e.to_string())?;
        for entry in trail {
            info!(action = %entry.action.label(), details = %entry.details, "Audit");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("boards");
    async {
        let feed = system.board_feed().await?;
        let now = system_clock()();

        let kitchen = KitchenBoard::new(config.counter.clone()).render(feed.view(), now);
        for card in &kitchen.cards {
            info!(order = %card.key.number, status = %card.status, time = ?card.time_label, "Kitchen card");
        }
        let delivery = DeliveryBoard::new(config.counter.clone()).render(feed.view(), now);
        info!(
            ready = delivery.ready_count,
            incomplete = delivery.incomplete_count,
            active = delivery.active.len(),
            "Delivery board"
        );
        let tv = TvBoard::new().render(feed.view(), now);
        info!(
            ready = tv.ready.tiles.len(),
            waiting = tv.waiting.tiles.len(),
            chime = tv.ready_chime || tv.waiting_chime,
            "TV board"
        );

        let status = match orders.lookup(&config.counter, "12").await {
            Ok(order) => customer_label(order.status).to_string(),
            Err(OrderError::NotFound(_)) => NOT_FOUND.to_string(),
            Err(e) => return Err(e),
        };
        info!(order = "12", %status, "Customer lookup");
        Ok::<_, OrderError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}

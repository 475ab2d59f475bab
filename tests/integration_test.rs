use keyed_actor::ActorClient;
use order_board::board::{BoardFeed, FeedEvent, KitchenBoard, TvBoard};
use order_board::clients::OrderClient;
use order_board::clock::fixed_clock;
use order_board::config::Config;
use order_board::lifecycle::CanteenSystem;
use order_board::model::{
    AuditAction, AuditFilter, AuditRecord, Identity, Order, OrderKey, OrderStatus, Page, Priority,
    Role, Station,
};
use order_board::access::{Access, Redirect};
use order_board::order_actor::{self, OrderError};
use std::time::Duration;

const NOW: i64 = 1_700_000_000_000;

fn spawn_orders(now: i64) -> OrderClient {
    let (actor, client) = order_actor::new(32);
    tokio::spawn(actor.run(()));
    client.with_clock(fixed_clock(now))
}

#[tokio::test]
async fn test_create_then_read_back() {
    let orders = spawn_orders(NOW);
    orders.place_order(Role::Counter, OrderKey::canteen(" 42 ")).await.unwrap();

    let stored = orders.get(OrderKey::canteen("42")).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.value.status, OrderStatus::Waiting);
    assert_eq!(stored.value.placed_at, Some(NOW));
    assert_eq!(
        stored.value.to_json().unwrap(),
        format!(r#"{{"status":"waiting","placedAt":{NOW}}}"#)
    );
}

#[tokio::test]
async fn test_order_12_full_lifecycle() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("12");

    let placed = orders.place_order(Role::Counter, key.clone()).await.unwrap();
    let accepted = orders.accept(Role::Kitchen, &key, Some(placed.version)).await.unwrap();
    assert_eq!(accepted.value.status, OrderStatus::InPreparation);

    let ready = orders.mark_ready(Role::Kitchen, &key, Some(accepted.version)).await.unwrap();
    assert_eq!(ready.value.status, OrderStatus::Ready);
    assert_eq!(ready.value.placed_at, None);
    assert_eq!(ready.value.comment, None);
    assert_eq!(ready.value.priority, None);

    let delivered = orders.deliver(Role::Delivery, &key, Some(ready.version)).await.unwrap();
    assert_eq!(delivered.version, 4);
    assert_eq!(delivered.value.to_json().unwrap(), r#"{"status":"delivered"}"#);
}

#[tokio::test]
async fn test_requeue_from_ready_with_priority() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("12");
    orders.place_order(Role::Counter, key.clone()).await.unwrap();
    orders.accept(Role::Kitchen, &key, None).await.unwrap();
    let ready = orders.mark_ready(Role::Kitchen, &key, None).await.unwrap();

    let requeued = orders
        .requeue(Role::Delivery, &key, Some(ready.version), "Kitchen backlog", Some(Priority::High))
        .await
        .unwrap();
    assert_eq!(requeued.value.status, OrderStatus::Waiting);
    assert_eq!(requeued.value.comment.as_deref(), Some("Kitchen backlog"));
    assert_eq!(requeued.value.priority, Some(Priority::High));
    assert_eq!(requeued.value.waiting_since, Some(NOW));

    // Already back in the queue.
    let twice = orders.requeue(Role::Delivery, &key, None, "Still late", None).await;
    assert_eq!(twice.unwrap_err(), OrderError::InvalidTransition {
        from: OrderStatus::Waiting,
        transition: "requeue",
    });
}

#[tokio::test]
async fn test_duplicate_number_leaves_original_untouched() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("7");
    orders.place_order(Role::Counter, key.clone()).await.unwrap();
    orders.accept(Role::Kitchen, &key, Some(1)).await.unwrap();

    let duplicate = orders.place_order(Role::Counter, key.clone()).await;
    assert_eq!(duplicate.unwrap_err(), OrderError::DuplicateNumber(key.to_string()));

    let stored = orders.get(key).await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.value.status, OrderStatus::InPreparation);
}

#[tokio::test]
async fn test_concurrent_creates_have_one_winner() {
    let orders = spawn_orders(NOW);
    let attempts: Vec<_> = (0..6)
        .map(|_| {
            let orders = orders.clone();
            tokio::spawn(async move { orders.place_order(Role::Counter, OrderKey::canteen("9")).await })
        })
        .collect();

    let mut winners = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert!(matches!(e, OrderError::DuplicateNumber(_))),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_stale_version_and_illegal_step_are_rejected() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("3");
    orders.place_order(Role::Counter, key.clone()).await.unwrap();
    orders.accept(Role::Kitchen, &key, Some(1)).await.unwrap();

    // Delivery acting on what it saw before the kitchen accepted.
    let stale = orders.mark_incomplete(Role::Delivery, &key, Some(1), "Missing drink").await;
    assert_eq!(stale.unwrap_err(), OrderError::StaleVersion { expected: 1, actual: 2 });

    let early = orders.deliver(Role::Delivery, &key, Some(2)).await;
    assert_eq!(early.unwrap_err(), OrderError::InvalidTransition {
        from: OrderStatus::InPreparation,
        transition: "deliver",
    });

    let stored = orders.get(key).await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_version_from_a_renumbered_order_does_not_apply_to_its_replacement() {
    let orders = spawn_orders(NOW);
    let five = OrderKey::canteen("5");

    // The kitchen read order "5" at this version.
    let seen = orders.place_order(Role::Counter, five.clone()).await.unwrap();
    orders.renumber(Role::Counter, &five, "6", Some(seen.version)).await.unwrap();
    let replacement = orders.place_order(Role::Counter, five.clone()).await.unwrap();
    assert_ne!(replacement.version, seen.version);

    let stale = orders.accept(Role::Kitchen, &five, Some(seen.version)).await;
    assert!(matches!(stale, Err(OrderError::StaleVersion { .. })));
    let stored = orders.get(five.clone()).await.unwrap().unwrap();
    assert_eq!(stored.value.status, OrderStatus::Waiting);

    // Same after a bulk clear frees the number.
    orders.mark_incomplete(Role::Delivery, &five, None, "").await.unwrap();
    let gone = orders.deliver(Role::Delivery, &five, None).await.unwrap();
    orders.clear_delivered(Role::Counter).await.unwrap();
    orders.place_order(Role::Counter, five.clone()).await.unwrap();
    let stale = orders.accept(Role::Kitchen, &five, Some(gone.version)).await;
    assert!(matches!(stale, Err(OrderError::StaleVersion { .. })));
}

#[tokio::test]
async fn test_partial_delivery_then_delivered_keeps_reason() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("5");
    orders.place_order(Role::Counter, key.clone()).await.unwrap();
    let partial = orders.mark_incomplete(Role::Delivery, &key, None, " Missing drink ").await.unwrap();
    assert_eq!(partial.value.status, OrderStatus::Incomplete);
    assert_eq!(partial.value.reason.as_deref(), Some("Missing drink"));

    let delivered = orders.deliver(Role::Delivery, &key, None).await.unwrap();
    assert_eq!(delivered.value.status, OrderStatus::Delivered);
    assert_eq!(delivered.value.reason.as_deref(), Some("Missing drink"));

    let again = orders.mark_incomplete(Role::Delivery, &key, None, "late").await;
    assert!(matches!(again, Err(OrderError::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_roles_are_checked_per_station() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("1");

    let guest = orders.place_order(Role::Guest, key.clone()).await;
    assert_eq!(guest.unwrap_err(), OrderError::Unauthorized {
        role: Role::Guest,
        station: Station::Counter,
    });

    orders.place_order(Role::Admin, key.clone()).await.unwrap();
    let wrong = orders.accept(Role::Counter, &key, None).await;
    assert!(matches!(wrong, Err(OrderError::Unauthorized { .. })));
    orders.accept(Role::Admin, &key, None).await.unwrap();
}

#[tokio::test]
async fn test_renumber_moves_waiting_order_only() {
    let orders = spawn_orders(NOW);
    let key = OrderKey::canteen("20");
    orders.place_order(Role::Counter, key.clone()).await.unwrap();
    orders.place_order(Role::Counter, OrderKey::canteen("22")).await.unwrap();

    let taken = orders.renumber(Role::Counter, &key, "22", Some(1)).await;
    assert_eq!(taken.unwrap_err(), OrderError::DuplicateNumber(OrderKey::canteen("22").to_string()));

    let moved = orders.renumber(Role::Counter, &key, " 21 ", Some(1)).await.unwrap();
    assert_eq!(moved.value.placed_at, Some(NOW));
    assert!(orders.get(key).await.unwrap().is_none());

    let new_key = OrderKey::canteen("21");
    orders.accept(Role::Kitchen, &new_key, None).await.unwrap();
    let locked = orders.renumber(Role::Counter, &new_key, "25", None).await;
    assert_eq!(locked.unwrap_err(), OrderError::NotEditable(OrderStatus::InPreparation));
}

#[tokio::test]
async fn test_clear_delivered_and_remove() {
    let orders = spawn_orders(NOW);
    for number in ["1", "2", "3"] {
        orders.place_order(Role::Counter, OrderKey::canteen(number)).await.unwrap();
    }
    orders.mark_incomplete(Role::Delivery, &OrderKey::canteen("1"), None, "").await.unwrap();
    orders.deliver(Role::Delivery, &OrderKey::canteen("1"), None).await.unwrap();

    let cleared = orders.clear_delivered(Role::Counter).await.unwrap();
    assert_eq!(cleared, vec![OrderKey::canteen("1")]);

    orders.remove(Role::Counter, &OrderKey::canteen("2"), Some(2)).await.unwrap();
    let left: Vec<OrderKey> = orders.snapshot().await.unwrap().into_iter().map(|(k, _)| k).collect();
    assert_eq!(left, vec![OrderKey::canteen("3")]);

    let missing = orders.remove(Role::Counter, &OrderKey::canteen("2"), None).await;
    assert!(matches!(missing, Err(OrderError::NotFound(_))));
}

#[tokio::test]
async fn test_customer_lookup() {
    let orders = spawn_orders(NOW);
    orders.place_order(Role::Counter, OrderKey::canteen("8")).await.unwrap();

    let found = orders.lookup("Food Canteen", " 8 ").await.unwrap();
    assert_eq!(found.status, OrderStatus::Waiting);

    let missing = orders.lookup("Food Canteen", "99").await;
    assert_eq!(missing.unwrap_err(), OrderError::NotFound("Food Canteen/99".into()));
}

#[tokio::test]
async fn test_board_feed_drives_kitchen_and_tv() {
    let orders = spawn_orders(NOW);
    let mut feed = BoardFeed::open(orders.clone(), Duration::from_secs(60)).await.unwrap();
    let mut kitchen = KitchenBoard::new("Food Canteen");
    let mut tv = TvBoard::new();
    assert!(kitchen.render(feed.view(), NOW).cards.is_empty());
    tv.render(feed.view(), NOW);

    let key = OrderKey::canteen("12");
    orders.place_order(Role::Counter, key.clone()).await.unwrap();
    let event = feed.next().await.unwrap();
    assert!(matches!(event, FeedEvent::Changed(ref diff) if diff.added == vec![key.clone()]));
    assert_eq!(kitchen.render(feed.view(), NOW).new_waiting, vec![key.clone()]);
    assert!(tv.render(feed.view(), NOW).waiting_chime);

    orders.accept(Role::Kitchen, &key, None).await.unwrap();
    orders.mark_ready(Role::Kitchen, &key, None).await.unwrap();
    feed.next().await.unwrap();
    feed.next().await.unwrap();

    let frame = tv.render(feed.view(), NOW);
    assert!(frame.ready_chime);
    assert!(frame.waiting.tiles.is_empty());
    assert!(!tv.render(feed.view(), NOW).ready_chime);
}

#[tokio::test]
async fn test_system_wires_roles_pages_and_audit() {
    let system = CanteenSystem::new(&Config::default());
    let admin = Identity::new("uid-admin", "admin@canteen.test");
    let cook = Identity::new("uid-cook", "cook@canteen.test");
    system.profiles.create_profile(&admin.uid, &admin.email, Some(Role::Admin)).await.unwrap();

    let resolver = system.resolver();
    assert_eq!(resolver.authorize(None, Page::TvBoard).await.unwrap(), Access::Granted(Role::Guest));
    assert_eq!(resolver.authorize(None, Page::Kitchen).await.unwrap(), Access::Redirect(Redirect::Login));
    assert_eq!(
        resolver.authorize(Some(&cook), Page::Kitchen).await.unwrap(),
        Access::Redirect(Redirect::Home)
    );

    system.role_requests.submit(&cook).await.unwrap();
    system
        .role_requests
        .approve(Role::Admin, &admin, &cook.uid, Role::Delivery)
        .await
        .unwrap();
    assert_eq!(
        resolver.authorize(Some(&cook), Page::Delivery).await.unwrap(),
        Access::Granted(Role::Delivery)
    );

    let trail: Vec<AuditRecord> = system
        .audit
        .recent(&AuditFilter {
            action: Some(AuditAction::RoleApproved),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].target_email, "cook@canteen.test");
    assert_eq!(trail[0].details, "Granted delivery");

    drop(resolver);
    system.shutdown().await.unwrap();
}

#[test]
fn test_order_record_json_shape() {
    let order = Order::from_json(r#"{"status":"incomplete","placedAt":5,"reason":"Missing drink"}"#).unwrap();
    assert_eq!(order.status, OrderStatus::Incomplete);
    assert_eq!(order.waiting_since, None);
}

#[tokio::test]
async fn test_shutdown_completes_once_feeds_and_resolvers_are_dropped() {
    let system = CanteenSystem::new(&Config::default());
    let mut feed = system.board_feed().await.unwrap();
    let resolver = system.resolver();

    system.orders.place_order(Role::Counter, OrderKey::canteen("1")).await.unwrap();
    assert!(matches!(feed.next().await.unwrap(), FeedEvent::Changed(_)));
    assert_eq!(resolver.authorize(None, Page::StatusLookup).await.unwrap(), Access::Granted(Role::Guest));

    drop(feed);
    drop(resolver);
    let stopped = tokio::time::timeout(Duration::from_secs(5), system.shutdown()).await;
    assert_eq!(stopped, Ok(Ok(())));
}

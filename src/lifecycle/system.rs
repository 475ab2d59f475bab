use crate::access::RoleResolver;
use crate::board::BoardFeed;
use crate::clients::{AuditClient, OrderClient, ProfileClient, RoleRequestClient};
use crate::config::Config;
use crate::order_actor::OrderError;
use crate::{audit_actor, order_actor, profile_actor, role_request_actor};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Every actor of the canteen, running, plus the clients that reach them.
///
/// ```rust
/// use order_board::config::Config;
/// use order_board::lifecycle::CanteenSystem;
/// use order_board::model::{OrderKey, Role};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = CanteenSystem::new(&Config::default());
///     system.orders.place_order(Role::Counter, OrderKey::canteen("1")).await?;
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct CanteenSystem {
    pub orders: OrderClient,
    pub profiles: ProfileClient,
    pub audit: AuditClient,
    pub role_requests: RoleRequestClient,
    config: Config,
    handles: Vec<JoinHandle<()>>,
}

impl CanteenSystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        let capacity = config.channel_capacity;

        let (order_actor, orders) = order_actor::new(capacity);
        let (profile_actor, profiles) = profile_actor::new(capacity);
        let (audit_actor, audit) = audit_actor::new(capacity, config.audit_limit);
        let (role_request_actor, role_requests) = role_request_actor::new(capacity);

        let handles = vec![
            tokio::spawn(order_actor.run(())),
            tokio::spawn(profile_actor.run(())),
            tokio::spawn(audit_actor.run(())),
            tokio::spawn(role_request_actor.run((profiles.clone(), audit.clone()))),
        ];
        info!(counter = %config.counter, capacity, "Canteen system started");

        Self {
            orders,
            profiles,
            audit,
            role_requests,
            config: config.clone(),
            handles,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Page guard backed by this system's profile store.
    pub fn resolver(&self) -> RoleResolver {
        RoleResolver::new(self.profiles.clone())
    }

    /// A live order feed refreshing at the configured interval.
    pub async fn board_feed(&self) -> Result<BoardFeed, OrderError> {
        BoardFeed::open(self.orders.clone(), self.config.refresh_period()).await
    }

    /// Drops the clients held here and waits for every actor to stop.
    ///
    /// Actors stop only once every clone of their client is gone, including the
    /// profile and audit clients held by the role-request actor, which go away
    /// when that actor stops. Anything handed out by this system that holds a
    /// client, such as a [`RoleResolver`] from [`resolver`](Self::resolver) or a
    /// [`BoardFeed`] from [`board_feed`](Self::board_feed), must be dropped
    /// first, otherwise this waits for it.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down canteen system");
        drop(self.orders);
        drop(self.role_requests);
        drop(self.profiles);
        drop(self.audit);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }
        info!("Canteen system stopped");
        Ok(())
    }
}

//! Every in-memory collection the admin service exposes.

use std::sync::Arc;
use std::time::Duration;

use ballie_core::collaborator::SharedCollaborator;
use ballie_core::resource::Resource;
use ballie_core::resources::{Integrations, Plans, Posts, Products, Roles, Subscribers, Users};
use ballie_core::stats::{self, DashboardSummary, DashboardTrends, RecentUser, UserStats};
use chrono::Utc;

use crate::chat::ChatStore;
use crate::seed;
use crate::settings::SettingsStore;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct DataStores {
    pub users: Arc<MemoryStore<Users>>,
    pub subscribers: Arc<MemoryStore<Subscribers>>,
    pub products: Arc<MemoryStore<Products>>,
    pub posts: Arc<MemoryStore<Posts>>,
    pub integrations: Arc<MemoryStore<Integrations>>,
    pub roles: Arc<MemoryStore<Roles>>,
    pub plans: Arc<MemoryStore<Plans>>,
    pub settings: Arc<SettingsStore>,
    pub chat: Arc<ChatStore>,
}

/// A resource with a collection in [`DataStores`].
pub trait StoredResource: Resource + Sized {
    fn store(stores: &DataStores) -> &Arc<MemoryStore<Self>>;
}

macro_rules! stored_resources {
    ($($marker:ty => $field:ident),* $(,)?) => {
        $(
            impl StoredResource for $marker {
                fn store(stores: &DataStores) -> &Arc<MemoryStore<Self>> {
                    &stores.$field
                }
            }
        )*
    };
}

stored_resources! {
    Users => users,
    Subscribers => subscribers,
    Products => products,
    Posts => posts,
    Integrations => integrations,
    Roles => roles,
    Plans => plans,
}

fn store<R: Resource>(rows: Vec<R::Row>, latency: Duration) -> Arc<MemoryStore<R>> {
    Arc::new(MemoryStore::with_rows(rows).with_latency(latency))
}

fn seeded_or_empty<T>(seed_data: bool, rows: fn() -> Vec<T>) -> Vec<T> {
    if seed_data {
        rows()
    } else {
        Vec::new()
    }
}

impl DataStores {
    /// Build all stores, optionally loading the demo rows.
    pub fn new(seed_data: bool, latency: Duration) -> Self {
        let stores = Self {
            users: store::<Users>(seeded_or_empty(seed_data, seed::users), latency),
            subscribers: store::<Subscribers>(
                seeded_or_empty(seed_data, seed::subscribers),
                latency,
            ),
            products: store::<Products>(seeded_or_empty(seed_data, seed::products), latency),
            posts: store::<Posts>(seeded_or_empty(seed_data, seed::posts), latency),
            integrations: store::<Integrations>(
                seeded_or_empty(seed_data, seed::integrations),
                latency,
            ),
            roles: store::<Roles>(seeded_or_empty(seed_data, seed::roles), latency),
            plans: store::<Plans>(seeded_or_empty(seed_data, seed::plans), latency),
            settings: Arc::new(SettingsStore::default()),
            chat: Arc::new(if seed_data {
                ChatStore::with_threads(seed::chats(), seed::chat_messages())
            } else {
                ChatStore::default()
            }),
        };
        tracing::info!(
            seed_data,
            latency_ms = latency.as_millis() as u64,
            "Data stores ready"
        );
        stores
    }

    pub fn seeded() -> Self {
        Self::new(true, Duration::ZERO)
    }

    pub fn empty() -> Self {
        Self::new(false, Duration::ZERO)
    }

    /// The collection for `R` as a data collaborator.
    pub fn collaborator<R: StoredResource>(&self) -> SharedCollaborator<R> {
        Arc::clone(R::store(self)) as SharedCollaborator<R>
    }

    pub async fn user_stats(&self) -> UserStats {
        let users = self.users.all().await;
        UserStats::compute(&users, Utc::now())
    }

    pub async fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            users: self.users.len().await as u64,
            subscribers: self.subscribers.len().await as u64,
            products: self.products.len().await as u64,
            posts: self.posts.len().await as u64,
            integrations: self.integrations.len().await as u64,
            roles: self.roles.len().await as u64,
            plans: self.plans.len().await as u64,
            chats: self.chat.len().await as u64,
        }
    }

    pub async fn trends(&self) -> DashboardTrends {
        let now = Utc::now();
        let users = self.users.all().await;
        let subscribers = self.subscribers.all().await;
        DashboardTrends {
            users: stats::monthly_counts(users.iter().map(|u| u.created_at), now),
            subscribers: stats::monthly_counts(subscribers.iter().map(|s| s.subscribed_at), now),
        }
    }

    pub async fn recent_users(&self, limit: usize) -> Vec<RecentUser> {
        stats::recent_users(&self.users.all().await, limit)
    }
}

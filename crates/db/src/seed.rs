//! Demo rows loaded when the service starts with `SEED_DATA=true`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use ballie_core::chat::{self, Chat, ChatMessage};
use ballie_core::resource::Resource;
use ballie_core::resources::{
    Integration, Integrations, Plan, Plans, Post, Posts, Product, Products, Role, Roles,
    Subscriber, Subscribers, User, Users,
};

fn decode<T: DeserializeOwned>(entity: &str, value: Value) -> Vec<T> {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::error!(entity, error = %e, "Invalid seed rows, starting empty");
        Vec::new()
    })
}

fn rows<R: Resource>(value: Value) -> Vec<R::Row> {
    decode(R::ENTITY, value)
}

pub fn users() -> Vec<User> {
    rows::<Users>(json!([
        { "_id": "U001", "name": "Alice Johnson", "email": "alice.johnson@example.com", "role": "admin", "status": "active", "premium": true, "language": "en", "notes": "Team lead", "createdAt": "2024-01-12T10:20:00Z" },
        { "_id": "U002", "name": "Brian Chen", "email": "brian.chen@example.com", "role": "business", "status": "active", "premium": false, "language": "en", "createdAt": "2024-02-03T09:10:00Z" },
        { "_id": "U003", "name": "Carla Mendes", "email": "carla.mendes@example.com", "role": "fan", "status": "suspended", "premium": false, "language": "pt", "notes": "Chargeback in May", "createdAt": "2024-02-17T14:00:00Z" },
        { "_id": "U004", "name": "Diego Martínez", "email": "diego.martinez@example.com", "role": "fan", "status": "active", "premium": true, "language": "es", "notes": "VIP", "createdAt": "2024-03-29T16:45:00Z" },
        { "_id": "U005", "name": "Elena Petrova", "email": "elena.petrova@example.com", "role": "business", "status": "active", "premium": true, "language": "ru", "createdAt": "2024-04-08T08:30:00Z" },
        { "_id": "U006", "name": "Farhan Ali", "email": "farhan.ali@example.com", "role": "fan", "status": "active", "premium": false, "language": "ur", "createdAt": "2024-04-21T12:05:00Z" },
        { "_id": "U007", "name": "Grace Lee", "email": "grace.lee@example.com", "role": "admin", "status": "active", "premium": true, "language": "en", "notes": "Security champion", "createdAt": "2024-05-10T10:00:00Z" },
        { "_id": "U008", "name": "Hiro Tanaka", "email": "hiro.tanaka@example.com", "role": "business", "status": "active", "premium": false, "language": "ja", "createdAt": "2024-06-01T09:10:00Z" },
        { "_id": "U009", "name": "Isabella Rossi", "email": "isabella.rossi@example.com", "role": "fan", "status": "active", "premium": true, "language": "it", "createdAt": "2024-07-15T11:20:00Z" },
        { "_id": "U010", "name": "Jamal Brown", "email": "jamal.brown@example.com", "role": "fan", "status": "suspended", "premium": false, "language": "en", "createdAt": "2024-08-04T15:40:00Z" },
        { "_id": "U011", "name": "Klara Novak", "email": "klara.novak@example.com", "role": "business", "status": "active", "premium": false, "language": "cs", "createdAt": "2024-08-22T10:10:00Z" },
        { "_id": "U012", "name": "Liam O'Connor", "email": "liam.oconnor@example.com", "role": "business", "status": "active", "premium": true, "language": "en", "createdAt": "2024-09-03T13:25:00Z" }
    ]))
}

pub fn subscribers() -> Vec<Subscriber> {
    rows::<Subscribers>(json!([
        { "_id": "s1", "name": "Jesse Carter", "email": "jesse@gmail.app", "plan": "premium", "status": "active", "locale": "en", "tags": ["beta", "partner"], "subscribedAt": "2025-09-30T09:00:00Z", "lastEmailAt": "2025-10-12T10:05:00Z" },
        { "_id": "s2", "name": "Zoë van Dijk", "email": "zoe@pubhouse.nl", "plan": "free", "status": "unsubscribed", "locale": "nl", "tags": ["venues"], "subscribedAt": "2025-10-03T15:00:00Z", "lastEmailAt": "2025-10-05T15:41:00Z" },
        { "_id": "s3", "name": "Omar Ali", "email": "omar@example.com", "plan": "pro", "status": "active", "locale": "en", "tags": [], "subscribedAt": "2025-10-10T12:30:00Z", "lastEmailAt": null }
    ]))
}

pub fn products() -> Vec<Product> {
    rows::<Products>(json!([
        { "_id": "p1", "name": "Ballie Fan Scarf", "sku": "SCF-001", "price": 19.99, "stock": 120, "category": "merch", "status": "active", "image": "https://images.unsplash.com/photo-1520975922284-9bcd4b04d93e?q=80&w=800", "createdAt": "2025-10-01T09:00:00Z", "updatedAt": "2025-10-12T18:22:00Z" },
        { "_id": "p2", "name": "Venue Voucher €25", "sku": "VCH-025", "price": 25, "stock": 0, "category": "voucher", "status": "oos", "image": "https://images.unsplash.com/photo-1560179707-f14e90ef1025?q=80&w=800", "createdAt": "2025-09-28T09:00:00Z", "updatedAt": "2025-10-11T10:05:00Z" },
        { "_id": "p3", "name": "Ballie Shirt", "sku": "TSH-010", "price": 29, "stock": 42, "category": "merch", "status": "draft", "image": "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?q=80&w=800", "createdAt": "2025-09-20T09:00:00Z", "updatedAt": "2025-10-10T12:30:00Z" }
    ]))
}

pub fn posts() -> Vec<Post> {
    rows::<Posts>(json!([
        { "_id": "b1", "title": "Welcome to Ballie: Match Discovery 101", "slug": "welcome-to-ballie", "status": "published", "author": "Editorial", "category": "Announcements", "tags": ["launch", "fans"], "coverImage": "https://images.unsplash.com/photo-1517927033932-b3d18e61fb3a?q=80&w=1200&auto=format&fit=crop", "excerpt": "Ballie helps you find live football at nearby venues and streams.", "content": "## Hello world\nBallie connects fans to venues and live streams.", "publishedAt": "2025-10-05T08:30:00Z", "createdAt": "2025-10-04T15:00:00Z", "updatedAt": "2025-10-11T10:00:00Z" },
        { "_id": "b2", "title": "Venue Guidelines for Match Posting", "slug": "venue-guidelines", "status": "draft", "author": "Ops Team", "category": "Guides", "tags": ["venues", "compliance"], "excerpt": "How to post, tag, and keep your listings accurate.", "content": "Step-by-step guide for venue owners...", "publishedAt": null, "createdAt": "2025-10-08T12:00:00Z", "updatedAt": "2025-10-12T09:40:00Z" },
        { "_id": "b3", "title": "October Schedule: Top Matches to Watch", "slug": "october-schedule-top-matches", "status": "archived", "author": "Editorial", "category": "Fixtures", "tags": ["schedules"], "excerpt": "This month's must-see fixtures across Europe.", "content": "List of matches...", "publishedAt": "2025-10-01T09:00:00Z", "createdAt": "2025-09-28T10:00:00Z", "updatedAt": "2025-10-02T10:00:00Z" }
    ]))
}

pub fn integrations() -> Vec<Integration> {
    rows::<Integrations>(json!([
        { "_id": "i1", "provider": "stripe", "name": "Stripe (Prod)", "apiKey": "sk_live_********", "status": "active", "lastSyncAt": "2025-10-11T10:00:00Z", "createdAt": "2025-10-01T08:00:00Z" },
        { "_id": "i2", "provider": "paypal", "name": "PayPal (Sandbox)", "apiKey": "sandbox_********", "status": "disabled", "lastSyncAt": null, "createdAt": "2025-10-03T12:30:00Z" }
    ]))
}

pub fn roles() -> Vec<Role> {
    rows::<Roles>(json!([
        { "_id": "r1", "name": "admin", "description": "Full access", "perms": { "usersRead": true, "usersWrite": true, "postsWrite": true, "billingManage": true, "venuesVerify": true }, "createdAt": "2025-09-15T09:00:00Z" },
        { "_id": "r2", "name": "business", "description": "Venue owner permissions", "perms": { "usersRead": true, "usersWrite": false, "postsWrite": true, "billingManage": false, "venuesVerify": false }, "createdAt": "2025-09-20T09:00:00Z" },
        { "_id": "r3", "name": "moderator", "description": "Content moderation only", "perms": { "usersRead": true, "usersWrite": false, "postsWrite": true, "billingManage": false, "venuesVerify": true }, "createdAt": "2025-10-01T09:00:00Z" }
    ]))
}

pub fn plans() -> Vec<Plan> {
    rows::<Plans>(json!([
        { "_id": "pl1", "title": "Derby night at De Kroeg", "description": "Big screen, reserved tables for the derby.", "category": "watch-party", "age": "18+", "status": "open", "location": "Amsterdam", "planCreatorID": "U002", "maxMembers": 40, "startDate": "2025-10-19", "endDate": "2025-10-19", "startTime": "20:00", "endTime": "23:00", "createdAt": "2025-10-09T17:00:00Z" },
        { "_id": "pl2", "title": "Sunday league meetup", "description": "Casual five-a-side followed by the late match.", "category": "meetup", "age": "all", "status": "full", "location": "Rotterdam", "planCreatorID": "U006", "maxMembers": 10, "startDate": "2025-10-26", "endDate": "2025-10-26", "startTime": "14:00", "endTime": "19:00", "createdAt": "2025-10-12T08:15:00Z" }
    ]))
}

pub fn chats() -> Vec<Chat> {
    decode(chat::ENTITY, json!([
        { "_id": "c1", "chatName": "Diego Martínez", "chatImage": "https://i.pravatar.cc/120?img=12" },
        { "_id": "c2", "chatName": "The Corner Pub" },
        { "_id": "c3" }
    ]))
}

/// Chat summaries are derived from these when the store loads.
pub fn chat_messages() -> Vec<ChatMessage> {
    decode("ChatMessage", json!([
        { "_id": "m1", "chatId": "c1", "textMessage": "My premium badge disappeared after renewing.", "sentBy": "U004", "senderName": "Diego Martínez", "sentAt": "2025-10-12T09:14:00Z" },
        { "_id": "m2", "chatId": "c1", "textMessage": "Sorry about that, restoring it now.", "sentBy": "U001", "senderName": "Alice Johnson", "isAdmin": true, "adminName": "Alice Johnson", "sentAt": "2025-10-12T09:20:00Z" },
        { "_id": "m3", "chatId": "c2", "textMessage": "Can we list Sunday's match screening?", "sentBy": "U008", "senderName": "Hiro Tanaka", "sentAt": "2025-10-13T17:02:00Z" },
        { "_id": "m4", "chatId": "c2", "sentBy": "U008", "senderName": "Hiro Tanaka", "attachment": { "url": "https://files.ballie.app/venue-license.pdf", "name": "venue-license.pdf", "type": "application/pdf", "size": 184320 }, "sentAt": "2025-10-13T17:03:00Z" }
    ]))
}

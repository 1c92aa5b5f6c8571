//! The seven list-managed resources of the admin dashboard.
//!
//! Each submodule defines a row type, its drawer model, the categorical
//! enums it filters on, and a zero-sized marker implementing
//! [`Resource`](crate::resource::Resource).

/// Define a string-valued categorical enum.
///
/// Each variant maps to its wire string; the variant marked `#[default]` is
/// used when a payload omits the field.
macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire string for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $val),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod integration;
pub mod plan;
pub mod post;
pub mod product;
pub mod role;
pub mod subscriber;
pub mod user;

pub use integration::{Integration, IntegrationDraft, Integrations};
pub use plan::{Plan, PlanDraft, Plans};
pub use post::{Post, PostDraft, Posts};
pub use product::{Product, ProductDraft, Products};
pub use role::{Role, RoleDraft, Roles};
pub use subscriber::{Subscriber, SubscriberDraft, Subscribers};
pub use user::{User, UserDraft, Users};

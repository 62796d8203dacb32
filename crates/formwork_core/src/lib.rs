//! Formwork Core Runtime
//!
//! This crate provides the state primitives the Formwork form controller is
//! built on:
//!
//! - **Store**: an observable value with synchronous subscribe/notify
//! - **Field Store**: a store over a name-keyed map with single-field merges
//!
//! # Example
//!
//! ```rust
//! use formwork_core::FieldStore;
//!
//! let values = FieldStore::from_keys(["email", "password"], String::new());
//!
//! let handle = values.subscribe(|fields| {
//!     println!("values are now {:?}", fields);
//! });
//!
//! values.update_field("email", "a@b.com".to_string());
//! assert_eq!(values.get_field("email").as_deref(), Some("a@b.com"));
//! assert_eq!(values.get_field("password").as_deref(), Some(""));
//!
//! values.unsubscribe(handle);
//! ```

pub mod field_store;
pub mod store;

pub use field_store::{FieldMap, FieldStore};
pub use store::{Listener, Store, SubscriberId, SubscriptionHandle};

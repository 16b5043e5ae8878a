pub mod api;
pub mod client;
pub mod error;
pub mod session;
pub mod storage;

pub use api::{
    AdAccount, EntityLevel, InsightMap, InsightPeriod, SyncAck, AGGREGATE_GROUP_BY_DATE,
};
pub use client::ApiClient;
pub use error::{ClientError, StoreError};
pub use session::{Navigator, SessionExpiry, TracingNavigator, EXPIRED_NOTICE};
pub use storage::{
    CredentialStore, FileStore, MemoryStore, Session, ACCESS_TOKEN_KEY, IS_ADMIN_KEY, USER_ID_KEY,
};

//! Shared data shapes held by the store.
//!
//! Entities are plain values: they carry no behavior beyond small derived
//! accessors and are cloned freely into snapshots.

mod banner;
mod category;
mod download;
mod material;
mod user;

pub use banner::{Banner, BannerPriority, BannerVariant};
pub use category::Category;
pub use download::{DownloadItem, DownloadStatus};
pub use material::{Material, MaterialType};
pub use user::{Role, User};

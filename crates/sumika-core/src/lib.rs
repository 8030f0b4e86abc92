//! # Sumika Core
//!
//! LDPリソース/コンテナのデータモデルとコラボレータ契約
//! Shared data models, RDF format registry, closed error taxonomy and the
//! storage/container collaborator traits used by every Sumika crate.

pub mod error;
pub mod format;
pub mod model;
pub mod store;

pub use error::*;
pub use format::*;
pub use model::*;
pub use store::*;

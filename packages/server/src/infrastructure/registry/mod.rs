//! 接続レジストリの実装
//!
//! ## 実装
//!
//! - `inmemory`: プロセス内の HashMap を使った実装
//! - 将来的に: 複数ノード間で共有する実装（Redis Pub/Sub など）

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;

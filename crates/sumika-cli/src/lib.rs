//! # Sumika CLI Library
//!
//! Sumika LDPサーバーのコマンドラインインターフェース
//! サーバー起動と設定確認をコマンドラインから実行

pub mod commands;

pub use commands::*;

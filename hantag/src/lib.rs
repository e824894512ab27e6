//! # hantag
//!
//! hantagは、隠れマルコフモデル（HMM）に基づく韓国語の品詞タグ付けと
//! 形態素分割の実装です。
//!
//! ## 概要
//!
//! このライブラリは、学習済みの生成・遷移対数確率表を用いて、入力文を
//! （形態素, タグ）列へ分解するタガーを提供します。文ごとに候補分割の
//! ラティスを構築し、一般化Bellman-Fordによる最短路探索で大域的に
//! 最適なタグ列を選択します。辞書に存在しない区間は未知語ノードで
//! 橋渡しされるため、どのような入力でも完全な解析が得られます。
//!
//! ## 主な機能
//!
//! - **ラティスに基づく解析**: 語幹・語尾の縮約復元を含む候補生成
//! - **未知語の橋渡しと推定**: 周辺の遷移証拠による未知語タグの推定
//! - **コーパスからの学習**: 頻度集計と閾値による刈り込み
//! - **ユーザー辞書**: 学習済みモデルへの単語追記
//!
//! ## 使用例
//!
//! ```
//! use hantag::{Corpus, CorpusTrainer, Tag, Tagger};
//!
//! let corpus = Corpus::from_reader(
//!     "아이오아이/Noun 는/Josa 좋/Adjective 다/Eomi".as_bytes(),
//! )?;
//! let model = CorpusTrainer::new().min_tag_count(1).train(&corpus);
//!
//! let tagger = Tagger::new(model);
//! let morphs = tagger.tag("아이오아이는")?;
//! assert_eq!(morphs[0], ("아이오아이".to_string(), Tag::Noun));
//! assert_eq!(morphs[1], ("는".to_string(), Tag::Josa));
//! # Ok::<(), hantag::HantagError>(())
//! ```

/// エラー型の定義
pub mod errors;

/// ハングル字母処理のユーティリティ
mod hangul;

/// 語幹・語尾候補の生成
pub mod lemma;

/// 学習済みモデルの管理
pub mod model;

/// 文の内部表現
mod sentence;

/// 汎用最短路ソルバー
pub mod solver;

/// 品詞タグの定義
pub mod tag;

/// タガーの実装
pub mod tagger;

/// モデル学習機能
pub mod trainer;

// Re-exports
pub use errors::{HantagError, Result};
pub use model::Model;
pub use tag::Tag;
pub use tagger::Tagger;
pub use trainer::{Corpus, CorpusTrainer};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

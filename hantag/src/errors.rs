//! エラー型の定義
//!
//! このモジュールは、hantagライブラリで使用されるすべてのエラー型を定義します。
//! 回復可能な条件（引数やフォーマットの誤り）と、デコード処理の欠陥を示す条件
//! （パス未発見、負閉路）を別々のバリアントとして区別します。

use std::error::Error;
use std::fmt;

/// hantag専用のResult型
///
/// エラー型としてデフォルトで[`HantagError`]を使用します。
pub type Result<T, E = HantagError> = std::result::Result<T, E>;

/// hantagのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum HantagError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// パス未発見エラー
    ///
    /// ラティス内で始点から終点へ到達できない場合に発生します。
    /// 未知語ノードによる橋渡しがある限り発生しないはずであり、
    /// 発生した場合はラティス構築の欠陥を意味します。
    #[error(transparent)]
    NoPath(NoPathError),

    /// 負閉路検出エラー
    ///
    /// 最短路の緩和が収束しなかった場合に発生します。
    /// 連接に基づく非循環ラティスでは発生しないはずの防御的なエラーです。
    #[error(transparent)]
    NegativeCycle(NegativeCycleError),

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSONシリアライゼーションエラー
    ///
    /// [`serde_json::Error`]のエラーバリアント。
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// 一時ファイルの永続化エラー
    ///
    /// [`tempfile::PersistError`]のエラーバリアント。
    #[error(transparent)]
    PathPersist(#[from] tempfile::PersistError),
}

impl HantagError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// パス未発見エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    pub(crate) fn no_path<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::NoPath(NoPathError { msg: msg.into() })
    }

    /// 負閉路検出エラーを生成します
    ///
    /// # 引数
    ///
    /// * `from` - 収束しなかった辺の始点インデックス
    /// * `to` - 収束しなかった辺の終点インデックス
    /// * `weight` - その辺の重み
    pub(crate) fn negative_cycle(from: usize, to: usize, weight: f64) -> Self {
        Self::NegativeCycle(NegativeCycleError { from, to, weight })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 始点から終点へのパスが存在しない場合に使用されるエラー
#[derive(Debug)]
pub struct NoPathError {
    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for NoPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NoPathError: {}", self.msg)
    }
}

impl Error for NoPathError {}

/// 負閉路が検出された場合に使用されるエラー
///
/// 収束しなかった辺の情報を保持します。
#[derive(Debug)]
pub struct NegativeCycleError {
    /// 辺の始点インデックス
    pub(crate) from: usize,

    /// 辺の終点インデックス
    pub(crate) to: usize,

    /// 辺の重み
    pub(crate) weight: f64,
}

impl fmt::Display for NegativeCycleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "NegativeCycleError: edge ({} -> {}, weight {}) still relaxes after |V| passes",
            self.from, self.to, self.weight
        )
    }
}

impl Error for NegativeCycleError {}

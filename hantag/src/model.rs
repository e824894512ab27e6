//! 学習済みモデルの管理モジュール
//!
//! このモジュールは、HMMタガーが参照する確率表の保持と永続化を行います。
//! モデルは以下から構成されます:
//!
//! - 生成確率表: タグ → （形態素 → 対数確率）
//! - 遷移確率表: （タグ, タグ） → 対数確率
//! - 許容遷移集合: ラティスの辺を張ってよいタグ対
//!
//! モデルはタグ付けセッションの間は概念的に不変であり、唯一の変更操作は
//! [`Model::add_user_dictionary`]によるユーザー辞書の追記です。この操作は
//! 内部ロックを持たないため、並行するタグ付けと同時に呼び出す場合は
//! 外部で同期する必要があります。
//!
//! # モデルファイル
//!
//! モデルはJSONとして永続化されます。遷移キーは空白結合されたタグ対
//! （例: `"Noun Josa"`）として直列化され、読み込み時に2要素のタグ組へ
//! パースし直されます。キーの欠落や数値でない確率は、タグ付けが始まる前の
//! 読み込み時点で即座にエラーになります。
//!
//! ```json
//! {
//!   "emission": { "Noun": { "노래": -1.2 } },
//!   "transition": { "BOS Noun": -0.5 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use hashbrown::{HashMap, HashSet};

use crate::errors::{HantagError, Result};
use crate::tag::Tag;

/// 直列化用のミラー構造体。
///
/// 実行時表現への検証付き変換は[`Model::read`]が行います。
/// `BTreeMap`を使用することで出力順序を決定的に保ちます。
#[derive(serde::Serialize, serde::Deserialize)]
struct RawModel {
    emission: BTreeMap<String, BTreeMap<String, f64>>,
    transition: BTreeMap<String, f64>,
}

/// HMMタガーの確率モデル
///
/// 生成・遷移の対数確率表と、そこから導出されるキャッシュ
/// （タグごとの最良スコア、未知語・未知遷移のフォールバック値、
/// 許容遷移集合）を保持します。
pub struct Model {
    emission: HashMap<Tag, HashMap<String, f64>>,
    transition: HashMap<(Tag, Tag), f64>,
    acceptable: HashSet<(Tag, Tag)>,

    // Derived caches. Computed once at construction and kept stable across
    // add_user_dictionary() so that repeated appends stay idempotent.
    best_logprob: HashMap<Tag, f64>,
    unknown_word_logprob: f64,
    unknown_transition_logprob: f64,
}

impl Model {
    /// 確率表からモデルを直接構築します
    ///
    /// 許容遷移集合は遷移表のキー集合に、番兵（BOS・EOS）と未知語タグを
    /// 含むすべての対を加えたものになります。未知語ノードはどのタグとも
    /// 接続可能でなければならないためです。
    ///
    /// # 引数
    ///
    /// * `emission` - タグ → （形態素 → 対数確率）
    /// * `transition` - （タグ, タグ） → 対数確率
    ///
    /// # 戻り値
    ///
    /// 構築されたモデル
    pub fn from_tables(
        emission: HashMap<Tag, HashMap<String, f64>>,
        transition: HashMap<(Tag, Tag), f64>,
    ) -> Self {
        let mut best_logprob = HashMap::new();
        for (&tag, words) in &emission {
            let best = words.values().copied().fold(f64::NEG_INFINITY, f64::max);
            if best.is_finite() {
                best_logprob.insert(tag, best);
            }
        }

        let min_emission = emission
            .values()
            .flat_map(|words| words.values().copied())
            .fold(f64::INFINITY, f64::min);
        let unknown_word_logprob = if min_emission.is_finite() {
            min_emission * 0.5
        } else {
            0.0
        };

        let min_transition = transition
            .values()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let unknown_transition_logprob = if min_transition.is_finite() {
            min_transition
        } else {
            0.0
        };

        let mut acceptable: HashSet<(Tag, Tag)> = transition.keys().copied().collect();
        for tag in Tag::ALL {
            acceptable.insert((Tag::Bos, tag));
            acceptable.insert((tag, Tag::Eos));
            acceptable.insert((tag, Tag::Unk));
            acceptable.insert((Tag::Unk, tag));
        }

        Self {
            emission,
            transition,
            acceptable,
            best_logprob,
            unknown_word_logprob,
            unknown_transition_logprob,
        }
    }

    /// リーダーからモデルを読み込みます
    ///
    /// # 引数
    ///
    /// * `rdr` - モデルJSONのリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたモデル
    ///
    /// # エラー
    ///
    /// JSONとして不正な場合、必須キーが欠落している場合、確率が数値で
    /// ない場合、タグ名や遷移キーがパースできない場合、
    /// [`HantagError`]が返されます。
    pub fn read<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let raw: RawModel = serde_json::from_reader(BufReader::new(rdr))?;

        let mut emission: HashMap<Tag, HashMap<String, f64>> = HashMap::new();
        for (tag, words) in raw.emission {
            let tag: Tag = tag.parse()?;
            emission.insert(tag, words.into_iter().collect());
        }

        let mut transition: HashMap<(Tag, Tag), f64> = HashMap::new();
        for (key, logprob) in raw.transition {
            let mut parts = key.split_whitespace();
            let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(HantagError::invalid_format(
                    "transition",
                    format!("expected a `TAG TAG` key: {key}"),
                ));
            };
            transition.insert((from.parse()?, to.parse()?), logprob);
        }

        let model = Self::from_tables(emission, transition);
        log::info!(
            "Loaded a model: {} tags, {} words, {} transitions",
            model.emission.len(),
            model.num_words(),
            model.transition.len(),
        );
        Ok(model)
    }

    /// ファイルパスからモデルを読み込みます
    ///
    /// # 引数
    ///
    /// * `path` - モデルJSONのパス
    ///
    /// # エラー
    ///
    /// ファイルが開けない場合、または内容が不正な場合、
    /// [`HantagError`]が返されます。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::read(File::open(path)?)
    }

    /// モデルをライターへ書き出します
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、I/Oエラーが返されます。
    pub fn write<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        let mut raw = RawModel {
            emission: BTreeMap::new(),
            transition: BTreeMap::new(),
        };
        for (tag, words) in &self.emission {
            raw.emission.insert(
                tag.to_string(),
                words.iter().map(|(w, &p)| (w.clone(), p)).collect(),
            );
        }
        for (&(from, to), &logprob) in &self.transition {
            raw.transition.insert(format!("{from} {to}"), logprob);
        }

        let mut wtr = BufWriter::new(wtr);
        serde_json::to_writer_pretty(&mut wtr, &raw)?;
        wtr.flush()?;
        Ok(())
    }

    /// モデルをファイルへアトミックに書き出します
    ///
    /// 同じディレクトリの一時ファイルへ書き込んだ後にリネームするため、
    /// 途中で失敗しても既存のモデルファイルは破損しません。
    ///
    /// # 引数
    ///
    /// * `path` - 出力先のパス
    pub fn write_to_path<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        self.write(&mut tmp)?;
        tmp.persist(path)?;
        Ok(())
    }

    /// ユーザー辞書の単語を追加します
    ///
    /// 各単語は、そのタグの学習済み単語が持つ最大スコア（キャッシュ済み）で
    /// 登録されます。既に登録済みの単語のスコアは変更しないため、同じ単語を
    /// 二度追加しても最終スコアは一度だけ追加した場合と同一です。
    ///
    /// # 引数
    ///
    /// * `tag` - 追加先のタグ
    /// * `words` - 追加する単語の列
    ///
    /// # エラー
    ///
    /// `tag`が生成確率表に存在しない場合、[`HantagError`]が返され、
    /// モデルは変更されません。
    pub fn add_user_dictionary<S>(&mut self, tag: Tag, words: &[S]) -> Result<()>
    where
        S: AsRef<str>,
    {
        let Some(entries) = self.emission.get_mut(&tag) else {
            return Err(HantagError::invalid_argument(
                "tag",
                format!("{tag} is not in the emission table"),
            ));
        };
        let score = self.best_logprob.get(&tag).copied().unwrap_or(0.0);
        for word in words {
            entries.entry(word.as_ref().to_string()).or_insert(score);
        }
        Ok(())
    }

    /// 生成確率表が指定の形態素を含むかどうかを判定します。
    #[inline(always)]
    pub fn contains_word(&self, tag: Tag, word: &str) -> bool {
        self.emission
            .get(&tag)
            .is_some_and(|words| words.contains_key(word))
    }

    /// 形態素の生成対数確率を返します。
    #[inline(always)]
    pub fn emission_logprob(&self, tag: Tag, word: &str) -> Option<f64> {
        self.emission.get(&tag).and_then(|words| words.get(word)).copied()
    }

    /// タグ対の遷移対数確率を返します。
    #[inline(always)]
    pub fn transition_logprob(&self, from: Tag, to: Tag) -> Option<f64> {
        self.transition.get(&(from, to)).copied()
    }

    /// タグ対がラティスの辺として許容されるかどうかを判定します。
    #[inline(always)]
    pub fn is_acceptable(&self, from: Tag, to: Tag) -> bool {
        self.acceptable.contains(&(from, to))
    }

    /// 未知語のフォールバック対数確率を返します
    ///
    /// 生成確率表全体の最小対数確率の半分として定義されます。
    #[inline(always)]
    pub(crate) fn unknown_word_logprob(&self) -> f64 {
        self.unknown_word_logprob
    }

    /// 未知遷移のフォールバック対数確率を返します
    ///
    /// 遷移確率表の最小対数確率として定義されます。
    #[inline(always)]
    pub(crate) fn unknown_transition_logprob(&self) -> f64 {
        self.unknown_transition_logprob
    }

    /// 生成確率表に含まれる単語の総数を返します。
    pub fn num_words(&self) -> usize {
        self.emission.values().map(|words| words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> Model {
        let mut emission: HashMap<Tag, HashMap<String, f64>> = HashMap::new();
        let mut nouns = HashMap::new();
        nouns.insert("노래".to_string(), -1.0);
        nouns.insert("아이오아이".to_string(), -2.0);
        emission.insert(Tag::Noun, nouns);
        let mut josas = HashMap::new();
        josas.insert("는".to_string(), -0.5);
        emission.insert(Tag::Josa, josas);

        let mut transition = HashMap::new();
        transition.insert((Tag::Bos, Tag::Noun), -0.7);
        transition.insert((Tag::Noun, Tag::Josa), -0.4);
        transition.insert((Tag::Josa, Tag::Eos), -0.9);
        Model::from_tables(emission, transition)
    }

    #[test]
    fn test_caches() {
        let model = test_model();
        // half of the most negative emission log-probability
        assert_eq!(model.unknown_word_logprob(), -1.0);
        assert_eq!(model.unknown_transition_logprob(), -0.9);
        assert_eq!(model.best_logprob[&Tag::Noun], -1.0);
    }

    #[test]
    fn test_acceptable_transitions() {
        let model = test_model();
        assert!(model.is_acceptable(Tag::Noun, Tag::Josa));
        assert!(!model.is_acceptable(Tag::Josa, Tag::Noun));
        // pairs involving sentinels are always bridgeable
        assert!(model.is_acceptable(Tag::Bos, Tag::Verb));
        assert!(model.is_acceptable(Tag::Verb, Tag::Eos));
        assert!(model.is_acceptable(Tag::Eomi, Tag::Unk));
        assert!(model.is_acceptable(Tag::Unk, Tag::Eomi));
    }

    #[test]
    fn test_add_user_dictionary() {
        let mut model = test_model();
        model
            .add_user_dictionary(Tag::Noun, &["트와이스", "아이돌"])
            .unwrap();
        assert_eq!(model.emission_logprob(Tag::Noun, "트와이스"), Some(-1.0));
        assert_eq!(model.emission_logprob(Tag::Noun, "아이돌"), Some(-1.0));
    }

    #[test]
    fn test_add_user_dictionary_idempotent() {
        let mut model = test_model();
        model.add_user_dictionary(Tag::Noun, &["트와이스"]).unwrap();
        let first = model.emission_logprob(Tag::Noun, "트와이스");
        model.add_user_dictionary(Tag::Noun, &["트와이스"]).unwrap();
        assert_eq!(model.emission_logprob(Tag::Noun, "트와이스"), first);
        // an existing trained score is never degraded
        model.add_user_dictionary(Tag::Noun, &["아이오아이"]).unwrap();
        assert_eq!(model.emission_logprob(Tag::Noun, "아이오아이"), Some(-2.0));
    }

    #[test]
    fn test_add_user_dictionary_missing_tag() {
        let mut model = test_model();
        let num_words = model.num_words();
        assert!(model.add_user_dictionary(Tag::Verb, &["가"]).is_err());
        // the model is left unchanged
        assert_eq!(model.num_words(), num_words);
    }

    #[test]
    fn test_read_valid() {
        let json = r#"{
            "emission": { "Noun": { "노래": -1.2, "뭐": -2.5 } },
            "transition": { "BOS Noun": -0.5, "Noun EOS": -0.8 }
        }"#;
        let model = Model::read(json.as_bytes()).unwrap();
        assert_eq!(model.emission_logprob(Tag::Noun, "노래"), Some(-1.2));
        assert_eq!(model.transition_logprob(Tag::Bos, Tag::Noun), Some(-0.5));
        assert_eq!(model.transition_logprob(Tag::Noun, Tag::Eos), Some(-0.8));
    }

    #[test]
    fn test_read_rejects_missing_keys() {
        let json = r#"{ "emission": {} }"#;
        assert!(Model::read(json.as_bytes()).is_err());
    }

    #[test]
    fn test_read_rejects_bad_tag() {
        let json = r#"{
            "emission": { "Particle": { "는": -0.5 } },
            "transition": {}
        }"#;
        assert!(Model::read(json.as_bytes()).is_err());
    }

    #[test]
    fn test_read_rejects_bad_transition_key() {
        let json = r#"{
            "emission": {},
            "transition": { "Noun": -0.5 }
        }"#;
        assert!(Model::read(json.as_bytes()).is_err());

        let json = r#"{
            "emission": {},
            "transition": { "Noun Josa Eomi": -0.5 }
        }"#;
        assert!(Model::read(json.as_bytes()).is_err());
    }

    #[test]
    fn test_read_rejects_non_numeric_probability() {
        let json = r#"{
            "emission": { "Noun": { "노래": "high" } },
            "transition": {}
        }"#;
        assert!(Model::read(json.as_bytes()).is_err());
    }

    #[test]
    fn test_write_read() {
        let model = test_model();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let reloaded = Model::read(buf.as_slice()).unwrap();
        assert_eq!(
            reloaded.emission_logprob(Tag::Noun, "아이오아이"),
            Some(-2.0)
        );
        assert_eq!(
            reloaded.transition_logprob(Tag::Noun, Tag::Josa),
            Some(-0.4)
        );
        assert_eq!(reloaded.num_words(), model.num_words());
    }
}

//! モデル学習のモジュール
//!
//! このモジュールは、タグ付きコーパスからHMMモデルの確率表を推定する
//! トレーナーを提供します。学習は以下の手順で行われます:
//!
//! 1. 文ごとにBOS・EOS番兵で挟み、（タグ, 単語）の生成頻度と
//!    （タグ, タグ）の遷移頻度を数え上げる
//! 2. 出現数が閾値未満の単語を削除する
//! 3. 残った単語の総量が閾値未満のタグを削除し、そのタグを含む遷移も
//!    連鎖的に削除する
//! 4. 頻度をタグごと（生成）・遷移元タグごと（遷移）に正規化し、
//!    対数確率へ変換する

mod corpus;

use hashbrown::HashMap;

use crate::model::Model;
use crate::tag::Tag;

pub use crate::trainer::corpus::{Corpus, TaggedSentence};

/// 単語の最小出現数のデフォルト値。
const DEFAULT_MIN_WORD_COUNT: u32 = 1;

/// タグの最小単語総量のデフォルト値。
const DEFAULT_MIN_TAG_COUNT: u32 = 5;

/// HMMモデルのトレーナー
///
/// コーパスの頻度集計から生成・遷移の対数確率表を推定します。
pub struct CorpusTrainer {
    min_word_count: u32,
    min_tag_count: u32,
}

impl Default for CorpusTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusTrainer {
    /// デフォルト設定のトレーナーを作成します。
    pub const fn new() -> Self {
        Self {
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            min_tag_count: DEFAULT_MIN_TAG_COUNT,
        }
    }

    /// 単語を保持するための最小出現数を設定します
    ///
    /// # 引数
    ///
    /// * `count` - 最小出現数。これ未満の単語は削除されます
    ///
    /// # 戻り値
    ///
    /// 設定が適用された`CorpusTrainer`インスタンス
    pub const fn min_word_count(mut self, count: u32) -> Self {
        self.min_word_count = count;
        self
    }

    /// タグを保持するための最小単語総量を設定します
    ///
    /// 単語の削除後に残った出現数の合計がこれ未満のタグは、
    /// 生成確率表と遷移確率表の両方から削除されます。
    ///
    /// # 引数
    ///
    /// * `count` - 最小単語総量
    ///
    /// # 戻り値
    ///
    /// 設定が適用された`CorpusTrainer`インスタンス
    pub const fn min_tag_count(mut self, count: u32) -> Self {
        self.min_tag_count = count;
        self
    }

    /// コーパスからモデルを学習します
    ///
    /// # 引数
    ///
    /// * `corpus` - タグ付きコーパス
    ///
    /// # 戻り値
    ///
    /// 学習されたモデル。空のコーパスからは空のモデルが得られます
    pub fn train(&self, corpus: &Corpus) -> Model {
        let mut emission_counts: HashMap<Tag, HashMap<String, u32>> = HashMap::new();
        let mut transition_counts: HashMap<(Tag, Tag), u32> = HashMap::new();

        for sentence in corpus.iter() {
            let mut prev = Tag::Bos;
            for (word, tag) in sentence {
                *emission_counts
                    .entry(*tag)
                    .or_default()
                    .entry(word.clone())
                    .or_insert(0) += 1;
                *transition_counts.entry((prev, *tag)).or_insert(0) += 1;
                prev = *tag;
            }
            *transition_counts.entry((prev, Tag::Eos)).or_insert(0) += 1;
        }
        log::info!(
            "Counted {} sentences: {} tags, {} transitions",
            corpus.len(),
            emission_counts.len(),
            transition_counts.len(),
        );

        // Trim rare words, then trim tags whose remaining word mass is too
        // small. Dropped tags cascade into the transition counts.
        for words in emission_counts.values_mut() {
            words.retain(|_, count| *count >= self.min_word_count);
        }
        let dropped: Vec<Tag> = emission_counts
            .iter()
            .filter(|(_, words)| words.values().sum::<u32>() < self.min_tag_count)
            .map(|(&tag, _)| tag)
            .collect();
        for tag in &dropped {
            emission_counts.remove(tag);
            log::info!("Dropped the tag {tag}: word mass below {}", self.min_tag_count);
        }
        transition_counts.retain(|&(from, to), _| !dropped.contains(&from) && !dropped.contains(&to));

        // Per-tag normalization of the emission counts.
        let mut emission: HashMap<Tag, HashMap<String, f64>> = HashMap::new();
        for (tag, words) in emission_counts {
            let total = f64::from(words.values().sum::<u32>());
            let logprobs = words
                .into_iter()
                .map(|(word, count)| (word, (f64::from(count) / total).ln()))
                .collect();
            emission.insert(tag, logprobs);
        }

        // Per-source-tag normalization of the transition counts.
        let mut source_totals: HashMap<Tag, u32> = HashMap::new();
        for (&(from, _), &count) in &transition_counts {
            *source_totals.entry(from).or_insert(0) += count;
        }
        let transition = transition_counts
            .into_iter()
            .map(|((from, to), count)| {
                let total = f64::from(source_totals[&from]);
                ((from, to), (f64::from(count) / total).ln())
            })
            .collect();

        Model::from_tables(emission, transition)
    }
}

//! HMMに基づく品詞タガーの実装
//!
//! このモジュールは、学習済みモデルを用いて文を（形態素, タグ）列へ
//! 分解するメインのタガーを提供します。解析は以下のパイプラインで
//! 行われます:
//!
//! 1. 候補ノードと許容遷移の辺からなるラティスを構築する
//! 2. 各辺に生成・遷移対数確率から導いたコストを割り当てる
//! 3. 最短路ソルバーでBOSからEOSへの最小コストパスを求める
//! 4. パス上の未知語ノードへ周辺の遷移証拠からタグを推定する
//!
//! # 例
//!
//! ```
//! use hantag::{Corpus, CorpusTrainer, Tag, Tagger};
//!
//! let corpus = Corpus::from_reader(
//!     "아이오아이/Noun 는/Josa 좋/Adjective 다/Eomi".as_bytes(),
//! )?;
//! let model = CorpusTrainer::new().min_tag_count(1).train(&corpus);
//! let tagger = Tagger::new(model);
//!
//! let morphs = tagger.tag("아이오아이는")?;
//! assert_eq!(
//!     morphs,
//!     vec![
//!         ("아이오아이".to_string(), Tag::Noun),
//!         ("는".to_string(), Tag::Josa),
//!     ],
//! );
//! # Ok::<(), hantag::HantagError>(())
//! ```

pub(crate) mod lattice;

use crate::errors::{HantagError, Result};
use crate::model::Model;
use crate::sentence::Sentence;
use crate::solver;
use crate::tag::Tag;
use crate::tagger::lattice::{Lattice, Node, MAX_WORD_LEN};

/// 名詞選好係数のデフォルト値。
const DEFAULT_NOUN_PREFERENCE: f64 = 5.0;

/// 一音節名詞ペナルティのデフォルト値。
const DEFAULT_SINGLE_SYLLABLE_PENALTY: f64 = 2.0;

/// 未知語タグの推定対象から除外されるタグ。
const NON_INFERABLE_TAGS: [Tag; 5] = [Tag::Bos, Tag::Eos, Tag::Unk, Tag::Pronoun, Tag::Number];

/// 品詞タグ付けを行うタガー
///
/// `Tagger`はモデルの所有権を持ち、1文ごとに自己完結した解析を行います。
/// モデルは解析中は読み取り専用で参照されます。
/// [`Model::add_user_dictionary`]による辞書追記を並行する解析と同時に
/// 行う場合は、外部で同期する必要があります。
pub struct Tagger {
    model: Model,
    max_word_len: usize,
    noun_preference: f64,
    single_syllable_penalty: f64,
}

impl Tagger {
    /// 新しいタガーを作成します
    ///
    /// モデルの所有権はタガーへ移動します。
    ///
    /// # 引数
    ///
    /// * `model` - 解析に使用するモデル
    pub fn new(model: Model) -> Self {
        Self {
            model,
            max_word_len: MAX_WORD_LEN,
            noun_preference: DEFAULT_NOUN_PREFERENCE,
            single_syllable_penalty: DEFAULT_SINGLE_SYLLABLE_PENALTY,
        }
    }

    /// 辞書引きする部分文字列の最大長を設定します
    ///
    /// # 引数
    ///
    /// * `max_word_len` - 最大長（文字数）。0は1として扱われます
    ///
    /// # 戻り値
    ///
    /// 設定が適用された`Tagger`インスタンス
    pub const fn max_word_len(mut self, max_word_len: usize) -> Self {
        self.max_word_len = if max_word_len == 0 { 1 } else { max_word_len };
        self
    }

    /// 名詞選好係数を設定します
    ///
    /// 名詞候補の生成コストはこの係数で除算されます。係数が大きいほど
    /// 名詞への分割が安くなります。
    ///
    /// # 引数
    ///
    /// * `factor` - 1.0以上の係数
    ///
    /// # エラー
    ///
    /// `factor`が1.0未満または有限でない場合、[`HantagError`]が
    /// 返されます。
    pub fn noun_preference(mut self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 1.0 {
            return Err(HantagError::invalid_argument(
                "factor",
                "the noun preference factor must be a finite value >= 1.0",
            ));
        }
        self.noun_preference = factor;
        Ok(self)
    }

    /// 一音節名詞ペナルティを設定します
    ///
    /// 一文字の名詞候補の生成コストはこの係数で乗算され、疑わしい
    /// 一音節の名詞分割が抑制されます。
    ///
    /// # 引数
    ///
    /// * `factor` - 1.0以上の係数
    ///
    /// # エラー
    ///
    /// `factor`が1.0未満または有限でない場合、[`HantagError`]が
    /// 返されます。
    pub fn single_syllable_penalty(mut self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 1.0 {
            return Err(HantagError::invalid_argument(
                "factor",
                "the single syllable penalty must be a finite value >= 1.0",
            ));
        }
        self.single_syllable_penalty = factor;
        Ok(self)
    }

    /// モデルへの参照を返します。
    #[inline(always)]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// モデルへの可変参照を返します
    ///
    /// ユーザー辞書の追記に使用します。解析と同時に呼び出してはいけません。
    #[inline(always)]
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// 文を（形態素, タグ）列へ解析します
    ///
    /// 出力は入力のすべての文字（空白を除く）をちょうど一度ずつ覆い、
    /// BOS・EOS番兵は含まれません。未知語ノードによる橋渡しがあるため、
    /// 辞書に存在しない区間を含む文でも必ず完全な解析が得られます。
    /// 同じモデルと入力に対する解析結果は決定的です。
    ///
    /// # 引数
    ///
    /// * `input` - 解析する文
    ///
    /// # 戻り値
    ///
    /// （形態素, タグ）対の列。空の入力では空の列
    ///
    /// # エラー
    ///
    /// EOSへ到達できない場合（ラティス構築の欠陥を意味します）、
    /// または最短路の緩和が収束しない場合、[`HantagError`]が返されます。
    pub fn tag(&self, input: &str) -> Result<Vec<(String, Tag)>> {
        let mut sent = Sentence::new();
        sent.set_sentence(input);
        if sent.is_empty() {
            return Ok(vec![]);
        }

        let lattice = Lattice::build(&sent, &self.model, self.max_word_len);
        let edges = self.weight_edges(&lattice);
        let path = solver::solve(&edges, lattice.nodes.len(), lattice.bos, lattice.eos)?;

        // Flatten compound nodes, keeping the sentinel brackets so that the
        // inference step sees BOS/EOS as neighbor evidence.
        let mut morphs: Vec<(String, Tag)> = Vec::with_capacity(path.nodes.len() + 1);
        for &id in &path.nodes {
            let node = &lattice.nodes[id];
            let ((first, first_tag), second) = node.parts();
            morphs.push((first.to_string(), first_tag));
            if let Some((ending, ending_tag)) = second {
                morphs.push((ending.to_string(), ending_tag));
            }
        }

        self.infer_unknown_tags(&mut morphs);

        morphs.pop();
        morphs.remove(0);
        Ok(morphs)
    }

    /// ラティスの辺にコストを割り当てます。
    fn weight_edges(&self, lattice: &Lattice) -> Vec<solver::Edge> {
        lattice
            .edges
            .iter()
            .map(|&(from, to)| solver::Edge {
                from,
                to,
                weight: self.edge_weight(&lattice.nodes[from], &lattice.nodes[to]),
            })
            .collect()
    }

    /// 1本の辺のコストを計算します
    ///
    /// コストは負の対数尤度（小さいほど良い）です。終点ノードの生成
    /// コストに始点からの遷移コストを加え、複合ノードでは語尾側の
    /// 生成コストと語幹・語尾間の遷移コストをさらに加えます。
    /// 名詞候補には選好係数による除算を、一文字の名詞候補には
    /// ペナルティ係数による乗算を適用します。副作用はありません。
    fn edge_weight(&self, from: &Node, to: &Node) -> f64 {
        let ((first, first_tag), second) = to.parts();

        let mut cost = self.emission_cost(first_tag, first);
        if first_tag == Tag::Noun {
            cost /= self.noun_preference;
            if first.chars().count() == 1 {
                cost *= self.single_syllable_penalty;
            }
        }
        cost += self.transition_cost(from.last_tag, to.tag);

        if let Some((ending, ending_tag)) = second {
            cost += self.emission_cost(ending_tag, ending);
            cost += self.transition_cost(to.tag, ending_tag);
        }
        cost
    }

    /// 形態素の生成コストを返します。未知語はフォールバック値になります。
    #[inline(always)]
    fn emission_cost(&self, tag: Tag, morph: &str) -> f64 {
        match self.model.emission_logprob(tag, morph) {
            Some(logprob) => -logprob,
            None => -self.model.unknown_word_logprob(),
        }
    }

    /// タグ対の遷移コストを返します。未知遷移はフォールバック値になります。
    #[inline(always)]
    fn transition_cost(&self, from: Tag, to: Tag) -> f64 {
        match self.model.transition_logprob(from, to) {
            Some(logprob) => -logprob,
            None => -self.model.unknown_transition_logprob(),
        }
    }

    /// 内部の未知語タグを周辺の遷移証拠から推定します
    ///
    /// 各未知語位置について、前後のタグとの遷移確率の和を候補タグごとに
    /// 計算し、最大のものを採用します。確率表に存在しない遷移は0として
    /// 扱い、どの候補にも証拠がない場合は名詞にフォールバックします。
    /// これは局所的で決定的なヒューリスティックであり、最短路ソルバーを
    /// 再実行することはありません。
    fn infer_unknown_tags(&self, morphs: &mut [(String, Tag)]) {
        for i in 1..morphs.len().saturating_sub(1) {
            if morphs[i].1 != Tag::Unk {
                continue;
            }
            let prev = morphs[i - 1].1;
            let next = morphs[i + 1].1;

            let mut best: Option<(Tag, f64)> = None;
            for tag in Tag::ALL {
                if NON_INFERABLE_TAGS.contains(&tag) {
                    continue;
                }
                let mut score = 0.0;
                if let Some(logprob) = self.model.transition_logprob(prev, tag) {
                    score += logprob.exp();
                }
                if let Some(logprob) = self.model.transition_logprob(tag, next) {
                    score += logprob.exp();
                }
                if score > 0.0 && best.map_or(true, |(_, b)| score > b) {
                    best = Some((tag, score));
                }
            }
            morphs[i].1 = best.map_or(Tag::Noun, |(tag, _)| tag);
        }
    }
}

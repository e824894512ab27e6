//! ラティス（格子）構造の実装モジュール
//!
//! このモジュールは、1つの文に対する候補（形態素, タグ）ノードの集合と、
//! それらを結ぶ許容遷移の辺を構築します。ラティスは文ごとに新しく
//! 構築される非循環有向グラフであり、最短路ソルバーの入力になります。
//!
//! 候補生成は語節（空白区切りの単位）ごとに行われ、辞書引きが空白境界を
//! 越えることはありません。一方で辺は語節境界をまたいで連結されます。
//! どの候補にも覆われない区間は未知語ノードで橋渡しされるため、
//! 構築されたラティスでは必ずBOSからEOSへ到達できます。

use crate::lemma;
use crate::model::Model;
use crate::sentence::Sentence;
use crate::tag::Tag;

/// 辞書引きする部分文字列の最大長（文字数）。
pub(crate) const MAX_WORD_LEN: usize = 8;

/// 複合候補における語幹側の最大長（文字数）。
pub(crate) const MAX_STEM_LEN: usize = 5;

/// 複合候補の語尾側の最大長（文字数）。
const MAX_ENDING_LEN: usize = 2;

/// ラティスの頂点
///
/// 単純ノードは文字区間`[start, end)`の表層をそのまま持ちます。
/// 複合ノードは語幹と語尾を1つの空白で連結した表層を持ち、`tag`が
/// 語幹側、`last_tag`が語尾側のタグになります。単純ノードでは両者は
/// 等しくなります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// 表層形。複合ノードでは`"語幹 語尾"`
    pub surface: String,
    /// ノード全体（複合の場合は語幹側）のタグ
    pub tag: Tag,
    /// 語尾側のタグ。単純ノードでは`tag`と同一
    pub last_tag: Tag,
    /// 開始文字位置
    pub start: usize,
    /// 終了文字位置（排他的）
    pub end: usize,
}

impl Node {
    /// 単純ノードを作成します。
    pub fn simple(surface: String, tag: Tag, start: usize, end: usize) -> Self {
        Self {
            surface,
            tag,
            last_tag: tag,
            start,
            end,
        }
    }

    /// 語幹と語尾からなる複合ノードを作成します。
    pub fn compound(
        stem: &str,
        ending: &str,
        tag: Tag,
        last_tag: Tag,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            surface: format!("{stem} {ending}"),
            tag,
            last_tag,
            start,
            end,
        }
    }

    /// 文頭番兵ノードを作成します。
    pub fn bos() -> Self {
        Self::simple(String::new(), Tag::Bos, 0, 0)
    }

    /// 文末番兵ノードを作成します
    ///
    /// # 引数
    ///
    /// * `len_char` - 文の文字数
    pub fn eos(len_char: usize) -> Self {
        Self::simple(String::new(), Tag::Eos, len_char, len_char + 1)
    }

    /// ノードを構成する形態素部分を返します
    ///
    /// # 戻り値
    ///
    /// `(語幹部分, 語尾部分)`。語尾部分は複合ノードの場合のみ`Some`
    pub fn parts(&self) -> ((&str, Tag), Option<(&str, Tag)>) {
        match self.surface.split_once(' ') {
            Some((stem, ending)) => ((stem, self.tag), Some((ending, self.last_tag))),
            None => ((self.surface.as_str(), self.tag), None),
        }
    }
}

/// 1つの文に対するラティス
///
/// ノードの配置とBOS・EOSのインデックス、および
/// `(from.start, to.end)`で整列済みの辺リストを保持します。
pub(crate) struct Lattice {
    /// すべてのノード（BOS・EOS・合成された未知語ノードを含む）
    pub nodes: Vec<Node>,
    /// ノードインデックス対の辺リスト（整列済み）
    pub edges: Vec<(usize, usize)>,
    /// BOSノードのインデックス
    pub bos: usize,
    /// EOSノードのインデックス
    pub eos: usize,
}

impl Lattice {
    /// 文とモデルからラティスを構築します
    ///
    /// # 引数
    ///
    /// * `sent` - 正規化済みの入力文
    /// * `model` - 確率表を保持するモデル
    /// * `max_word_len` - 辞書引きする部分文字列の最大長
    pub fn build(sent: &Sentence, model: &Model, max_word_len: usize) -> Self {
        let candidates = generate_candidates(sent, model, max_word_len);
        Self::connect(candidates, sent, model)
    }

    /// 候補ノード集合から辺を張ります
    ///
    /// 候補を開始位置ごとに束ね、終了位置が空いているノードには未知語
    /// ノードを合成して次の占有位置まで橋渡しします。隣接ノードへの辺は
    /// `(node.last_tag, adjacent.tag)`が許容遷移集合に含まれる場合のみ
    /// 張られますが、未知語ノードからの辺はこのフィルタを受けません。
    /// BOSは位置0のすべてのノードへ無条件に接続されます。
    ///
    /// # 引数
    ///
    /// * `candidates` - 候補ノード（BOS・EOSは含めない）
    /// * `sent` - 入力文（未知語ノードの表層の切り出しに使用）
    /// * `model` - 許容遷移集合を保持するモデル
    pub fn connect(candidates: Vec<Node>, sent: &Sentence, model: &Model) -> Self {
        let len_char = sent.len_char();
        let bos = 0;
        let mut nodes = Vec::with_capacity(candidates.len() + 2);
        nodes.push(Node::bos());
        nodes.extend(candidates);
        nodes.push(Node::eos(len_char));
        let eos = nodes.len() - 1;

        let mut edges: Vec<(usize, usize)> = vec![];

        if len_char == 0 {
            edges.push((bos, eos));
            return Self {
                nodes,
                edges,
                bos,
                eos,
            };
        }

        // Nodes bucketed by start position. BOS stays out so that the
        // explicit fan-out below is the only way into position 0.
        let mut begins: Vec<Vec<usize>> = vec![vec![]; len_char + 1];
        for (i, node) in nodes.iter().enumerate() {
            if i != bos {
                begins[node.start].push(i);
            }
        }

        // The sentence head may be uncovered.
        if begins[0].is_empty() {
            let end = next_occupied(&begins, 1, len_char);
            nodes.push(Node::simple(sent.surface(0, end), Tag::Unk, 0, end));
            let id = nodes.len() - 1;
            begins[0].push(id);
        }

        // Link every node forward. Unknown nodes synthesized here are
        // appended to the arena and linked in the same sweep.
        let mut idx = 0;
        while idx < nodes.len() {
            if idx == bos || idx == eos {
                idx += 1;
                continue;
            }
            let end = nodes[idx].end;
            let last_tag = nodes[idx].last_tag;
            if begins[end].is_empty() {
                let next = next_occupied(&begins, end + 1, len_char);
                nodes.push(Node::simple(sent.surface(end, next), Tag::Unk, end, next));
                let id = nodes.len() - 1;
                begins[end].push(id);
                edges.push((idx, id));
            } else {
                for &adjacent in &begins[end] {
                    if adjacent == idx {
                        continue;
                    }
                    if last_tag == Tag::Unk || model.is_acceptable(last_tag, nodes[adjacent].tag) {
                        edges.push((idx, adjacent));
                    }
                }
            }
            idx += 1;
        }

        for &id in &begins[0] {
            edges.push((bos, id));
        }

        edges.sort_by_key(|&(from, to)| (nodes[from].start, nodes[to].end));

        Self {
            nodes,
            edges,
            bos,
            eos,
        }
    }
}

/// 次の占有位置を返します。
///
/// `begins[len_char]`には常にEOSが入っているため、`from <= len_char`の
/// 範囲では必ず見つかります。
fn next_occupied(begins: &[Vec<usize>], from: usize, len_char: usize) -> usize {
    (from..=len_char)
        .find(|&p| !begins[p].is_empty())
        .unwrap_or(len_char)
}

/// 文に含まれる候補ノードを列挙します。
///
/// 語節ごとに、すべての開始位置`b`と長さ`r`（`1..=max_word_len`）の
/// 部分文字列を生成確率表で引き、一致するタグごとに単純ノードを
/// 生成します。さらに分割位置ごとに語幹・語尾候補を列挙し、
/// 動詞/語尾、形容詞/語尾、名詞/助詞の対として実在する組を
/// 複合ノードとして生成します。部分文字列全体が既知の名詞である場合、
/// 名詞/助詞の分割は抑制されます。
fn generate_candidates(sent: &Sentence, model: &Model, max_word_len: usize) -> Vec<Node> {
    let mut out = vec![];
    for (offset, chunk) in sent.chunks() {
        for b in 0..chunk.len() {
            let max_r = max_word_len.min(chunk.len() - b);
            for r in 1..=max_r {
                let sub: String = chunk[b..b + r].iter().collect();
                let start = offset + b;
                let end = offset + b + r;

                for tag in Tag::LEXICAL {
                    if model.contains_word(tag, &sub) {
                        out.push(Node::simple(sub.clone(), tag, start, end));
                    }
                }

                let sub_is_noun = model.contains_word(Tag::Noun, &sub);
                for i in 1..=r.min(MAX_STEM_LEN) {
                    if r - i > MAX_ENDING_LEN {
                        continue;
                    }
                    let left: String = chunk[b..b + i].iter().collect();
                    let right: String = chunk[b + i..b + r].iter().collect();
                    for (stem, ending) in lemma::candidates(&left, &right) {
                        if model.contains_word(Tag::Verb, &stem)
                            && model.contains_word(Tag::Eomi, &ending)
                        {
                            out.push(Node::compound(
                                &stem,
                                &ending,
                                Tag::Verb,
                                Tag::Eomi,
                                start,
                                end,
                            ));
                        }
                        if model.contains_word(Tag::Adjective, &stem)
                            && model.contains_word(Tag::Eomi, &ending)
                        {
                            out.push(Node::compound(
                                &stem,
                                &ending,
                                Tag::Adjective,
                                Tag::Eomi,
                                start,
                                end,
                            ));
                        }
                        if !sub_is_noun
                            && model.contains_word(Tag::Noun, &stem)
                            && model.contains_word(Tag::Josa, &ending)
                        {
                            out.push(Node::compound(
                                &stem,
                                &ending,
                                Tag::Noun,
                                Tag::Josa,
                                start,
                                end,
                            ));
                        }
                    }
                }
            }
        }
    }
    out
}

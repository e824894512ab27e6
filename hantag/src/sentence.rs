//! 入力テキストの内部表現を提供するモジュール
//!
//! このモジュールは、解析対象の文を正規化して保持する内部データ構造を
//! 提供します。連続する空白は1つの区切りへ畳み込まれ、文は空白区切りの
//! 語節（eojeol）へ分割されます。文字オフセットは語節をまたいで累積し、
//! 空白自体は位置を消費しません。辞書引きが空白境界を越えないよう、
//! 語節ごとの文字範囲も保持します。

/// 正規化された入力文の内部表現
///
/// # フィールド
///
/// * `chars` - 全語節の文字を連結した配列（空白は含まない）
/// * `chunks` - 各語節が占める`chars`上の範囲`(start, end)`
#[derive(Default, Clone, Debug)]
pub(crate) struct Sentence {
    chars: Vec<char>,
    chunks: Vec<(usize, usize)>,
}

impl Sentence {
    /// 新しい空の`Sentence`インスタンスを生成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 内部状態をクリアします。
    #[inline(always)]
    pub fn clear(&mut self) {
        self.chars.clear();
        self.chunks.clear();
    }

    /// 入力文字列を設定します
    ///
    /// 既存の内部状態をクリアした後、空白を正規化しながら語節単位で
    /// 文字を取り込みます。空白のみの入力は空の文になります。
    ///
    /// # 引数
    ///
    /// * `input` - 設定する入力文字列
    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        for chunk in input.as_ref().split_whitespace() {
            let start = self.chars.len();
            self.chars.extend(chunk.chars());
            self.chunks.push((start, self.chars.len()));
        }
    }

    /// 文字数を返します
    ///
    /// 空白を除いた全語節の文字数です。
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.chars.len()
    }

    /// 文が空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 語節のイテレータを返します
    ///
    /// # 戻り値
    ///
    /// `(先頭オフセット, 文字スライス)`のイテレータ
    pub fn chunks(&self) -> impl Iterator<Item = (usize, &[char])> + '_ {
        self.chunks
            .iter()
            .map(move |&(start, end)| (start, &self.chars[start..end]))
    }

    /// 指定された文字範囲の表層文字列を返します
    ///
    /// # 引数
    ///
    /// * `start` - 開始文字位置
    /// * `end` - 終了文字位置（排他的）
    pub fn surface(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_normalization() {
        let mut sent = Sentence::new();
        sent.set_sentence("  아이오아이는   노래를\t불렀다 ");
        assert_eq!(sent.len_char(), 12);

        let chunks: Vec<(usize, String)> = sent
            .chunks()
            .map(|(start, chars)| (start, chars.iter().collect()))
            .collect();
        assert_eq!(
            chunks,
            vec![
                (0, "아이오아이는".to_string()),
                (6, "노래를".to_string()),
                (9, "불렀다".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty() {
        let mut sent = Sentence::new();
        sent.set_sentence("   ");
        assert!(sent.is_empty());
        assert_eq!(sent.chunks().count(), 0);
    }

    #[test]
    fn test_surface() {
        let mut sent = Sentence::new();
        sent.set_sentence("뭐 타고가");
        assert_eq!(sent.surface(0, 1), "뭐");
        assert_eq!(sent.surface(1, 4), "타고가");
    }
}

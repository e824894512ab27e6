//! 学習コーパスのモジュール
//!
//! このモジュールは、タグ付きコーパスの読み込みに必要なデータ構造を
//! 提供します。コーパスの各行は1文であり、空白区切りの`単語/タグ`
//! トークンの列です。不正なトークンはスキップされ、有効なトークンを
//! 1つも持たない行は空文としてスキップされます。

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::Deref;
use std::path::Path;

use crate::errors::Result;
use crate::tag::Tag;

/// 1文分のタグ付き単語列。
pub type TaggedSentence = Vec<(String, Tag)>;

/// 学習コーパスの表現
///
/// タグ付き文の集合を保持します。
pub struct Corpus {
    pub(crate) sentences: Vec<TaggedSentence>,
}

impl Corpus {
    /// リーダーからコーパスを読み込みます
    ///
    /// 各行は`단어/TAG`形式のトークンを空白で区切った1文です。
    /// `/`を含まないトークン、単語が空のトークン、タグ名が不明な
    /// トークン、番兵タグ（BOS・EOS・Unk）を持つトークンはスキップ
    /// されます。単語自体に`/`を含む場合、最後の`/`がタグ区切りに
    /// なります。
    ///
    /// # 引数
    ///
    /// * `rdr` - コーパスのリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたコーパス
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、I/Oエラーが返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let buf = BufReader::new(rdr);

        let mut sentences = vec![];
        let mut num_skipped = 0usize;
        for line in buf.lines() {
            let line = line?;
            let mut sentence: TaggedSentence = vec![];
            for token in line.split_whitespace() {
                let Some((word, tag)) = token.rsplit_once('/') else {
                    num_skipped += 1;
                    continue;
                };
                match tag.parse::<Tag>() {
                    Ok(tag) if !word.is_empty() && !tag.is_sentinel() => {
                        sentence.push((word.to_string(), tag));
                    }
                    _ => num_skipped += 1,
                }
            }
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
        }
        if num_skipped != 0 {
            log::debug!("Skipped {num_skipped} malformed corpus tokens");
        }

        Ok(Self { sentences })
    }

    /// ファイルパスからコーパスを読み込みます
    ///
    /// # 引数
    ///
    /// * `path` - コーパスファイルのパス
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }
}

impl Deref for Corpus {
    type Target = [TaggedSentence];

    fn deref(&self) -> &Self::Target {
        &self.sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_corpus() {
        let corpus_data = "\
아이오아이/Noun 는/Josa 좋/Adjective 다/Eomi
노래/Noun 를/Josa 듣/Verb 는다/Eomi
";
        let corpus = Corpus::from_reader(corpus_data.as_bytes()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus[0],
            vec![
                ("아이오아이".to_string(), Tag::Noun),
                ("는".to_string(), Tag::Josa),
                ("좋".to_string(), Tag::Adjective),
                ("다".to_string(), Tag::Eomi),
            ],
        );
        assert_eq!(corpus[1].len(), 4);
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        let corpus_data = "\
노래/Noun 껌 /Josa 를/Particle 듣/Verb
껌 bare

있/BOS
";
        let corpus = Corpus::from_reader(corpus_data.as_bytes()).unwrap();

        // Lines with no valid token yield no sentence at all.
        assert_eq!(corpus.len(), 1);
        assert_eq!(
            corpus[0],
            vec![
                ("노래".to_string(), Tag::Noun),
                ("듣".to_string(), Tag::Verb),
            ],
        );
    }

    #[test]
    fn test_slash_in_word() {
        let corpus = Corpus::from_reader("a/b/Noun".as_bytes()).unwrap();
        assert_eq!(corpus[0], vec![("a/b".to_string(), Tag::Noun)]);
    }
}

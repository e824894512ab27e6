//! 品詞タグの定義
//!
//! このモジュールは、タガーが扱う品詞タグの閉じた列挙を提供します。
//! 語彙タグ（名詞、動詞など）に加えて、文頭・文末・未知語を表す
//! 3つの番兵タグを含みます。番兵を文字列リテラルではなく列挙型で
//! 表現することで、タイプミスに起因するバグをコンパイル時に排除します。

use std::fmt;
use std::str::FromStr;

use crate::errors::HantagError;

/// 品詞タグ
///
/// モデルの確率表とラティスノードのキーとして使用される、
/// 固定された有限集合のラベルです。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// 名詞
    Noun,
    /// 代名詞
    Pronoun,
    /// 数詞
    Number,
    /// 動詞
    Verb,
    /// 形容詞
    Adjective,
    /// 副詞
    Adverb,
    /// 冠形詞
    Determiner,
    /// 感嘆詞
    Exclamation,
    /// 助詞
    Josa,
    /// 語尾
    Eomi,
    /// 文頭番兵
    Bos,
    /// 文末番兵
    Eos,
    /// 未知語番兵
    Unk,
}

impl Tag {
    /// 番兵を含むすべてのタグ。
    ///
    /// 反復順序は固定であり、この順序が候補生成の決定性を支えます。
    pub const ALL: [Self; 13] = [
        Self::Noun,
        Self::Pronoun,
        Self::Number,
        Self::Verb,
        Self::Adjective,
        Self::Adverb,
        Self::Determiner,
        Self::Exclamation,
        Self::Josa,
        Self::Eomi,
        Self::Bos,
        Self::Eos,
        Self::Unk,
    ];

    /// 生成確率表に出現し得る語彙タグ。
    pub const LEXICAL: [Self; 10] = [
        Self::Noun,
        Self::Pronoun,
        Self::Number,
        Self::Verb,
        Self::Adjective,
        Self::Adverb,
        Self::Determiner,
        Self::Exclamation,
        Self::Josa,
        Self::Eomi,
    ];

    /// このタグが番兵（BOS・EOS・未知語）かどうかを判定します。
    ///
    /// # 戻り値
    ///
    /// 番兵の場合は`true`
    #[inline(always)]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::Bos | Self::Eos | Self::Unk)
    }

    /// タグの正規化された名前を返します。
    ///
    /// この名前はモデルファイルとコーパスの両方で使用されます。
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "Noun",
            Self::Pronoun => "Pronoun",
            Self::Number => "Number",
            Self::Verb => "Verb",
            Self::Adjective => "Adjective",
            Self::Adverb => "Adverb",
            Self::Determiner => "Determiner",
            Self::Exclamation => "Exclamation",
            Self::Josa => "Josa",
            Self::Eomi => "Eomi",
            Self::Bos => "BOS",
            Self::Eos => "EOS",
            Self::Unk => "Unk",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = HantagError;

    /// タグ名から品詞タグをパースします
    ///
    /// # 引数
    ///
    /// * `s` - [`Tag::as_str`]が返す正規化された名前
    ///
    /// # エラー
    ///
    /// 未知のタグ名の場合、[`HantagError`]が返されます。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Noun" => Ok(Self::Noun),
            "Pronoun" => Ok(Self::Pronoun),
            "Number" => Ok(Self::Number),
            "Verb" => Ok(Self::Verb),
            "Adjective" => Ok(Self::Adjective),
            "Adverb" => Ok(Self::Adverb),
            "Determiner" => Ok(Self::Determiner),
            "Exclamation" => Ok(Self::Exclamation),
            "Josa" => Ok(Self::Josa),
            "Eomi" => Ok(Self::Eomi),
            "BOS" => Ok(Self::Bos),
            "EOS" => Ok(Self::Eos),
            "Unk" => Ok(Self::Unk),
            _ => Err(HantagError::invalid_format(
                "tag",
                format!("unknown tag name: {s}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_names() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!("Particle".parse::<Tag>().is_err());
        assert!("".parse::<Tag>().is_err());
    }

    #[test]
    fn test_sentinels() {
        assert!(Tag::Bos.is_sentinel());
        assert!(Tag::Eos.is_sentinel());
        assert!(Tag::Unk.is_sentinel());
        assert!(!Tag::Noun.is_sentinel());
        assert!(!Tag::Eomi.is_sentinel());
    }
}

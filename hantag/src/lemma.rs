//! 語幹・語尾候補の生成
//!
//! このモジュールは、表層形の分割位置を受け取り、原形の（語幹, 語尾）
//! 候補を列挙する純粋関数を提供します。韓国語の用言は活用時に語幹末尾と
//! 語尾が1つの音節へ縮約されることがあるため（「하 + 였다 → 했다」など）、
//! 表層の分割だけでは辞書引きできない候補を字母レベルの復元で補います。
//!
//! ここで生成されるのはあくまで候補であり、実在するかどうかの判定は
//! 呼び出し側が生成確率表への所属チェックで行います。

use crate::hangul::{
    self, CHO_IEUNG, JONG_B, JONG_L, JONG_M, JONG_N, JONG_NONE, JONG_SS, JUNG_A, JUNG_AE, JUNG_EO,
    JUNG_I, JUNG_O, JUNG_U, JUNG_WA, JUNG_WEO, JUNG_YEO,
};

/// 表層形の分割から（語幹, 語尾）候補を列挙します。
///
/// 以下の書き換え規則を適用します。
///
/// 1. 表層のままの分割（語尾が空でない場合のみ）
/// 2. 終声の分離: 「간」→「가 + ㄴ」、「갔」→「가 + 았/었」
/// 3. 母音の縮約復元: 「했」→「하 + 였」、「왔」→「오 + 았」、
///    「줬」→「주 + 었」、「졌」→「지 + 었」
///
/// # 引数
///
/// * `stem` - 語幹側の表層文字列（空でないこと）
/// * `ending` - 語尾側の表層文字列（空でもよい）
///
/// # 戻り値
///
/// （語幹, 語尾）候補のベクトル。副作用はありません。
pub fn candidates(stem: &str, ending: &str) -> Vec<(String, String)> {
    let mut out = vec![];
    if !ending.is_empty() {
        out.push((stem.to_string(), ending.to_string()));
    }
    let Some(last) = stem.chars().last() else {
        return out;
    };
    let Some((cho, jung, jong)) = hangul::decompose(last) else {
        return out;
    };
    let base = &stem[..stem.len() - last.len_utf8()];

    // Rule 2: the final consonant of the last stem syllable may belong to a
    // contracted ending, e.g. 간 = 가 + ㄴ and 갔 = 가 + 았.
    if jong != JONG_NONE {
        if let Some(open) = hangul::compose(cho, jung, JONG_NONE) {
            if jong == JONG_SS {
                out.push((format!("{base}{open}"), format!("았{ending}")));
                out.push((format!("{base}{open}"), format!("었{ending}")));
            } else if matches!(jong, JONG_N | JONG_L | JONG_M | JONG_B) {
                if let Some(jamo) = hangul::jongseong_to_compat(jong) {
                    out.push((format!("{base}{open}"), format!("{jamo}{ending}")));
                }
            }
        }
    }

    // Rule 3: a contracted vowel may hide the first ending syllable,
    // e.g. 했 = 하 + 였 and 왔 = 오 + 았.
    let recovered = match jung {
        JUNG_AE => Some((JUNG_A, JUNG_YEO)),
        JUNG_WA => Some((JUNG_O, JUNG_A)),
        JUNG_WEO => Some((JUNG_U, JUNG_EO)),
        JUNG_YEO => Some((JUNG_I, JUNG_EO)),
        _ => None,
    };
    if let Some((stem_jung, ending_jung)) = recovered {
        let s = hangul::compose(cho, stem_jung, JONG_NONE);
        let e = hangul::compose(CHO_IEUNG, ending_jung, jong);
        if let (Some(s), Some(e)) = (s, e) {
            out.push((format!("{base}{s}"), format!("{e}{ending}")));
        }
    }

    out
}

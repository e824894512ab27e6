//! ハングル字母処理のユーティリティ
//!
//! 完成型ハングル音節（U+AC00〜U+D7A3）を初声・中声・終声のインデックスへ
//! 分解し、また逆に合成するための算術を提供します。語幹と語尾の縮約形の
//! 復元（[`crate::lemma`]）で使用されます。

/// 完成型ハングルの先頭コードポイント（「가」）。
const SYLLABLE_BASE: u32 = 0xAC00;

/// 中声の数。
const JUNGSEONG_COUNT: u32 = 21;

/// 終声の数（「終声なし」を含む）。
const JONGSEONG_COUNT: u32 = 28;

/// 完成型ハングル音節の総数。
const SYLLABLE_COUNT: u32 = 19 * JUNGSEONG_COUNT * JONGSEONG_COUNT;

/// 初声「ㅇ」のインデックス。
pub(crate) const CHO_IEUNG: u32 = 11;

/// 中声「ㅏ」のインデックス。
pub(crate) const JUNG_A: u32 = 0;
/// 中声「ㅐ」のインデックス。
pub(crate) const JUNG_AE: u32 = 1;
/// 中声「ㅓ」のインデックス。
pub(crate) const JUNG_EO: u32 = 4;
/// 中声「ㅕ」のインデックス。
pub(crate) const JUNG_YEO: u32 = 6;
/// 中声「ㅗ」のインデックス。
pub(crate) const JUNG_O: u32 = 8;
/// 中声「ㅘ」のインデックス。
pub(crate) const JUNG_WA: u32 = 9;
/// 中声「ㅜ」のインデックス。
pub(crate) const JUNG_U: u32 = 13;
/// 中声「ㅝ」のインデックス。
pub(crate) const JUNG_WEO: u32 = 14;
/// 中声「ㅣ」のインデックス。
pub(crate) const JUNG_I: u32 = 20;

/// 終声なしのインデックス。
pub(crate) const JONG_NONE: u32 = 0;
/// 終声「ㄴ」のインデックス。
pub(crate) const JONG_N: u32 = 4;
/// 終声「ㄹ」のインデックス。
pub(crate) const JONG_L: u32 = 8;
/// 終声「ㅁ」のインデックス。
pub(crate) const JONG_M: u32 = 16;
/// 終声「ㅂ」のインデックス。
pub(crate) const JONG_B: u32 = 17;
/// 終声「ㅆ」のインデックス。
pub(crate) const JONG_SS: u32 = 20;

/// 終声インデックスから互換字母への対応表。
///
/// インデックス0（終声なし）には対応する字母が存在しません。
const JONGSEONG_COMPAT: [char; 28] = [
    '\0', 'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ',
    'ㅀ', 'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// 完成型ハングル音節を字母インデックスの三つ組に分解します。
///
/// # 引数
///
/// * `c` - 分解対象の文字
///
/// # 戻り値
///
/// 完成型音節の場合は`Some((初声, 中声, 終声))`、それ以外の文字は`None`
pub(crate) fn decompose(c: char) -> Option<(u32, u32, u32)> {
    let offset = (c as u32).checked_sub(SYLLABLE_BASE)?;
    if offset >= SYLLABLE_COUNT {
        return None;
    }
    let cho = offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
    let jung = (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT;
    let jong = offset % JONGSEONG_COUNT;
    Some((cho, jung, jong))
}

/// 字母インデックスの三つ組から完成型ハングル音節を合成します。
///
/// # 引数
///
/// * `cho` - 初声インデックス（`0..19`）
/// * `jung` - 中声インデックス（`0..21`）
/// * `jong` - 終声インデックス（`0..28`、0は終声なし）
///
/// # 戻り値
///
/// インデックスが範囲内の場合は合成された音節、それ以外は`None`
pub(crate) fn compose(cho: u32, jung: u32, jong: u32) -> Option<char> {
    if cho >= 19 || jung >= JUNGSEONG_COUNT || jong >= JONGSEONG_COUNT {
        return None;
    }
    char::from_u32(SYLLABLE_BASE + (cho * JUNGSEONG_COUNT + jung) * JONGSEONG_COUNT + jong)
}

/// 終声インデックスを単独の互換字母として返します。
///
/// 「간」を「가 + ㄴ」へ分離する際に、語尾側の表記として使用されます。
///
/// # 引数
///
/// * `jong` - 終声インデックス（`1..28`）
///
/// # 戻り値
///
/// 対応する互換字母、終声なし・範囲外の場合は`None`
pub(crate) fn jongseong_to_compat(jong: u32) -> Option<char> {
    if jong == JONG_NONE || jong >= JONGSEONG_COUNT {
        return None;
    }
    Some(JONGSEONG_COMPAT[jong as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose() {
        assert_eq!(decompose('가'), Some((0, JUNG_A, JONG_NONE)));
        assert_eq!(decompose('갔'), Some((0, JUNG_A, JONG_SS)));
        assert_eq!(decompose('했'), Some((18, JUNG_AE, JONG_SS)));
        assert_eq!(decompose('힣'), Some((18, 20, 27)));
        assert_eq!(decompose('a'), None);
        assert_eq!(decompose('ㅏ'), None);
    }

    #[test]
    fn test_compose() {
        assert_eq!(compose(0, JUNG_A, JONG_NONE), Some('가'));
        assert_eq!(compose(18, JUNG_A, JONG_NONE), Some('하'));
        assert_eq!(compose(CHO_IEUNG, JUNG_YEO, JONG_SS), Some('였'));
        assert_eq!(compose(19, 0, 0), None);
    }

    #[test]
    fn test_roundtrip() {
        for c in ['가', '힣', '뭐', '불', '았'] {
            let (cho, jung, jong) = decompose(c).unwrap();
            assert_eq!(compose(cho, jung, jong), Some(c));
        }
    }

    #[test]
    fn test_jongseong_to_compat() {
        assert_eq!(jongseong_to_compat(JONG_N), Some('ㄴ'));
        assert_eq!(jongseong_to_compat(JONG_SS), Some('ㅆ'));
        assert_eq!(jongseong_to_compat(JONG_NONE), None);
    }
}

//! 品詞タグ付けを実行するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ各行を品詞タグ付けし、
//! 指定された出力形式（pair、morph、detail）で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use hantag::{Model, Tagger};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Pair,
    Morph,
    Detail,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"pair"、"morph"、"detail"のいずれか）
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `OutputMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "pair" => Ok(Self::Pair),
            "morph" => Ok(Self::Morph),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "tag", about = "Predicts part-of-speech tags")]
struct Args {
    /// Model JSON produced by the train command.
    #[clap(short = 'i', long)]
    model: PathBuf,

    /// Output mode. Choices are pair, morph, and detail.
    #[clap(short = 'O', long, default_value = "pair")]
    output_mode: OutputMode,

    /// Maximum length of dictionary lookups in characters.
    #[clap(short = 'M', long)]
    max_word_len: Option<usize>,

    /// Cost divisor favoring noun segmentations.
    #[clap(long)]
    noun_preference: Option<f64>,

    /// Cost multiplier discouraging single-syllable nouns.
    #[clap(long)]
    single_syllable_penalty: Option<f64>,
}

/// メイン関数
///
/// モデルをロードし、標準入力から読み込んだ各行をタグ付けして、
/// 指定された形式で結果を標準出力に出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the model...");
    let model = Model::from_path(&args.model)?;

    let mut tagger = Tagger::new(model);
    if let Some(max_word_len) = args.max_word_len {
        tagger = tagger.max_word_len(max_word_len);
    }
    if let Some(factor) = args.noun_preference {
        tagger = tagger.noun_preference(factor)?;
    }
    if let Some(factor) = args.single_syllable_penalty {
        tagger = tagger.single_syllable_penalty(factor)?;
    }

    eprintln!("Ready to tag");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        let morphs = tagger.tag(&line)?;
        match args.output_mode {
            OutputMode::Pair => {
                for (i, (surface, tag)) in morphs.iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    write!(&mut out, "{surface}/{tag}")?;
                }
                out.write_all(b"\n")?;
                if is_tty {
                    out.flush()?;
                }
            }
            OutputMode::Morph => {
                for (i, (surface, _)) in morphs.iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(surface.as_bytes())?;
                }
                out.write_all(b"\n")?;
                if is_tty {
                    out.flush()?;
                }
            }
            OutputMode::Detail => {
                for (surface, tag) in &morphs {
                    writeln!(&mut out, "{surface}\t{tag}")?;
                }
                out.write_all(b"EOS\n")?;
                if is_tty {
                    out.flush()?;
                }
            }
        }
    }

    Ok(())
}

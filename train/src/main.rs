//! モデル学習を実行するユーティリティ
//!
//! このバイナリは、`단어/TAG`形式のタグ付きコーパスからHMMモデルを
//! 学習し、モデルJSONとして書き出します。

use std::error::Error;
use std::path::PathBuf;

use hantag::{Corpus, CorpusTrainer};

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "train", about = "Trains an HMM part-of-speech model")]
struct Args {
    /// Training corpus of whitespace-separated word/TAG tokens.
    #[clap(short = 'c', long)]
    corpus: PathBuf,

    /// Output path of the model JSON.
    #[clap(short = 'o', long)]
    model_out: PathBuf,

    /// Minimum count to keep a word.
    #[clap(long, default_value = "1")]
    min_word_count: u32,

    /// Minimum remaining word mass to keep a tag.
    #[clap(long, default_value = "5")]
    min_tag_count: u32,
}

/// メイン関数
///
/// コーパスを読み込み、モデルを学習して指定されたパスへ書き出します。
///
/// # 戻り値
///
/// 実行が成功した場合は`Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the corpus...");
    let corpus = Corpus::from_path(&args.corpus)?;
    if corpus.is_empty() {
        eprintln!("Warning: the corpus has no valid sentence");
    }

    eprintln!("Training on {} sentences...", corpus.len());
    let model = CorpusTrainer::new()
        .min_word_count(args.min_word_count)
        .min_tag_count(args.min_tag_count)
        .train(&corpus);

    model.write_to_path(&args.model_out)?;
    eprintln!(
        "Wrote a model with {} words to {:?}",
        model.num_words(),
        args.model_out
    );

    Ok(())
}

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    env,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use mecab_vocab::{
    filter::{filter_nouns, headword, NounFilter},
    level::LevelTable,
    mecab::{MorphemeParser, MorphemeRecord},
    quiz::{
        bucket_by_level, render_gift, AnswerField, LevelKey, QuizGenerator, DEFAULT_DISTRACTORS,
    },
    utility::text::{read_input, DEFAULT_ENCODING},
    wordlist::{build_wordlist, read_wordlist_csv, write_wordlist_csv},
};

// これより長い入力ファイルには進捗を表示する
const PROGRESS_THRESHOLD: usize = 10_000;

const USAGE: &str = "Usage: mecab-vocab <parse|nouns|wordlist|quiz> [options] [INPUT] [OUTPUT]";

enum Command {
    Parse,
    Nouns,
    Wordlist,
    Quiz,
}

impl Command {
    fn of(name: &str) -> Result<Self> {
        match name {
            "parse" => Ok(Self::Parse),
            "nouns" => Ok(Self::Nouns),
            "wordlist" => Ok(Self::Wordlist),
            "quiz" => Ok(Self::Quiz),
            name => bail!("Unknown command: {}\n{}", name, USAGE),
        }
    }
}

#[derive(Clone, Copy)]
enum Format {
    Line,
    Yaml,
    Json,
    Word,
}

impl Format {
    fn of(name: &str) -> Result<Self> {
        match name {
            "line" => Ok(Self::Line),
            "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "word" => Ok(Self::Word),
            name => bail!("Unknown format: {}", name),
        }
    }
}

struct Args {
    command: Command,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    levels_path: Option<PathBuf>,
    encoding: String,
    verbose: bool,
    format: Format,
    unique: bool,
    distractors: usize,
    answer: AnswerField,
    seed: Option<u64>,
    output_dir: Option<PathBuf>,
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optopt("l", "levels", "word,level CSV used for level tagging", "PATH");
    opts.optopt("e", "encoding", "input encoding (utf-8, shift_jis, euc-jp)", "NAME");
    opts.optflag("v", "verbose", "print info logs");
    opts.optflag("h", "help", "print this help");
    opts.optopt("f", "format", "parse/nouns output: line, yaml, json, word", "FORMAT");
    opts.optflag("u", "unique", "nouns: keep the first record per headword");
    opts.optopt("n", "distractors", "quiz: wrong answers per question", "N");
    opts.optopt("a", "answer", "quiz: meaning or reading", "FIELD");
    opts.optopt("s", "seed", "quiz: random seed", "N");
    opts.optopt("o", "output-dir", "quiz: write one .gift file per level", "DIR");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("help") {
        print!("{}", opts.usage(USAGE));
        return Ok(None);
    }

    let command = matches.free.get(0).context(USAGE)?;
    let command = Command::of(command)?;

    let input_path = matches.free.get(1).map(PathBuf::from);
    let output_path = matches.free.get(2).map(PathBuf::from);

    let format = match matches.opt_str("format") {
        Some(format) => Format::of(&format)?,
        None => Format::Line,
    };

    let distractors = match matches.opt_str("distractors") {
        Some(n) => n
            .parse()
            .with_context(|| format!("Invalid --distractors: {}", n))?,
        None => DEFAULT_DISTRACTORS,
    };

    let answer = match matches.opt_str("answer") {
        Some(answer) => AnswerField::of(&answer)?,
        None => AnswerField::Meaning,
    };

    let seed = match matches.opt_str("seed") {
        Some(seed) => Some(
            seed.parse()
                .with_context(|| format!("Invalid --seed: {}", seed))?,
        ),
        None => None,
    };

    Ok(Some(Args {
        command,
        input_path,
        output_path,
        levels_path: matches.opt_str("levels").map(PathBuf::from),
        encoding: matches
            .opt_str("encoding")
            .unwrap_or_else(|| DEFAULT_ENCODING.to_owned()),
        verbose: matches.opt_present("verbose"),
        format,
        unique: matches.opt_present("unique"),
        distractors,
        answer,
        seed,
        output_dir: matches.opt_str("output-dir").map(PathBuf::from),
    }))
}

// 出力先
enum BuildOut {
    Stdout,
    File { path: PathBuf },
    Directory { root: PathBuf },
}

impl BuildOut {
    fn init_directory(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create output directory: {}", root.display()))?;

        Ok(Self::Directory {
            root: root.to_path_buf(),
        })
    }

    fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            BuildOut::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
            BuildOut::File { path } => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            BuildOut::Directory { root } => bail!("Cannot stream into {}", root.display()),
        }
    }

    fn save_gift(&self, level: &LevelKey, gift: &str) -> Result<()> {
        let BuildOut::Directory { root } = self else {
            bail!("Output directory is not set");
        };

        let path = root.join(format!("level_{}.gift", level));
        fs::write(&path, gift).with_context(|| format!("Failed to write {}", path.display()))
    }
}

fn main() -> Result<()> {
    let Some(args) = get_args()? else {
        return Ok(());
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "info" } else { "warn" }),
    )
    .init();

    let out = match (&args.output_dir, &args.output_path) {
        (Some(root), _) => BuildOut::init_directory(root)?,
        (None, Some(path)) => BuildOut::File { path: path.clone() },
        (None, None) => BuildOut::Stdout,
    };

    match args.command {
        Command::Parse | Command::Nouns => run_records(&args, &out),
        Command::Wordlist => run_wordlist(&args, &out),
        Command::Quiz => run_quiz(&args, &out),
    }
}

fn run_records(args: &Args, out: &BuildOut) -> Result<()> {
    let text = read_input(args.input_path.as_deref(), &args.encoding)?;
    // --levels が無ければ既定の表 (無ければ空)
    let loaded;
    let levels = match &args.levels_path {
        Some(path) => {
            loaded = LevelTable::try_load(path)?;
            &loaded
        }
        None => LevelTable::global(),
    };
    let parser = MorphemeParser::with_levels(levels);

    let lines: Vec<&str> = text.lines().collect();

    let records: Vec<MorphemeRecord> = if let Command::Nouns = args.command {
        let filter = NounFilter {
            unique: args.unique,
            ..NounFilter::default()
        };
        filter_nouns(with_progress(args, &lines), &parser, &filter)
    } else {
        with_progress(args, &lines)
            .filter_map(|line| parser.parse(line))
            .collect()
    };

    let mut writer = out.writer()?;
    match args.format {
        Format::Line => {
            for record in &records {
                writeln!(writer, "{}", record)?;
            }
        }
        Format::Yaml => {
            let yaml = serde_yaml::to_string(&records).context("Failed to encode YAML")?;
            write!(writer, "{}", yaml)?;
        }
        Format::Json => {
            for record in &records {
                writeln!(writer, "{}", record.to_json()?)?;
            }
        }
        Format::Word => {
            for word in records.iter().filter_map(headword) {
                writeln!(writer, "{}", word)?;
            }
        }
    }
    writer.flush()?;

    Ok(())
}

fn run_wordlist(args: &Args, out: &BuildOut) -> Result<()> {
    let tsv = read_input(args.input_path.as_deref(), &args.encoding)?;
    let entries = build_wordlist(&tsv).context("Failed to build word list")?;
    log::info!("{} words", entries.len());

    write_wordlist_csv(&entries, out.writer()?)
}

fn run_quiz(args: &Args, out: &BuildOut) -> Result<()> {
    let input_path = args
        .input_path
        .as_deref()
        .context("quiz requires a word list CSV")?;

    let csv = read_input(Some(input_path), &args.encoding)?;
    let entries = read_wordlist_csv(csv.as_bytes())
        .with_context(|| format!("Failed to read word list: {}", input_path.display()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator = QuizGenerator {
        distractors: args.distractors,
        answer: args.answer,
    };

    // ディレクトリ指定が無ければ全レベルを 1 つにまとめる
    let mut stream = match out {
        BuildOut::Directory { .. } => None,
        _ => Some(out.writer()?),
    };

    for (level, words) in bucket_by_level(entries) {
        let items = generator.generate(&words, &mut rng);
        if items.is_empty() {
            log::warn!("No questions for level {}", level);
            continue;
        }

        let gift = render_gift(&level, &items);
        match &mut stream {
            Some(writer) => {
                writeln!(writer, "// level {}", level)?;
                writeln!(writer, "{}", gift)?;
            }
            None => out.save_gift(&level, &gift)?,
        }
    }

    if let Some(mut writer) = stream {
        writer.flush()?;
    }

    Ok(())
}

fn with_progress<'a>(args: &Args, lines: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    let pb = if args.input_path.is_some() && lines.len() > PROGRESS_THRESHOLD {
        create_progress_bar(lines.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    lines.iter().copied().progress_with(pb)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap()
        .progress_chars("#-"),
    );
    pb
}

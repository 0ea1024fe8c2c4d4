//! USFM import, extraction and guarded saving from the command line.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use usfm_guard::prelude::*;

#[derive(Parser)]
#[command(name = "usfm-guard")]
#[command(about = "USFM import, verse extraction and guarded saving")]
#[command(version)]
struct Cli {
    /// Debug logging by default (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split USFM files into books and chapters
    Import {
        /// USFM files to import
        #[arg(long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Stylesheet the markers are looked up in
        #[arg(long, default_value = DEFAULT_STYLESHEET)]
        stylesheet: String,

        /// Write the chapters as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write a CSV overview (derived from the output path)
        #[arg(long)]
        csv: bool,

        /// Store the chapters in this SQLite database
        #[arg(long, requires = "bible")]
        db: Option<PathBuf>,

        /// Bible name to store the chapters under
        #[arg(long)]
        bible: Option<String>,

        /// Print this many chapters after the summary
        #[arg(long)]
        show_chapters: Option<usize>,

        /// Suppress progress and the summary
        #[arg(long)]
        quiet: bool,
    },

    /// Print the chapter and verse numbers of a USFM file as JSON
    Verses {
        #[arg(long)]
        input: PathBuf,
    },

    /// Print one chapter of a USFM file
    Chapter {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        chapter: u32,
    },

    /// Print one verse of a chapter
    Verse {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        verse: u32,

        /// Take the verse the way the visual editor sees it
        #[arg(long)]
        quill: bool,
    },

    /// Print a range of verses of a chapter
    Range {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        from: u32,

        #[arg(long)]
        to: u32,

        /// USFM fragment to leave out of the range
        #[arg(long, default_value = "")]
        exclude: String,

        #[arg(long)]
        quill: bool,
    },

    /// Save a chapter through the safety gate
    StoreChapter {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Save one verse into its chapter through the safety gate
    StoreVerse {
        #[command(flatten)]
        store: StoreArgs,

        #[arg(long)]
        verse: u32,

        /// Compare against the verse the way the visual editor sees it
        #[arg(long)]
        quill: bool,
    },

    /// Print USFM without word level attributes and list its figures
    Strip {
        #[arg(long)]
        input: PathBuf,
    },
}

/// Arguments shared by the guarded store commands.
#[derive(Args)]
struct StoreArgs {
    /// Path to the SQLite database
    #[arg(long)]
    db: PathBuf,

    #[arg(long)]
    bible: String,

    /// Book number or USFM code, like 40 or MAT
    #[arg(long)]
    book: String,

    #[arg(long)]
    chapter: u32,

    /// File with the USFM to save
    #[arg(long)]
    input: PathBuf,

    /// User whose settings apply and who is named in the change journal
    #[arg(long, default_value = "admin")]
    user: String,

    // Overrides of the user's stored settings, in percent

    /// Allowed difference for chapter saves [default: 20]
    #[arg(long)]
    allowed_difference_chapter: Option<u32>,

    /// Allowed difference for verse saves [default: 75]
    #[arg(long)]
    allowed_difference_verse: Option<u32>,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Import {
            input,
            stylesheet,
            output,
            csv,
            db,
            bible,
            show_chapters,
            quiet,
        } => {
            let result = import_files(&input, &stylesheet, quiet)?;

            if let Some(output) = &output {
                write_json_file(&result, output)?;
                if csv {
                    let csv_path = output.with_extension("csv");
                    let chapters: Vec<BookChapterData> = result
                        .files
                        .iter()
                        .flat_map(|file| file.chapters.iter().cloned())
                        .collect();
                    write_csv_file(&chapters, &csv_path)?;
                    if !quiet {
                        eprintln!("CSV output: {}", csv_path.display());
                    }
                }
            }

            if let Some(db) = db {
                let bible_name = bible.ok_or("--bible is required with --db")?;
                let store = SqliteBible::open(&db)?;
                let mut stored = 0;
                for file in &result.files {
                    stored += store.store_import(&bible_name, &file.chapters)?;
                }
                info!("Stored {} chapters in {}", stored, db.display());
            }

            if !quiet {
                print_summary(&result);
                if let Some(output) = &output {
                    eprintln!("\nOutput: {}", output.display());
                }
            }

            if let Some(limit) = show_chapters {
                println!("\n=== Chapters ===");
                let chapters: Vec<BookChapterData> = result
                    .files
                    .into_iter()
                    .flat_map(|file| file.chapters)
                    .collect();
                print_chapters(&chapters, Some(limit));
            }
        }

        Commands::Verses { input } => {
            let usfm = read_usfm(&input)?;
            let report = NumberReport {
                chapters: get_chapter_numbers(&usfm),
                verses: get_verse_numbers(&usfm),
            };
            write_json(&report, &mut std::io::stdout().lock())?;
        }

        Commands::Chapter { input, chapter } => {
            let usfm = read_usfm(&input)?;
            println!("{}", get_chapter_text(&usfm, chapter));
        }

        Commands::Verse {
            input,
            verse,
            quill,
        } => {
            let usfm = read_usfm(&input)?;
            let text = if quill {
                get_verse_text_quill(&usfm, verse)
            } else {
                get_verse_text(&usfm, verse)
            };
            println!("{}", text);
        }

        Commands::Range {
            input,
            from,
            to,
            exclude,
            quill,
        } => {
            let usfm = read_usfm(&input)?;
            println!("{}", get_verse_range_text(&usfm, from, to, &exclude, quill));
        }

        Commands::StoreChapter { store } => {
            return store_guarded(&store, None, false);
        }

        Commands::StoreVerse {
            store,
            verse,
            quill,
        } => {
            return store_guarded(&store, Some(verse), quill);
        }

        Commands::Strip { input } => {
            let usfm = read_usfm(&input)?;
            let (usfm, figures) = extract_figs(&usfm);
            println!("{}", remove_word_level_attributes(&usfm));
            for figure in &figures {
                eprintln!(
                    "Figure: {} [src={} size={} ref={}]",
                    figure.caption, figure.src, figure.size, figure.reference
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_usfm(path: &Path) -> Result<String, Box<dyn Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e).into())
}

/// Import all files in parallel, keeping their order.
fn import_files(
    input: &[PathBuf],
    stylesheet: &str,
    quiet: bool,
) -> Result<ImportResult, Box<dyn Error>> {
    let styles = StandardStylesheet::new();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(input.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    };

    let files = input
        .par_iter()
        .map(|path| -> Result<ImportedFile, String> {
            let usfm = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
            let chapters = usfm_import(&usfm, stylesheet, &styles, &StandardBooks);
            info!("{}: {} chapters", path.display(), chapters.len());
            progress.inc(1);
            Ok(ImportedFile {
                path: path.display().to_string(),
                chapters,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    progress.finish_and_clear();

    Ok(ImportResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        stylesheet: stylesheet.to_string(),
        summary: ImportSummary::from_files(&files),
        files,
    })
}

/// Book number from a number or a USFM book code.
fn resolve_book(book: &str) -> Result<u32, Box<dyn Error>> {
    let id = match book.parse::<u32>() {
        Ok(id) => id,
        Err(_) => StandardBooks.book_id(book),
    };
    if id == 0 {
        return Err(format!("Unknown book: {}", book).into());
    }
    Ok(id)
}

/// Run a chapter save, or a verse save when `verse` is given, and report
/// the verdict. Exits with 1 on rejection.
fn store_guarded(
    args: &StoreArgs,
    verse: Option<u32>,
    quill: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let book = resolve_book(&args.book)?;
    let usfm = read_usfm(&args.input)?;
    let bible = SqliteBible::open(&args.db)?;

    // Command line values overlay the user's stored settings
    let stored = bible.safety_params(&args.user)?;
    let settings = FixedSettings(SafetyParams {
        allowed_difference_chapter: args
            .allowed_difference_chapter
            .unwrap_or(stored.allowed_difference_chapter),
        allowed_difference_verse: args
            .allowed_difference_verse
            .unwrap_or(stored.allowed_difference_verse),
        ..stored
    });
    let ctx = SafetyContext::new(&bible, &bible, &bible, &settings, &args.user);

    let verdict = match verse {
        Some(verse) => {
            safely_store_verse(&ctx, &args.bible, book, args.chapter, verse, &usfm, quill)?
        }
        None => safely_store_chapter(&ctx, &args.bible, book, args.chapter, &usfm)?,
    };

    let rejected = verdict.is_rejected();
    print_store_report(&StoreReport {
        bible: args.bible.clone(),
        book,
        chapter: args.chapter,
        verse,
        verdict,
    })?;

    Ok(if rejected {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

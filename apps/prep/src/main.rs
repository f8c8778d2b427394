use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prep::api_client::{ApiClient, FileUpload, InterviewApi};
use prep::config::Config;
use prep::errors::ClientError;
use prep::pages::{ExplainerPage, JobAnalysisPage, PracticePage, ProgressPage, QuestionListPage};
use prep::render;
use prep::store::AppStore;

#[derive(Parser)]
#[command(name = "prep")]
#[command(about = "Interview preparation client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a job description and list matching questions
    Analyze(AnalyzeArgs),
    /// Browse the question bank
    Questions {
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive filter on question text or category
        #[arg(short, long)]
        search: Option<String>,
        /// Pages of 20 to show
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// List question categories
    Categories,
    /// Show a single question
    Question { id: String },
    /// Explain a technical term
    Explain {
        term: String,
        /// Surrounding context to tailor the explanation
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Show the backend's recorded progress
    Progress {
        /// Clear the backend's history instead
        #[arg(long)]
        reset: bool,
    },
    /// Check that the backend is reachable
    Health,
    /// Interactive practice session
    Practice {
        #[arg(short, long)]
        category: Option<String>,
        /// Practice the questions matched to this job description
        #[arg(long, conflicts_with = "category")]
        jd_file: Option<PathBuf>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct AnalyzeArgs {
    /// Job description text
    #[arg(long)]
    text: Option<String>,
    /// PDF, DOC, DOCX or TXT file
    #[arg(long)]
    file: Option<PathBuf>,
    /// Job posting URL
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(config.api_url.clone());
    info!("Using backend at {}", api.base_url());
    let mut store = AppStore::new();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&api, &mut store, args).await?,
        Commands::Questions {
            category,
            search,
            pages,
        } => run_questions(&api, &mut store, category.as_deref(), search, pages).await?,
        Commands::Categories => {
            for category in api.get_categories().await?.categories {
                println!("{category}");
            }
        }
        Commands::Question { id } => {
            let question = api.get_question(&id).await.map_err(describe)?;
            println!("{}", render::question_detail(&question));
        }
        Commands::Explain { term, context } => {
            let mut page = ExplainerPage::new();
            page.set_term(term);
            let result = page.explain(&api, context.as_deref()).await;
            surface(result, &page.state.error)?;
            if let Some(explanation) = &page.state.result {
                print!("{}", render::explanation(explanation));
            }
        }
        Commands::Progress { reset } => run_progress(&api, &mut store, reset).await?,
        Commands::Health => {
            let health = api.health().await.map_err(describe)?;
            println!("{} ({})", health.status, api.base_url());
        }
        Commands::Practice { category, jd_file } => {
            run_practice(&api, &mut store, category.as_deref(), jd_file).await?
        }
    }

    Ok(())
}

/// Turns a page failure into the message the page left behind.
fn surface(result: Result<(), ClientError>, message: &Option<String>) -> Result<()> {
    result.map_err(|e| anyhow!(message.clone().unwrap_or_else(|| e.to_string())))
}

fn describe(e: ClientError) -> anyhow::Error {
    anyhow!(e.user_message(&e.to_string()))
}

async fn run_analyze(
    api: &dyn InterviewApi,
    store: &mut AppStore,
    args: AnalyzeArgs,
) -> Result<()> {
    let mut page = JobAnalysisPage::new();
    let result = if let Some(text) = args.text {
        page.analyze_text(api, store, &text).await
    } else if let Some(path) = args.file {
        let upload = FileUpload::from_path(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        page.analyze_file(api, store, upload).await
    } else if let Some(url) = args.url {
        page.analyze_url(api, store, &url).await
    } else {
        return Err(anyhow!("Provide --text, --file or --url"));
    };
    surface(result, &page.error)?;

    if let Some(analysis) = page.analysis(store) {
        print!("{}", render::job_analysis(analysis));
    }
    Ok(())
}

async fn run_questions(
    api: &dyn InterviewApi,
    store: &mut AppStore,
    category: Option<&str>,
    search: Option<String>,
    pages: usize,
) -> Result<()> {
    let mut page = QuestionListPage::new();
    let result = page.select_category(api, store, category).await;
    surface(result, &page.error)?;
    if let Some(term) = search {
        page.set_search_term(term);
    }
    for _ in 1..pages {
        page.load_more();
    }

    let displayed = page.displayed();
    if displayed.is_empty() {
        println!("{}", page.error.as_deref().unwrap_or("No matching questions"));
        return Ok(());
    }
    for question in &displayed {
        println!("{}", render::question_line(question));
    }
    if page.has_more() {
        println!(
            "… {} of {} shown, use --pages to see more",
            displayed.len(),
            page.filtered().len()
        );
    }
    Ok(())
}

async fn run_progress(api: &dyn InterviewApi, store: &mut AppStore, reset: bool) -> Result<()> {
    let mut page = ProgressPage::new();
    if reset {
        let result = page.reset_server_progress(api, store).await;
        let message =
            result.map_err(|e| anyhow!(page.error.clone().unwrap_or_else(|| e.to_string())))?;
        println!("{}", message.message);
        return Ok(());
    }

    let result = page.load_server_progress(api, store).await;
    surface(result, &page.error)?;
    if let Some(progress) = &page.server {
        print!("{}", render::server_progress(progress));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Interactive practice
// ────────────────────────────────────────────────────────────────────────────

const PRACTICE_HELP: &str = "\
Commands:
  answer [TEXT]   set your answer (without TEXT, type lines and finish with '.')
  model           show a model answer
  evaluate        submit your answer for scoring
  next / prev     move through the queue
  stats           local progress for this session
  quit            end the session";

async fn run_practice(
    api: &dyn InterviewApi,
    store: &mut AppStore,
    category: Option<&str>,
    jd_file: Option<PathBuf>,
) -> Result<()> {
    let mut practice = PracticePage::new();

    let queued = if let Some(path) = jd_file {
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut analysis = JobAnalysisPage::new();
        let result = analysis.analyze_text(api, store, &text).await;
        surface(result, &analysis.error)?;
        practice.use_matched_questions(store)
    } else {
        practice
            .load_queue(api, store, category)
            .await
            .map_err(|e| anyhow!(practice.error.clone().unwrap_or_else(|| e.to_string())))?
    };
    if queued == 0 {
        println!("No questions to practice.");
        return Ok(());
    }

    println!("{PRACTICE_HELP}\n");
    show_current(&practice, store);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (command, rest) = match line.trim().split_once(' ') {
            Some((command, rest)) => (command.to_string(), rest.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        match command.as_str() {
            "" => {}
            "answer" => {
                let answer = if rest.is_empty() {
                    read_block(&mut lines).await?
                } else {
                    rest
                };
                practice.set_answer(store, answer);
            }
            "model" => {
                if practice.generate_answer(api, store).await.is_ok() {
                    if let Some(answer) = store.model_answer() {
                        println!("{}", render::model_answer(answer, practice.formatted));
                    }
                }
            }
            "evaluate" => {
                if practice.evaluate(api, store).await.is_ok() {
                    if let Some(evaluation) = store.evaluation() {
                        println!("{}", render::evaluation(evaluation));
                    }
                }
            }
            "next" => {
                if practice.next(store) {
                    show_current(&practice, store);
                } else {
                    println!("Already at the last question.");
                }
            }
            "prev" => {
                if practice.previous(store) {
                    show_current(&practice, store);
                } else {
                    println!("Already at the first question.");
                }
            }
            "stats" => {
                let summary = ProgressPage::new().summary(store);
                print!("{}", render::progress_summary(&summary));
            }
            "quit" | "exit" => break,
            _ => println!("{PRACTICE_HELP}"),
        }

        if let Some(message) = practice.error.take() {
            println!("! {message}");
        }
    }

    println!("\nSession summary\n");
    print!("{}", render::progress_summary(&ProgressPage::new().summary(store)));
    Ok(())
}

fn show_current(practice: &PracticePage, store: &AppStore) {
    let current = (practice.position(), store.current_question());
    if let (Some((position, total)), Some(question)) = current {
        println!("\nQuestion {position}/{total}");
        println!("{}\n", render::question_detail(question));
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

/// Reads lines until a lone `.` or end of input.
async fn read_block(lines: &mut Lines<BufReader<Stdin>>) -> Result<String> {
    let mut block = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            break;
        }
        block.push(line);
    }
    Ok(block.join("\n"))
}

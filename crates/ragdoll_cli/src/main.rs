use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ragdoll_ai::embed::ollama_embed::OllamaEmbedder;
use ragdoll_ai::ingest::ingest_text;
use ragdoll_ai::llm::ollama_chat::OllamaChat;
use ragdoll_ai::ollama::OllamaClient;
use ragdoll_ai::pipeline::Pipeline;
use ragdoll_ai::rag::AnswerEngine;
use ragdoll_ai::vector::QdrantStore;
use ragdoll_core::config::Config;
use ragdoll_core::document::{PageSource, TextFilePages};
use ragdoll_core::error::AppError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("ingest") => run_ingest(args.get(1).map(String::as_str)),
        Some("ask") => match args.get(1) {
            Some(question) => run_ask(question, args.get(2).map(String::as_str)),
            None => {
                print_usage();
                return ExitCode::FAILURE;
            }
        },
        Some("eval") => run_eval(args.get(1).map(String::as_str)),
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(details) = e.details {
                eprintln!("  {details}");
            }
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: ragdoll <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  ingest [config.toml]           rebuild the vector collection from the source document");
    eprintln!("  ask <question> [config.toml]   answer one question from the indexed corpus");
    eprintln!("  eval [config.toml]             interactive evaluation pipeline menu");
}

fn load_config(path: Option<&str>) -> Result<Config, AppError> {
    match path {
        Some(p) => Config::load(Path::new(p)),
        None => {
            let cfg = Config::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}

struct Backends {
    embedder: OllamaEmbedder,
    chat: OllamaChat,
    store: QdrantStore,
}

fn backends(cfg: &Config) -> Result<Backends, AppError> {
    let client = OllamaClient::new(&cfg.ollama_url)?;
    client.health_check()?;
    Ok(Backends {
        embedder: OllamaEmbedder::new(client.clone()),
        chat: OllamaChat::new(client),
        store: QdrantStore::new(&cfg.qdrant_url)?,
    })
}

fn run_ingest(config_path: Option<&str>) -> Result<(), AppError> {
    let cfg = load_config(config_path)?;
    let backends = backends(&cfg)?;
    let pages = TextFilePages::new(&cfg.source_document).load_pages()?;
    let text = pages.join("\n\n");
    let inserted = ingest_text(&cfg, &backends.embedder, &backends.store, &text)?;
    println!(
        "Ingested {inserted} chunks into collection '{}'.",
        cfg.collection_name
    );
    Ok(())
}

fn run_ask(question: &str, config_path: Option<&str>) -> Result<(), AppError> {
    let cfg = load_config(config_path)?;
    let backends = backends(&cfg)?;
    let engine = AnswerEngine::new(&backends.embedder, &backends.chat, &backends.store, &cfg);
    let answer = engine.answer(question)?;
    println!("\nResponse to query '{question}':\n\n{answer}");
    Ok(())
}

fn run_eval(config_path: Option<&str>) -> Result<(), AppError> {
    let cfg = load_config(config_path)?;
    let backends = backends(&cfg)?;
    let pipeline = Pipeline::new(&cfg, &backends.embedder, &backends.chat, &backends.store);
    let pages = TextFilePages::new(&cfg.source_document);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_menu();
        print!("\nEnter your choice (0-5): ");
        let _ = io::stdout().flush();
        let choice = match lines.next() {
            Some(Ok(line)) => line.trim().to_string(),
            // EOF or a broken pipe ends the session.
            _ => break,
        };
        match choice.as_str() {
            "0" => break,
            "1" => {
                execute_step("Prepare QA", || pipeline.prepare_qa_pairs(&pages));
            }
            "2" => {
                execute_step("Prepare LLM Answers", || pipeline.prepare_llm_answers());
            }
            "3" => {
                execute_step("Evaluate", || pipeline.evaluate());
            }
            "4" => {
                execute_step("Report", || pipeline.report());
            }
            "5" => run_full_pipeline(&pipeline, &pages),
            _ => {
                println!("Invalid choice. Please enter a number between 0 and 5.");
                continue;
            }
        }
    }
    println!("Bye.");
    Ok(())
}

fn print_menu() {
    println!();
    println!("{}", "=".repeat(60));
    println!("        RAG EVALUATION PIPELINE");
    println!("{}", "=".repeat(60));
    println!("1. Prepare QA");
    println!("   Generate question-answer pairs from the source document");
    println!("2. Prepare LLM Answers");
    println!("   Answer the prepared QA pairs through the RAG engine");
    println!("3. Evaluate");
    println!("   Score the answers with the LLM-as-judge");
    println!("4. Report");
    println!("   Render the newest evaluation into a Markdown report");
    println!("5. Run Full Pipeline");
    println!("   Execute all steps in sequence (1 -> 2 -> 3 -> 4)");
    println!("0. Exit");
    println!("{}", "=".repeat(60));
}

fn execute_step(name: &str, step: impl FnOnce() -> Result<PathBuf, AppError>) -> bool {
    println!("\n==== {name} ====");
    match step() {
        Ok(path) => {
            println!("{name} completed: {}", path.display());
            true
        }
        Err(e) => {
            eprintln!("{name} failed: {e}");
            if let Some(details) = &e.details {
                eprintln!("  {details}");
            }
            false
        }
    }
}

fn run_full_pipeline(pipeline: &Pipeline<'_>, pages: &TextFilePages) {
    println!("\nStarting full evaluation pipeline...");
    let steps: [(&str, Box<dyn FnOnce() -> Result<PathBuf, AppError> + '_>); 4] = [
        ("Prepare QA", Box::new(|| pipeline.prepare_qa_pairs(pages))),
        ("Prepare LLM Answers", Box::new(|| pipeline.prepare_llm_answers())),
        ("Evaluate", Box::new(|| pipeline.evaluate())),
        ("Report", Box::new(|| pipeline.report())),
    ];
    for (name, step) in steps {
        if !execute_step(name, step) {
            println!("Full pipeline stopped at step: {name}");
            return;
        }
    }
    println!("\nFull evaluation pipeline completed.");
}

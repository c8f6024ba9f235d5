//! Interactive question loop over an initialized session.
//!
//! Rustyline-backed input with graceful Ctrl-C/Ctrl-D handling. The loop
//! exits on `quit`, `exit`, `退出`, or `q`; every other non-empty line is
//! treated as a question.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Duration;

use crate::errors::Result;
use crate::session::{Answer, RagSession};

const PROMPT: &str = "问题> ";

/// Words that end the session
const EXIT_WORDS: &[&str] = &["quit", "exit", "退出", "q"];

/// Run the interactive loop until the user exits.
pub async fn run(session: &RagSession) -> Result<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| crate::errors::RagError::Configuration(e.to_string()))?;

    println!();
    println!("{}", "输入问题开始查询，输入 quit 退出。".dimmed());

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                if is_exit_word(question) {
                    println!("{}", "再见！".green());
                    break;
                }
                let _ = editor.add_history_entry(question);

                let answer = ask_with_spinner(session, question).await?;
                print_answer(&answer);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "再见！".green());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "Input error:".red(), e);
                break;
            }
        }
    }

    Ok(())
}

/// Answer one question with a terminal spinner while generation runs.
pub async fn ask_with_spinner(session: &RagSession, question: &str) -> Result<Answer> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("检索并生成答案...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let answer = session.ask(question).await;
    spinner.finish_and_clear();
    answer
}

/// Print an answer with its numbered sources.
pub fn print_answer(answer: &Answer) {
    println!();
    println!("{}", answer.answer);

    if !answer.sources.is_empty() {
        println!();
        println!("{}", "参考来源：".dimmed());
        for (i, source) in answer.sources.iter().enumerate() {
            println!(
                "{}",
                format!(
                    "  {}. {} (相似度 {:.4})",
                    i + 1,
                    source.source,
                    source.similarity
                )
                .dimmed()
            );
        }
    }
    println!();
}

fn is_exit_word(input: &str) -> bool {
    let lowered = input.to_lowercase();
    EXIT_WORDS.iter().any(|word| *word == lowered)
}

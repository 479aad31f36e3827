//! Interactive menu session.
//!
//! A line-oriented loop over stdin: ask a question, generate a quiz, or
//! quit. Request failures are printed and the loop continues; a broken
//! query never ends the session.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::assistant::{Assistant, Mode, Pathway, Refusal, RequestOutcome};
use crate::style;

pub fn run(assistant: &Assistant) -> Result<()> {
    print_banner();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(choice) = read_line(&mut lines, &style::green("> "))? else {
            println!("\n{}", style::cyan("Goodbye!"));
            break;
        };

        match choice.trim().to_lowercase().as_str() {
            "q" => {
                println!("{}", style::cyan("Good luck with your studying!"));
                break;
            }
            "1" => {
                let prompt = style::green("Enter your study question (or blank to cancel): ");
                let Some(question) = read_line(&mut lines, &prompt)? else {
                    println!("\n{}", style::cyan("Goodbye!"));
                    break;
                };
                let question = question.trim().to_string();
                if question.is_empty() {
                    println!("{}\n", style::blue("Cancelled. Returning to main menu."));
                    continue;
                }
                run_once(assistant, Mode::Qa, &question);
            }
            "2" => {
                let prompt = style::green("Enter a topic for quiz questions (or blank to cancel): ");
                let Some(topic) = read_line(&mut lines, &prompt)? else {
                    println!("\n{}", style::cyan("Goodbye!"));
                    break;
                };
                let topic = topic.trim().to_string();
                if topic.is_empty() {
                    println!("{}\n", style::blue("Cancelled. Returning to main menu."));
                    continue;
                }
                run_once(assistant, Mode::Quiz, &topic);
            }
            _ => {
                println!("{}\n", style::red("Invalid option. Please choose 1, 2, or q."));
            }
        }
    }

    Ok(())
}

/// Run one request and print the outcome. Shared by the interactive menu
/// and the one-shot `ask` / `quiz` commands.
pub fn run_once(assistant: &Assistant, mode: Mode, user_text: &str) {
    println!("{}", style::cyan("Searching your notes for relevant content..."));
    println!("{}", style::cyan("Thinking..."));

    match assistant.run(mode, Pathway::Rag, user_text) {
        Ok(RequestOutcome::Answered(response)) => {
            println!("{}", style::green("\n=== STUDYBUDDY RESPONSE ==="));
            println!("{}", style::bold(&response.reply));
            println!("{}\n", style::green("============================"));
            let tokens = response
                .tokens
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "{}\n",
                style::magenta(&format!(
                    "(Latency: {:.2}s | Tokens: {})",
                    response.latency_sec, tokens
                ))
            );
        }
        Ok(RequestOutcome::Refused(refusal)) => print_refusal(&refusal),
        Err(e) => {
            println!("{}", style::red("[Error] Something went wrong with the request."));
            println!("{}\n", style::red(&e.to_string()));
        }
    }
}

fn print_refusal(refusal: &Refusal) {
    match refusal {
        Refusal::TooLong { .. } => {
            println!("{}\n", style::red(&refusal.message()));
        }
        Refusal::Injection { pattern } => {
            println!(
                "{}",
                style::red("[Safety] Your input looks like a prompt-injection attempt.")
            );
            println!("{}", style::yellow(&refusal.message()));
            println!(
                "{}\n",
                style::blue(&format!("(Detected suspicious pattern: '{}')", pattern))
            );
        }
    }
}

fn print_banner() {
    println!("{}", style::cyan("==============================="));
    println!("{}", style::cyan(&style::bold("        StudyBuddy RAG         ")));
    println!("{}", style::cyan("   Study from your own notes"));
    println!("{}\n", style::cyan("==============================="));
}

fn print_menu() {
    println!("{}", style::yellow("What would you like to do?"));
    println!("{}", style::yellow("  [1] Ask a question about your notes"));
    println!("{}", style::yellow("  [2] Generate quiz questions"));
    println!("{}", style::yellow("  [q] Quit"));
}

/// Print `prompt`, flush, and read one line. `None` means EOF.
fn read_line(
    lines: &mut std::io::Lines<std::io::StdinLock<'_>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

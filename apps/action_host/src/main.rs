use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::bounded;

mod backend_bridge;
mod config;
mod controller;

use backend_bridge::commands::HostCommand;
use controller::{events::UiEvent, orchestration::dispatch_host_command};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the record action service.
    #[arg(long)]
    server_url: Option<String>,
    /// Record the quick actions operate on.
    #[arg(long)]
    record_id: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.record_id {
        settings.record_id = v;
    }
    config::validate(&settings)?;

    let (cmd_tx, cmd_rx) = bounded::<HostCommand>(32);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let printer = std::thread::spawn(move || {
        while let Ok(event) = ui_rx.recv() {
            let stamp = chrono::Local::now().format("%H:%M:%S");
            match event {
                UiEvent::Info(text) => println!("[{stamp}] {text}"),
                UiEvent::Toast(toast) => println!(
                    "[{stamp}] toast [{}/{}] {}: {}",
                    toast.variant, toast.mode, toast.title, toast.message
                ),
                UiEvent::SumComputed(sum) => println!("[{stamp}] sum = {sum}"),
                UiEvent::CloseActionScreen => println!("[{stamp}] action screen closed"),
                UiEvent::Error(text) => eprintln!("[{stamp}] error: {text}"),
            }
        }
    });

    println!("commands: invoke | sum <num1> <num2> | cancel | quit");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" {
            break;
        }

        match parse_command(trimmed) {
            Some(cmd) => {
                let mut status = String::new();
                dispatch_host_command(&cmd_tx, cmd, &mut status);
                if !status.is_empty() {
                    println!("{status}");
                }
            }
            None => {
                println!("unknown command: {trimmed}");
            }
        }
        io::stdout().flush()?;
    }

    drop(cmd_tx);
    let _ = printer.join();
    Ok(())
}

/// Maps a surface input line onto a host command. Sum operands are passed
/// through unparsed; the panel applies its own parseInt semantics.
fn parse_command(line: &str) -> Option<HostCommand> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "invoke" => Some(HostCommand::InvokeAction),
        "sum" => {
            let num1 = parts.next().unwrap_or("").to_string();
            let num2 = parts.next().unwrap_or("").to_string();
            Some(HostCommand::ComputeSum { num1, num2 })
        }
        "cancel" => Some(HostCommand::Cancel),
        _ => None,
    }
}

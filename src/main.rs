use angry_cats::adapters::console::{parse_command, ChangeFlag, ConsoleCommand};
use angry_cats::adapters::render::{render_snapshot, DisplayFormat};
use angry_cats::utils::error::{ErrorSeverity, RankError};
use angry_cats::utils::{logger, validation::Validate};
use angry_cats::{CliConfig, Item, ListDriver, ListHandle, RankedList, RosterProvider};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting angry-cats");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ angry-cats failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> angry_cats::Result<()> {
    config.validate()?;
    let roster = config.load_roster()?;
    let format = config.display_format(&roster)?;
    tracing::info!("✅ Roster '{}' loaded", roster.title());

    let flag = ChangeFlag::new();
    let mut list = RankedList::from_profiles(roster.initial_cats()).with_observer(flag.clone());

    for (profile, rank) in roster.late_entries() {
        let item = Item::new(list.next_id(), profile);
        let rank = match rank {
            Some(rank) => list.insert(item.with_rank(rank))?,
            None => list.append(item)?,
        };
        tracing::info!("Late entry joined at rank {}", rank);
    }

    println!("{}", roster.title());
    print!("{}", render_snapshot(format, list.items())?);
    flag.take();

    let (handle, task) = ListDriver::spawn(list);
    console_loop(&handle, &flag, format).await?;

    drop(handle);
    let list = task.await.map_err(|e| {
        tracing::error!("List driver stopped abnormally: {}", e);
        RankError::ChannelClosedError
    })?;
    list.verify()?;
    tracing::info!("👋 Final standings have {} cats", list.len());
    Ok(())
}

async fn console_loop(
    handle: &ListHandle,
    flag: &ChangeFlag,
    format: DisplayFormat,
) -> angry_cats::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let snapshot = handle.snapshot().await?;
        let command = match parse_command(&line, &snapshot) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Show => {
                print!("{}", render_snapshot(format, &snapshot.items)?);
            }
            ConsoleCommand::Gesture(gesture) => match handle.gesture(gesture).await {
                Ok(outcome) => tracing::debug!("{:?} -> {:?}", gesture, outcome),
                Err(e @ RankError::InvariantViolationError { .. }) => return Err(e),
                Err(e) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                }
            },
        }

        if flag.take() {
            let snapshot = handle.snapshot().await?;
            print!("{}", render_snapshot(format, &snapshot.items)?);
        }
    }

    Ok(())
}

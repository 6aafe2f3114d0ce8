use clap::Parser;
use door_quote::app::console::{self, QuoteReport};
use door_quote::config::cli::Command;
use door_quote::utils::error::QuoteError;
use door_quote::utils::{logger, validation::Validate};
use door_quote::{CliConfig, HttpLeadNotifier, PriceCatalog, QuoteEngine, QuoteSession};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting door-quote CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ door-quote failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run(config: CliConfig) -> Result<(), QuoteError> {
    let catalog = PriceCatalog::load(config.catalog.as_deref())?;
    let engine = QuoteEngine::new(catalog);

    match config.command {
        Command::Quote(args) => {
            let report = QuoteReport::build(&engine, args.configuration.to_configuration());
            if args.json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", console::render_report(&report));
            }
        }
        Command::Wizard(args) => {
            let notifier = HttpLeadNotifier::new(args.relay_url);
            let mut session = QuoteSession::new(engine);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            console::run_wizard(&mut session, &notifier, stdin.lock(), &mut stdout).await?;
            stdout.flush()?;
        }
        Command::Submit(args) => {
            let configuration = args.configuration.to_configuration();
            let errors = engine.validate(&configuration);
            if !errors.is_empty() {
                eprintln!("{}", console::render_errors(&errors));
                return Err(QuoteError::SubmissionRefused {
                    reason: "Исправьте размеры проема, чтобы продолжить.".to_string(),
                });
            }

            // 非互動模式：套用設定後直接走到最後一步
            let notifier = HttpLeadNotifier::new(args.relay_url.clone());
            let mut session = QuoteSession::new(engine);
            for change in configuration.changes() {
                session.wizard_mut().update(change);
            }
            while session.wizard().can_advance() {
                session.wizard_mut().advance()?;
            }
            session.set_lead(args.to_lead());

            println!(
                "{}",
                console::render_summary(session.wizard().configuration(), session.wizard().breakdown())
            );
            session.submit(&notifier).await?;
            tracing::info!("✅ Lead sent through {}", notifier.endpoint());
            println!("✅ Спасибо! Ваша заявка отправлена. Мы скоро свяжемся с вами.");
        }
    }

    Ok(())
}

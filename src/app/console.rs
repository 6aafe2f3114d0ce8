//! 終端機前端：單次報價輸出與互動式精靈。

use crate::core::engine::QuoteEngine;
use crate::core::lead::{format_rub, TRANSPORT_WARNING};
use crate::core::session::{QuoteSession, SubmissionState};
use crate::core::wizard::{Wizard, WizardStep};
use crate::domain::model::{
    parse_dimension, ConfigChange, Configuration, PriceBreakdown, Quantity, ValidationErrors,
};
use crate::domain::ports::LeadNotifier;
use crate::utils::error::{QuoteError, Result};
use serde::Serialize;
use std::io::{BufRead, Write};

const PRELIMINARY_NOTE: &str = "Расчет является предварительным и требует уточнения у менеджера.";

/// `quote --json` 的輸出格式
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
    pub configuration: Configuration,
    pub breakdown: PriceBreakdown,
    pub errors: ValidationErrors,
}

impl QuoteReport {
    pub fn build(engine: &QuoteEngine, configuration: Configuration) -> Self {
        let errors = engine.validate(&configuration);
        let breakdown = engine.calculate(&configuration);
        Self {
            configuration,
            breakdown,
            errors,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn selected_options(config: &Configuration) -> Vec<&'static str> {
    [
        (config.has_battery, "АКБ"),
        (config.has_lock, "Замок"),
        (config.has_filling, "СПО"),
        (config.has_painting, "RAL"),
    ]
    .into_iter()
    .filter_map(|(selected, label)| selected.then_some(label))
    .collect()
}

/// 「Ваш расчет」摘要
pub fn render_summary(config: &Configuration, breakdown: &PriceBreakdown) -> String {
    let mut lines = vec![
        "Ваш расчет".to_string(),
        format!(
            "{} / {} / Проем: {} х {}",
            config.door_type, config.manufacturer, config.width, config.height
        ),
    ];

    let options = selected_options(config);
    if options.is_empty() {
        lines.push(format!("Цена за 1 изделие: {}", format_rub(breakdown.item_price)));
    } else {
        lines.push(format!(
            "Цена за 1 изделие ({}): {}",
            options.join(", "),
            format_rub(breakdown.item_price)
        ));
    }
    lines.push(format!("Количество: {} шт.", config.quantity));
    if config.has_installation {
        lines.push(format!("Монтаж ({}): Включен", config.region));
    }
    lines.push(format!("Общий итог: {}", format_rub(breakdown.total_price)));
    if breakdown.is_large {
        lines.push("Применена цена для увеличенного проема.".to_string());
    }
    if !config.region.is_base() {
        lines.push(format!("⚠️ {}", TRANSPORT_WARNING));
    }
    lines.push(PRELIMINARY_NOTE.to_string());
    lines.join("\n")
}

/// 逐項明細，`quote` 子命令使用
pub fn render_breakdown(breakdown: &PriceBreakdown) -> String {
    let rows = [
        ("Базовая цена", breakdown.base),
        ("АКБ", breakdown.battery),
        ("Замок", breakdown.lock),
        ("Заполнение", breakdown.filling),
        ("Покраска", breakdown.painting),
        ("Наценка", breakdown.markup),
        ("Монтаж (за 1 шт.)", breakdown.installation_price),
    ];
    rows.iter()
        .map(|(label, amount)| format!("  {:<20} {}", label, format_rub(*amount)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_errors(errors: &ValidationErrors) -> String {
    errors
        .messages()
        .map(|message| format!("❌ {}", message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_report(report: &QuoteReport) -> String {
    let mut sections = Vec::new();
    if !report.errors.is_empty() {
        sections.push(render_errors(&report.errors));
    }
    sections.push(render_summary(&report.configuration, &report.breakdown));
    sections.push(format!("Детализация:\n{}", render_breakdown(&report.breakdown)));
    sections.join("\n\n")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "да"
    } else {
        "нет"
    }
}

/// 目前步驟的欄位與即時總價
pub fn render_step(wizard: &Wizard) -> String {
    let config = wizard.configuration();
    let mut lines = vec![format!("Шаг {}", wizard.step())];
    match wizard.step() {
        WizardStep::Configuration => {
            lines.push(format!("  door_type    = {}", config.door_type.key()));
            lines.push(format!("  manufacturer = {}", config.manufacturer.key()));
            lines.push(format!("  quantity     = {}", config.quantity));
        }
        WizardStep::Dimensions => {
            lines.push(format!("  width  = {} мм", config.width));
            lines.push(format!("  height = {} мм", config.height));
        }
        WizardStep::Options => {
            lines.push(format!("  battery  = {}", yes_no(config.has_battery)));
            lines.push(format!("  lock     = {}", yes_no(config.has_lock)));
            lines.push(format!("  filling  = {}", yes_no(config.has_filling)));
            lines.push(format!("  painting = {}", yes_no(config.has_painting)));
        }
        WizardStep::Installation => {
            lines.push(format!("  region       = {}", config.region.key()));
            lines.push(format!("  installation = {}", yes_no(config.has_installation)));
        }
    }
    if !wizard.errors().is_empty() {
        lines.push(render_errors(wizard.errors()));
    }
    lines.push(format!(
        "Итого: {}",
        format_rub(wizard.breakdown().total_price)
    ));
    lines.join("\n")
}

const HELP: &str = "\
Команды:
  set <поле> <значение>   door_type, manufacturer, quantity, width, height,
                          battery, lock, filling, painting, region, installation
  next | back             следующий / предыдущий шаг
  summary                 показать итог (последний шаг)
  reset                   начать расчет заново
  name|phone|email|comment <текст>   данные заявки
  submit                  отправить заявку
  retry                   закрыть сообщение об ошибке
  new                     новый расчет после отправки
  help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Phone,
    Email,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Set(ConfigChange),
    Next,
    Back,
    Summary,
    Reset,
    Lead(LeadField, String),
    Submit,
    Retry,
    NewCalculation,
    Help,
    Quit,
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "да" | "yes" | "y" | "true" | "on" | "1" => Ok(true),
        "нет" | "no" | "n" | "false" | "off" | "0" => Ok(false),
        _ => Err(QuoteError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: "expected yes/no".to_string(),
        }),
    }
}

fn parse_change(field: &str, value: &str) -> Result<ConfigChange> {
    let change = match field {
        "door_type" => ConfigChange::DoorType(value.parse()?),
        "manufacturer" => ConfigChange::Manufacturer(value.parse()?),
        "quantity" => ConfigChange::Quantity(Quantity::parse(value)),
        "width" => ConfigChange::Width(parse_dimension(value)),
        "height" => ConfigChange::Height(parse_dimension(value)),
        "battery" => ConfigChange::Battery(parse_flag(field, value)?),
        "lock" => ConfigChange::Lock(parse_flag(field, value)?),
        "filling" => ConfigChange::Filling(parse_flag(field, value)?),
        "painting" => ConfigChange::Painting(parse_flag(field, value)?),
        "region" => ConfigChange::Region(value.parse()?),
        "installation" => ConfigChange::Installation(parse_flag(field, value)?),
        _ => {
            return Err(QuoteError::InvalidInput {
                field: field.to_string(),
                value: value.to_string(),
                reason: "unknown field".to_string(),
            })
        }
    };
    Ok(change)
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand> {
    let line = line.trim();
    let (keyword, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match keyword {
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            ConsoleCommand::Set(parse_change(field, value.trim())?)
        }
        "next" => ConsoleCommand::Next,
        "back" => ConsoleCommand::Back,
        "summary" => ConsoleCommand::Summary,
        "reset" => ConsoleCommand::Reset,
        "name" => ConsoleCommand::Lead(LeadField::Name, rest.to_string()),
        "phone" => ConsoleCommand::Lead(LeadField::Phone, rest.to_string()),
        "email" => ConsoleCommand::Lead(LeadField::Email, rest.to_string()),
        "comment" => ConsoleCommand::Lead(LeadField::Comment, rest.to_string()),
        "submit" => ConsoleCommand::Submit,
        "retry" => ConsoleCommand::Retry,
        "new" => ConsoleCommand::NewCalculation,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => {
            return Err(QuoteError::InvalidInput {
                field: "command".to_string(),
                value: line.to_string(),
                reason: "type `help` for the list of commands".to_string(),
            })
        }
    };
    Ok(command)
}

fn update_lead(session: &mut QuoteSession, field: LeadField, value: String) {
    let mut lead = session.lead().clone();
    match field {
        LeadField::Name => lead.name = value,
        LeadField::Phone => lead.phone = value,
        LeadField::Email => lead.email = value,
        LeadField::Comment => lead.comment = Some(value).filter(|c| !c.trim().is_empty()),
    }
    session.set_lead(lead);
}

/// 互動式精靈。每行一個命令，直到 `quit` 或輸入結束
pub async fn run_wizard<R, W, N>(
    session: &mut QuoteSession,
    notifier: &N,
    input: R,
    output: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    N: LeadNotifier + ?Sized,
{
    writeln!(output, "{}", HELP)?;
    writeln!(output, "\n{}", render_step(session.wizard()))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "❌ {}", e.user_friendly_message())?;
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => writeln!(output, "{}", HELP)?,
            ConsoleCommand::Set(change) => {
                session.wizard_mut().update(change);
                writeln!(output, "{}", render_step(session.wizard()))?;
            }
            ConsoleCommand::Next => match session.wizard_mut().advance() {
                Ok(_) => writeln!(output, "{}", render_step(session.wizard()))?,
                Err(e) => writeln!(output, "❌ {}", e.user_friendly_message())?,
            },
            ConsoleCommand::Back => match session.wizard_mut().retreat() {
                Ok(_) => writeln!(output, "{}", render_step(session.wizard()))?,
                Err(e) => writeln!(output, "❌ {}", e.user_friendly_message())?,
            },
            ConsoleCommand::Summary => match session.wizard_mut().show_summary() {
                Ok(()) => writeln!(
                    output,
                    "{}",
                    render_summary(session.wizard().configuration(), session.wizard().breakdown())
                )?,
                Err(e) => writeln!(output, "❌ {}", e.user_friendly_message())?,
            },
            ConsoleCommand::Reset => {
                session.wizard_mut().reset();
                writeln!(output, "{}", render_step(session.wizard()))?;
            }
            ConsoleCommand::Lead(field, value) => {
                if !session.wizard().is_lead_form_enabled() {
                    writeln!(
                        output,
                        "⚠️ Для отправки заявки, пожалуйста, пройдите все шаги расчета."
                    )?;
                    continue;
                }
                update_lead(session, field, value);
            }
            ConsoleCommand::Submit => match session.submit(notifier).await {
                Ok(()) => writeln!(
                    output,
                    "✅ Спасибо! Ваша заявка отправлена. Мы скоро свяжемся с вами."
                )?,
                Err(QuoteError::SubmissionRefused { reason }) => {
                    writeln!(output, "⚠️ {}", reason)?
                }
                Err(_) => {
                    if let SubmissionState::Error(reason) = session.submission() {
                        writeln!(output, "❌ Ошибка отправки: {}", reason)?;
                    }
                    writeln!(output, "💡 Введите `retry`, чтобы попробовать снова.")?;
                }
            },
            ConsoleCommand::Retry => session.dismiss_error(),
            ConsoleCommand::NewCalculation => {
                session.start_new_calculation();
                writeln!(output, "{}", render_step(session.wizard()))?;
            }
        }
    }

    Ok(())
}

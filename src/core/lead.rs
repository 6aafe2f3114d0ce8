//! 詢價訊息的組裝。訊息以 Telegram HTML 格式送出，所有文字欄位都要跳脫。

use crate::domain::model::{Configuration, LeadForm, PriceBreakdown};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

const SEPARATOR: &str = "--------------------------------";
const NBSP: char = '\u{a0}';

pub const TRANSPORT_WARNING: &str =
    "Транспортные расходы рассчитываются индивидуально и не включены в смету.";

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// 盧布金額格式：千分位用不斷行空格，小數最多兩位
pub fn format_rub(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut formatted = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            formatted.push(NBSP);
        }
        formatted.push(digit);
    }
    if let Some(fraction) = fraction {
        formatted.push(',');
        formatted.push_str(fraction);
    }
    formatted.push(NBSP);
    formatted.push('₽');
    formatted
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Да"
    } else {
        "Нет"
    }
}

/// 組裝送往訊息平台的完整詢價內容
pub fn compose_message(
    lead: &LeadForm,
    config: &Configuration,
    prices: &PriceBreakdown,
    submitted_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        "<b>Новая заявка с калькулятора</b>".to_string(),
        SEPARATOR.to_string(),
        "<b>Контактные данные:</b>".to_string(),
        format!("- Имя: {}", escape_html(&lead.name)),
        format!("- Телефон: <code>{}</code>", escape_html(&lead.phone)),
        format!("- Email: {}", escape_html(&lead.email)),
    ];
    if let Some(comment) = lead.comment() {
        lines.push(format!("- Комментарий: {}", escape_html(comment)));
    }

    lines.extend([
        String::new(),
        SEPARATOR.to_string(),
        "<b>Детализация расчета:</b>".to_string(),
        format!("- Тип двери: {}", escape_html(config.door_type.label())),
        format!("- Производитель: {}", escape_html(config.manufacturer.label())),
        format!("- Количество: {} шт.", config.quantity),
        format!("- Ширина: {} мм", config.width),
        format!("- Высота: {} мм", config.height),
        format!("- АКБ: {}", yes_no(config.has_battery)),
        format!("- Замок: {}", yes_no(config.has_lock)),
        format!("- Заполнение: {}", yes_no(config.has_filling)),
        format!("- Покраска: {}", yes_no(config.has_painting)),
        format!("- Регион: {}", escape_html(config.region.label())),
        format!("- Монтаж: {}", yes_no(config.has_installation)),
    ]);
    if !config.region.is_base() {
        lines.push(format!("⚠️ {}", escape_html(TRANSPORT_WARNING)));
    }

    lines.extend([
        String::new(),
        SEPARATOR.to_string(),
        "<b>ИТОГИ:</b>".to_string(),
        format!(
            "- Цена за 1 изделие: <code>{}</code>",
            escape_html(&format_rub(prices.item_price))
        ),
        format!(
            "- <b>ОБЩИЙ ИТОГ:</b> <b><code>{}</code></b>",
            escape_html(&format_rub(prices.total_price))
        ),
        format!("- Дата заявки: {}", submitted_at.format("%d.%m.%Y %H:%M")),
    ]);

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Region;
    use chrono::NaiveDate;

    fn submitted_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|date| date.and_hms_opt(14, 5, 0))
            .unwrap()
    }

    fn lead() -> LeadForm {
        LeadForm {
            name: "Иван <script>".to_string(),
            phone: "+7 (900) 000-00-00".to_string(),
            email: "ivan&co@example.com".to_string(),
            comment: None,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b < c > d"), "a &amp; b &lt; c &gt; d");
        // & 先處理，避免重複跳脫
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_format_rub() {
        assert_eq!(format_rub(Decimal::from(334307)), "334\u{a0}307\u{a0}₽");
        assert_eq!(format_rub(Decimal::from(7000)), "7\u{a0}000\u{a0}₽");
        assert_eq!(format_rub(Decimal::from(950)), "950\u{a0}₽");
        assert_eq!(format_rub(Decimal::new(12345678, 1)), "1\u{a0}234\u{a0}567,8\u{a0}₽");
        assert_eq!(format_rub(Decimal::new(1005, 3)), "1,01\u{a0}₽");
        assert_eq!(format_rub(Decimal::new(27170000, 3)), "27\u{a0}170\u{a0}₽");
    }

    #[test]
    fn test_message_escapes_user_input() {
        let prices = PriceBreakdown::default();
        let message = compose_message(&lead(), &Configuration::default(), &prices, submitted_at());

        assert!(message.contains("- Имя: Иван &lt;script&gt;"));
        assert!(message.contains("- Email: ivan&amp;co@example.com"));
        assert!(!message.contains("<script>"));
        assert!(!message.contains("Комментарий"));
    }

    #[test]
    fn test_message_contains_configuration_and_totals() {
        let mut lead = lead();
        lead.comment = Some("Монтаж в Зеленодольске".to_string());
        let prices = PriceBreakdown {
            item_price: Decimal::from(309307),
            total_price: Decimal::from(334307),
            ..PriceBreakdown::default()
        };

        let message = compose_message(&lead, &Configuration::default(), &prices, submitted_at());

        assert!(message.starts_with("<b>Новая заявка с калькулятора</b>"));
        assert!(message.contains("- Комментарий: Монтаж в Зеленодольске"));
        assert!(message.contains("- Тип двери: Раздвижная двухстворчатая"));
        assert!(message.contains("- Производитель: GEZE"));
        assert!(message.contains("- Количество: 1 шт."));
        assert!(message.contains("- Ширина: 2000 мм"));
        assert!(message.contains("- АКБ: Да"));
        assert!(message.contains("- Регион: Казань"));
        assert!(message.contains("<code>309\u{a0}307\u{a0}₽</code>"));
        assert!(message.contains("<b><code>334\u{a0}307\u{a0}₽</code></b>"));
        assert!(message.ends_with("- Дата заявки: 19.10.2026 14:05"));
        assert!(!message.contains(TRANSPORT_WARNING));
    }

    #[test]
    fn test_transport_warning_outside_base_region() {
        let config = Configuration {
            region: Region::Cheboksary,
            has_installation: false,
            ..Configuration::default()
        };
        let message = compose_message(&lead(), &config, &PriceBreakdown::default(), submitted_at());

        assert!(message.contains("- Регион: Чебоксары"));
        assert!(message.contains("- Монтаж: Нет"));
        assert!(message.contains(TRANSPORT_WARNING));
    }
}

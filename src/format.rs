//! Display formatting - currency, dates, score tiers and status labels
//!
//! Mirrors the ru-RU presentation the monitoring service uses everywhere:
//! space-grouped thousands, comma decimals, dd.mm.yyyy timestamps.

use chrono::{DateTime, NaiveDateTime};

/// Fraud score tier. Boundaries 0.5 and 0.8 belong to the upper tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Low,
    Medium,
    High,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Severity of the submission outcome card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreAlert {
    Success,
    Info,
    Warning,
    Danger,
}

impl ScoreAlert {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Danger
        } else if score >= 0.5 {
            Self::Warning
        } else if score >= 0.4 {
            Self::Info
        } else {
            Self::Success
        }
    }
}

/// Group an integer with space thousands separators: 1234567 -> "1 234 567"
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an amount as rubles: 150000.5 -> "150 000,50 ₽"
pub fn format_money(amount: f64) -> String {
    let kopecks = (amount.abs() * 100.0).round() as i64;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!(
        "{}{},{:02} ₽",
        sign,
        format_count(kopecks / 100),
        kopecks % 100
    )
}

/// Fraud score as a whole percentage: 0.65 -> "65%"
pub fn format_score(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Risk level as a whole percentage; unknown levels render as a dash
pub fn format_risk(risk: f64) -> String {
    format!("{:.0}%", risk * 100.0)
}

/// Format a server timestamp as "dd.mm.yyyy, HH:MM"
///
/// The backend emits ISO-8601 in some code paths and RFC 2822 (the HTTP
/// date flask produces for raw datetimes) in others; unparseable input
/// passes through verbatim.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%d.%m.%Y, %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Hour-of-day label for a pattern bucket timestamp: "13"
pub fn hour_label(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%H").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Russian status label; unknown statuses pass through verbatim
pub fn status_text(status: &str) -> &str {
    match status {
        "completed" => "Выполнена",
        "pending" => "В обработке",
        "review" => "На проверке",
        "blocked" => "Заблокирована",
        "failed" => "Ошибка",
        "reversed" => "Отменена",
        other => other,
    }
}

/// Truncate with ellipsis, on a char boundary
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(0.0), ScoreTier::Low);
        assert_eq!(ScoreTier::from_score(0.49), ScoreTier::Low);
        assert_eq!(ScoreTier::from_score(0.5), ScoreTier::Medium);
        assert_eq!(ScoreTier::from_score(0.79), ScoreTier::Medium);
        assert_eq!(ScoreTier::from_score(0.8), ScoreTier::High);
        assert_eq!(ScoreTier::from_score(1.0), ScoreTier::High);
    }

    #[test]
    fn test_score_alert_thresholds() {
        assert_eq!(ScoreAlert::from_score(0.1), ScoreAlert::Success);
        assert_eq!(ScoreAlert::from_score(0.4), ScoreAlert::Info);
        assert_eq!(ScoreAlert::from_score(0.5), ScoreAlert::Warning);
        assert_eq!(ScoreAlert::from_score(0.8), ScoreAlert::Danger);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1 000");
        assert_eq!(format_count(1234567), "1 234 567");
        assert_eq!(format_count(-4200), "-4 200");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(150000.0), "150 000,00 ₽");
        assert_eq!(format_money(150000.5), "150 000,50 ₽");
        assert_eq!(format_money(0.99), "0,99 ₽");
        assert_eq!(format_money(-75.25), "-75,25 ₽");
    }

    #[test]
    fn test_format_date_iso_and_rfc2822() {
        assert_eq!(format_date("2025-11-02T14:30:00"), "02.11.2025, 14:30");
        assert_eq!(
            format_date("Sun, 02 Nov 2025 14:30:00 GMT"),
            "02.11.2025, 14:30"
        );
        // Unparseable input passes through untouched
        assert_eq!(format_date("вчера"), "вчера");
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label("2025-11-02T09:00:00"), "09");
        assert_eq!(hour_label("Sun, 02 Nov 2025 23:00:00 GMT"), "23");
        assert_eq!(hour_label("??"), "??");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text("completed"), "Выполнена");
        assert_eq!(status_text("review"), "На проверке");
        assert_eq!(status_text("blocked"), "Заблокирована");
        assert_eq!(status_text("что-то"), "что-то");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("короткая", 20), "короткая");
        assert_eq!(truncate("очень длинная причина", 10), "очень д...");
    }
}

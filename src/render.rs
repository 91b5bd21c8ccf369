//! Terminal tables for the CLI commands.

use analytics::{DailyPnl, EquityPoint, SessionCell, SymbolPerformance, TraderScore, TradingStats};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use core_types::TradeRecord;
use rust_decimal::Decimal;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(value: Decimal) -> String {
    format!("{value:.2}")
}

pub fn stats_table(stats: &TradingStats) -> Table {
    let mut table = new_table(["Metric", "Value"]);
    let rows = [
        ("Total trades", stats.total_trades.to_string()),
        ("Net P&L", money(stats.total_net_pl)),
        ("Gross profit", money(stats.gross_profit)),
        ("Gross loss", money(stats.gross_loss)),
        ("Profit factor", money(stats.profit_factor)),
        ("Win rate", format!("{:.2}%", stats.win_rate)),
        ("Wins / losses", format!("{} / {}", stats.winning_trades, stats.losing_trades)),
        ("Best trade", money(stats.best_trade)),
        ("Worst trade", money(stats.worst_trade)),
        ("Average win", money(stats.average_win)),
        ("Average loss", money(stats.average_loss)),
        ("Longs won", format!("{} / {}", stats.longs_won, stats.total_longs)),
        ("Shorts won", format!("{} / {}", stats.shorts_won, stats.total_shorts)),
        ("Balance", money(stats.current_balance)),
    ];
    for (metric, value) in rows {
        table.add_row([metric.to_string(), value]);
    }
    table
}

pub fn score_table(score: &TraderScore) -> Table {
    let mut table = new_table(["Grade", "Score", "Win rate", "Profit factor", "Discipline"]);
    table.add_row([
        score.grade.to_string(),
        format!("{}/100", score.total_score),
        format!("{:.1}/40", score.win_rate_score),
        format!("{:.1}/30", score.profit_factor_score),
        format!("{:.1}/30", score.discipline_score),
    ]);
    table
}

pub fn trades_table(trades: &[TradeRecord], limit: usize) -> Table {
    let mut table = new_table([
        "Closed (UTC)",
        "Symbol",
        "Side",
        "Entry",
        "Close",
        "Volume",
        "Net P&L",
        "Balance",
        "Efficiency",
    ]);
    for trade in trades.iter().take(limit) {
        table.add_row([
            trade.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            trade.symbol.clone(),
            trade.direction.broker_label().to_string(),
            trade.entry_price.normalize().to_string(),
            trade.closing_price.normalize().to_string(),
            trade.volume.normalize().to_string(),
            money(trade.net_pl),
            money(trade.balance),
            format!("{}%", trade.exit_efficiency),
        ]);
    }
    table
}

pub fn symbol_table(rows: &[SymbolPerformance]) -> Table {
    let mut table = new_table(["Symbol", "Net P&L"]);
    for row in rows {
        table.add_row([row.symbol.clone(), money(row.net_pl)]);
    }
    table
}

pub fn daily_table(days: &[DailyPnl]) -> Table {
    let mut table = new_table(["Date", "Trades", "Net P&L"]);
    for day in days {
        table.add_row([day.date.to_string(), day.trades.to_string(), money(day.net_pl)]);
    }
    table
}

/// Rows are `(weekday, hour, cell)` with Sunday = 0.
pub fn session_table(cells: &[(usize, usize, SessionCell)]) -> Table {
    let mut table = new_table(["Day", "Hour", "Trades", "Wins", "Win rate"]);
    for (weekday, hour, cell) in cells {
        table.add_row([
            WEEKDAYS.get(*weekday).copied().unwrap_or("?").to_string(),
            format!("{hour:02}:00"),
            cell.total.to_string(),
            cell.wins.to_string(),
            format!("{:.2}%", cell.win_rate),
        ]);
    }
    table
}

pub fn equity_table(points: &[EquityPoint]) -> Table {
    let mut table = new_table(["Closed (UTC)", "Net P&L", "Cumulative"]);
    for point in points {
        table.add_row([
            point.time.format("%Y-%m-%d %H:%M").to_string(),
            money(point.net_pl),
            money(point.cumulative_pl),
        ]);
    }
    table
}

use std::fmt::Write;

use stockboard_market_data::RequestState;

/// Which part of the state the last command produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Series,
    Recommendations,
}

/// Plain-text rendering of a state snapshot.
pub fn render(state: &RequestState, view: View) -> String {
    let mut out = String::new();

    if let Some(message) = state.error_message() {
        let _ = writeln!(out, "error: {}", message);
        return out;
    }

    match view {
        View::Series => {
            if let Some(query) = &state.current_query {
                let _ = writeln!(out, "{} ({})", query.symbol, query.range);
            }
            let _ = writeln!(
                out,
                "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12}",
                "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME"
            );
            for p in &state.data {
                let _ = writeln!(
                    out,
                    "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12}",
                    p.date.to_string(),
                    p.open.round_dp(2).to_string(),
                    p.high.round_dp(2).to_string(),
                    p.low.round_dp(2).to_string(),
                    p.close.round_dp(2).to_string(),
                    p.volume
                );
            }
        }
        View::Recommendations => {
            let _ = writeln!(out, "{:<4} {:<8} {:>10} {:>8}", "#", "SYMBOL", "MOMENTUM", "RSI");
            for (rank, r) in state.recommendations.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:<4} {:<8} {:>9.2}% {:>8.1}",
                    rank + 1,
                    r.symbol,
                    r.momentum,
                    r.rsi
                );
            }
        }
    }

    out
}

//! Line-oriented console over a [`Driver`].

use std::fmt::Write as _;

use go_eval::coord::{self, Vertex};
use go_eval::{Goban, InfluenceField, Point, Session, Stone, hoshi, territory};

use crate::client::EngineClient;
use crate::config::GameMode;
use crate::driver::Driver;
use crate::error::HostError;

pub const HELP: &str = "\
play <vertex> | <vertex>   place a stone for the side to move (e.g. D4)
pass                       pass for the side to move
resign [b|w]               resign (defaults to the side to move)
genmove                    let the engine move
clear                      reset the game
board                      show the board
eval                       show the current evaluation
series                     show the latest game-theory point
history                    list moves
influence [on|off]         show the influence field or toggle caching
territory                  show estimated ownership
suggest                    refresh and show engine suggestions
snapshot                   dump status, evaluation and suggestions as JSON
mode <manual|vs_engine|engine_only>
baseline [label] | unbaseline
status | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(Point),
    Pass,
    Resign(Option<Stone>),
    Genmove,
    Clear,
    Board,
    Eval,
    Series,
    History,
    Influence,
    ShowInfluence(bool),
    Territory,
    Suggest,
    Snapshot,
    Mode(GameMode),
    Baseline(String),
    ClearBaseline,
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str, size: u8) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let head = parts.next().ok_or("empty command")?.to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let cmd = match head.as_str() {
            "play" => {
                let arg = args.first().ok_or("play needs a vertex")?;
                Self::from_vertex(arg, size)?
            }
            "pass" => Command::Pass,
            "resign" => match args.first() {
                None => Command::Resign(None),
                Some(s) => Command::Resign(Some(
                    Stone::from_letter(s).ok_or_else(|| format!("unknown colour: {s}"))?,
                )),
            },
            "genmove" => Command::Genmove,
            "clear" | "clear_board" => Command::Clear,
            "board" | "showboard" => Command::Board,
            "eval" => Command::Eval,
            "series" => Command::Series,
            "history" => Command::History,
            "influence" => match args.first().copied() {
                None => Command::Influence,
                Some("on") => Command::ShowInfluence(true),
                Some("off") => Command::ShowInfluence(false),
                Some(other) => return Err(format!("influence takes on|off, got {other}")),
            },
            "territory" => Command::Territory,
            "suggest" => Command::Suggest,
            "snapshot" | "json" => Command::Snapshot,
            "mode" => {
                let arg = args.first().ok_or("mode needs a value")?;
                Command::Mode(arg.parse()?)
            }
            "baseline" => Command::Baseline(if args.is_empty() {
                "baseline".to_string()
            } else {
                args.join(" ")
            }),
            "unbaseline" => Command::ClearBaseline,
            "status" => Command::Status,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Self::from_vertex(&head, size).map_err(|_| format!("unknown command: {head}"))?,
        };
        Ok(cmd)
    }

    fn from_vertex(s: &str, size: u8) -> Result<Self, String> {
        match Vertex::parse(s, size).map_err(|e| e.to_string())? {
            Vertex::Play(point) => Ok(Command::Play(point)),
            Vertex::Pass => Ok(Command::Pass),
            Vertex::Resign => Ok(Command::Resign(None)),
        }
    }
}

/// Run one command and describe the result.
pub async fn execute<C: EngineClient>(
    driver: &Driver<C>,
    command: Command,
) -> Result<String, HostError> {
    let out = match command {
        Command::Play(point) => {
            let outcome = driver.play(point).await?;
            let size = driver.config().eval.board_size;
            let mut out = format!(
                "{} {} (quality {:.3})",
                outcome.stone.letter(),
                coord::to_gtp(point, size)?,
                outcome.quality
            );
            if !outcome.captured.is_empty() {
                let _ = write!(out, ", captured {}", outcome.captured.len());
            }
            out
        }
        Command::Pass => driver.pass().await?.to_string(),
        Command::Resign(stone) => {
            let stone = match stone {
                Some(stone) => stone,
                None => driver.with_session(Session::to_play).await,
            };
            driver.resign(stone).await?.to_string()
        }
        Command::Genmove => {
            let vertex = driver.engine_move().await?;
            let size = driver.config().eval.board_size;
            vertex.to_gtp(size)?
        }
        Command::Clear => {
            driver.clear().await?;
            "cleared".to_string()
        }
        Command::Board => driver.with_session(render_board).await,
        Command::Eval => driver.with_session(render_evaluation).await,
        Command::Series => driver.with_session(render_series).await,
        Command::History => driver.with_session(render_history).await,
        Command::Influence => {
            driver
                .with_session(|s| render_field(&s.influence()))
                .await
        }
        Command::ShowInfluence(on) => {
            driver.with_session_mut(|s| s.set_show_influence(on)).await;
            format!("show influence {}", if on { "on" } else { "off" })
        }
        Command::Territory => driver.with_session(|s| render_ownership(s.goban())).await,
        Command::Suggest => {
            driver.refresh_suggestions().await;
            let size = driver.config().eval.board_size;
            let mut out = String::new();
            for (i, c) in driver.suggestions().iter().enumerate() {
                let label = coord::to_gtp(c.point, size)?;
                let _ = writeln!(out, "{}. {} {label} {:.3}", i + 1, c.stone.letter(), c.score);
            }
            if out.is_empty() {
                "no suggestions".to_string()
            } else {
                out.trim_end().to_string()
            }
        }
        Command::Snapshot => {
            let session = driver
                .with_session(|s| {
                    serde_json::json!({
                        "status": s.status(),
                        "to_play": s.to_play(),
                        "move_count": s.move_count(),
                        "evaluation": s.evaluation(),
                        "last_move": s.history().last_move(),
                    })
                })
                .await;
            let snapshot = serde_json::json!({
                "session": session,
                "mode": driver.mode(),
                "connected": driver.is_connected(),
                "suggestions": driver.suggestions(),
                "last_error": driver.last_error(),
            });
            snapshot.to_string()
        }
        Command::Mode(mode) => {
            driver.set_mode(mode).await;
            format!("mode {mode}")
        }
        Command::Baseline(label) => {
            driver
                .with_session_mut(|s| s.set_baseline(label.clone()))
                .await;
            format!("baseline {label:?} saved")
        }
        Command::ClearBaseline => {
            driver.with_session_mut(Session::clear_baseline).await;
            "baseline cleared".to_string()
        }
        Command::Status => {
            let (status, to_play, moves) = driver
                .with_session(|s| (s.status(), s.to_play(), s.move_count()))
                .await;
            format!(
                "{status}, {} to play, {moves} moves, mode {}, {}",
                to_play.letter(),
                driver.mode(),
                if driver.is_connected() { "connected" } else { "offline" }
            )
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(out)
}

fn column_header(size: u8) -> String {
    let letters: String = (0..size)
        .filter_map(|col| coord::to_gtp((0, col), size).ok())
        .map(|label| format!(" {}", &label[..1]))
        .collect();
    format!("   {letters}")
}

pub fn render_board(session: &Session) -> String {
    let goban = session.goban();
    let size = goban.size();
    let last = session.history().last_move().map(|m| m.point);
    let mut out = column_header(size);
    for row in 0..size {
        let _ = write!(out, "\n{:>2} ", size - row);
        for col in 0..size {
            let point = (row, col);
            let mark = match goban.stone_at(point) {
                Some(Stone::Black) => 'X',
                Some(Stone::White) => 'O',
                None if hoshi::is_star_point(size, point) => '+',
                None => '.',
            };
            let sep = if last == Some(point) { '(' } else { ' ' };
            let _ = write!(out, "{sep}{mark}");
        }
    }
    out
}

pub fn render_field(field: &InfluenceField) -> String {
    let size = field.size();
    let mut out = column_header(size);
    for row in 0..size {
        let _ = write!(out, "\n{:>2} ", size - row);
        for col in 0..size {
            let v = field.get((row, col)).unwrap_or(0.0);
            let mark = if v > 0.5 {
                'B'
            } else if v > 0.15 {
                'b'
            } else if v < -0.5 {
                'W'
            } else if v < -0.15 {
                'w'
            } else {
                '.'
            };
            let _ = write!(out, " {mark}");
        }
    }
    out
}

pub fn render_ownership(goban: &Goban) -> String {
    let size = goban.size();
    let ownership = territory::ownership(goban);
    let mut out = column_header(size);
    for (i, point) in goban.points().enumerate() {
        if point.1 == 0 {
            let _ = write!(out, "\n{:>2} ", size - point.0);
        }
        let mark = match (goban.stone_at(point), ownership[i]) {
            (Some(Stone::Black), _) => 'X',
            (Some(Stone::White), _) => 'O',
            (None, 1) => 'b',
            (None, -1) => 'w',
            _ => '.',
        };
        let _ = write!(out, " {mark}");
    }
    out
}

fn render_evaluation(session: &Session) -> String {
    let e = session.evaluation();
    format!(
        "Black {:.1} (stones {}, territory {}, captures {})\n\
         White {:.1} (stones {}, territory {}, captures {}, komi {})\n\
         win rate B {:.1}%, value {:+.1}",
        e.black_score,
        e.black_stones,
        e.black_territory,
        e.black_captures,
        e.white_score,
        e.white_stones,
        e.white_territory,
        e.white_captures,
        session.config().komi,
        e.win_rate * 100.0,
        e.value
    )
}

fn render_series(session: &Session) -> String {
    let s = session.series();
    let (Some(wr), Some(pareto), Some(eq), Some(tension), Some(unc), Some(syn)) = (
        s.win_rate.last(),
        s.pareto.last(),
        s.equilibrium.last(),
        s.tension.last(),
        s.uncertainty.last(),
        s.synergy.last(),
    ) else {
        return "no moves yet".to_string();
    };
    let mut out = format!(
        "move {}: win rate B {:.3} W {:.3}, efficiency {:.3}, stability {:.3}, \
         potential {:.3}, tension {:.3}, uncertainty {:.3}, synergy {:.3}",
        wr.move_number,
        wr.black,
        wr.white,
        pareto.efficiency,
        eq.stability,
        eq.potential,
        tension.tension,
        unc.uncertainty,
        syn.synergy
    );
    if let Some(baseline) = session.baseline() {
        if let Some(base) = baseline.win_rate.get(wr.move_number - 1) {
            let _ = write!(
                out,
                "\n{} at move {}: B {:.3}",
                baseline.label, base.move_number, base.black
            );
        }
    }
    out
}

fn render_history(session: &Session) -> String {
    let size = session.goban().size();
    let history = session.history();
    let mut out = String::new();
    for (i, (m, c)) in history.moves().iter().zip(history.captures()).enumerate() {
        let label = coord::to_gtp(m.point, size).unwrap_or_else(|_| "??".to_string());
        let _ = write!(out, "{}. {} {label} ({:.3})", i + 1, m.stone.letter(), m.quality);
        if !c.captured.is_empty() {
            let _ = write!(out, " x{}", c.captured.len());
        }
        out.push('\n');
    }
    if out.is_empty() {
        "no moves yet".to_string()
    } else {
        out.trim_end().to_string()
    }
}

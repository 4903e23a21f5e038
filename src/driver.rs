/// Headless host: turns line-based input events into session updates and
/// writes one JSON frame per event.
use std::io::{BufRead, Write};

use serde::Serialize;

use crate::config::Setup;
use crate::errors::{RulerError, RulerResult};
use crate::geometry::{Point, SamplingRect};
use crate::measure::session::{nudge, Direction};
use crate::measure::{MeasurementSession, SegmentReport};
use crate::preview::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Point),
    /// Commit the given point, or the current cursor when absent.
    Click(Option<Point>),
    Nudge(Direction),
    Pause,
    Reset,
    Quit,
}

pub fn parse_command(line: &str) -> RulerResult<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts
        .next()
        .ok_or_else(|| RulerError::Input("empty command".into()))?;
    let args: Vec<&str> = parts.collect();

    let cmd = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("move", [x, y]) => Command::Move(parse_point(x, y)?),
        ("click", []) => Command::Click(None),
        ("click", [x, y]) => Command::Click(Some(parse_point(x, y)?)),
        ("nudge", [dir]) => Command::Nudge(parse_direction(dir)?),
        ("pause", []) => Command::Pause,
        ("reset", []) => Command::Reset,
        ("quit", []) | ("exit", []) => Command::Quit,
        _ => return Err(RulerError::Input(format!("unrecognised command: {line}"))),
    };
    Ok(cmd)
}

fn parse_point(x: &str, y: &str) -> RulerResult<Point> {
    let coord = |s: &str| {
        s.parse::<i32>()
            .map_err(|e| RulerError::Input(format!("bad coordinate {s:?}: {e}")))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn parse_direction(s: &str) -> RulerResult<Direction> {
    match s.to_ascii_lowercase().as_str() {
        "left" => Ok(Direction::Left),
        "right" => Ok(Direction::Right),
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        _ => Err(RulerError::Input(format!("unknown direction: {s}"))),
    }
}

/// Everything a renderer needs for one repaint.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub cursor: Point,
    pub paused: bool,
    pub sampling: SamplingRect,
    pub preview: Placement,
    pub points: Vec<Point>,
    pub segments: Vec<SegmentReport>,
}

/// Written in place of a [`Frame`] when the geometry rejects the cursor.
#[derive(Debug, Serialize)]
pub struct FrameError {
    pub cursor: Point,
    pub error: RulerError,
}

pub struct Host {
    setup: Setup,
    session: MeasurementSession,
    cursor: Point,
}

impl Host {
    pub fn new(setup: Setup) -> Self {
        let session = MeasurementSession::new(setup.scale, setup.ticks, setup.short_segment_px);
        Self {
            setup,
            session,
            cursor: Point::new(0, 0),
        }
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    /// Apply one command. Returns `false` once the host should stop.
    pub fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Move(p) => self.cursor = p,
            Command::Click(at) => {
                if let Some(p) = at {
                    self.cursor = p;
                }
                self.session.record_point(self.cursor);
            }
            Command::Nudge(dir) => self.cursor = nudge(self.cursor, dir),
            Command::Pause => {
                self.session.toggle_pause();
            }
            Command::Reset => self.session.reset_session(),
            Command::Quit => return false,
        }
        true
    }

    pub fn frame(&self) -> RulerResult<Frame> {
        let magnifier = &self.setup.magnifier;
        Ok(Frame {
            cursor: self.cursor,
            paused: self.session.is_paused(),
            sampling: magnifier.sampling_rect(self.cursor, self.setup.tile)?,
            preview: magnifier.placement(self.cursor, self.setup.tile),
            points: self.session.committed_points().collect(),
            segments: self.session.reports(self.cursor).collect(),
        })
    }
}

/// Read commands from `input` until EOF or `quit`, writing one JSON line
/// (a frame or a frame error) after each accepted command.
pub fn run_loop<R: BufRead, W: Write>(host: &mut Host, input: R, mut output: W) -> RulerResult<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::warn!(error = %e, "skipping input line");
                continue;
            }
        };
        if !host.apply(cmd) {
            tracing::info!("quit requested");
            break;
        }
        match host.frame() {
            Ok(frame) => serde_json::to_writer(&mut output, &frame)?,
            Err(e) => {
                tracing::error!(error = %e, "frame computation failed");
                let failed = FrameError {
                    cursor: host.cursor(),
                    error: e,
                };
                serde_json::to_writer(&mut output, &failed)?;
            }
        }
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn host() -> Host {
        Host::new(AppConfig::default().validate().unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("move 10 -4").unwrap(), Command::Move(Point::new(10, -4)));
        assert_eq!(parse_command("click").unwrap(), Command::Click(None));
        assert_eq!(parse_command("CLICK 1 2").unwrap(), Command::Click(Some(Point::new(1, 2))));
        assert_eq!(parse_command("nudge up").unwrap(), Command::Nudge(Direction::Up));
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert!(matches!(parse_command("move 1"), Err(RulerError::Input(_))));
        assert!(parse_command("nudge sideways").is_err());
        assert!(parse_command("move a b").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_click_commits_nudged_cursor() {
        let mut h = host();
        h.apply(Command::Move(Point::new(100, 100)));
        h.apply(Command::Nudge(Direction::Right));
        h.apply(Command::Click(None));
        assert_eq!(h.session().committed_points().collect::<Vec<_>>(), vec![Point::new(101, 100)]);
    }

    #[test]
    fn test_frame_contents() {
        let mut h = host();
        h.apply(Command::Click(Some(Point::new(100, 100))));
        h.apply(Command::Move(Point::new(400, 300)));
        let f = h.frame().unwrap();
        assert_eq!(f.sampling, SamplingRect { left: 390, top: 290, right: 411, bottom: 311 });
        assert_eq!(f.segments.len(), 1);
        assert_eq!(f.segments[0].result.dx_px, 300);
        assert_eq!(f.points, vec![Point::new(100, 100)]);
    }

    #[test]
    fn test_run_loop_writes_one_frame_per_event() {
        let mut h = host();
        let input = "move 5 5\nbogus\nclick\n\nclick 50 5\nquit\nmove 1 1\n";
        let mut out = Vec::new();
        run_loop(&mut h, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let frames: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(frames.len(), 3);
        let last = &frames[2];
        assert_eq!(last["segments"][0]["segment"]["kind"], "fixed");
        assert_eq!(last["segments"][0]["result"]["dx_px"], 45);
        assert_eq!(last["preview"]["quadrant"], "bottom_right");
        assert_eq!(h.cursor(), Point::new(50, 5));
    }

    #[test]
    fn test_unresolvable_cursor_still_writes_a_line() {
        let mut h = host();
        let input = "move 2147483647 0\nmove 10 10\n";
        let mut out = Vec::new();
        run_loop(&mut h, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["cursor"]["x"], 2147483647);
        assert!(lines[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid configuration"));
        assert!(lines[0].get("segments").is_none());
        assert_eq!(lines[1]["sampling"]["left"], 0);
    }
}

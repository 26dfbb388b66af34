use std::io::{self, BufRead};

use anyhow::{bail, Context};
use clap::Parser;
use holeshot_app::{
    test_utils::{MemoryBoard, MemorySerial},
    App,
};
use holeshot_core::{
    reports::SWITCH_COUNT,
    types::{Color, HoleId},
};
use smart_leds::RGB8;

/// Holeshot firmware simulator
///
/// Runs the firmware against an in-memory board with a virtual clock.
/// Every input line is either a raw serial command frame (for example
/// `OO091r`) or one of the directives `hit <ch>`, `release <ch>`, `chase`,
/// `off`, `state`, `quit`.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Virtual milliseconds that pass between ticks
    #[arg(short, long, default_value_t = 1)]
    tick_ms: u64,
    /// Ticks executed after every input line
    #[arg(short = 'n', long, default_value_t = 20)]
    ticks: u32,
}

type SimApp = App<MemoryBoard, MemorySerial>;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut app = App::new(MemoryBoard::new(), MemorySerial::new());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" {
            break;
        }

        apply(&mut app, input)?;
        for _ in 0..cli.ticks {
            app.board_mut().advance(cli.tick_ms);
            app.tick()?;
        }

        let sent = app.serial_mut().take_sent();
        if !sent.is_empty() {
            println!("<- {}", String::from_utf8_lossy(&sent));
        }
    }
    Ok(())
}

fn apply(app: &mut SimApp, input: &str) -> anyhow::Result<()> {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("hit") => app.board_mut().press(channel(parts.next())?),
        Some("release") => app.board_mut().release(channel(parts.next())?),
        Some("chase") => app.play_center_chase()?,
        Some("off") => app.leds_off()?,
        Some("state") => print_state(app),
        _ => {
            log::debug!("queueing frame bytes: {input}");
            app.serial_mut().push(input.as_bytes());
        }
    }
    Ok(())
}

fn channel(arg: Option<&str>) -> anyhow::Result<usize> {
    let channel: usize = arg
        .context("missing channel number")?
        .parse()
        .context("channel is not a number")?;
    if channel >= SWITCH_COUNT {
        bail!("channel must be below {SWITCH_COUNT}");
    }
    Ok(channel)
}

fn print_state(app: &SimApp) {
    println!("bonus mode: {}", app.is_bonus_active());
    for id in HoleId::FIRST..=HoleId::LAST {
        let hole = HoleId::new(id).expect("id range is static");
        match hole.segments().first() {
            Some(range) => {
                let pixel = app.leds().strip(range.strip)[range.start];
                println!("hole {id:>2}: {}", color_name(pixel));
            }
            None => println!("hole {id:>2}: (no pixels)"),
        }
    }
}

fn color_name(pixel: RGB8) -> &'static str {
    for (color, name) in [
        (Color::Green, "green"),
        (Color::Blue, "blue"),
        (Color::Red, "red"),
        (Color::Yellow, "yellow"),
        (Color::Black, "off"),
    ] {
        if color.rgb() == pixel {
            return name;
        }
    }
    "unknown"
}

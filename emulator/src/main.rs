mod board;
mod transcript;

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use board::TerminalBoard;
use simon_core::power::enter_low_power;
use simon_core::telemetry::{GameEvent, TelemetrySink};
use simon_core::{Game, PatternRng, Wake};
use transcript::Transcript;

const USAGE: &str = "Usage: simon-emulator [--transcript <path>] [--seed <byte>]";

#[derive(Debug, Default, Eq, PartialEq)]
struct Options {
    transcript: Option<PathBuf>,
    seed: Option<u8>,
}

fn main() -> io::Result<()> {
    let options = parse_options(env::args().skip(1)).unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("{USAGE}");
        process::exit(2);
    });

    let mut transcript = Transcript::open(options.transcript.as_deref())?;
    let mut board = TerminalBoard::new(options.seed.unwrap_or_else(power_on_noise))?;
    board.print_line("Simon emulator ready. Keys 1-4 press S2-S5, q quits.");

    loop {
        let mut game = Game::new(<PatternRng>::default());
        loop {
            let phase = game.advance(&mut board, &mut transcript);
            echo(&mut board, &mut transcript)?;
            if phase.is_terminal() {
                break;
            }
        }

        let Wake = enter_low_power(&mut board);
        transcript.record(GameEvent::Woke);
        echo(&mut board, &mut transcript)?;
    }
}

/// Copies fresh transcript lines to the console and surfaces I/O errors.
fn echo(board: &mut TerminalBoard, transcript: &mut Transcript) -> io::Result<()> {
    let lines: Vec<String> = transcript.drain().collect();
    for line in &lines {
        board.print_line(line);
    }
    transcript.take_fault()?;
    board.take_fault()
}

/// Stands in for the undefined RAM contents a real board powers up with.
fn power_on_noise() -> u8 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.subsec_nanos().to_le_bytes()[0])
}

fn parse_options<I>(args: I) -> Result<Options, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        let mut value = || {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| format!("Expected value after {flag}"))
        };

        match flag.as_str() {
            "--transcript" => options.transcript = Some(PathBuf::from(value()?)),
            "--seed" => options.seed = Some(parse_seed(&value()?)?),
            other => return Err(format!("Unknown argument `{other}`")),
        }
    }
    Ok(options)
}

fn parse_seed(value: &str) -> Result<u8, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| format!("Seed `{value}` is not a byte (0-255 or 0x00-0xff)"))
}

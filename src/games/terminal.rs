use crate::error::Error;
use crate::round::{Phase, RoundController, RoundGame};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const TICK_MS: u64 = 33;
const BAR_WIDTH: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key
{
    Digit(u8),
    Colon,
    Backspace,
    Delete,
    Enter,
    Left,
    Right,
    Quit,
}

struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Drive one game screen until the player quits. Returns the number of
/// correct answers in the session.
pub fn play<G, K, R>(mut game: RoundController<G>, mut on_key: K, render: R) -> Result<u32, Error>
where
    G: RoundGame,
    K: FnMut(&mut RoundController<G>, Key, Instant),
    R: Fn(&RoundController<G>) -> Vec<String>,
{
    let mut term = TerminalGuard::enter()?;
    let mut last_draw: Option<Instant> = None;

    loop {
        let now = Instant::now();
        let mut quit = false;
        for key in poll_keys()? {
            if key == Key::Quit {
                quit = true;
                break;
            }
            on_key(&mut game, key, now);
        }
        if quit {
            break;
        }

        game.tick(now);

        if last_draw.is_none_or(|at| at.elapsed() >= Duration::from_millis(TICK_MS)) {
            draw_lines(term.stdout(), &render(&game))?;
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    game.shutdown();
    Ok(game.progress())
}

fn poll_keys() -> io::Result<Vec<Key>>
{
    let mut keys = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            let key = match code {
                KeyCode::Esc => Some(Key::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
                KeyCode::Char(':') => Some(Key::Colon),
                KeyCode::Char(ch) => ch.to_digit(10).map(|digit| Key::Digit(digit as u8)),
                KeyCode::Backspace => Some(Key::Backspace),
                KeyCode::Delete => Some(Key::Delete),
                KeyCode::Enter => Some(Key::Enter),
                KeyCode::Left => Some(Key::Left),
                KeyCode::Right => Some(Key::Right),
                _ => None,
            };
            keys.extend(key);
        }
    }
    Ok(keys)
}

fn draw_lines(stdout: &mut Stdout, lines: &[String]) -> io::Result<()>
{
    let output = format!("{}\r\n", lines.join("\r\n"));
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    stdout.write_all(output.as_bytes())?;
    stdout.flush()
}

pub fn progress_bar(percent: u32) -> String
{
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        percent.min(100)
    )
}

/// Feedback banner: green for a correct answer, red otherwise.
pub fn feedback_line(phase: Phase, feedback: Option<&str>) -> String
{
    match feedback {
        None => String::new(),
        Some(message) => {
            let (r, g, b) = match phase {
                Phase::Correct => (0, 150, 70),
                Phase::Incorrect | Phase::Playing => (150, 40, 40),
            };
            format!("\x1b[48;2;{r};{g};{b}m {message} \x1b[0m")
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn bar_fills_proportionally()
    {
        assert_eq!(progress_bar(0), format!("[{}]   0%", " ".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100), format!("[{}] 100%", "#".repeat(BAR_WIDTH)));
        assert!(progress_bar(50).starts_with(&format!("[{}", "#".repeat(BAR_WIDTH / 2))));
        assert_eq!(progress_bar(250), progress_bar(100));
    }

    #[test]
    fn feedback_is_blank_without_message()
    {
        assert_eq!(feedback_line(Phase::Playing, None), "");
        assert!(feedback_line(Phase::Correct, Some("Correct!")).contains("Correct!"));
    }
}

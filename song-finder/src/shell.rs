use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use eyre::WrapErr;
use models::{Bucket, Direction};
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::debounce::Debouncer;
use crate::render;
use crate::session::{Screen, Session};

pub const HELP: &str = "\
Type to search (results appear after a short pause), or use a command:
  /search <words>   search right away
  /letter <L>       browse artists under a letter (# for digits and symbols)
  /artist <N|name>  open an artist (N = position on the current page)
  /next, /prev      change page
  /close            close the song list
  /lucky            three random songs
  /resize <px>      change the viewport width
  /show             redraw the current panel
  /help, /quit
";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Search-as-you-type input, debounced.
    Type(String),
    Search(String),
    Letter(Bucket),
    Artist(String),
    Page(Direction),
    Close,
    Lucky,
    Resize(u32),
    Show,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Type(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(arg.to_string())),
            "letter" | "l" => arg
                .parse::<Bucket>()
                .map(Self::Letter)
                .map_err(|e| e.to_string()),
            "artist" | "a" if !arg.is_empty() => Ok(Self::Artist(arg.to_string())),
            "artist" | "a" => Err("usage: /artist <N|name>".to_string()),
            "next" | "prev" | "previous" => name
                .parse::<Direction>()
                .map(Self::Page)
                .map_err(|e| e.to_string()),
            "close" => Ok(Self::Close),
            "lucky" => Ok(Self::Lucky),
            "resize" => arg
                .parse::<u32>()
                .map(Self::Resize)
                .map_err(|_| "usage: /resize <width in px>".to_string()),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command /{other} (try /help)")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub debounce: Duration,
    pub format: OutputFormat,
}

/// Reads commands from `input` until EOF or `/quit`, writing panels to `out`.
///
/// A pending debounced search still fires after EOF.
pub async fn run<I, W, R>(
    session: &mut Session,
    input: I,
    out: &mut W,
    options: ShellOptions,
    rng: &mut R,
) -> eyre::Result<()>
where
    I: AsyncBufRead + Unpin,
    W: Write,
    R: Rng + ?Sized,
{
    let (mut debouncer, mut queries) = Debouncer::<String>::new(options.debounce);
    let mut lines = input.lines();
    let mut input_closed = false;
    // Latest typed text whose debounced search has not been shown yet.
    let mut awaiting_query: Option<String> = None;

    if options.format == OutputFormat::Text {
        write!(out, "{HELP}").wrap_err("write help")?;
    }
    emit(out, &session.screen(), options.format)?;

    loop {
        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line.wrap_err("read input")? else {
                    input_closed = true;
                    if awaiting_query.is_some() {
                        continue;
                    }
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<ShellCommand>() {
                    Ok(command) => command,
                    Err(message) => {
                        writeln!(out, "{message}").wrap_err("write error message")?;
                        continue;
                    }
                };
                debug!(?command, "shell command");
                match command {
                    ShellCommand::Quit => break,
                    ShellCommand::Type(text) => {
                        debouncer.trigger(text.clone());
                        awaiting_query = Some(text);
                    }
                    ShellCommand::Help => write!(out, "{HELP}").wrap_err("write help")?,
                    command => {
                        // A later command supersedes typing that has not been shown yet.
                        if debouncer.cancel() {
                            debug!("pending search dropped");
                        }
                        awaiting_query = None;
                        match apply(session, command, rng) {
                            Some(screen) => emit(out, &screen, options.format)?,
                            None => writeln!(out, "No such artist").wrap_err("write error message")?,
                        }
                    }
                }
            }
            Some(query) = queries.recv() => {
                if awaiting_query.as_ref() != Some(&query) {
                    debug!(query = %query, "stale search skipped");
                    continue;
                }
                awaiting_query = None;
                emit(out, &session.query_submitted(&query), options.format)?;
            }
            else => break,
        }

        if input_closed && awaiting_query.is_none() {
            break;
        }
    }

    out.flush().wrap_err("flush output")?;
    Ok(())
}

/// Feeds one non-debounced command to the session. `None` when an artist cannot be found.
pub fn apply<R: Rng + ?Sized>(
    session: &mut Session,
    command: ShellCommand,
    rng: &mut R,
) -> Option<Screen> {
    let screen = match command {
        ShellCommand::Type(text) | ShellCommand::Search(text) => session.query_submitted(&text),
        ShellCommand::Letter(bucket) => session.letter_selected(bucket),
        ShellCommand::Artist(input) => {
            let Some(index) = session.resolve_artist(&input) else {
                warn!(artist = %input, "artist not found");
                return None;
            };
            return session.artist_selected(index);
        }
        ShellCommand::Page(direction) => session.page_changed(direction),
        ShellCommand::Close => session.close_song_list(),
        ShellCommand::Lucky => session.random_picks(rng),
        ShellCommand::Resize(width) => session.viewport_resized(width),
        ShellCommand::Show | ShellCommand::Help | ShellCommand::Quit => session.screen(),
    };
    Some(screen)
}

pub fn emit<W: Write>(out: &mut W, screen: &Screen, format: OutputFormat) -> eyre::Result<()> {
    let rendered = match format {
        OutputFormat::Text => render::text(screen),
        OutputFormat::Json => render::json(screen)? + "\n",
    };
    out.write_all(rendered.as_bytes())
        .wrap_err("write screen")?;
    if format == OutputFormat::Text {
        writeln!(out).wrap_err("write screen")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            "queen rhap".parse::<ShellCommand>(),
            Ok(ShellCommand::Type("queen rhap".to_string()))
        );
        assert_eq!(
            "/search  john lemon ".parse::<ShellCommand>(),
            Ok(ShellCommand::Search("john lemon".to_string()))
        );
        assert_eq!(
            "/letter b".parse::<ShellCommand>(),
            Ok(ShellCommand::Letter(Bucket::Letter('B')))
        );
        assert_eq!(
            "/LETTER #".parse::<ShellCommand>(),
            Ok(ShellCommand::Letter(Bucket::Symbol))
        );
        assert_eq!(
            "/artist Beatles, The".parse::<ShellCommand>(),
            Ok(ShellCommand::Artist("Beatles, The".to_string()))
        );
        assert_eq!(
            "/prev".parse::<ShellCommand>(),
            Ok(ShellCommand::Page(Direction::Prev))
        );
        assert_eq!(
            "/next".parse::<ShellCommand>(),
            Ok(ShellCommand::Page(Direction::Next))
        );
        assert_eq!(
            "/resize 640".parse::<ShellCommand>(),
            Ok(ShellCommand::Resize(640))
        );
        assert_eq!("/q".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
    }

    #[test]
    fn reports_bad_commands() {
        assert!("/letter".parse::<ShellCommand>().is_err());
        assert!("/artist".parse::<ShellCommand>().is_err());
        assert!("/resize wide".parse::<ShellCommand>().is_err());
        assert!("/dance".parse::<ShellCommand>().unwrap_err().contains("/dance"));
    }
}

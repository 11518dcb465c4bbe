use std::fmt::Write as _;

use eyre::WrapErr;
use models::SongRef;

use crate::session::{ArtistGridScreen, ResultsScreen, Screen, SongListScreen};

const COLUMN_GAP: usize = 2;

/// Plain-text rendering of a panel, ready for a terminal.
pub fn text(screen: &Screen) -> String {
    let mut out = String::new();
    match screen {
        Screen::Unavailable => {
            out.push_str("Catalog unavailable; search and browse are disabled.\n");
        }
        Screen::NoSelection { buckets } => {
            out.push_str("Browse by letter:\n");
            let line = buckets
                .iter()
                .map(|b| format!("{} ({})", b.bucket, b.artists))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(&line);
            out.push('\n');
        }
        Screen::ArtistGrid(grid) => artist_grid(&mut out, grid),
        Screen::NoArtists { bucket } => {
            let _ = writeln!(out, "No artists found under {bucket}");
        }
        Screen::SongList(list) => song_list(&mut out, list),
        Screen::SearchResults(results) => {
            let blank = results.query.as_deref().is_none_or(|q| q.is_empty());
            if !blank {
                result_list(&mut out, results);
            }
        }
        Screen::Picks(results) => result_list(&mut out, results),
    }
    out
}

/// Pretty JSON rendering of a panel.
pub fn json(screen: &Screen) -> eyre::Result<String> {
    serde_json::to_string_pretty(screen).wrap_err("serialize screen")
}

fn artist_grid(out: &mut String, grid: &ArtistGridScreen) {
    let _ = writeln!(out, "Artists under {}", grid.bucket);

    let labels = grid
        .artists
        .iter()
        .enumerate()
        .map(|(pos, artist)| format!("{:>2}. {}", pos + 1, artist.name))
        .collect::<Vec<_>>();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) + COLUMN_GAP;

    for row in labels.chunks(grid.columns.max(1)) {
        let mut line = String::new();
        for label in row {
            let _ = write!(line, "{label:<width$}");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let prev = if grid.has_prev { "[prev]" } else { "[----]" };
    let next = if grid.has_next { "[next]" } else { "[----]" };
    let _ = writeln!(
        out,
        "{prev}  Page {} of {}  {next}",
        grid.page, grid.total_pages
    );
}

fn song_list(out: &mut String, list: &SongListScreen) {
    let _ = writeln!(out, "Songs by {}", list.artist);
    for song in &list.songs {
        let _ = writeln!(out, "- {}", song.title);
        let _ = writeln!(out, "    {}", song.url);
    }
}

fn result_list(out: &mut String, results: &ResultsScreen) {
    if results.songs.is_empty() && results.remaining == 0 {
        out.push_str("No results found\n");
        return;
    }
    for song in &results.songs {
        song_line(out, song);
    }
    if results.remaining > 0 {
        let _ = writeln!(out, "And {} more...", results.remaining);
    }
}

fn song_line(out: &mut String, song: &SongRef) {
    let _ = writeln!(out, "{} - {}", song.artist, song.title);
    let _ = writeln!(out, "    {}", song.url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ArtistItem, BucketCount};
    use models::Bucket;
    use song_catalog::links::song_ref;

    fn artist(index: usize, name: &str) -> ArtistItem {
        ArtistItem {
            index,
            name: name.to_string(),
            songs: 1,
        }
    }

    #[test]
    fn grid_is_laid_out_in_rows() {
        let screen = Screen::ArtistGrid(ArtistGridScreen {
            bucket: Bucket::Letter('B'),
            columns: 2,
            artists: vec![
                artist(0, "Beatles, The"),
                artist(1, "Blur"),
                artist(2, "Beck"),
            ],
            page: 1,
            total_pages: 2,
            has_prev: false,
            has_next: true,
        });
        let expected = "\
Artists under B
 1. Beatles, The   2. Blur
 3. Beck
[----]  Page 1 of 2  [next]
";
        assert_eq!(text(&screen), expected);
    }

    #[test]
    fn empty_states_are_explicit() {
        assert_eq!(
            text(&Screen::NoArtists {
                bucket: Bucket::Letter('X')
            }),
            "No artists found under X\n"
        );
        let none = Screen::SearchResults(ResultsScreen {
            query: Some("zzz".to_string()),
            songs: Vec::new(),
            remaining: 0,
        });
        assert_eq!(text(&none), "No results found\n");
    }

    #[test]
    fn blank_query_renders_nothing() {
        let cleared = Screen::SearchResults(ResultsScreen {
            query: Some(String::new()),
            songs: Vec::new(),
            remaining: 0,
        });
        assert_eq!(text(&cleared), "");
    }

    #[test]
    fn results_mention_unshown_matches() {
        let screen = Screen::SearchResults(ResultsScreen {
            query: Some("rhap".to_string()),
            songs: vec![song_ref("Queen", "Bohemian Rhapsody")],
            remaining: 4,
        });
        let out = text(&screen);
        assert!(out.starts_with("Queen - Bohemian Rhapsody\n    https://www.youtube.com/results?search_query=Queen%20Bohemian%20Rhapsody\n"));
        assert!(out.ends_with("And 4 more...\n"));
    }

    #[test]
    fn hidden_matches_are_not_reported_as_missing() {
        let screen = Screen::SearchResults(ResultsScreen {
            query: Some("rhap".to_string()),
            songs: Vec::new(),
            remaining: 1,
        });
        assert_eq!(text(&screen), "And 1 more...\n");
    }

    #[test]
    fn song_list_has_header_and_links() {
        let screen = Screen::SongList(SongListScreen {
            artist: "Beatles, The".to_string(),
            songs: vec![song_ref("Beatles, The", "Help!")],
        });
        assert_eq!(
            text(&screen),
            "Songs by Beatles, The\n- Help!\n    https://www.youtube.com/results?search_query=Beatles%2C%20The%20Help%21\n"
        );
    }

    #[test]
    fn json_is_tagged_by_panel() {
        let screen = Screen::NoSelection {
            buckets: vec![BucketCount {
                bucket: Bucket::Symbol,
                artists: 2,
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&json(&screen).unwrap()).unwrap();
        assert_eq!(value["panel"], "no_selection");
        assert_eq!(value["buckets"][0]["bucket"], "#");
        assert_eq!(value["buckets"][0]["artists"], 2);

        let value: serde_json::Value = serde_json::from_str(&json(&Screen::Unavailable).unwrap()).unwrap();
        assert_eq!(value["panel"], "unavailable");
    }
}
